// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// API request to create a staff invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInviteRequest {
    /// The invitee's email address.
    pub email: String,
    /// The capabilities granted on completion.
    pub staff_roles: Vec<String>,
    /// The home city assigned on completion.
    pub city: String,
}

/// Invite details for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteInfo {
    /// The canonical invite identifier.
    pub invite_id: i64,
    /// The invitee's email address.
    pub email: String,
    /// The inviting admin's profile id.
    pub invited_by: String,
    /// The capabilities granted on completion.
    pub staff_roles: Vec<String>,
    /// The home city assigned on completion.
    pub city: String,
    /// The single-use token.
    pub token: String,
    /// Whether the invite has been consumed.
    pub accepted: bool,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

/// API response for a successful invite creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInviteResponse {
    /// Success indicator.
    pub success: bool,
    /// The sign-up URL carrying the invite token.
    pub invite_url: String,
    /// The created invite.
    pub invite: InviteInfo,
}

/// API response for listing invites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInvitesResponse {
    /// All invites, newest first.
    pub invites: Vec<InviteInfo>,
}

/// API response for pre-auth invite display.
///
/// Shown to the candidate before they authenticate; excludes the
/// inviter and token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateInviteResponse {
    /// The invitee's email address.
    pub email: String,
    /// The home city assigned on completion.
    pub city: String,
    /// The capabilities granted on completion.
    pub staff_roles: Vec<String>,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

/// API request to complete staff onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteOnboardingRequest {
    /// The invite token from the sign-up URL.
    pub token: String,
}

/// API response for a completed onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteOnboardingResponse {
    /// Success indicator.
    pub success: bool,
}

/// One role requirement in an event creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirementInput {
    /// The required staff role.
    pub role: String,
    /// How many staff of this role the event needs.
    pub quantity: u32,
}

/// API request to create an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Event date (ISO 8601 date).
    pub date: String,
    /// Start time (HH:MM).
    pub start_time: String,
    /// End time (HH:MM).
    pub end_time: String,
    /// Venue or address.
    pub location: String,
    /// City; used to match dispatch candidates.
    pub city: String,
    /// Optional client profile reference.
    pub client_id: Option<String>,
    /// Optional vendor profile reference.
    pub vendor_id: Option<String>,
    /// Per-role staffing requirements.
    pub role_requirements: Vec<RoleRequirementInput>,
}

/// Event details for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The canonical event identifier.
    pub event_id: i64,
    /// Event title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Event date (ISO 8601 date).
    pub date: String,
    /// Start time (HH:MM).
    pub start_time: String,
    /// End time (HH:MM).
    pub end_time: String,
    /// Venue or address.
    pub location: String,
    /// City.
    pub city: String,
    /// Optional client profile reference.
    pub client_id: Option<String>,
    /// Optional vendor profile reference.
    pub vendor_id: Option<String>,
    /// Profile id of the creator.
    pub created_by: String,
    /// Lifecycle status.
    pub status: String,
}

/// API response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    /// The canonical event identifier.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for listing events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// The visible events in date order.
    pub events: Vec<EventInfo>,
}

/// One role requirement with its declared quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirementInfo {
    /// The required staff role.
    pub role: String,
    /// How many staff of this role the event needs.
    pub quantity: u32,
}

/// API response for fetching one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventResponse {
    /// The event.
    pub event: EventInfo,
    /// Its role requirements.
    pub role_requirements: Vec<RoleRequirementInfo>,
}

/// API request to advance an event's lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventStatusRequest {
    /// The target status.
    pub status: String,
}

/// API response for an event status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventStatusResponse {
    /// The event.
    pub event_id: i64,
    /// The new status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// Slot accounting for one role of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStatusInfo {
    /// The role.
    pub role: String,
    /// Accepted dispatch requests.
    pub filled: u32,
    /// Outstanding dispatch requests.
    pub pending: u32,
    /// Slots with no accepted or pending request (clamped at zero).
    pub unfilled: u32,
    /// The declared requirement quantity.
    pub total: u32,
}

/// API response for the per-event staffing aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStaffingResponse {
    /// The event.
    pub event_id: i64,
    /// Per-role fulfillment.
    pub roles: Vec<RoleStatusInfo>,
    /// Sum of requirement quantities.
    pub total_required: u32,
    /// Sum of filled slots.
    pub total_filled: u32,
    /// Sum of pending slots.
    pub total_pending: u32,
    /// Sum of unfilled slots.
    pub total_unfilled: u32,
    /// Filled percentage; 100 for an event with nothing to fill.
    pub completion_percent: u8,
}

/// API request to issue dispatch offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDispatchRequest {
    /// The target event.
    pub event_id: i64,
    /// The role offered.
    pub staff_role: String,
    /// The candidate staff ids (must be non-empty).
    pub staff_ids: Vec<String>,
}

/// Dispatch request details for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchInfo {
    /// The canonical dispatch identifier.
    pub dispatch_id: i64,
    /// The target event.
    pub event_id: i64,
    /// The staff candidate contacted.
    pub staff_id: String,
    /// The role offered.
    pub staff_role: String,
    /// Current status.
    pub status: String,
    /// When the offer was sent (ISO 8601).
    pub sent_at: String,
    /// When the candidate responded, if they have (ISO 8601).
    pub responded_at: Option<String>,
}

/// API response for issued dispatch offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDispatchResponse {
    /// The created requests, one per candidate.
    pub dispatches: Vec<DispatchInfo>,
    /// A success message.
    pub message: String,
}

/// API request to respond to a dispatch offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondDispatchRequest {
    /// The decision: `accept` or `decline`.
    pub decision: String,
}

/// API response for a resolved dispatch offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondDispatchResponse {
    /// The updated request.
    pub dispatch: DispatchInfo,
    /// A success message.
    pub message: String,
}

/// API response for listing an event's dispatch requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDispatchesResponse {
    /// The requests, newest first.
    pub dispatches: Vec<DispatchInfo>,
}

/// One job entry in a staff member's job list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// The dispatch request.
    pub dispatch: DispatchInfo,
    /// The event it targets, if it still exists.
    pub event: Option<EventInfo>,
}

/// API response for a staff member's job list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListJobsResponse {
    /// Offers awaiting a response, newest first.
    pub pending: Vec<JobInfo>,
    /// Accepted placements, newest first.
    pub accepted: Vec<JobInfo>,
}

/// Staff directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    /// The profile id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// The capabilities this member holds.
    pub staff_roles: Vec<String>,
    /// Home city.
    pub city: String,
    /// Current availability.
    pub status: String,
}

/// API response for the staff directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStaffResponse {
    /// The matching staff members.
    pub staff: Vec<StaffInfo>,
}

/// API request to update a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStaffRequest {
    /// The capabilities this member holds.
    pub staff_roles: Vec<String>,
    /// Home city.
    pub city: String,
    /// Availability status.
    pub status: String,
}

/// API response for a staff update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStaffResponse {
    /// The updated entry.
    pub staff: StaffInfo,
    /// A success message.
    pub message: String,
}

/// API response for the eligible-candidate listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEligibleStaffResponse {
    /// Available staff in the event's city holding the role.
    pub staff: Vec<StaffInfo>,
}

/// API request to post a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageRequest {
    /// Message body.
    pub content: String,
    /// Whether this is a private (1:1) message.
    #[serde(default)]
    pub is_private: bool,
    /// Recipient of a private message.
    pub private_recipient_id: Option<String>,
}

/// Chat message details for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    /// The canonical message identifier.
    pub message_id: i64,
    /// The event this message belongs to.
    pub event_id: i64,
    /// Profile id of the sender.
    pub sender_id: String,
    /// Message body.
    pub content: String,
    /// Whether this is a private message.
    pub is_private: bool,
    /// Recipient of a private message.
    pub private_recipient_id: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// API response for posting a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageResponse {
    /// The created message.
    pub message: MessageInfo,
}

/// API response for listing an event's chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    /// Messages visible to the viewer, in creation order.
    pub messages: Vec<MessageInfo>,
}

/// API response for the admin dashboard summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummaryResponse {
    /// Events in draft.
    pub draft_events: i64,
    /// Events open for dispatch.
    pub open_events: i64,
    /// Events currently running.
    pub live_events: i64,
    /// Finished events.
    pub completed_events: i64,
    /// Staff open for offers.
    pub available_staff: i64,
    /// Staff currently placed.
    pub assigned_staff: i64,
    /// Staff not accepting offers.
    pub unavailable_staff: i64,
    /// Dispatch offers awaiting a response.
    pub pending_dispatches: i64,
    /// Unaccepted invites.
    pub open_invites: i64,
}

/// API response describing the current actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The profile id.
    pub id: String,
    /// Contact email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The profile role.
    pub role: String,
}

/// Identity-provider webhook payload.
///
/// The provider posts one of these per account or session lifecycle
/// event; unknown event types are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEventRequest {
    /// The event type, e.g. `user.created` or `session.removed`.
    pub event_type: String,
    /// The event payload.
    pub data: IdentityEventData,
}

/// Identity-provider webhook payload data.
///
/// A loose bag of fields; which ones are required depends on the event
/// type. Metadata stashed at signup time (role, city, staff roles)
/// arrives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IdentityEventData {
    /// The identity-provider account id.
    pub id: String,
    /// Contact email address.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Role metadata set during invite or sign-up.
    pub role: Option<String>,
    /// City metadata for staff accounts.
    pub city: Option<String>,
    /// Staff role metadata for staff accounts.
    pub staff_roles: Option<Vec<String>>,
    /// Session token, for session lifecycle events.
    pub session_token: Option<String>,
    /// Session expiry (ISO 8601), for `session.created`.
    pub expires_at: Option<String>,
}

/// API response for a consumed identity event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEventResponse {
    /// Success indicator.
    pub success: bool,
}

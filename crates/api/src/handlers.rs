// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the acting identity explicitly and re-reads
//! current store state before deciding the next transition. The
//! concurrency-sensitive paths (dispatch response, invite acceptance,
//! event lifecycle) delegate to the persistence layer's guarded
//! conditional updates.

use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::info;

use crewcall_domain::{
    AvailabilityStatus, DispatchDecision, DispatchRequest, DispatchStatus, Event, EventStaffing,
    EventStatus, Message, Profile, ProfileRole, RoleRequirement, StaffInvite, StaffProfile,
    StaffRole, aggregate_event_staffing, validate_dispatch_candidates, validate_event_fields,
    validate_invite_fields, validate_message_content, validate_role_requirements,
};
use crewcall_persistence::{
    DispatchRequestData, EventData, MessageData, NewEventData, Persistence, ProfileData,
    RoleRequirementData, StaffInviteData, StaffProfileData,
};

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CompleteOnboardingRequest, CompleteOnboardingResponse, CreateEventRequest,
    CreateEventResponse, CreateInviteRequest, CreateInviteResponse, DashboardSummaryResponse,
    DispatchInfo, EventInfo, EventStaffingResponse, GetEventResponse, IdentityEventRequest,
    IdentityEventResponse, InviteInfo, IssueDispatchRequest, IssueDispatchResponse, JobInfo,
    ListDispatchesResponse, ListEligibleStaffResponse, ListEventsResponse, ListInvitesResponse,
    ListJobsResponse, ListMessagesResponse, ListStaffResponse, MessageInfo, PostMessageRequest,
    PostMessageResponse, RespondDispatchRequest, RespondDispatchResponse, RoleRequirementInfo,
    RoleStatusInfo, StaffInfo, UpdateEventStatusRequest, UpdateEventStatusResponse,
    UpdateStaffRequest, UpdateStaffResponse, ValidateInviteResponse, WhoAmIResponse,
};

/// Default city applied when a staff account arrives from the identity
/// provider without city metadata.
const DEFAULT_STAFF_CITY: &str = "San Francisco";

/// Formats a timestamp as ISO 8601 for storage and responses.
fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp
        .format(&Iso8601::DEFAULT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Generates a 256-bit random invite token as lowercase hex.
fn generate_invite_token() -> String {
    (0..4)
        .map(|_| format!("{:016x}", rand::random::<u64>()))
        .collect()
}

/// Parses a staff role list from API strings into domain roles.
fn parse_staff_roles(raw: &[String]) -> Result<Vec<StaffRole>, ApiError> {
    raw.iter()
        .map(|r| StaffRole::parse(r).map_err(translate_domain_error))
        .collect()
}

fn event_to_info(event: EventData) -> EventInfo {
    EventInfo {
        event_id: event.event_id,
        title: event.title,
        description: event.description,
        date: event.event_date,
        start_time: event.start_time,
        end_time: event.end_time,
        location: event.location,
        city: event.city,
        client_id: event.client_id,
        vendor_id: event.vendor_id,
        created_by: event.created_by,
        status: event.status,
    }
}

fn dispatch_to_info(dispatch: DispatchRequestData) -> DispatchInfo {
    DispatchInfo {
        dispatch_id: dispatch.dispatch_id,
        event_id: dispatch.event_id,
        staff_id: dispatch.staff_id,
        staff_role: dispatch.staff_role,
        status: dispatch.status,
        sent_at: dispatch.sent_at,
        responded_at: dispatch.responded_at,
    }
}

fn invite_to_info(invite: StaffInviteData) -> InviteInfo {
    InviteInfo {
        invite_id: invite.invite_id,
        email: invite.email,
        invited_by: invite.invited_by,
        staff_roles: invite.staff_roles,
        city: invite.city,
        token: invite.token,
        accepted: invite.accepted,
        created_at: invite.created_at,
        expires_at: invite.expires_at,
    }
}

fn message_to_info(message: MessageData) -> MessageInfo {
    MessageInfo {
        message_id: message.message_id,
        event_id: message.event_id,
        sender_id: message.sender_id,
        content: message.content,
        is_private: message.is_private,
        private_recipient_id: message.private_recipient_id,
        created_at: message.created_at,
    }
}

/// Converts a stored requirement row into the domain type.
fn requirement_to_domain(data: &RoleRequirementData) -> Result<RoleRequirement, ApiError> {
    let role: StaffRole = StaffRole::parse(&data.role).map_err(translate_domain_error)?;
    let quantity: u32 = u32::try_from(data.quantity).map_err(|_| ApiError::Internal {
        message: format!("Negative requirement quantity for role '{}'", data.role),
    })?;
    Ok(RoleRequirement::new(role, quantity))
}

/// Converts a stored dispatch row into the domain type.
fn dispatch_to_domain(data: &DispatchRequestData) -> Result<DispatchRequest, ApiError> {
    let staff_role: StaffRole =
        StaffRole::parse(&data.staff_role).map_err(translate_domain_error)?;
    let status: DispatchStatus = data
        .status
        .parse()
        .map_err(translate_domain_error)?;
    Ok(DispatchRequest {
        dispatch_id: Some(data.dispatch_id),
        event_id: data.event_id,
        staff_id: data.staff_id.clone(),
        staff_role,
        status,
        sent_at: data.sent_at.clone(),
        responded_at: data.responded_at.clone(),
    })
}

/// Converts a stored staff profile row into the domain type.
fn staff_profile_to_domain(data: &StaffProfileData) -> Result<StaffProfile, ApiError> {
    let staff_roles: Vec<StaffRole> = parse_staff_roles(&data.staff_roles)?;
    let status: AvailabilityStatus =
        AvailabilityStatus::parse(&data.status).map_err(translate_domain_error)?;
    Ok(StaffProfile {
        id: data.id.clone(),
        staff_roles,
        city: data.city.clone(),
        status,
    })
}

/// Converts a stored event row and its requirements into the domain type.
fn event_to_domain(
    data: &EventData,
    requirements: &[RoleRequirementData],
) -> Result<Event, ApiError> {
    let status: EventStatus = EventStatus::parse(&data.status).map_err(translate_domain_error)?;
    let role_requirements: Vec<RoleRequirement> = requirements
        .iter()
        .map(requirement_to_domain)
        .collect::<Result<_, _>>()?;
    Ok(Event {
        event_id: Some(data.event_id),
        title: data.title.clone(),
        description: data.description.clone(),
        date: data.event_date.clone(),
        start_time: data.start_time.clone(),
        end_time: data.end_time.clone(),
        location: data.location.clone(),
        city: data.city.clone(),
        client_id: data.client_id.clone(),
        vendor_id: data.vendor_id.clone(),
        created_by: data.created_by.clone(),
        status,
        role_requirements,
    })
}

/// Converts a stored invite row into the domain type.
fn invite_to_domain(data: &StaffInviteData) -> Result<StaffInvite, ApiError> {
    let staff_roles: Vec<StaffRole> = parse_staff_roles(&data.staff_roles)?;
    Ok(StaffInvite {
        invite_id: Some(data.invite_id),
        email: data.email.clone(),
        invited_by: data.invited_by.clone(),
        staff_roles,
        city: data.city.clone(),
        token: data.token.clone(),
        accepted: data.accepted,
        created_at: data.created_at.clone(),
        expires_at: data.expires_at.clone(),
    })
}

/// Builds a staff directory entry by joining the directory profile.
fn staff_to_info(
    persistence: &mut Persistence,
    staff: StaffProfileData,
) -> Result<StaffInfo, ApiError> {
    let profile: Option<ProfileData> = persistence
        .get_profile(&staff.id)
        .map_err(translate_persistence_error)?;
    let (name, email) = profile.map_or_else(
        || (String::new(), String::new()),
        |p| (p.name, p.email),
    );
    Ok(StaffInfo {
        id: staff.id,
        name,
        email,
        staff_roles: staff.staff_roles,
        city: staff.city,
        status: staff.status,
    })
}

/// Fetches an event or fails with `ResourceNotFound`.
fn require_event(persistence: &mut Persistence, event_id: i64) -> Result<EventData, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {event_id} does not exist"),
        })
}

// ============================================================================
// Staff invites
// ============================================================================

/// Creates a staff invite with a fresh single-use token.
///
/// Only Admin actors may invite staff. The invite expires a fixed
/// offset after creation (`INVITE_VALIDITY`).
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The invite request
/// * `actor` - The authenticated actor performing this action
/// * `base_url` - The public base URL used to build the sign-up link
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, a field fails
/// validation, or the store rejects the insert.
pub fn create_staff_invite(
    persistence: &mut Persistence,
    request: CreateInviteRequest,
    actor: &AuthenticatedActor,
    base_url: &str,
    now: OffsetDateTime,
) -> Result<CreateInviteResponse, ApiError> {
    AuthorizationService::authorize_invite_staff(actor)?;

    let staff_roles: Vec<StaffRole> = parse_staff_roles(&request.staff_roles)?;
    validate_invite_fields(&request.email, &staff_roles, &request.city)
        .map_err(translate_domain_error)?;

    let token: String = generate_invite_token();
    let created_at: String = format_timestamp(now)?;
    let expires_at: String = format_timestamp(StaffInvite::expiry_from(now))?;

    let role_strings: Vec<String> = staff_roles
        .iter()
        .map(|r| r.as_str().to_string())
        .collect();

    let invite: StaffInviteData = persistence
        .insert_invite(
            &request.email,
            &actor.id,
            &role_strings,
            &request.city,
            &token,
            &created_at,
            &expires_at,
        )
        .map_err(translate_persistence_error)?;

    info!(email = %invite.email, invited_by = %actor.id, "Created staff invite");

    let invite_url: String = format!("{base_url}/sign-up?token={token}");
    Ok(CreateInviteResponse {
        success: true,
        invite_url,
        invite: invite_to_info(invite),
    })
}

/// Lists all staff invites, newest first.
///
/// Only Admin actors may list invites.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the query fails.
pub fn list_staff_invites(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListInvitesResponse, ApiError> {
    AuthorizationService::authorize_invite_staff(actor)?;

    let invites: Vec<InviteInfo> = persistence
        .list_invites()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(invite_to_info)
        .collect();

    Ok(ListInvitesResponse { invites })
}

/// Validates an invite token for pre-auth display.
///
/// Requires no session: the candidate sees the invite's email, city,
/// and assigned roles before authenticating.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no unaccepted invite matches the
/// token, or `InviteExpired` if it is past its expiry.
pub fn validate_invite(
    persistence: &mut Persistence,
    token: &str,
    now: OffsetDateTime,
) -> Result<ValidateInviteResponse, ApiError> {
    let invite: StaffInviteData = persistence
        .get_unaccepted_invite_by_token(token)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Invite"),
            message: String::from("No matching unaccepted invite"),
        })?;

    let domain_invite: StaffInvite = invite_to_domain(&invite)?;
    domain_invite
        .check_usable(now)
        .map_err(translate_domain_error)?;

    Ok(ValidateInviteResponse {
        email: invite.email,
        city: invite.city,
        staff_roles: invite.staff_roles,
        expires_at: invite.expires_at,
    })
}

/// Completes staff onboarding for the authenticated identity.
///
/// Re-validates the token (defense against the gap between validation
/// and completion), then atomically consumes the invite and promotes
/// the identity: role becomes staff and the staff profile is created
/// with the invite's city and roles, status available.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown or consumed token,
/// `InviteExpired` for a stale one, or a store failure.
pub fn complete_onboarding(
    persistence: &mut Persistence,
    request: &CompleteOnboardingRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<CompleteOnboardingResponse, ApiError> {
    if request.token.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("token"),
            message: String::from("Token cannot be empty"),
        });
    }

    let invite: StaffInviteData = persistence
        .get_unaccepted_invite_by_token(&request.token)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Invite"),
            message: String::from("No matching unaccepted invite"),
        })?;

    let domain_invite: StaffInvite = invite_to_domain(&invite)?;
    domain_invite
        .check_usable(now)
        .map_err(translate_domain_error)?;

    // The single-use guard inside complete_onboarding closes the
    // check-then-act gap: a concurrent completion surfaces as a
    // not-found here rather than a double acceptance.
    persistence
        .complete_onboarding(
            &request.token,
            &actor.id,
            &invite.staff_roles,
            &invite.city,
            AvailabilityStatus::Available.as_str(),
        )
        .map_err(translate_persistence_error)?;

    info!(profile_id = %actor.id, "Completed staff onboarding");

    Ok(CompleteOnboardingResponse { success: true })
}

// ============================================================================
// Events
// ============================================================================

/// Creates an event with its role requirements.
///
/// Admin and Vendor actors may create events. The event and its
/// requirements are inserted in one transaction.
///
/// # Errors
///
/// Returns an error if the actor lacks permission, a field fails
/// validation, a role requirement is duplicated, or the insert fails.
pub fn create_event(
    persistence: &mut Persistence,
    request: CreateEventRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<CreateEventResponse, ApiError> {
    AuthorizationService::authorize_create_event(actor)?;

    validate_event_fields(&request.title, &request.date, &request.location, &request.city)
        .map_err(translate_domain_error)?;

    let requirements: Vec<RoleRequirement> = request
        .role_requirements
        .iter()
        .map(|input| {
            StaffRole::parse(&input.role)
                .map(|role| RoleRequirement::new(role, input.quantity))
                .map_err(translate_domain_error)
        })
        .collect::<Result<_, _>>()?;
    validate_role_requirements(&requirements).map_err(translate_domain_error)?;

    let created_at: String = format_timestamp(now)?;
    let requirement_rows: Vec<(String, i32)> = requirements
        .iter()
        .map(|r| {
            let quantity: i32 = i32::try_from(r.quantity).map_err(|_| ApiError::InvalidInput {
                field: String::from("quantity"),
                message: format!("Quantity {} is out of range", r.quantity),
            })?;
            Ok((r.role.as_str().to_string(), quantity))
        })
        .collect::<Result<_, ApiError>>()?;

    let event_id: i64 = persistence
        .insert_event(
            &NewEventData {
                title: request.title.clone(),
                description: request.description,
                event_date: request.date,
                start_time: request.start_time,
                end_time: request.end_time,
                location: request.location,
                city: request.city,
                client_id: request.client_id,
                vendor_id: request.vendor_id,
                created_by: actor.id.clone(),
                status: EventStatus::Draft.as_str().to_string(),
                created_at,
            },
            &requirement_rows,
        )
        .map_err(translate_persistence_error)?;

    info!(event_id, title = %request.title, "Created event");

    Ok(CreateEventResponse {
        event_id,
        message: format!("Created event '{}'", request.title),
    })
}

/// Lists events visible to the actor.
///
/// Admins, clients, and vendors see every event; staff see only events
/// they hold an accepted dispatch for.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListEventsResponse, ApiError> {
    let events: Vec<EventData> = match actor.role {
        Role::Staff => persistence
            .list_events_for_staff(&actor.id)
            .map_err(translate_persistence_error)?,
        Role::Admin | Role::Client | Role::Vendor => persistence
            .list_events()
            .map_err(translate_persistence_error)?,
    };

    Ok(ListEventsResponse {
        events: events.into_iter().map(event_to_info).collect(),
    })
}

/// Retrieves one event with its role requirements.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist.
pub fn get_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<GetEventResponse, ApiError> {
    let event_data: EventData = require_event(persistence, event_id)?;
    let requirement_rows: Vec<RoleRequirementData> = persistence
        .list_role_requirements(event_id)
        .map_err(translate_persistence_error)?;

    let event: Event = event_to_domain(&event_data, &requirement_rows)?;
    let role_requirements: Vec<RoleRequirementInfo> = event
        .role_requirements
        .iter()
        .map(|requirement| RoleRequirementInfo {
            role: requirement.role.as_str().to_string(),
            quantity: requirement.quantity,
        })
        .collect();

    Ok(GetEventResponse {
        event: event_to_info(event_data),
        role_requirements,
    })
}

/// Advances an event's lifecycle status.
///
/// Only Admin actors may change status; the lifecycle moves forward
/// only, and the store-level update is guarded by the status the
/// decision was made against.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the event is missing,
/// the transition is illegal, or the status changed concurrently.
pub fn update_event_status(
    persistence: &mut Persistence,
    event_id: i64,
    request: &UpdateEventStatusRequest,
    actor: &AuthenticatedActor,
) -> Result<UpdateEventStatusResponse, ApiError> {
    AuthorizationService::authorize_update_event_status(actor)?;

    let event: EventData = require_event(persistence, event_id)?;
    let current: EventStatus = EventStatus::parse(&event.status).map_err(translate_domain_error)?;
    let target: EventStatus = EventStatus::parse(&request.status).map_err(translate_domain_error)?;

    current
        .validate_transition(target)
        .map_err(translate_domain_error)?;

    persistence
        .update_event_status(event_id, current.as_str(), target.as_str())
        .map_err(translate_persistence_error)?;

    info!(event_id, from = %current, to = %target, "Advanced event status");

    Ok(UpdateEventStatusResponse {
        event_id,
        status: target.as_str().to_string(),
        message: format!("Event moved to '{target}'"),
    })
}

/// Reports per-role and aggregate fulfillment for an event.
///
/// Pure read: folds the fulfillment accounting over the event's
/// requirements and every dispatch issued against it. An event with no
/// requirements reports complete.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the event does not exist.
pub fn get_event_staffing(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<EventStaffingResponse, ApiError> {
    require_event(persistence, event_id)?;

    let requirements: Vec<RoleRequirement> = persistence
        .list_role_requirements(event_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(requirement_to_domain)
        .collect::<Result<_, _>>()?;

    let dispatches: Vec<DispatchRequest> = persistence
        .list_dispatches_for_event(event_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(dispatch_to_domain)
        .collect::<Result<_, _>>()?;

    let staffing: EventStaffing = aggregate_event_staffing(&requirements, &dispatches);

    Ok(EventStaffingResponse {
        event_id,
        roles: staffing
            .roles
            .iter()
            .map(|r| RoleStatusInfo {
                role: r.role.as_str().to_string(),
                filled: r.status.filled,
                pending: r.status.pending,
                unfilled: r.status.unfilled,
                total: r.status.total,
            })
            .collect(),
        total_required: staffing.total_required,
        total_filled: staffing.total_filled,
        total_pending: staffing.total_pending,
        total_unfilled: staffing.total_unfilled,
        completion_percent: staffing.completion_percent(),
    })
}

// ============================================================================
// Dispatch
// ============================================================================

/// Issues dispatch offers to a set of staff candidates.
///
/// Only Admin actors may dispatch. Candidate eligibility (availability,
/// capability, city) is the caller's filtering concern; see
/// [`list_eligible_staff`]. This operation rejects only an empty set.
/// All requests land atomically.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the role is invalid,
/// the candidate set is empty, the event is missing, or the batch
/// insert fails.
pub fn issue_dispatch(
    persistence: &mut Persistence,
    request: &IssueDispatchRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<IssueDispatchResponse, ApiError> {
    AuthorizationService::authorize_issue_dispatch(actor)?;

    let staff_role: StaffRole =
        StaffRole::parse(&request.staff_role).map_err(translate_domain_error)?;
    validate_dispatch_candidates(&request.staff_ids).map_err(translate_domain_error)?;
    require_event(persistence, request.event_id)?;

    let sent_at: String = format_timestamp(now)?;
    let created: Vec<DispatchRequestData> = persistence
        .insert_dispatch_batch(
            request.event_id,
            staff_role.as_str(),
            &request.staff_ids,
            &sent_at,
        )
        .map_err(translate_persistence_error)?;

    info!(
        event_id = request.event_id,
        role = %staff_role,
        count = created.len(),
        "Issued dispatch requests"
    );

    let count: usize = created.len();
    Ok(IssueDispatchResponse {
        dispatches: created.into_iter().map(dispatch_to_info).collect(),
        message: format!("Sent {count} dispatch request(s) for role '{staff_role}'"),
    })
}

/// Lists every dispatch request issued against an event.
///
/// Only Admin actors see the full dispatch board.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the event is
/// missing.
pub fn list_event_dispatches(
    persistence: &mut Persistence,
    event_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListDispatchesResponse, ApiError> {
    AuthorizationService::authorize_issue_dispatch(actor)?;
    require_event(persistence, event_id)?;

    let dispatches: Vec<DispatchInfo> = persistence
        .list_dispatches_for_event(event_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(dispatch_to_info)
        .collect();

    Ok(ListDispatchesResponse { dispatches })
}

/// Lists staff eligible for a dispatch: available, holding the role,
/// in the event's city.
///
/// This supplies the candidate set the dispatch modal offers; the
/// issue operation itself performs no re-validation.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the role is invalid,
/// or the event is missing.
pub fn list_eligible_staff(
    persistence: &mut Persistence,
    event_id: i64,
    staff_role: &str,
    actor: &AuthenticatedActor,
) -> Result<ListEligibleStaffResponse, ApiError> {
    AuthorizationService::authorize_issue_dispatch(actor)?;

    let role: StaffRole = StaffRole::parse(staff_role).map_err(translate_domain_error)?;
    let event: EventData = require_event(persistence, event_id)?;

    let candidates: Vec<StaffProfileData> = persistence
        .list_staff_profiles(Some(&event.city), Some(AvailabilityStatus::Available.as_str()))
        .map_err(translate_persistence_error)?;

    let mut staff: Vec<StaffInfo> = Vec::new();
    for data in candidates {
        let member: StaffProfile = staff_profile_to_domain(&data)?;
        if member.is_available() && member.has_role(role) {
            staff.push(staff_to_info(persistence, data)?);
        }
    }

    Ok(ListEligibleStaffResponse { staff })
}

/// Resolves a pending dispatch offer on behalf of its staff candidate.
///
/// Only the staff member the request was sent to may respond. The
/// store-level update is conditional on the request still being
/// pending; on acceptance the staff profile is forced to assigned in
/// the same transaction.
///
/// # Errors
///
/// Returns an error if the actor is not the addressee, the request is
/// missing, the decision is invalid, or the request was already
/// handled.
pub fn respond_dispatch(
    persistence: &mut Persistence,
    dispatch_id: i64,
    request: &RespondDispatchRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<RespondDispatchResponse, ApiError> {
    AuthorizationService::authorize_respond_dispatch(actor)?;

    let decision: DispatchDecision =
        DispatchDecision::parse(&request.decision).map_err(|_| ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!(
                "Invalid decision '{}': must be 'accept' or 'decline'",
                request.decision
            ),
        })?;

    let dispatch: DispatchRequestData = persistence
        .get_dispatch(dispatch_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Dispatch request"),
            message: format!("Dispatch request {dispatch_id} does not exist"),
        })?;

    if dispatch.staff_id != actor.id {
        return Err(ApiError::Unauthorized {
            action: String::from("respond_dispatch"),
            required_role: String::from("Staff (addressee)"),
        });
    }

    // Early lifecycle check for a precise error; the guarded update
    // below remains the authority under concurrency.
    let current: DispatchStatus = dispatch.status.parse().map_err(translate_domain_error)?;
    current
        .validate_transition(decision.resolved_status())
        .map_err(translate_domain_error)?;

    let responded_at: String = format_timestamp(now)?;
    let updated: DispatchRequestData = persistence
        .respond_dispatch(
            dispatch_id,
            decision.resolved_status().as_str(),
            &responded_at,
        )
        .map_err(translate_persistence_error)?;

    info!(
        dispatch_id,
        staff_id = %actor.id,
        status = %updated.status,
        "Dispatch request resolved"
    );

    let status = updated.status.clone();
    Ok(RespondDispatchResponse {
        dispatch: dispatch_to_info(updated),
        message: format!("Dispatch request {status}"),
    })
}

/// Lists the acting staff member's job offers and placements.
///
/// # Errors
///
/// Returns an error if the actor is not Staff or the query fails.
pub fn list_jobs(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListJobsResponse, ApiError> {
    AuthorizationService::authorize_respond_dispatch(actor)?;

    let dispatches: Vec<DispatchRequestData> = persistence
        .list_dispatches_for_staff(&actor.id)
        .map_err(translate_persistence_error)?;

    let mut pending: Vec<JobInfo> = Vec::new();
    let mut accepted: Vec<JobInfo> = Vec::new();
    for dispatch in dispatches {
        let event: Option<EventInfo> = persistence
            .get_event(dispatch.event_id)
            .map_err(translate_persistence_error)?
            .map(event_to_info);
        let job = JobInfo {
            dispatch: dispatch_to_info(dispatch),
            event,
        };
        match job.dispatch.status.as_str() {
            "pending" => pending.push(job),
            "accepted" => accepted.push(job),
            _ => {}
        }
    }

    Ok(ListJobsResponse { pending, accepted })
}

// ============================================================================
// Staff directory
// ============================================================================

/// Lists the staff pool with optional city/status/role filters.
///
/// Only Admin actors may browse the directory.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or a filter value is
/// invalid.
pub fn list_staff(
    persistence: &mut Persistence,
    city: Option<&str>,
    status: Option<&str>,
    staff_role: Option<&str>,
    actor: &AuthenticatedActor,
) -> Result<ListStaffResponse, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;

    if let Some(status) = status {
        AvailabilityStatus::parse(status).map_err(translate_domain_error)?;
    }
    let role_filter: Option<StaffRole> = staff_role
        .map(|r| StaffRole::parse(r).map_err(translate_domain_error))
        .transpose()?;

    let profiles: Vec<StaffProfileData> = persistence
        .list_staff_profiles(city, status)
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|staff| {
            role_filter.is_none_or(|role| staff.staff_roles.iter().any(|r| r == role.as_str()))
        })
        .collect();

    let staff = profiles
        .into_iter()
        .map(|s| staff_to_info(persistence, s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListStaffResponse { staff })
}

/// Updates a staff member's capabilities, city, and availability.
///
/// Only Admin actors may edit the pool. This administrative edit is
/// also the only path that returns an assigned member to available.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, a field is invalid,
/// or the staff member does not exist.
pub fn update_staff(
    persistence: &mut Persistence,
    staff_id: &str,
    request: &UpdateStaffRequest,
    actor: &AuthenticatedActor,
) -> Result<UpdateStaffResponse, ApiError> {
    AuthorizationService::authorize_manage_staff(actor)?;

    let staff_roles: Vec<StaffRole> = parse_staff_roles(&request.staff_roles)?;
    if staff_roles.is_empty() {
        return Err(translate_domain_error(
            crewcall_domain::DomainError::EmptyStaffRoleSet,
        ));
    }
    let status: AvailabilityStatus =
        AvailabilityStatus::parse(&request.status).map_err(translate_domain_error)?;
    if request.city.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("city"),
            message: String::from("City cannot be empty"),
        });
    }

    let role_strings: Vec<String> = staff_roles
        .iter()
        .map(|r| r.as_str().to_string())
        .collect();

    persistence
        .update_staff_profile(staff_id, &role_strings, &request.city, status.as_str())
        .map_err(translate_persistence_error)?;

    let updated: StaffProfileData = persistence
        .get_staff_profile(staff_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Staff profile"),
            message: format!("Staff profile '{staff_id}' does not exist"),
        })?;

    info!(staff_id, "Updated staff profile");

    Ok(UpdateStaffResponse {
        staff: staff_to_info(persistence, updated)?,
        message: String::from("Staff profile updated"),
    })
}

// ============================================================================
// Event chat
// ============================================================================

/// Posts a message into an event's chat.
///
/// Any authenticated participant may post; private messages carry an
/// optional recipient and are filtered on read.
///
/// # Errors
///
/// Returns an error if the content is empty or the event is missing.
pub fn post_message(
    persistence: &mut Persistence,
    event_id: i64,
    request: &PostMessageRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<PostMessageResponse, ApiError> {
    validate_message_content(&request.content).map_err(translate_domain_error)?;
    require_event(persistence, event_id)?;

    let created_at: String = format_timestamp(now)?;
    let message: MessageData = persistence
        .insert_message(
            event_id,
            &actor.id,
            request.content.trim(),
            request.is_private,
            request.private_recipient_id.as_deref(),
            &created_at,
        )
        .map_err(translate_persistence_error)?;

    Ok(PostMessageResponse {
        message: message_to_info(message),
    })
}

/// Lists an event's chat messages visible to the viewer.
///
/// Private messages are visible only to the sender, the private
/// recipient, and admins.
///
/// # Errors
///
/// Returns an error if the event is missing or the query fails.
pub fn list_messages(
    persistence: &mut Persistence,
    event_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListMessagesResponse, ApiError> {
    require_event(persistence, event_id)?;

    let messages: Vec<MessageInfo> = persistence
        .list_messages_for_event(event_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|data| {
            let message = Message {
                message_id: Some(data.message_id),
                event_id: data.event_id,
                sender_id: data.sender_id.clone(),
                content: data.content.clone(),
                is_private: data.is_private,
                private_recipient_id: data.private_recipient_id.clone(),
                created_at: data.created_at.clone(),
            };
            message.visible_to(&actor.id, actor.is_admin())
        })
        .map(message_to_info)
        .collect();

    Ok(ListMessagesResponse { messages })
}

// ============================================================================
// Dashboard & identity
// ============================================================================

/// Reports pool-wide dashboard counts.
///
/// Only Admin actors see the summary.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or a count query
/// fails.
pub fn get_dashboard_summary(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<DashboardSummaryResponse, ApiError> {
    AuthorizationService::authorize_view_dashboard(actor)?;

    let counts = persistence
        .get_dashboard_counts()
        .map_err(translate_persistence_error)?;

    Ok(DashboardSummaryResponse {
        draft_events: counts.draft_events,
        open_events: counts.open_events,
        live_events: counts.live_events,
        completed_events: counts.completed_events,
        available_staff: counts.available_staff,
        assigned_staff: counts.assigned_staff,
        unavailable_staff: counts.unavailable_staff,
        pending_dispatches: counts.pending_dispatches,
        open_invites: counts.open_invites,
    })
}

/// Describes the current actor from its resolved profile.
#[must_use]
pub fn whoami(profile: &Profile) -> WhoAmIResponse {
    WhoAmIResponse {
        id: profile.id.clone(),
        email: profile.email.clone(),
        name: profile.name.clone(),
        role: profile.role.as_str().to_string(),
    }
}

/// Applies an identity-provider lifecycle event.
///
/// The webhook secret is checked at the server boundary; this function
/// trusts the payload. `user.*` events maintain the profile directory;
/// `session.*` events maintain the session table.
///
/// # Errors
///
/// Returns an error for an unknown event type, missing required
/// fields, or a store failure.
pub fn apply_identity_event(
    persistence: &mut Persistence,
    request: IdentityEventRequest,
    now: OffsetDateTime,
) -> Result<IdentityEventResponse, ApiError> {
    let data = request.data;
    if data.id.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("data.id"),
            message: String::from("Identity id cannot be empty"),
        });
    }

    match request.event_type.as_str() {
        "user.created" => {
            let email: String = data.email.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("data.email"),
                message: String::from("user.created requires an email"),
            })?;
            let name: String = data.name.unwrap_or_else(|| email.clone());
            // Role metadata is stashed during invite or sign-up; absent
            // metadata means a plain staff sign-up.
            let role: ProfileRole = data
                .role
                .as_deref()
                .map_or(Ok(ProfileRole::Staff), ProfileRole::parse)
                .map_err(translate_domain_error)?;

            let created_at: String = format_timestamp(now)?;
            persistence
                .insert_profile(&ProfileData {
                    id: data.id.clone(),
                    email,
                    name,
                    role: role.as_str().to_string(),
                    phone: None,
                    created_at,
                })
                .map_err(translate_persistence_error)?;

            if role == ProfileRole::Staff {
                let city: String = data
                    .city
                    .unwrap_or_else(|| DEFAULT_STAFF_CITY.to_string());
                let staff_roles: Vec<String> = data.staff_roles.unwrap_or_default();
                persistence
                    .insert_staff_profile(&StaffProfileData {
                        id: data.id.clone(),
                        staff_roles,
                        city,
                        status: AvailabilityStatus::Available.as_str().to_string(),
                    })
                    .map_err(translate_persistence_error)?;
            }

            info!(profile_id = %data.id, "Created profile from identity event");
        }
        "user.updated" => {
            let email: String = data.email.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("data.email"),
                message: String::from("user.updated requires an email"),
            })?;
            let name: String = data.name.unwrap_or_else(|| email.clone());
            let role: ProfileRole = data
                .role
                .as_deref()
                .map_or(Ok(ProfileRole::Staff), ProfileRole::parse)
                .map_err(translate_domain_error)?;

            persistence
                .update_profile_identity(&data.id, &email, &name, role.as_str())
                .map_err(translate_persistence_error)?;
        }
        "user.deleted" => {
            persistence
                .delete_profile(&data.id)
                .map_err(translate_persistence_error)?;
            info!(profile_id = %data.id, "Deleted profile from identity event");
        }
        "session.created" => {
            let session_token: String =
                data.session_token.ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("data.session_token"),
                    message: String::from("session.created requires a session token"),
                })?;
            let expires_at: String = data.expires_at.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("data.expires_at"),
                message: String::from("session.created requires an expiry"),
            })?;
            let created_at: String = format_timestamp(now)?;
            persistence
                .insert_session(&session_token, &data.id, &created_at, &expires_at)
                .map_err(translate_persistence_error)?;
        }
        "session.removed" => {
            let session_token: String =
                data.session_token.ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("data.session_token"),
                    message: String::from("session.removed requires a session token"),
                })?;
            persistence
                .delete_session_by_token(&session_token)
                .map_err(translate_persistence_error)?;
        }
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("event_type"),
                message: format!("Unknown identity event type: {other}"),
            });
        }
    }

    Ok(IdentityEventResponse { success: true })
}

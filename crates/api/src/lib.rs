// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    apply_identity_event, complete_onboarding, create_event, create_staff_invite,
    get_dashboard_summary, get_event, get_event_staffing, issue_dispatch, list_eligible_staff,
    list_event_dispatches, list_events, list_jobs, list_messages, list_staff, list_staff_invites,
    post_message, respond_dispatch, update_event_status, update_staff, validate_invite, whoami,
};
pub use request_response::{
    CompleteOnboardingRequest, CompleteOnboardingResponse, CreateEventRequest,
    CreateEventResponse, CreateInviteRequest, CreateInviteResponse, DashboardSummaryResponse,
    DispatchInfo, EventInfo, EventStaffingResponse, GetEventResponse, IdentityEventData,
    IdentityEventRequest, IdentityEventResponse, InviteInfo, IssueDispatchRequest,
    IssueDispatchResponse, JobInfo, ListDispatchesResponse, ListEligibleStaffResponse,
    ListEventsResponse, ListInvitesResponse, ListJobsResponse, ListMessagesResponse,
    ListStaffResponse, MessageInfo, PostMessageRequest, PostMessageResponse,
    RespondDispatchRequest, RespondDispatchResponse, RoleRequirementInfo, RoleRequirementInput,
    RoleStatusInfo, StaffInfo, UpdateEventStatusRequest, UpdateEventStatusResponse,
    UpdateStaffRequest, UpdateStaffResponse, ValidateInviteResponse, WhoAmIResponse,
};

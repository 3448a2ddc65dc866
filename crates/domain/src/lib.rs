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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dispatch;
mod error;
mod fulfillment;
mod invite;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dispatch::{DispatchDecision, DispatchRequest, DispatchStatus};
pub use error::DomainError;
pub use fulfillment::{
    EventStaffing, RoleFulfillment, RoleStatus, aggregate_event_staffing, compute_role_status,
};
pub use invite::{INVITE_VALIDITY, StaffInvite};

// Re-export public types
pub use types::{
    AvailabilityStatus, Event, EventStatus, Message, Profile, ProfileRole, RoleRequirement,
    StaffProfile, StaffRole,
};
pub use validation::{
    validate_dispatch_candidates, validate_event_fields, validate_invite_fields,
    validate_message_content, validate_role_requirements,
};

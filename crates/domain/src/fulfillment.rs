// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fulfillment accounting for event staffing.
//!
//! Given an event's role requirements and the dispatch requests issued
//! against it, these functions report how many slots are filled, pending,
//! or unfilled per role, and in aggregate. All functions here are pure
//! reads over in-memory data; callers fetch current rows first.

use crate::dispatch::{DispatchRequest, DispatchStatus};
use crate::types::{RoleRequirement, StaffRole};
use serde::{Deserialize, Serialize};

/// Slot accounting for one role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStatus {
    /// Accepted dispatch requests for this role.
    pub filled: u32,
    /// Outstanding (pending) dispatch requests for this role.
    pub pending: u32,
    /// Slots with no accepted or pending request. Clamped at zero:
    /// over-dispatching reports zero unfilled, never a negative count.
    pub unfilled: u32,
    /// The declared requirement quantity.
    pub total: u32,
}

/// Fulfillment status for one role of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFulfillment {
    /// The role.
    pub role: StaffRole,
    /// Slot accounting for the role.
    pub status: RoleStatus,
}

/// Aggregated fulfillment across every role requirement of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStaffing {
    /// Per-role fulfillment, in requirement order.
    pub roles: Vec<RoleFulfillment>,
    /// Sum of requirement quantities.
    pub total_required: u32,
    /// Sum of filled slots.
    pub total_filled: u32,
    /// Sum of pending slots.
    pub total_pending: u32,
    /// Sum of unfilled slots.
    pub total_unfilled: u32,
}

impl EventStaffing {
    /// Returns the filled percentage for progress-bar style reporting.
    ///
    /// An event with no required staff reports as complete (100) rather
    /// than raising a division error. Over-filled events are clamped to
    /// 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn completion_percent(&self) -> u8 {
        if self.total_required == 0 {
            return 100;
        }
        let percent: u32 = self.total_filled.saturating_mul(100) / self.total_required;
        if percent > 100 { 100 } else { percent as u8 }
    }

    /// Returns true if every required slot is filled.
    #[must_use]
    pub const fn is_fully_staffed(&self) -> bool {
        self.total_filled >= self.total_required
    }
}

/// Computes slot accounting for one role requirement.
///
/// Only dispatch requests whose role matches the requirement are counted.
/// Declined requests count toward neither filled nor pending.
///
/// # Arguments
///
/// * `requirement` - The role requirement (role, quantity)
/// * `dispatches` - Dispatch requests issued against the event
///
/// # Returns
///
/// The slot accounting: `unfilled = max(0, quantity - filled - pending)`.
#[must_use]
pub fn compute_role_status(
    requirement: &RoleRequirement,
    dispatches: &[DispatchRequest],
) -> RoleStatus {
    let mut filled: u32 = 0;
    let mut pending: u32 = 0;

    for dispatch in dispatches {
        if dispatch.staff_role != requirement.role {
            continue;
        }
        match dispatch.status {
            DispatchStatus::Accepted => filled += 1,
            DispatchStatus::Pending => pending += 1,
            DispatchStatus::Declined => {}
        }
    }

    let unfilled: u32 = requirement.quantity.saturating_sub(filled + pending);

    RoleStatus {
        filled,
        pending,
        unfilled,
        total: requirement.quantity,
    }
}

/// Folds [`compute_role_status`] over every role requirement of an event.
///
/// Roles without a declared requirement are not tracked: dispatches whose
/// role has no requirement contribute nothing to the aggregate.
///
/// # Arguments
///
/// * `requirements` - The event's role requirements
/// * `dispatches` - All dispatch requests issued against the event
#[must_use]
pub fn aggregate_event_staffing(
    requirements: &[RoleRequirement],
    dispatches: &[DispatchRequest],
) -> EventStaffing {
    let roles: Vec<RoleFulfillment> = requirements
        .iter()
        .map(|requirement| RoleFulfillment {
            role: requirement.role,
            status: compute_role_status(requirement, dispatches),
        })
        .collect();

    let total_required: u32 = roles.iter().map(|r| r.status.total).sum();
    let total_filled: u32 = roles.iter().map(|r| r.status.filled).sum();
    let total_pending: u32 = roles.iter().map(|r| r.status.pending).sum();
    let total_unfilled: u32 = roles.iter().map(|r| r.status.unfilled).sum();

    EventStaffing {
        roles,
        total_required,
        total_filled,
        total_pending,
        total_unfilled,
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dispatch request status tracking and transition logic.
//!
//! A dispatch request is an offer of a specific role at a specific event
//! sent to one staff candidate. Its status moves `pending → accepted` or
//! `pending → declined`; both outcomes are terminal. The store-level
//! implementation must enforce this with a conditional update guarded by
//! the current status, never read-then-write.

use crate::error::DomainError;
use crate::types::StaffRole;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Dispatch request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    /// Sent, awaiting a response. Initial state.
    #[default]
    Pending,
    /// The candidate accepted the offer. Terminal.
    Accepted,
    /// The candidate declined the offer. Terminal.
    Declined,
}

impl DispatchStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDispatchStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidDispatchStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to
    /// another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DispatchAlreadyResolved` if this status is
    /// terminal, or `DomainError::InvalidStatusTransition` if the target
    /// is not reachable from `Pending`.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::DispatchAlreadyResolved {
                status: self.as_str().to_string(),
            });
        }

        match new_status {
            Self::Accepted | Self::Declined => Ok(()),
            Self::Pending => Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("a request cannot return to pending"),
            }),
        }
    }
}

impl FromStr for DispatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member's decision on a pending dispatch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchDecision {
    /// Accept the offer; the staff member becomes assigned.
    Accept,
    /// Decline the offer; no side effect on the staff profile.
    Decline,
}

impl DispatchDecision {
    /// Returns the terminal status this decision resolves to.
    #[must_use]
    pub const fn resolved_status(&self) -> DispatchStatus {
        match self {
            Self::Accept => DispatchStatus::Accepted,
            Self::Decline => DispatchStatus::Declined,
        }
    }

    /// Parses a decision from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `accept` or `decline`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "accept" => Ok(Self::Accept),
            "decline" => Ok(Self::Decline),
            _ => Err(DomainError::InvalidDispatchStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// An offer of a specific role at a specific event sent to one staff
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the request has not been persisted yet.
    pub dispatch_id: Option<i64>,
    /// The target event.
    pub event_id: i64,
    /// The staff candidate contacted.
    pub staff_id: String,
    /// The role offered.
    pub staff_role: StaffRole,
    /// Current status.
    pub status: DispatchStatus,
    /// When the offer was sent (ISO 8601).
    pub sent_at: String,
    /// When the candidate responded, if they have (ISO 8601).
    pub responded_at: Option<String>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Profile role string is not recognized.
    InvalidProfileRole(String),
    /// Staff role string is not recognized.
    InvalidStaffRole(String),
    /// Availability status string is not recognized.
    InvalidAvailabilityStatus(String),
    /// Event status string is not recognized.
    InvalidEventStatus(String),
    /// Dispatch status string is not recognized.
    InvalidDispatchStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// A status transition is not permitted by lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A dispatch request has already been accepted or declined.
    DispatchAlreadyResolved {
        /// The current (terminal) status of the request.
        status: String,
    },
    /// A dispatch was issued with no candidate staff members.
    EmptyCandidateSet,
    /// Email address is empty or invalid.
    InvalidEmail(String),
    /// Event title is empty or invalid.
    InvalidTitle(String),
    /// City is empty or invalid.
    InvalidCity(String),
    /// Event location is empty or invalid.
    InvalidLocation(String),
    /// Event date is empty or invalid.
    InvalidDate(String),
    /// Message content is empty or invalid.
    InvalidContent(String),
    /// A staff invite or staff profile was given an empty role set.
    EmptyStaffRoleSet,
    /// An event declares the same role requirement twice.
    DuplicateRoleRequirement {
        /// The duplicated role.
        role: String,
    },
    /// The invite has already been accepted.
    InviteAlreadyAccepted,
    /// The invite is past its expiry timestamp.
    InviteExpired {
        /// The expiry timestamp (ISO 8601).
        expires_at: String,
    },
    /// Failed to parse a timestamp from a string.
    TimestampParseError {
        /// The invalid timestamp string.
        timestamp: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProfileRole(msg) => write!(f, "Invalid profile role: {msg}"),
            Self::InvalidStaffRole(msg) => write!(f, "Invalid staff role: {msg}"),
            Self::InvalidAvailabilityStatus(msg) => {
                write!(f, "Invalid availability status: {msg}")
            }
            Self::InvalidEventStatus(msg) => write!(f, "Invalid event status: {msg}"),
            Self::InvalidDispatchStatus { status } => {
                write!(f, "Invalid dispatch status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from '{from}' to '{to}': {reason}")
            }
            Self::DispatchAlreadyResolved { status } => {
                write!(f, "Dispatch request already handled: status is '{status}'")
            }
            Self::EmptyCandidateSet => {
                write!(f, "Dispatch requires at least one candidate staff member")
            }
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidCity(msg) => write!(f, "Invalid city: {msg}"),
            Self::InvalidLocation(msg) => write!(f, "Invalid location: {msg}"),
            Self::InvalidDate(msg) => write!(f, "Invalid date: {msg}"),
            Self::InvalidContent(msg) => write!(f, "Invalid message content: {msg}"),
            Self::EmptyStaffRoleSet => {
                write!(f, "At least one staff role must be assigned")
            }
            Self::DuplicateRoleRequirement { role } => {
                write!(f, "Role requirement for '{role}' is declared more than once")
            }
            Self::InviteAlreadyAccepted => write!(f, "Invite has already been accepted"),
            Self::InviteExpired { expires_at } => {
                write!(f, "Invite expired at {expires_at}")
            }
            Self::TimestampParseError { timestamp, error } => {
                write!(f, "Failed to parse timestamp '{timestamp}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

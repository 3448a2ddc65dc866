// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crewcall_domain::DomainError;
use crewcall_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An invite token is past its expiry.
    InviteExpired {
        /// The expiry timestamp (ISO 8601).
        expires_at: String,
    },
    /// An operation hit a state it cannot legally act on, e.g. a dispatch
    /// request that was already handled.
    InvalidState {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InviteExpired { expires_at } => {
                write!(f, "Invite expired at {expires_at}")
            }
            Self::InvalidState { message } => {
                write!(f, "Invalid state: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidProfileRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidStaffRole(msg) => ApiError::InvalidInput {
            field: String::from("staff_role"),
            message: msg,
        },
        DomainError::InvalidAvailabilityStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
        DomainError::InvalidEventStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
        DomainError::InvalidDispatchStatus { status } => ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!("Invalid dispatch status: {status}"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::InvalidState {
            message: format!("Cannot transition from '{from}' to '{to}': {reason}"),
        },
        DomainError::DispatchAlreadyResolved { status } => ApiError::InvalidState {
            message: format!("Dispatch request already handled: status is '{status}'"),
        },
        DomainError::EmptyCandidateSet => ApiError::InvalidInput {
            field: String::from("staff_ids"),
            message: String::from("Dispatch requires at least one candidate staff member"),
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidCity(msg) => ApiError::InvalidInput {
            field: String::from("city"),
            message: msg,
        },
        DomainError::InvalidLocation(msg) => ApiError::InvalidInput {
            field: String::from("location"),
            message: msg,
        },
        DomainError::InvalidDate(msg) => ApiError::InvalidInput {
            field: String::from("date"),
            message: msg,
        },
        DomainError::InvalidContent(msg) => ApiError::InvalidInput {
            field: String::from("content"),
            message: msg,
        },
        DomainError::EmptyStaffRoleSet => ApiError::InvalidInput {
            field: String::from("staff_roles"),
            message: String::from("At least one staff role must be assigned"),
        },
        DomainError::DuplicateRoleRequirement { role } => ApiError::DomainRuleViolation {
            rule: String::from("unique_role_requirement"),
            message: format!("Role requirement for '{role}' is declared more than once"),
        },
        DomainError::InviteAlreadyAccepted => ApiError::ResourceNotFound {
            resource_type: String::from("Invite"),
            message: String::from("No matching unaccepted invite"),
        },
        DomainError::InviteExpired { expires_at } => ApiError::InviteExpired { expires_at },
        DomainError::TimestampParseError { timestamp, error } => ApiError::Internal {
            message: format!("Failed to parse stored timestamp '{timestamp}': {error}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Conditional-update conflict signals become `InvalidState`; missing
/// rows become `ResourceNotFound`; everything else is a store failure
/// surfaced as `Internal` without retry.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ProfileNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Profile"),
            message: format!("Profile '{id}' does not exist"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {id} does not exist"),
        },
        PersistenceError::DispatchNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Dispatch request"),
            message: format!("Dispatch request {id} does not exist"),
        },
        PersistenceError::DispatchAlreadyResolved { status } => ApiError::InvalidState {
            message: format!("Dispatch request already handled: status is '{status}'"),
        },
        PersistenceError::EventStatusConflict { status } => ApiError::InvalidState {
            message: format!("Event status changed concurrently: now '{status}'"),
        },
        PersistenceError::InviteNotFound | PersistenceError::InviteAlreadyAccepted => {
            ApiError::ResourceNotFound {
                resource_type: String::from("Invite"),
                message: String::from("No matching unaccepted invite"),
            }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

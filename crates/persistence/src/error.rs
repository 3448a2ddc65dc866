// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested profile was not found.
    ProfileNotFound(String),
    /// The requested event was not found.
    EventNotFound(i64),
    /// The requested dispatch request was not found.
    DispatchNotFound(i64),
    /// The dispatch request was already accepted or declined.
    ///
    /// This is the conditional-update conflict signal: the guarded
    /// `status = 'pending'` update matched zero rows for an existing row.
    DispatchAlreadyResolved {
        /// The current terminal status of the request.
        status: String,
    },
    /// The event's status changed underneath a guarded lifecycle update.
    EventStatusConflict {
        /// The event's current status.
        status: String,
    },
    /// No unaccepted invite matches the given token.
    InviteNotFound,
    /// The invite was consumed between validation and acceptance.
    ///
    /// Conditional-update conflict signal for the `accepted = false`
    /// guard.
    InviteAlreadyAccepted,
    /// The requested session was not found.
    SessionNotFound(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ProfileNotFound(id) => write!(f, "Profile not found: {id}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::DispatchNotFound(id) => write!(f, "Dispatch request not found: {id}"),
            Self::DispatchAlreadyResolved { status } => {
                write!(f, "Dispatch request already handled: status is '{status}'")
            }
            Self::EventStatusConflict { status } => {
                write!(f, "Event status changed concurrently: now '{status}'")
            }
            Self::InviteNotFound => write!(f, "No matching unaccepted invite"),
            Self::InviteAlreadyAccepted => {
                write!(f, "Invite was already accepted")
            }
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

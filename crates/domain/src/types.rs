// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the role of a directory profile.
///
/// The role is set when the profile is created (by the identity intake)
/// and may be updated later, e.g. when a staff invite is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    /// Administrator with structural and dispatch authority.
    Admin,
    /// Event staff member with a staff profile.
    Staff,
    /// Client contact for an event.
    Client,
    /// Vendor contact; may create events.
    Vendor,
}

impl ProfileRole {
    /// Returns the string representation of this role.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Client => "client",
            Self::Vendor => "vendor",
        }
    }

    /// Parses a profile role from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "client" => Ok(Self::Client),
            "vendor" => Ok(Self::Vendor),
            _ => Err(DomainError::InvalidProfileRole(format!(
                "Unknown profile role: {s}"
            ))),
        }
    }
}

impl FromStr for ProfileRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a staff capability.
///
/// Staff roles are fixed domain constants. A staff member holds a set of
/// these; a dispatch request targets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Bar service.
    Bartender,
    /// Table service.
    Server,
    /// Kitchen and food prep.
    Kitchen,
    /// On-site coordination.
    Coordinator,
    /// Door and crowd security.
    Security,
}

impl StaffRole {
    /// All staff roles, in display order.
    pub const ALL: [Self; 5] = [
        Self::Bartender,
        Self::Server,
        Self::Kitchen,
        Self::Coordinator,
        Self::Security,
    ];

    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bartender => "bartender",
            Self::Server => "server",
            Self::Kitchen => "kitchen",
            Self::Coordinator => "coordinator",
            Self::Security => "security",
        }
    }

    /// Parses a staff role from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid staff role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "bartender" => Ok(Self::Bartender),
            "server" => Ok(Self::Server),
            "kitchen" => Ok(Self::Kitchen),
            "coordinator" => Ok(Self::Coordinator),
            "security" => Ok(Self::Security),
            _ => Err(DomainError::InvalidStaffRole(format!(
                "Unknown staff role: {s}"
            ))),
        }
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a staff member's availability.
///
/// Availability is the externally observable truth for "is this person
/// currently placed". Only dispatch acceptance moves a member to
/// `Assigned`; nothing moves them back to `Available` automatically.
/// That requires an administrative edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Open for dispatch offers.
    Available,
    /// Placed on an event via an accepted dispatch.
    Assigned,
    /// Not accepting offers (administrative).
    Unavailable,
}

impl AvailabilityStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
            Self::Unavailable => "unavailable",
        }
    }

    /// Parses an availability status from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "available" => Ok(Self::Available),
            "assigned" => Ok(Self::Assigned),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(DomainError::InvalidAvailabilityStatus(format!(
                "Unknown availability status: {s}"
            ))),
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of an event.
///
/// The lifecycle is forward-only: Draft → Open → Live → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Initial state after creation. Not yet visible for dispatch.
    #[default]
    Draft,
    /// Published and accepting dispatch offers.
    Open,
    /// Currently running.
    Live,
    /// Finished. Terminal state.
    Completed,
}

impl EventStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Live => "live",
            Self::Completed => "completed",
        }
    }

    /// Parses an event status from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "live" => Ok(Self::Live),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidEventStatus(format!(
                "Unknown event status: {s}"
            ))),
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Open
    /// - Open → Live
    /// - Live → Completed
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Open) | (Self::Open, Self::Live) | (Self::Live, Self::Completed)
        )
    }

    /// Validates a transition to the target status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed by the lifecycle.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: String::from("event lifecycle moves forward only"),
            })
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a directory profile.
///
/// Profiles mirror identity-provider accounts. The `id` is the opaque,
/// immutable identifier assigned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Opaque identity-provider identifier.
    pub id: String,
    /// Contact email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// The profile's role.
    pub role: ProfileRole,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// Represents the staff extension of a profile.
///
/// Exists 1:1 with a `Profile` whose role is `Staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// The owning profile's identifier.
    pub id: String,
    /// The set of staff capabilities this member holds.
    pub staff_roles: Vec<StaffRole>,
    /// Home city; dispatch candidates share the event's city.
    pub city: String,
    /// Current availability.
    pub status: AvailabilityStatus,
}

impl StaffProfile {
    /// Returns true if this member holds the given capability.
    #[must_use]
    pub fn has_role(&self, role: StaffRole) -> bool {
        self.staff_roles.contains(&role)
    }

    /// Returns true if this member is open for dispatch offers.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.status, AvailabilityStatus::Available)
    }
}

/// The declared need for N staff of a given role at an event.
///
/// Unique per (event, role); quantity may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    /// The required staff role.
    pub role: StaffRole,
    /// How many staff of this role the event needs.
    pub quantity: u32,
}

impl RoleRequirement {
    /// Creates a new `RoleRequirement`.
    #[must_use]
    pub const fn new(role: StaffRole, quantity: u32) -> Self {
        Self { role, quantity }
    }
}

/// Represents a staffed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the event has not been persisted yet.
    pub event_id: Option<i64>,
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
    /// Profile id of the creator.
    pub created_by: String,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Per-role staffing requirements.
    pub role_requirements: Vec<RoleRequirement>,
}

/// A chat message within an event.
///
/// Private messages are visible only to the sender, the private
/// recipient, and admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Canonical identifier assigned by the database.
    pub message_id: Option<i64>,
    /// The event this message belongs to.
    pub event_id: i64,
    /// Profile id of the sender.
    pub sender_id: String,
    /// Message body.
    pub content: String,
    /// Whether this is a private (1:1) message.
    pub is_private: bool,
    /// Recipient of a private message.
    pub private_recipient_id: Option<String>,
    /// Creation timestamp (ISO 8601); messages are ordered by this.
    pub created_at: String,
}

impl Message {
    /// Returns true if the given viewer may see this message.
    ///
    /// Public messages are visible to everyone with access to the event.
    /// Private messages are visible to the sender, the private recipient,
    /// and admins.
    #[must_use]
    pub fn visible_to(&self, viewer_id: &str, viewer_is_admin: bool) -> bool {
        if !self.is_private || viewer_is_admin {
            return true;
        }
        self.sender_id == viewer_id
            || self
                .private_recipient_id
                .as_deref()
                .is_some_and(|recipient| recipient == viewer_id)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Identities live with the external identity provider; this service only
//! resolves provider-issued session tokens to a typed actor and enforces
//! role checks. Every authorization decision is a pure function of
//! (actor role, requested action) — no ambient session state.

use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

use crewcall_domain::{Profile, ProfileRole};
use crewcall_persistence::Persistence;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles mirror the directory profile roles and determine what actions
/// an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: full structural and dispatch authority.
    ///
    /// Admins may manage the staff pool, create and advance events,
    /// issue dispatches, invite staff, and read every aggregate.
    Admin,
    /// Staff role: an event worker.
    ///
    /// Staff may view and respond to their own dispatch offers, see the
    /// events they are placed on, and participate in event chat.
    Staff,
    /// Client role: the party an event is run for. Read-mostly.
    Client,
    /// Vendor role: an external partner; may create events.
    Vendor,
}

impl Role {
    /// Returns the display name used in authorization errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
            Self::Client => "Client",
            Self::Vendor => "Vendor",
        }
    }
}

impl From<ProfileRole> for Role {
    fn from(role: ProfileRole) -> Self {
        match role {
            ProfileRole::Admin => Self::Admin,
            ProfileRole::Staff => Self::Staff,
            ProfileRole::Client => Self::Client,
            ProfileRole::Vendor => Self::Vendor,
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This represents an identity that has been authenticated and has
/// permission to perform certain actions based on its role. It is passed
/// explicitly into every operation; nothing reads ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The identity-provider id for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The identity-provider id for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if this actor has the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role. Each check is pure.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            })
        }
    }

    /// Checks if an actor is authorized to invite staff.
    ///
    /// Only Admin actors may create or list staff invites.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_invite_staff(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "invite_staff")
    }

    /// Checks if an actor is authorized to manage the staff pool.
    ///
    /// Only Admin actors may list or edit staff profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_staff(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_staff")
    }

    /// Checks if an actor is authorized to issue dispatch requests.
    ///
    /// Only Admin actors may dispatch staff.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_issue_dispatch(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "issue_dispatch")
    }

    /// Checks if an actor is authorized to create events.
    ///
    /// Admin and Vendor actors may create events.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has neither role.
    pub fn authorize_create_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Vendor => Ok(()),
            Role::Staff | Role::Client => Err(AuthError::Unauthorized {
                action: String::from("create_event"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to advance an event's lifecycle.
    ///
    /// Only Admin actors may change event status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_update_event_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "update_event_status")
    }

    /// Checks if an actor is authorized to respond to dispatch offers.
    ///
    /// Only Staff actors respond to offers; ownership of the specific
    /// request is checked separately by the handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Staff role.
    pub fn authorize_respond_dispatch(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Staff => Ok(()),
            Role::Admin | Role::Client | Role::Vendor => Err(AuthError::Unauthorized {
                action: String::from("respond_dispatch"),
                required_role: String::from("Staff"),
            }),
        }
    }

    /// Checks if an actor is authorized to read the dashboard summary.
    ///
    /// Only Admin actors see the pool-wide counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_view_dashboard(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_dashboard")
    }
}

/// Authentication service for provider-issued session tokens.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Validates a session token and returns the authenticated actor.
    ///
    /// The session's directory profile is resolved once here and passed
    /// explicitly to handlers as a typed [`Profile`].
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The bearer token from the request
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `profile`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, the profile
    /// is missing, or the stored role is unrecognized.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, Profile), AuthError> {
        // Retrieve session
        let session = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Check if session is expired
        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        // Retrieve the profile the session belongs to
        let profile_data = persistence
            .get_profile(&session.profile_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Profile not found for session"),
            })?;

        let role: ProfileRole = ProfileRole::parse(&profile_data.role).map_err(|_| {
            AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {}", profile_data.role),
            }
        })?;

        let profile: Profile = Profile {
            id: profile_data.id,
            email: profile_data.email,
            name: profile_data.name,
            role,
            phone: profile_data.phone,
            created_at: profile_data.created_at,
        };

        let actor: AuthenticatedActor =
            AuthenticatedActor::new(profile.id.clone(), Role::from(role));
        Ok((actor, profile))
    }

    fn map_persistence_error(err: crewcall_persistence::PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}

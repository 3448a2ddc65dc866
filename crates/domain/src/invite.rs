// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff invite lifecycle rules.
//!
//! An invite is a single-use token granting onboarding rights with a
//! pre-assigned role set and city. It transitions `accepted: false → true`
//! exactly once, only before its expiry, only via successful onboarding
//! completion. The store-level acceptance must be a conditional update
//! guarded by `accepted = false`.

use crate::error::DomainError;
use crate::types::StaffRole;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};

/// How long an invite stays valid after creation.
pub const INVITE_VALIDITY: Duration = Duration::days(7);

/// A single-use staff onboarding invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInvite {
    /// Canonical identifier assigned by the database.
    pub invite_id: Option<i64>,
    /// The invitee's email address.
    pub email: String,
    /// Profile id of the inviting admin.
    pub invited_by: String,
    /// Staff capabilities granted on completion.
    pub staff_roles: Vec<StaffRole>,
    /// Home city assigned on completion.
    pub city: String,
    /// Unique random token carried in the invite URL.
    pub token: String,
    /// Whether the invite has been consumed.
    pub accepted: bool,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Expiry timestamp (ISO 8601). Fixed forward offset from creation.
    pub expires_at: String,
}

impl StaffInvite {
    /// Computes the expiry timestamp for an invite created at `created_at`.
    #[must_use]
    pub fn expiry_from(created_at: OffsetDateTime) -> OffsetDateTime {
        created_at + INVITE_VALIDITY
    }

    /// Returns true if the invite is past its expiry at `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimestampParseError` if the stored expiry
    /// timestamp cannot be parsed.
    pub fn is_expired(&self, now: OffsetDateTime) -> Result<bool, DomainError> {
        let expires_at: OffsetDateTime = OffsetDateTime::parse(&self.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| DomainError::TimestampParseError {
                timestamp: self.expires_at.clone(),
                error: e.to_string(),
            })?;
        Ok(now > expires_at)
    }

    /// Checks that this invite can still be used at `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InviteAlreadyAccepted` if the invite has been
    /// consumed, `DomainError::InviteExpired` if it is past its expiry, or
    /// a parse error for a malformed stored timestamp.
    pub fn check_usable(&self, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.accepted {
            return Err(DomainError::InviteAlreadyAccepted);
        }
        if self.is_expired(now)? {
            return Err(DomainError::InviteExpired {
                expires_at: self.expires_at.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use time::macros::datetime;

    fn create_test_invite(accepted: bool, expires_at: &str) -> StaffInvite {
        StaffInvite {
            invite_id: Some(1),
            email: String::from("new.hire@example.com"),
            invited_by: String::from("admin-1"),
            staff_roles: vec![StaffRole::Server],
            city: String::from("San Francisco"),
            token: String::from("deadbeef"),
            accepted,
            created_at: String::from("2026-03-01T12:00:00Z"),
            expires_at: expires_at.to_string(),
        }
    }

    #[test]
    fn test_expiry_is_a_fixed_forward_offset() {
        let created = datetime!(2026-03-01 12:00:00 UTC);
        let expiry = StaffInvite::expiry_from(created);
        assert_eq!(expiry, datetime!(2026-03-08 12:00:00 UTC));
    }

    #[test]
    fn test_unaccepted_invite_before_expiry_is_usable() {
        let invite = create_test_invite(false, "2026-03-08T12:00:00Z");
        let now = datetime!(2026-03-05 00:00:00 UTC);
        assert!(invite.check_usable(now).is_ok());
    }

    #[test]
    fn test_accepted_invite_is_rejected_even_before_expiry() {
        let invite = create_test_invite(true, "2026-03-08T12:00:00Z");
        let now = datetime!(2026-03-02 00:00:00 UTC);
        assert_eq!(
            invite.check_usable(now),
            Err(DomainError::InviteAlreadyAccepted)
        );
    }

    #[test]
    fn test_expired_invite_is_rejected_even_if_unaccepted() {
        // Created at T with a 7-day expiry, validated at T+8 days.
        let invite = create_test_invite(false, "2026-03-08T12:00:00Z");
        let now = datetime!(2026-03-09 12:00:00 UTC);
        assert!(matches!(
            invite.check_usable(now),
            Err(DomainError::InviteExpired { .. })
        ));
    }

    #[test]
    fn test_exact_expiry_instant_is_still_valid() {
        let invite = create_test_invite(false, "2026-03-08T12:00:00Z");
        let now = datetime!(2026-03-08 12:00:00 UTC);
        assert!(invite.check_usable(now).is_ok());
    }

    #[test]
    fn test_malformed_expiry_surfaces_parse_error() {
        let invite = create_test_invite(false, "not-a-timestamp");
        let now = datetime!(2026-03-05 00:00:00 UTC);
        assert!(matches!(
            invite.check_usable(now),
            Err(DomainError::TimestampParseError { .. })
        ));
    }
}

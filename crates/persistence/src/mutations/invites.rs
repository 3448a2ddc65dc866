// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff invite mutations.
//!
//! Acceptance is a conditional update guarded by `accepted = 0`: the
//! single-use property holds even when validation and completion race.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::{StaffInviteData, encode_role_set};
use crate::diesel_schema::{profiles, staff_invites, staff_profiles};
use crate::error::PersistenceError;

/// Diesel Insertable struct for staff invite rows.
#[derive(Insertable)]
#[diesel(table_name = staff_invites)]
struct NewStaffInviteRow {
    email: String,
    invited_by: String,
    staff_roles: String,
    city: String,
    token: String,
    accepted: i32,
    created_at: String,
    expires_at: String,
}

backend_fn! {
/// Inserts a new unaccepted staff invite.
///
/// # Returns
///
/// The created invite with its canonical id.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate token) or
/// the role set cannot be encoded.
#[allow(clippy::too_many_arguments)]
pub fn insert_invite(
    conn: &mut _,
    email: &str,
    invited_by: &str,
    staff_roles: &[String],
    city: &str,
    token: &str,
    created_at: &str,
    expires_at: &str,
) -> Result<StaffInviteData, PersistenceError> {
    let record = NewStaffInviteRow {
        email: email.to_string(),
        invited_by: invited_by.to_string(),
        staff_roles: encode_role_set(staff_roles)?,
        city: city.to_string(),
        token: token.to_string(),
        accepted: 0,
        created_at: created_at.to_string(),
        expires_at: expires_at.to_string(),
    };

    diesel::insert_into(staff_invites::table)
        .values(&record)
        .execute(conn)?;
    let invite_id: i64 = conn.get_last_insert_rowid()?;

    Ok(StaffInviteData {
        invite_id,
        email: email.to_string(),
        invited_by: invited_by.to_string(),
        staff_roles: staff_roles.to_vec(),
        city: city.to_string(),
        token: token.to_string(),
        accepted: false,
        created_at: created_at.to_string(),
        expires_at: expires_at.to_string(),
    })
}
}

backend_fn! {
/// Marks an invite accepted with a guarded single-use update.
///
/// The update is conditional on `accepted = 0`; zero affected rows means
/// the token is unknown or the invite was consumed concurrently.
///
/// # Errors
///
/// Returns `PersistenceError::InviteNotFound` if the token matches no
/// invite, or `PersistenceError::InviteAlreadyAccepted` if the invite was
/// already consumed.
pub fn accept_invite(conn: &mut _, token: &str) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        staff_invites::table
            .filter(staff_invites::token.eq(token))
            .filter(staff_invites::accepted.eq(0)),
    )
    .set(staff_invites::accepted.eq(1))
    .execute(conn)?;

    if affected == 0 {
        let exists: Option<i64> = staff_invites::table
            .filter(staff_invites::token.eq(token))
            .select(staff_invites::invite_id)
            .first(conn)
            .optional()?;

        return match exists {
            None => Err(PersistenceError::InviteNotFound),
            Some(_) => Err(PersistenceError::InviteAlreadyAccepted),
        };
    }
    Ok(())
}
}

backend_fn! {
/// Consumes an invite and promotes the accepting identity to staff.
///
/// One transaction covers the guarded acceptance, the profile role
/// promotion, and the staff profile creation: the invite can never end
/// up consumed without the staff profile existing.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The invite token
/// * `profile_id` - The authenticated identity completing onboarding
/// * `staff_roles` - Capabilities granted by the invite
/// * `city` - City assigned by the invite
/// * `status` - Initial availability status
///
/// # Errors
///
/// Returns `PersistenceError::InviteNotFound` /
/// `PersistenceError::InviteAlreadyAccepted` on a failed single-use
/// guard, `PersistenceError::ProfileNotFound` if the identity has no
/// profile row, or any insert/update failure (everything rolls back).
pub fn complete_onboarding(
    conn: &mut _,
    token: &str,
    profile_id: &str,
    staff_roles: &[String],
    city: &str,
    status: &str,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        // Guarded single-use acceptance, same shape as accept_invite.
        let affected: usize = diesel::update(
            staff_invites::table
                .filter(staff_invites::token.eq(token))
                .filter(staff_invites::accepted.eq(0)),
        )
        .set(staff_invites::accepted.eq(1))
        .execute(conn)?;

        if affected == 0 {
            let exists: Option<i64> = staff_invites::table
                .filter(staff_invites::token.eq(token))
                .select(staff_invites::invite_id)
                .first(conn)
                .optional()?;

            return match exists {
                None => Err(PersistenceError::InviteNotFound),
                Some(_) => Err(PersistenceError::InviteAlreadyAccepted),
            };
        }

        let promoted: usize = diesel::update(profiles::table.filter(profiles::id.eq(profile_id)))
            .set(profiles::role.eq("staff"))
            .execute(conn)?;
        if promoted == 0 {
            return Err(PersistenceError::ProfileNotFound(profile_id.to_string()));
        }

        let encoded_roles: String = encode_role_set(staff_roles)?;
        let existing: Option<String> = staff_profiles::table
            .filter(staff_profiles::id.eq(profile_id))
            .select(staff_profiles::id)
            .first(conn)
            .optional()?;

        if existing.is_some() {
            diesel::update(staff_profiles::table.filter(staff_profiles::id.eq(profile_id)))
                .set((
                    staff_profiles::staff_roles.eq(&encoded_roles),
                    staff_profiles::city.eq(city),
                    staff_profiles::status.eq(status),
                ))
                .execute(conn)?;
        } else {
            diesel::insert_into(staff_profiles::table)
                .values((
                    staff_profiles::id.eq(profile_id),
                    staff_profiles::staff_roles.eq(&encoded_roles),
                    staff_profiles::city.eq(city),
                    staff_profiles::status.eq(status),
                ))
                .execute(conn)?;
        }

        Ok(())
    })
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff invite queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{StaffInviteData, decode_role_set};
use crate::diesel_schema::staff_invites;
use crate::error::PersistenceError;

/// Diesel Queryable struct for staff invite rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = staff_invites)]
pub(crate) struct StaffInviteRow {
    pub(crate) invite_id: i64,
    pub(crate) email: String,
    pub(crate) invited_by: String,
    pub(crate) staff_roles: String,
    pub(crate) city: String,
    pub(crate) token: String,
    pub(crate) accepted: i32,
    pub(crate) created_at: String,
    pub(crate) expires_at: String,
}

impl TryFrom<StaffInviteRow> for StaffInviteData {
    type Error = PersistenceError;

    fn try_from(row: StaffInviteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            invite_id: row.invite_id,
            email: row.email,
            invited_by: row.invited_by,
            staff_roles: decode_role_set(&row.staff_roles)?,
            city: row.city,
            token: row.token,
            accepted: row.accepted != 0,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }
}

backend_fn! {
/// Retrieves the unaccepted invite matching a token.
///
/// An accepted invite does not match: a consumed token behaves exactly
/// like an unknown one.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored role set
/// cannot be decoded.
/// Returns `Ok(None)` if no unaccepted invite matches.
pub fn get_unaccepted_invite_by_token(
    conn: &mut _,
    token: &str,
) -> Result<Option<StaffInviteData>, PersistenceError> {
    let result: Result<StaffInviteRow, diesel::result::Error> = staff_invites::table
        .filter(staff_invites::token.eq(token))
        .filter(staff_invites::accepted.eq(0))
        .select(StaffInviteRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(StaffInviteData::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all invites, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored role set
/// cannot be decoded.
pub fn list_invites(conn: &mut _) -> Result<Vec<StaffInviteData>, PersistenceError> {
    let rows: Vec<StaffInviteRow> = staff_invites::table
        .order(staff_invites::invite_id.desc())
        .select(StaffInviteRow::as_select())
        .load(conn)?;

    rows.into_iter().map(StaffInviteData::try_from).collect()
}
}

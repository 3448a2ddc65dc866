// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.
//!
//! Sessions are created and removed by identity-provider webhook events;
//! this service never mints credentials of its own.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Diesel Insertable struct for session rows.
#[derive(Insertable)]
#[diesel(table_name = sessions)]
struct NewSessionRow {
    session_token: String,
    profile_id: String,
    created_at: String,
    expires_at: String,
}

backend_fn! {
/// Inserts a new session row.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate token).
pub fn insert_session(
    conn: &mut _,
    session_token: &str,
    profile_id: &str,
    created_at: &str,
    expires_at: &str,
) -> Result<(), PersistenceError> {
    let record = NewSessionRow {
        session_token: session_token.to_string(),
        profile_id: profile_id.to_string(),
        created_at: created_at.to_string(),
        expires_at: expires_at.to_string(),
    };

    diesel::insert_into(sessions::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes a session by its bearer token.
///
/// Deleting a missing session is not an error; the identity provider may
/// replay removal events.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session_by_token(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Deletes all sessions whose expiry is at or before `now`.
///
/// # Returns
///
/// The number of sessions removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(conn)?,
    )
}
}

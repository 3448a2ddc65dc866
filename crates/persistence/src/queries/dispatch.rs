// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dispatch request queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::DispatchRequestData;
use crate::diesel_schema::dispatch_requests;
use crate::error::PersistenceError;

/// Diesel Queryable struct for dispatch request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = dispatch_requests)]
pub(crate) struct DispatchRequestRow {
    pub(crate) dispatch_id: i64,
    pub(crate) event_id: i64,
    pub(crate) staff_id: String,
    pub(crate) staff_role: String,
    pub(crate) status: String,
    pub(crate) sent_at: String,
    pub(crate) responded_at: Option<String>,
}

impl From<DispatchRequestRow> for DispatchRequestData {
    fn from(row: DispatchRequestRow) -> Self {
        Self {
            dispatch_id: row.dispatch_id,
            event_id: row.event_id,
            staff_id: row.staff_id,
            staff_role: row.staff_role,
            status: row.status,
            sent_at: row.sent_at,
            responded_at: row.responded_at,
        }
    }
}

backend_fn! {
/// Retrieves a dispatch request by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request is not found.
pub fn get_dispatch(
    conn: &mut _,
    dispatch_id: i64,
) -> Result<Option<DispatchRequestData>, PersistenceError> {
    let result: Result<DispatchRequestRow, diesel::result::Error> = dispatch_requests::table
        .filter(dispatch_requests::dispatch_id.eq(dispatch_id))
        .select(DispatchRequestRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(DispatchRequestData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all dispatch requests issued against an event, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_dispatches_for_event(
    conn: &mut _,
    event_id: i64,
) -> Result<Vec<DispatchRequestData>, PersistenceError> {
    let rows: Vec<DispatchRequestRow> = dispatch_requests::table
        .filter(dispatch_requests::event_id.eq(event_id))
        .order(dispatch_requests::dispatch_id.desc())
        .select(DispatchRequestRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(DispatchRequestData::from).collect())
}
}

backend_fn! {
/// Lists dispatch requests for one (event, role) pair.
///
/// This is the input set for per-role fulfillment accounting.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_dispatches_for_event_role(
    conn: &mut _,
    event_id: i64,
    staff_role: &str,
) -> Result<Vec<DispatchRequestData>, PersistenceError> {
    let rows: Vec<DispatchRequestRow> = dispatch_requests::table
        .filter(dispatch_requests::event_id.eq(event_id))
        .filter(dispatch_requests::staff_role.eq(staff_role))
        .order(dispatch_requests::dispatch_id.desc())
        .select(DispatchRequestRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(DispatchRequestData::from).collect())
}
}

backend_fn! {
/// Lists dispatch requests sent to one staff member, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_dispatches_for_staff(
    conn: &mut _,
    staff_id: &str,
) -> Result<Vec<DispatchRequestData>, PersistenceError> {
    let rows: Vec<DispatchRequestRow> = dispatch_requests::table
        .filter(dispatch_requests::staff_id.eq(staff_id))
        .order(dispatch_requests::dispatch_id.desc())
        .select(DispatchRequestRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(DispatchRequestData::from).collect())
}
}

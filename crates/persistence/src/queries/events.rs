// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and role requirement queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{EventData, RoleRequirementData};
use crate::diesel_schema::{dispatch_requests, events, role_requirements};
use crate::error::PersistenceError;
use crewcall_domain::DispatchStatus;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    title: String,
    description: Option<String>,
    event_date: String,
    start_time: String,
    end_time: String,
    location: String,
    city: String,
    client_id: Option<String>,
    vendor_id: Option<String>,
    created_by: String,
    status: String,
    created_at: String,
}

impl From<EventRow> for EventData {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            city: row.city,
            client_id: row.client_id,
            vendor_id: row.vendor_id,
            created_by: row.created_by,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for role requirement rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = role_requirements)]
struct RoleRequirementRow {
    requirement_id: i64,
    event_id: i64,
    role: String,
    quantity: i32,
}

impl From<RoleRequirementRow> for RoleRequirementData {
    fn from(row: RoleRequirementRow) -> Self {
        Self {
            requirement_id: row.requirement_id,
            event_id: row.event_id,
            role: row.role,
            quantity: row.quantity,
        }
    }
}

backend_fn! {
/// Retrieves an event by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn get_event(
    conn: &mut _,
    event_id: i64,
) -> Result<Option<EventData>, PersistenceError> {
    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists all events ordered by date, then id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_events(conn: &mut _) -> Result<Vec<EventData>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order((events::event_date.asc(), events::event_id.asc()))
        .select(EventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}
}

backend_fn! {
/// Lists events a staff member holds an accepted dispatch for.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_events_for_staff(
    conn: &mut _,
    staff_id: &str,
) -> Result<Vec<EventData>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .inner_join(dispatch_requests::table)
        .filter(dispatch_requests::staff_id.eq(staff_id))
        .filter(dispatch_requests::status.eq(DispatchStatus::Accepted.as_str()))
        .order((events::event_date.asc(), events::event_id.asc()))
        .select(EventRow::as_select())
        .distinct()
        .load(conn)?;

    Ok(rows.into_iter().map(EventData::from).collect())
}
}

backend_fn! {
/// Lists the role requirements of an event.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_role_requirements(
    conn: &mut _,
    event_id: i64,
) -> Result<Vec<RoleRequirementData>, PersistenceError> {
    let rows: Vec<RoleRequirementRow> = role_requirements::table
        .filter(role_requirements::event_id.eq(event_id))
        .order(role_requirements::requirement_id.asc())
        .select(RoleRequirementRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(RoleRequirementData::from).collect())
}
}

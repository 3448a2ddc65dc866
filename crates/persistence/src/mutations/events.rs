// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and role requirement mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::NewEventData;
use crate::diesel_schema::{events, role_requirements};
use crate::error::PersistenceError;

/// Diesel Insertable struct for event rows.
#[derive(Insertable)]
#[diesel(table_name = events)]
struct NewEventRow {
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

/// Diesel Insertable struct for role requirement rows.
#[derive(Insertable)]
#[diesel(table_name = role_requirements)]
struct NewRoleRequirementRow {
    event_id: i64,
    role: String,
    quantity: i32,
}

backend_fn! {
/// Inserts an event together with its role requirements.
///
/// The event and all requirement rows land in one transaction: either the
/// event exists with its full requirement set or not at all.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The event fields
/// * `requirements` - `(role, quantity)` pairs, pre-validated for
///   uniqueness
///
/// # Returns
///
/// The canonical event id assigned by the database.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_event(
    conn: &mut _,
    event: &NewEventData,
    requirements: &[(String, i32)],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        let record = NewEventRow {
            title: event.title.clone(),
            description: event.description.clone(),
            event_date: event.event_date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            location: event.location.clone(),
            city: event.city.clone(),
            client_id: event.client_id.clone(),
            vendor_id: event.vendor_id.clone(),
            created_by: event.created_by.clone(),
            status: event.status.clone(),
            created_at: event.created_at.clone(),
        };

        diesel::insert_into(events::table)
            .values(&record)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        let requirement_rows: Vec<NewRoleRequirementRow> = requirements
            .iter()
            .map(|(role, quantity)| NewRoleRequirementRow {
                event_id,
                role: role.clone(),
                quantity: *quantity,
            })
            .collect();

        diesel::insert_into(role_requirements::table)
            .values(&requirement_rows)
            .execute(conn)?;

        Ok(event_id)
    })
}
}

backend_fn! {
/// Advances an event's lifecycle status with a guarded update.
///
/// The update is conditional on the expected current status; zero
/// affected rows means the event is missing or its status changed
/// underneath the caller.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist,
/// or `PersistenceError::EventStatusConflict` if its status is no longer
/// `expected_status`.
pub fn update_event_status(
    conn: &mut _,
    event_id: i64,
    expected_status: &str,
    new_status: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        events::table
            .filter(events::event_id.eq(event_id))
            .filter(events::status.eq(expected_status)),
    )
    .set(events::status.eq(new_status))
    .execute(conn)?;

    if affected == 0 {
        let current: Option<String> = events::table
            .filter(events::event_id.eq(event_id))
            .select(events::status)
            .first(conn)
            .optional()?;

        return match current {
            None => Err(PersistenceError::EventNotFound(event_id)),
            Some(status) => Err(PersistenceError::EventStatusConflict { status }),
        };
    }
    Ok(())
}
}

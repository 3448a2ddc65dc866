// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dispatch request mutations.
//!
//! Dispatch issuance is a batched, all-or-nothing insert. Responding is a
//! conditional update guarded by `status = 'pending'`; two concurrent
//! responders produce exactly one winner, the other observes the
//! affected-row count of zero and surfaces an already-resolved error.
//! Read-then-write is never used on this path.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::DispatchRequestData;
use crate::diesel_schema::{dispatch_requests, staff_profiles};
use crate::error::PersistenceError;
use crate::queries::dispatch::DispatchRequestRow;
use crewcall_domain::{AvailabilityStatus, DispatchStatus};

/// Diesel Insertable struct for dispatch request rows.
#[derive(Insertable)]
#[diesel(table_name = dispatch_requests)]
struct NewDispatchRequestRow {
    event_id: i64,
    staff_id: String,
    staff_role: String,
    status: String,
    sent_at: String,
    responded_at: Option<String>,
}

backend_fn! {
/// Creates one pending dispatch request per candidate, atomically.
///
/// All rows land in one transaction: either every candidate receives a
/// pending request or none do.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The target event
/// * `staff_role` - The role offered
/// * `staff_ids` - The candidates (pre-validated non-empty)
/// * `sent_at` - The issuance timestamp (ISO 8601)
///
/// # Returns
///
/// The created requests with their canonical ids, in candidate order.
///
/// # Errors
///
/// Returns an error if any insert fails; no partial batch survives.
pub fn insert_dispatch_batch(
    conn: &mut _,
    event_id: i64,
    staff_role: &str,
    staff_ids: &[String],
    sent_at: &str,
) -> Result<Vec<DispatchRequestData>, PersistenceError> {
    conn.transaction(|conn| {
        let mut created: Vec<DispatchRequestData> = Vec::with_capacity(staff_ids.len());

        for staff_id in staff_ids {
            let record = NewDispatchRequestRow {
                event_id,
                staff_id: staff_id.clone(),
                staff_role: staff_role.to_string(),
                status: DispatchStatus::Pending.as_str().to_string(),
                sent_at: sent_at.to_string(),
                responded_at: None,
            };

            diesel::insert_into(dispatch_requests::table)
                .values(&record)
                .execute(conn)?;
            let dispatch_id: i64 = conn.get_last_insert_rowid()?;

            created.push(DispatchRequestData {
                dispatch_id,
                event_id,
                staff_id: staff_id.clone(),
                staff_role: staff_role.to_string(),
                status: DispatchStatus::Pending.as_str().to_string(),
                sent_at: sent_at.to_string(),
                responded_at: None,
            });
        }

        Ok(created)
    })
}
}

backend_fn! {
/// Resolves a pending dispatch request to accepted or declined.
///
/// The status update is conditional on `status = 'pending'`. On
/// acceptance, the staff profile is forced to `assigned` in the same
/// transaction, unconditionally; the system models a single placement
/// per staff member.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `dispatch_id` - The request to resolve
/// * `new_status` - The terminal status (`accepted` or `declined`)
/// * `responded_at` - The response timestamp (ISO 8601)
///
/// # Returns
///
/// The updated request row.
///
/// # Errors
///
/// Returns `PersistenceError::DispatchNotFound` if the request does not
/// exist, or `PersistenceError::DispatchAlreadyResolved` if it was no
/// longer pending when the guarded update ran.
pub fn respond_dispatch(
    conn: &mut _,
    dispatch_id: i64,
    new_status: &str,
    responded_at: &str,
) -> Result<DispatchRequestData, PersistenceError> {
    conn.transaction(|conn| {
        let affected: usize = diesel::update(
            dispatch_requests::table
                .filter(dispatch_requests::dispatch_id.eq(dispatch_id))
                .filter(dispatch_requests::status.eq(DispatchStatus::Pending.as_str())),
        )
        .set((
            dispatch_requests::status.eq(new_status),
            dispatch_requests::responded_at.eq(responded_at),
        ))
        .execute(conn)?;

        let row: Option<DispatchRequestRow> = dispatch_requests::table
            .filter(dispatch_requests::dispatch_id.eq(dispatch_id))
            .select(DispatchRequestRow::as_select())
            .first(conn)
            .optional()?;

        let Some(row) = row else {
            return Err(PersistenceError::DispatchNotFound(dispatch_id));
        };

        if affected == 0 {
            return Err(PersistenceError::DispatchAlreadyResolved { status: row.status });
        }

        if row.status == DispatchStatus::Accepted.as_str() {
            diesel::update(staff_profiles::table.filter(staff_profiles::id.eq(&row.staff_id)))
                .set(staff_profiles::status.eq(AvailabilityStatus::Assigned.as_str()))
                .execute(conn)?;
        }

        Ok(DispatchRequestData::from(row))
    })
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Count-only queries for the dashboard summary.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::DashboardCounts;
use crate::diesel_schema::{dispatch_requests, events, staff_invites, staff_profiles};
use crate::error::PersistenceError;
use crewcall_domain::{AvailabilityStatus, DispatchStatus, EventStatus};

backend_fn! {
/// Counts events in the given lifecycle status.
///
/// # Errors
///
/// Returns an error if the count query fails.
pub fn count_events_by_status(
    conn: &mut _,
    status: &str,
) -> Result<i64, PersistenceError> {
    Ok(events::table
        .filter(events::status.eq(status))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Counts staff profiles in the given availability status.
///
/// # Errors
///
/// Returns an error if the count query fails.
pub fn count_staff_by_status(
    conn: &mut _,
    status: &str,
) -> Result<i64, PersistenceError> {
    Ok(staff_profiles::table
        .filter(staff_profiles::status.eq(status))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Computes the dashboard summary counts.
///
/// # Errors
///
/// Returns an error if any count query fails.
pub fn get_dashboard_counts(conn: &mut _) -> Result<DashboardCounts, PersistenceError> {
    // Bodies are monomorphized per backend, so sibling generated functions
    // cannot be called from here; the count queries are inlined instead.
    let draft_events: i64 = events::table
        .filter(events::status.eq(EventStatus::Draft.as_str()))
        .count()
        .get_result(conn)?;
    let open_events: i64 = events::table
        .filter(events::status.eq(EventStatus::Open.as_str()))
        .count()
        .get_result(conn)?;
    let live_events: i64 = events::table
        .filter(events::status.eq(EventStatus::Live.as_str()))
        .count()
        .get_result(conn)?;
    let completed_events: i64 = events::table
        .filter(events::status.eq(EventStatus::Completed.as_str()))
        .count()
        .get_result(conn)?;

    let available_staff: i64 = staff_profiles::table
        .filter(staff_profiles::status.eq(AvailabilityStatus::Available.as_str()))
        .count()
        .get_result(conn)?;
    let assigned_staff: i64 = staff_profiles::table
        .filter(staff_profiles::status.eq(AvailabilityStatus::Assigned.as_str()))
        .count()
        .get_result(conn)?;
    let unavailable_staff: i64 = staff_profiles::table
        .filter(staff_profiles::status.eq(AvailabilityStatus::Unavailable.as_str()))
        .count()
        .get_result(conn)?;

    let pending_dispatches: i64 = dispatch_requests::table
        .filter(dispatch_requests::status.eq(DispatchStatus::Pending.as_str()))
        .count()
        .get_result(conn)?;

    let open_invites: i64 = staff_invites::table
        .filter(staff_invites::accepted.eq(0))
        .count()
        .get_result(conn)?;

    Ok(DashboardCounts {
        draft_events,
        open_events,
        live_events,
        completed_events,
        available_staff,
        assigned_staff,
        unavailable_staff,
        pending_dispatches,
        open_invites,
    })
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile and staff profile queries.
//!
//! This module contains backend-agnostic queries for retrieving directory
//! profiles and their staff extensions. All queries use Diesel DSL and
//! work across all supported database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{ProfileData, StaffProfileData, decode_role_set};
use crate::diesel_schema::{profiles, staff_profiles};
use crate::error::PersistenceError;

/// Diesel Queryable struct for profile rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = profiles)]
struct ProfileRow {
    id: String,
    email: String,
    name: String,
    role: String,
    phone: Option<String>,
    created_at: String,
}

impl From<ProfileRow> for ProfileData {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for staff profile rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = staff_profiles)]
struct StaffProfileRow {
    id: String,
    staff_roles: String,
    city: String,
    status: String,
}

impl TryFrom<StaffProfileRow> for StaffProfileData {
    type Error = PersistenceError;

    fn try_from(row: StaffProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            staff_roles: decode_role_set(&row.staff_roles)?,
            city: row.city,
            status: row.status,
        })
    }
}

backend_fn! {
/// Retrieves a profile by its identity-provider id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the profile is not found.
pub fn get_profile(
    conn: &mut _,
    profile_id: &str,
) -> Result<Option<ProfileData>, PersistenceError> {
    let result: Result<ProfileRow, diesel::result::Error> = profiles::table
        .filter(profiles::id.eq(profile_id))
        .select(ProfileRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(ProfileData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves a staff profile by profile id.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored role set
/// cannot be decoded.
/// Returns `Ok(None)` if no staff profile exists for the id.
pub fn get_staff_profile(
    conn: &mut _,
    profile_id: &str,
) -> Result<Option<StaffProfileData>, PersistenceError> {
    let result: Result<StaffProfileRow, diesel::result::Error> = staff_profiles::table
        .filter(staff_profiles::id.eq(profile_id))
        .select(StaffProfileRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(StaffProfileData::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists staff profiles, optionally filtered by city and/or status.
///
/// Capability (staff role) filtering happens above this layer; the role
/// set lives in a JSON column the query DSL cannot index into.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored role set
/// cannot be decoded.
pub fn list_staff_profiles(
    conn: &mut _,
    city: Option<&str>,
    status: Option<&str>,
) -> Result<Vec<StaffProfileData>, PersistenceError> {
    let mut query = staff_profiles::table
        .select(StaffProfileRow::as_select())
        .into_boxed();
    if let Some(city) = city {
        query = query.filter(staff_profiles::city.eq(city.to_string()));
    }
    if let Some(status) = status {
        query = query.filter(staff_profiles::status.eq(status.to_string()));
    }

    let rows: Vec<StaffProfileRow> = query.order(staff_profiles::id.asc()).load(conn)?;

    rows.into_iter().map(StaffProfileData::try_from).collect()
}
}

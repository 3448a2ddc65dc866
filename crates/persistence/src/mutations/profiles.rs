// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile and staff profile mutations.
//!
//! Profiles mirror identity-provider accounts; these mutations are driven
//! by the identity webhook intake and by administrative staff edits.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{ProfileData, StaffProfileData, encode_role_set};
use crate::diesel_schema::{profiles, staff_profiles};
use crate::error::PersistenceError;

/// Diesel Insertable struct for profile rows.
#[derive(Insertable)]
#[diesel(table_name = profiles)]
struct NewProfileRow {
    id: String,
    email: String,
    name: String,
    role: String,
    phone: Option<String>,
    created_at: String,
}

/// Diesel Insertable struct for staff profile rows.
#[derive(Insertable)]
#[diesel(table_name = staff_profiles)]
struct NewStaffProfileRow {
    id: String,
    staff_roles: String,
    city: String,
    status: String,
}

backend_fn! {
/// Inserts a new profile row.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate id).
pub fn insert_profile(conn: &mut _, profile: &ProfileData) -> Result<(), PersistenceError> {
    let record = NewProfileRow {
        id: profile.id.clone(),
        email: profile.email.clone(),
        name: profile.name.clone(),
        role: profile.role.clone(),
        phone: profile.phone.clone(),
        created_at: profile.created_at.clone(),
    };

    diesel::insert_into(profiles::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Updates a profile's identity fields (email, name, role).
///
/// # Errors
///
/// Returns `PersistenceError::ProfileNotFound` if no row matched.
pub fn update_profile_identity(
    conn: &mut _,
    profile_id: &str,
    email: &str,
    name: &str,
    role: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(profiles::table.filter(profiles::id.eq(profile_id)))
        .set((
            profiles::email.eq(email),
            profiles::name.eq(name),
            profiles::role.eq(role),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ProfileNotFound(profile_id.to_string()));
    }
    Ok(())
}
}

backend_fn! {
/// Updates only a profile's role.
///
/// Used when onboarding completion promotes an identity to staff.
///
/// # Errors
///
/// Returns `PersistenceError::ProfileNotFound` if no row matched.
pub fn update_profile_role(
    conn: &mut _,
    profile_id: &str,
    role: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(profiles::table.filter(profiles::id.eq(profile_id)))
        .set(profiles::role.eq(role))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ProfileNotFound(profile_id.to_string()));
    }
    Ok(())
}
}

backend_fn! {
/// Deletes a profile row.
///
/// Staff profiles and sessions cascade via foreign keys.
///
/// # Errors
///
/// Returns an error if the delete fails. Deleting a missing profile is
/// not an error; the identity provider may replay deletion events.
pub fn delete_profile(conn: &mut _, profile_id: &str) -> Result<(), PersistenceError> {
    diesel::delete(profiles::table.filter(profiles::id.eq(profile_id))).execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Inserts a new staff profile row.
///
/// # Errors
///
/// Returns an error if the insert fails or the role set cannot be
/// encoded.
pub fn insert_staff_profile(
    conn: &mut _,
    staff: &StaffProfileData,
) -> Result<(), PersistenceError> {
    let record = NewStaffProfileRow {
        id: staff.id.clone(),
        staff_roles: encode_role_set(&staff.staff_roles)?,
        city: staff.city.clone(),
        status: staff.status.clone(),
    };

    diesel::insert_into(staff_profiles::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Updates a staff member's capabilities, city, and availability.
///
/// # Errors
///
/// Returns `PersistenceError::ProfileNotFound` if no row matched.
pub fn update_staff_profile(
    conn: &mut _,
    staff_id: &str,
    staff_roles: &[String],
    city: &str,
    status: &str,
) -> Result<(), PersistenceError> {
    let encoded_roles: String = encode_role_set(staff_roles)?;

    let affected: usize =
        diesel::update(staff_profiles::table.filter(staff_profiles::id.eq(staff_id)))
            .set((
                staff_profiles::staff_roles.eq(encoded_roles),
                staff_profiles::city.eq(city),
                staff_profiles::status.eq(status),
            ))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ProfileNotFound(staff_id.to_string()));
    }
    Ok(())
}
}

backend_fn! {
/// Sets a staff member's availability status.
///
/// # Errors
///
/// Returns `PersistenceError::ProfileNotFound` if no row matched.
pub fn set_staff_status(
    conn: &mut _,
    staff_id: &str,
    status: &str,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(staff_profiles::table.filter(staff_profiles::id.eq(staff_id)))
            .set(staff_profiles::status.eq(status))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ProfileNotFound(staff_id.to_string()));
    }
    Ok(())
}
}

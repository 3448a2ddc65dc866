// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod dispatch_tests;
mod invite_tests;

use time::OffsetDateTime;
use time::macros::datetime;

use crewcall_persistence::{NewEventData, Persistence, ProfileData, StaffProfileData};

use crate::auth::{AuthenticatedActor, Role};

pub const TEST_BASE_URL: &str = "https://crewcall.example.com";

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:00:00 UTC)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn create_admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_staff_actor(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(id.to_string(), Role::Staff)
}

pub fn create_client_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("client-1"), Role::Client)
}

pub fn create_vendor_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("vendor-1"), Role::Vendor)
}

pub fn seed_profile(persistence: &mut Persistence, id: &str, role: &str) {
    persistence
        .insert_profile(&ProfileData {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: format!("Profile {id}"),
            role: role.to_string(),
            phone: None,
            created_at: String::from("2026-03-01T08:00:00Z"),
        })
        .expect("Failed to seed profile");
}

pub fn seed_staff(persistence: &mut Persistence, id: &str, city: &str, roles: &[&str]) {
    seed_profile(persistence, id, "staff");
    persistence
        .insert_staff_profile(&StaffProfileData {
            id: id.to_string(),
            staff_roles: roles.iter().map(ToString::to_string).collect(),
            city: city.to_string(),
            status: String::from("available"),
        })
        .expect("Failed to seed staff profile");
}

pub fn seed_event(
    persistence: &mut Persistence,
    created_by: &str,
    city: &str,
    requirements: &[(&str, i32)],
) -> i64 {
    let rows: Vec<(String, i32)> = requirements
        .iter()
        .map(|(role, quantity)| ((*role).to_string(), *quantity))
        .collect();
    persistence
        .insert_event(
            &NewEventData {
                title: String::from("Spring Gala"),
                description: None,
                event_date: String::from("2026-04-18"),
                start_time: String::from("18:00"),
                end_time: String::from("23:00"),
                location: String::from("Fox Theater"),
                city: city.to_string(),
                client_id: None,
                vendor_id: None,
                created_by: created_by.to_string(),
                status: String::from("open"),
                created_at: String::from("2026-03-01T08:30:00Z"),
            },
            &rows,
        )
        .expect("Failed to seed event")
}

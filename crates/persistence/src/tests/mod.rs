// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer tests.
//!
//! All tests here run against in-memory `SQLite`. MySQL/MariaDB parity is
//! validated by the `#[ignore]` tests in `backend_validation`, which run
//! only under `cargo xtask test-mariadb`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod backend_validation;
mod event_tests;

use crate::{NewEventData, Persistence, ProfileData, StaffProfileData};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn seed_admin(persistence: &mut Persistence, id: &str) {
    persistence
        .insert_profile(&ProfileData {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: String::from("Test Admin"),
            role: String::from("admin"),
            phone: None,
            created_at: String::from("2026-03-01T08:00:00Z"),
        })
        .expect("Failed to seed admin profile");
}

pub fn seed_staff(persistence: &mut Persistence, id: &str, city: &str, status: &str) {
    persistence
        .insert_profile(&ProfileData {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: String::from("Test Staff"),
            role: String::from("staff"),
            phone: None,
            created_at: String::from("2026-03-01T08:00:00Z"),
        })
        .expect("Failed to seed staff profile");
    persistence
        .insert_staff_profile(&StaffProfileData {
            id: id.to_string(),
            staff_roles: vec![String::from("server"), String::from("bartender")],
            city: city.to_string(),
            status: status.to_string(),
        })
        .expect("Failed to seed staff extension");
}

pub fn seed_event(persistence: &mut Persistence, created_by: &str) -> i64 {
    persistence
        .insert_event(
            &NewEventData {
                title: String::from("Spring Gala"),
                description: Some(String::from("Annual fundraiser")),
                event_date: String::from("2026-04-18"),
                start_time: String::from("18:00"),
                end_time: String::from("23:00"),
                location: String::from("Fox Theater"),
                city: String::from("Oakland"),
                client_id: None,
                vendor_id: None,
                created_by: created_by.to_string(),
                status: String::from("open"),
                created_at: String::from("2026-03-01T08:30:00Z"),
            },
            &[(String::from("server"), 3), (String::from("bartender"), 2)],
        )
        .expect("Failed to seed event")
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and role requirement persistence tests.

use super::{create_test_persistence, seed_admin, seed_event, seed_staff};
use crate::{Persistence, PersistenceError};

fn setup() -> (Persistence, i64) {
    let mut persistence = create_test_persistence();
    seed_admin(&mut persistence, "admin-1");
    let event_id = seed_event(&mut persistence, "admin-1");
    (persistence, event_id)
}

#[test]
fn test_insert_event_persists_requirements() {
    let (mut persistence, event_id) = setup();

    let event = persistence.get_event(event_id).unwrap().unwrap();
    assert_eq!(event.title, "Spring Gala");
    assert_eq!(event.status, "open");

    let requirements = persistence.list_role_requirements(event_id).unwrap();
    assert_eq!(requirements.len(), 2);
    assert_eq!(requirements[0].role, "server");
    assert_eq!(requirements[0].quantity, 3);
    assert_eq!(requirements[1].role, "bartender");
    assert_eq!(requirements[1].quantity, 2);
}

#[test]
fn test_duplicate_role_requirement_rolls_back_the_event() {
    let mut persistence = create_test_persistence();
    seed_admin(&mut persistence, "admin-1");

    // The (event_id, role) unique constraint rejects the second server
    // row; the event insert must roll back with it.
    let result = persistence.insert_event(
        &crate::NewEventData {
            title: String::from("Broken Event"),
            description: None,
            event_date: String::from("2026-05-01"),
            start_time: String::from("18:00"),
            end_time: String::from("23:00"),
            location: String::from("Warehouse"),
            city: String::from("Oakland"),
            client_id: None,
            vendor_id: None,
            created_by: String::from("admin-1"),
            status: String::from("draft"),
            created_at: String::from("2026-03-01T09:00:00Z"),
        },
        &[(String::from("server"), 2), (String::from("server"), 1)],
    );

    assert!(result.is_err());
    assert!(persistence.list_events().unwrap().is_empty());
}

#[test]
fn test_update_event_status_with_matching_guard() {
    let (mut persistence, event_id) = setup();

    persistence
        .update_event_status(event_id, "open", "live")
        .unwrap();

    let event = persistence.get_event(event_id).unwrap().unwrap();
    assert_eq!(event.status, "live");
}

#[test]
fn test_update_event_status_with_stale_guard_conflicts() {
    let (mut persistence, event_id) = setup();

    persistence
        .update_event_status(event_id, "open", "live")
        .unwrap();

    let result = persistence.update_event_status(event_id, "open", "live");
    assert!(matches!(
        result,
        Err(PersistenceError::EventStatusConflict { ref status }) if status == "live"
    ));
}

#[test]
fn test_update_missing_event_is_not_found() {
    let (mut persistence, _event_id) = setup();
    let result = persistence.update_event_status(404, "open", "live");
    assert!(matches!(result, Err(PersistenceError::EventNotFound(404))));
}

#[test]
fn test_list_events_for_staff_requires_accepted_dispatch() {
    let (mut persistence, event_id) = setup();
    seed_staff(&mut persistence, "staff-1", "Oakland", "available");

    let created = persistence
        .insert_dispatch_batch(
            event_id,
            "server",
            &[String::from("staff-1")],
            "2026-03-02T09:00:00Z",
        )
        .unwrap();

    // Pending dispatch does not grant event visibility.
    assert!(persistence.list_events_for_staff("staff-1").unwrap().is_empty());

    persistence
        .respond_dispatch(created[0].dispatch_id, "accepted", "2026-03-02T10:00:00Z")
        .unwrap();

    let events = persistence.list_events_for_staff("staff-1").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id, event_id);
}

#[test]
fn test_dashboard_counts() {
    let (mut persistence, event_id) = setup();
    seed_staff(&mut persistence, "staff-1", "Oakland", "available");
    seed_staff(&mut persistence, "staff-2", "Oakland", "assigned");

    persistence
        .insert_dispatch_batch(
            event_id,
            "server",
            &[String::from("staff-1")],
            "2026-03-02T09:00:00Z",
        )
        .unwrap();
    persistence
        .insert_invite(
            "new.hire@example.com",
            "admin-1",
            &[String::from("server")],
            "Oakland",
            "tok-1",
            "2026-03-01T12:00:00Z",
            "2026-03-08T12:00:00Z",
        )
        .unwrap();

    let counts = persistence.get_dashboard_counts().unwrap();
    assert_eq!(counts.open_events, 1);
    assert_eq!(counts.draft_events, 0);
    assert_eq!(counts.available_staff, 1);
    assert_eq!(counts.assigned_staff, 1);
    assert_eq!(counts.pending_dispatches, 1);
    assert_eq!(counts.open_invites, 1);
}

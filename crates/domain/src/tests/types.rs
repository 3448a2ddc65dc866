// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AvailabilityStatus, DomainError, EventStatus, Message, ProfileRole, StaffProfile, StaffRole,
};
use std::str::FromStr;

#[test]
fn test_profile_role_round_trip() {
    for role in [
        ProfileRole::Admin,
        ProfileRole::Staff,
        ProfileRole::Client,
        ProfileRole::Vendor,
    ] {
        assert_eq!(ProfileRole::parse(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_profile_role_rejects_unknown() {
    assert!(matches!(
        ProfileRole::parse("superuser"),
        Err(DomainError::InvalidProfileRole(_))
    ));
}

#[test]
fn test_staff_role_round_trip() {
    for role in StaffRole::ALL {
        assert_eq!(StaffRole::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_staff_role_rejects_unknown() {
    assert!(StaffRole::parse("sommelier").is_err());
}

#[test]
fn test_availability_status_round_trip() {
    for status in [
        AvailabilityStatus::Available,
        AvailabilityStatus::Assigned,
        AvailabilityStatus::Unavailable,
    ] {
        assert_eq!(AvailabilityStatus::parse(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_event_status_round_trip() {
    for status in [
        EventStatus::Draft,
        EventStatus::Open,
        EventStatus::Live,
        EventStatus::Completed,
    ] {
        assert_eq!(EventStatus::parse(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_event_lifecycle_moves_forward_only() {
    assert!(EventStatus::Draft.can_transition_to(EventStatus::Open));
    assert!(EventStatus::Open.can_transition_to(EventStatus::Live));
    assert!(EventStatus::Live.can_transition_to(EventStatus::Completed));

    // Backward and skipping transitions are rejected.
    assert!(!EventStatus::Open.can_transition_to(EventStatus::Draft));
    assert!(!EventStatus::Draft.can_transition_to(EventStatus::Live));
    assert!(!EventStatus::Completed.can_transition_to(EventStatus::Draft));
    assert!(!EventStatus::Live.can_transition_to(EventStatus::Open));
}

#[test]
fn test_event_lifecycle_validate_transition_error() {
    let result = EventStatus::Completed.validate_transition(EventStatus::Open);
    assert!(matches!(
        result,
        Err(DomainError::InvalidStatusTransition { .. })
    ));
    assert!(EventStatus::Completed.is_terminal());
}

fn create_test_staff(status: AvailabilityStatus) -> StaffProfile {
    StaffProfile {
        id: String::from("staff-1"),
        staff_roles: vec![StaffRole::Server, StaffRole::Bartender],
        city: String::from("Oakland"),
        status,
    }
}

#[test]
fn test_staff_profile_has_role() {
    let staff = create_test_staff(AvailabilityStatus::Available);
    assert!(staff.has_role(StaffRole::Server));
    assert!(staff.has_role(StaffRole::Bartender));
    assert!(!staff.has_role(StaffRole::Security));
}

#[test]
fn test_staff_profile_availability() {
    assert!(create_test_staff(AvailabilityStatus::Available).is_available());
    assert!(!create_test_staff(AvailabilityStatus::Assigned).is_available());
    assert!(!create_test_staff(AvailabilityStatus::Unavailable).is_available());
}

fn create_test_message(is_private: bool, recipient: Option<&str>) -> Message {
    Message {
        message_id: Some(1),
        event_id: 10,
        sender_id: String::from("staff-1"),
        content: String::from("Running 10 minutes late"),
        is_private,
        private_recipient_id: recipient.map(ToString::to_string),
        created_at: String::from("2026-03-01T09:00:00Z"),
    }
}

#[test]
fn test_public_message_visible_to_anyone() {
    let message = create_test_message(false, None);
    assert!(message.visible_to("staff-2", false));
    assert!(message.visible_to("anyone", false));
}

#[test]
fn test_private_message_visible_to_sender_recipient_and_admin() {
    let message = create_test_message(true, Some("staff-2"));
    assert!(message.visible_to("staff-1", false)); // sender
    assert!(message.visible_to("staff-2", false)); // recipient
    assert!(message.visible_to("admin-1", true)); // admin
    assert!(!message.visible_to("staff-3", false)); // unrelated viewer
}

#[test]
fn test_private_message_without_recipient_hidden_from_others() {
    let message = create_test_message(true, None);
    assert!(message.visible_to("staff-1", false));
    assert!(!message.visible_to("staff-2", false));
}

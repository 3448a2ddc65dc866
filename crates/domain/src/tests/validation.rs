// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, RoleRequirement, StaffRole, validate_dispatch_candidates, validate_event_fields,
    validate_invite_fields, validate_message_content, validate_role_requirements,
};

#[test]
fn test_validate_event_fields_accepts_valid_event() {
    let result = validate_event_fields(
        "Spring Gala",
        "2026-04-18",
        "Fox Theater",
        "Oakland",
    );
    assert!(result.is_ok());
}

#[test]
fn test_validate_event_fields_rejects_empty_title() {
    let result = validate_event_fields("", "2026-04-18", "Fox Theater", "Oakland");
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_validate_event_fields_rejects_whitespace_location() {
    let result = validate_event_fields("Spring Gala", "2026-04-18", "   ", "Oakland");
    assert!(matches!(result, Err(DomainError::InvalidLocation(_))));
}

#[test]
fn test_validate_event_fields_rejects_empty_city() {
    let result = validate_event_fields("Spring Gala", "2026-04-18", "Fox Theater", "");
    assert!(matches!(result, Err(DomainError::InvalidCity(_))));
}

#[test]
fn test_validate_event_fields_rejects_empty_date() {
    let result = validate_event_fields("Spring Gala", "", "Fox Theater", "Oakland");
    assert!(matches!(result, Err(DomainError::InvalidDate(_))));
}

#[test]
fn test_role_requirements_must_be_unique_per_role() {
    let requirements = vec![
        RoleRequirement::new(StaffRole::Server, 3),
        RoleRequirement::new(StaffRole::Bartender, 2),
        RoleRequirement::new(StaffRole::Server, 1),
    ];
    let result = validate_role_requirements(&requirements);
    assert!(matches!(
        result,
        Err(DomainError::DuplicateRoleRequirement { .. })
    ));
}

#[test]
fn test_role_requirements_accepts_distinct_roles() {
    let requirements = vec![
        RoleRequirement::new(StaffRole::Server, 3),
        RoleRequirement::new(StaffRole::Bartender, 0),
    ];
    assert!(validate_role_requirements(&requirements).is_ok());
}

#[test]
fn test_validate_invite_fields_accepts_valid_invite() {
    let result = validate_invite_fields(
        "new.hire@example.com",
        &[StaffRole::Server],
        "San Francisco",
    );
    assert!(result.is_ok());
}

#[test]
fn test_validate_invite_fields_rejects_empty_email() {
    let result = validate_invite_fields("", &[StaffRole::Server], "San Francisco");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_invite_fields_rejects_email_without_at() {
    let result = validate_invite_fields("not-an-email", &[StaffRole::Server], "San Francisco");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_invite_fields_rejects_empty_role_set() {
    let result = validate_invite_fields("new.hire@example.com", &[], "San Francisco");
    assert_eq!(result, Err(DomainError::EmptyStaffRoleSet));
}

#[test]
fn test_validate_invite_fields_rejects_empty_city() {
    let result = validate_invite_fields("new.hire@example.com", &[StaffRole::Server], "");
    assert!(matches!(result, Err(DomainError::InvalidCity(_))));
}

#[test]
fn test_empty_candidate_set_is_rejected() {
    let result = validate_dispatch_candidates(&[]);
    assert_eq!(result, Err(DomainError::EmptyCandidateSet));
}

#[test]
fn test_nonempty_candidate_set_is_accepted() {
    let candidates = vec![String::from("staff-1"), String::from("staff-2")];
    assert!(validate_dispatch_candidates(&candidates).is_ok());
}

#[test]
fn test_message_content_must_not_be_blank() {
    assert!(validate_message_content("On my way").is_ok());
    assert!(matches!(
        validate_message_content("   "),
        Err(DomainError::InvalidContent(_))
    ));
}

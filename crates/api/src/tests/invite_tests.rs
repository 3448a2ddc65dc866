// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invite lifecycle tests at the API boundary.

use time::Duration;

use crate::error::ApiError;
use crate::handlers::{
    complete_onboarding, create_staff_invite, list_staff_invites, validate_invite,
};
use crate::request_response::{CompleteOnboardingRequest, CreateInviteRequest};
use crate::tests::{
    TEST_BASE_URL, create_admin_actor, create_staff_actor, create_test_persistence, seed_profile,
    test_now,
};
use crewcall_persistence::Persistence;

fn create_invite(persistence: &mut Persistence) -> String {
    seed_profile(persistence, "admin-1", "admin");
    let admin = create_admin_actor();
    let response = create_staff_invite(
        persistence,
        CreateInviteRequest {
            email: String::from("new.hire@example.com"),
            staff_roles: vec![String::from("server"), String::from("kitchen")],
            city: String::from("San Francisco"),
        },
        &admin,
        TEST_BASE_URL,
        test_now(),
    )
    .unwrap();
    response.invite.token
}

#[test]
fn test_create_invite_returns_url_with_token() {
    let mut persistence = create_test_persistence();
    seed_profile(&mut persistence, "admin-1", "admin");
    let admin = create_admin_actor();

    let response = create_staff_invite(
        &mut persistence,
        CreateInviteRequest {
            email: String::from("new.hire@example.com"),
            staff_roles: vec![String::from("server")],
            city: String::from("San Francisco"),
        },
        &admin,
        TEST_BASE_URL,
        test_now(),
    )
    .unwrap();

    assert!(response.success);
    assert_eq!(response.invite.token.len(), 64);
    assert_eq!(
        response.invite_url,
        format!("{TEST_BASE_URL}/sign-up?token={}", response.invite.token)
    );
    assert!(!response.invite.accepted);
}

#[test]
fn test_invite_expiry_is_seven_days_out() {
    let mut persistence = create_test_persistence();
    let token = create_invite(&mut persistence);

    let invite = persistence
        .get_unaccepted_invite_by_token(&token)
        .unwrap()
        .unwrap();
    assert!(invite.created_at.starts_with("2026-03-02"));
    assert!(invite.expires_at.starts_with("2026-03-09"));
}

#[test]
fn test_create_invite_rejects_missing_fields() {
    let mut persistence = create_test_persistence();
    seed_profile(&mut persistence, "admin-1", "admin");
    let admin = create_admin_actor();

    let missing_email = create_staff_invite(
        &mut persistence,
        CreateInviteRequest {
            email: String::new(),
            staff_roles: vec![String::from("server")],
            city: String::from("Oakland"),
        },
        &admin,
        TEST_BASE_URL,
        test_now(),
    );
    assert!(matches!(
        missing_email,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));

    let missing_roles = create_staff_invite(
        &mut persistence,
        CreateInviteRequest {
            email: String::from("new.hire@example.com"),
            staff_roles: vec![],
            city: String::from("Oakland"),
        },
        &admin,
        TEST_BASE_URL,
        test_now(),
    );
    assert!(matches!(
        missing_roles,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "staff_roles"
    ));

    let missing_city = create_staff_invite(
        &mut persistence,
        CreateInviteRequest {
            email: String::from("new.hire@example.com"),
            staff_roles: vec![String::from("server")],
            city: String::new(),
        },
        &admin,
        TEST_BASE_URL,
        test_now(),
    );
    assert!(matches!(
        missing_city,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "city"
    ));
}

#[test]
fn test_validate_invite_shows_preassigned_details() {
    let mut persistence = create_test_persistence();
    let token = create_invite(&mut persistence);

    let preview =
        validate_invite(&mut persistence, &token, test_now() + Duration::days(1)).unwrap();
    assert_eq!(preview.email, "new.hire@example.com");
    assert_eq!(preview.city, "San Francisco");
    assert_eq!(
        preview.staff_roles,
        vec![String::from("server"), String::from("kitchen")]
    );
}

#[test]
fn test_validate_unknown_token_is_not_found() {
    let mut persistence = create_test_persistence();
    let result = validate_invite(&mut persistence, "missing", test_now());
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_validate_expired_invite() {
    // Created at T with a 7-day expiry, validated at T+8 days.
    let mut persistence = create_test_persistence();
    let token = create_invite(&mut persistence);

    let result = validate_invite(&mut persistence, &token, test_now() + Duration::days(8));
    assert!(matches!(result, Err(ApiError::InviteExpired { .. })));
}

#[test]
fn test_complete_onboarding_promotes_the_identity() {
    let mut persistence = create_test_persistence();
    let token = create_invite(&mut persistence);
    seed_profile(&mut persistence, "candidate-1", "client");

    let response = complete_onboarding(
        &mut persistence,
        &CompleteOnboardingRequest { token },
        &create_staff_actor("candidate-1"),
        test_now() + Duration::days(1),
    )
    .unwrap();
    assert!(response.success);

    let profile = persistence.get_profile("candidate-1").unwrap().unwrap();
    assert_eq!(profile.role, "staff");

    let staff = persistence.get_staff_profile("candidate-1").unwrap().unwrap();
    assert_eq!(staff.city, "San Francisco");
    assert_eq!(staff.status, "available");
    assert_eq!(
        staff.staff_roles,
        vec![String::from("server"), String::from("kitchen")]
    );
}

#[test]
fn test_accepted_invite_is_rejected_before_expiry() {
    let mut persistence = create_test_persistence();
    let token = create_invite(&mut persistence);
    seed_profile(&mut persistence, "candidate-1", "client");

    complete_onboarding(
        &mut persistence,
        &CompleteOnboardingRequest {
            token: token.clone(),
        },
        &create_staff_actor("candidate-1"),
        test_now() + Duration::days(1),
    )
    .unwrap();

    // Both validation and completion treat the consumed token as
    // missing, even though the expiry is still in the future.
    let validate_result =
        validate_invite(&mut persistence, &token, test_now() + Duration::days(2));
    assert!(matches!(
        validate_result,
        Err(ApiError::ResourceNotFound { .. })
    ));

    let complete_result = complete_onboarding(
        &mut persistence,
        &CompleteOnboardingRequest { token },
        &create_staff_actor("candidate-1"),
        test_now() + Duration::days(2),
    );
    assert!(matches!(
        complete_result,
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_complete_onboarding_with_expired_invite() {
    let mut persistence = create_test_persistence();
    let token = create_invite(&mut persistence);
    seed_profile(&mut persistence, "candidate-1", "client");

    let result = complete_onboarding(
        &mut persistence,
        &CompleteOnboardingRequest { token },
        &create_staff_actor("candidate-1"),
        test_now() + Duration::days(8),
    );
    assert!(matches!(result, Err(ApiError::InviteExpired { .. })));
}

#[test]
fn test_complete_onboarding_with_empty_token() {
    let mut persistence = create_test_persistence();
    let result = complete_onboarding(
        &mut persistence,
        &CompleteOnboardingRequest {
            token: String::new(),
        },
        &create_staff_actor("candidate-1"),
        test_now(),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "token"
    ));
}

#[test]
fn test_list_invites_requires_admin_and_lists_all() {
    let mut persistence = create_test_persistence();
    let _token = create_invite(&mut persistence);
    let admin = create_admin_actor();

    let listed = list_staff_invites(&mut persistence, &admin).unwrap();
    assert_eq!(listed.invites.len(), 1);

    let staff_result = list_staff_invites(&mut persistence, &create_staff_actor("staff-1"));
    assert!(matches!(staff_result, Err(ApiError::Unauthorized { .. })));
}

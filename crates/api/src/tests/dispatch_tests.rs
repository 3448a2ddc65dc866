// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dispatch issuance, response, and fulfillment accounting tests at the
//! API boundary.

use crate::error::ApiError;
use crate::handlers::{
    get_event_staffing, issue_dispatch, list_eligible_staff, list_event_dispatches, list_jobs,
    respond_dispatch,
};
use crate::request_response::{IssueDispatchRequest, RespondDispatchRequest};
use crate::tests::{
    create_admin_actor, create_staff_actor, create_test_persistence, seed_event, seed_profile,
    seed_staff, test_now,
};
use crewcall_persistence::Persistence;

fn setup() -> (Persistence, i64) {
    let mut persistence = create_test_persistence();
    seed_profile(&mut persistence, "admin-1", "admin");
    seed_staff(&mut persistence, "staff-1", "Oakland", &["server"]);
    seed_staff(&mut persistence, "staff-2", "Oakland", &["server"]);
    seed_staff(&mut persistence, "staff-3", "Oakland", &["server", "bartender"]);
    let event_id = seed_event(&mut persistence, "admin-1", "Oakland", &[("server", 3)]);
    (persistence, event_id)
}

fn issue(persistence: &mut Persistence, event_id: i64, staff_ids: &[&str]) -> Vec<i64> {
    let admin = create_admin_actor();
    let response = issue_dispatch(
        persistence,
        &IssueDispatchRequest {
            event_id,
            staff_role: String::from("server"),
            staff_ids: staff_ids.iter().map(ToString::to_string).collect(),
        },
        &admin,
        test_now(),
    )
    .unwrap();
    response.dispatches.iter().map(|d| d.dispatch_id).collect()
}

fn respond(
    persistence: &mut Persistence,
    dispatch_id: i64,
    staff_id: &str,
    decision: &str,
) -> Result<crate::request_response::RespondDispatchResponse, ApiError> {
    respond_dispatch(
        persistence,
        dispatch_id,
        &RespondDispatchRequest {
            decision: decision.to_string(),
        },
        &create_staff_actor(staff_id),
        test_now(),
    )
}

#[test]
fn test_issue_dispatch_creates_pending_offers() {
    let (mut persistence, event_id) = setup();

    let ids = issue(&mut persistence, event_id, &["staff-1", "staff-2"]);
    assert_eq!(ids.len(), 2);

    let admin = create_admin_actor();
    let listed = list_event_dispatches(&mut persistence, event_id, &admin).unwrap();
    assert_eq!(listed.dispatches.len(), 2);
    assert!(listed.dispatches.iter().all(|d| d.status == "pending"));
}

#[test]
fn test_issue_dispatch_with_empty_candidate_set_fails() {
    let (mut persistence, event_id) = setup();
    let admin = create_admin_actor();

    let result = issue_dispatch(
        &mut persistence,
        &IssueDispatchRequest {
            event_id,
            staff_role: String::from("bartender"),
            staff_ids: vec![],
        },
        &admin,
        test_now(),
    );

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "staff_ids"));
}

#[test]
fn test_issue_dispatch_for_unknown_event_fails() {
    let (mut persistence, _event_id) = setup();
    let admin = create_admin_actor();

    let result = issue_dispatch(
        &mut persistence,
        &IssueDispatchRequest {
            event_id: 404,
            staff_role: String::from("server"),
            staff_ids: vec![String::from("staff-1")],
        },
        &admin,
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_issue_dispatch_with_unknown_role_fails() {
    let (mut persistence, event_id) = setup();
    let admin = create_admin_actor();

    let result = issue_dispatch(
        &mut persistence,
        &IssueDispatchRequest {
            event_id,
            staff_role: String::from("sommelier"),
            staff_ids: vec![String::from("staff-1")],
        },
        &admin,
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_accept_assigns_the_staff_member() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);

    let response = respond(&mut persistence, ids[0], "staff-1", "accept").unwrap();
    assert_eq!(response.dispatch.status, "accepted");
    assert!(response.dispatch.responded_at.is_some());

    let staff = persistence.get_staff_profile("staff-1").unwrap().unwrap();
    assert_eq!(staff.status, "assigned");
}

#[test]
fn test_decline_leaves_the_staff_member_available() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);

    let response = respond(&mut persistence, ids[0], "staff-1", "decline").unwrap();
    assert_eq!(response.dispatch.status, "declined");

    let staff = persistence.get_staff_profile("staff-1").unwrap().unwrap();
    assert_eq!(staff.status, "available");
}

#[test]
fn test_resolved_request_rejects_further_responses() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);

    respond(&mut persistence, ids[0], "staff-1", "accept").unwrap();

    // Accept-then-accept and accept-then-decline both surface as
    // already handled.
    for decision in ["accept", "decline"] {
        let result = respond(&mut persistence, ids[0], "staff-1", decision);
        assert!(
            matches!(result, Err(ApiError::InvalidState { .. })),
            "expected invalid-state for {decision}"
        );
    }
}

#[test]
fn test_only_the_addressee_may_respond() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);

    let result = respond(&mut persistence, ids[0], "staff-2", "accept");
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    // The request is untouched.
    let dispatch = persistence.get_dispatch(ids[0]).unwrap().unwrap();
    assert_eq!(dispatch.status, "pending");
}

#[test]
fn test_invalid_decision_string_fails() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);

    let result = respond(&mut persistence, ids[0], "staff-1", "maybe");
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "decision"
    ));
}

#[test]
fn test_staffing_counts_accepted_and_pending() {
    // Requirement of 3 servers with [accepted, accepted, pending].
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1", "staff-2", "staff-3"]);
    respond(&mut persistence, ids[0], "staff-1", "accept").unwrap();
    respond(&mut persistence, ids[1], "staff-2", "accept").unwrap();

    let staffing = get_event_staffing(&mut persistence, event_id).unwrap();
    assert_eq!(staffing.roles.len(), 1);
    let server = &staffing.roles[0];
    assert_eq!(server.role, "server");
    assert_eq!(server.filled, 2);
    assert_eq!(server.pending, 1);
    assert_eq!(server.unfilled, 0);
    assert_eq!(server.total, 3);
}

#[test]
fn test_staffing_ignores_declined_requests() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1", "staff-2"]);
    respond(&mut persistence, ids[0], "staff-1", "decline").unwrap();
    respond(&mut persistence, ids[1], "staff-2", "decline").unwrap();

    let staffing = get_event_staffing(&mut persistence, event_id).unwrap();
    let server = &staffing.roles[0];
    assert_eq!(server.filled, 0);
    assert_eq!(server.pending, 0);
    assert_eq!(server.unfilled, 3);
    assert_eq!(server.total, 3);
}

#[test]
fn test_staffing_for_event_with_no_requirements_reports_complete() {
    let mut persistence = create_test_persistence();
    seed_profile(&mut persistence, "admin-1", "admin");
    let event_id = seed_event(&mut persistence, "admin-1", "Oakland", &[]);

    let staffing = get_event_staffing(&mut persistence, event_id).unwrap();
    assert_eq!(staffing.total_required, 0);
    assert_eq!(staffing.completion_percent, 100);
}

#[test]
fn test_eligible_staff_filters_city_role_and_availability() {
    let (mut persistence, event_id) = setup();
    // Not in the event's city.
    seed_staff(&mut persistence, "staff-sj", "San Jose", &["server"]);
    // In city, wrong capability.
    seed_staff(&mut persistence, "staff-sec", "Oakland", &["security"]);
    // In city with the capability, but already assigned.
    seed_staff(&mut persistence, "staff-busy", "Oakland", &["server"]);
    persistence.set_staff_status("staff-busy", "assigned").unwrap();

    let admin = create_admin_actor();
    let eligible = list_eligible_staff(&mut persistence, event_id, "server", &admin).unwrap();

    let ids: Vec<&str> = eligible.staff.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["staff-1", "staff-2", "staff-3"]);
}

#[test]
fn test_no_release_flow_after_event_completes() {
    // There is no mechanism that returns an assigned member to
    // available when an event concludes; only an administrative staff
    // edit does. This pins that known absence.
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);
    respond(&mut persistence, ids[0], "staff-1", "accept").unwrap();

    let admin = create_admin_actor();
    for target in ["live", "completed"] {
        crate::handlers::update_event_status(
            &mut persistence,
            event_id,
            &crate::request_response::UpdateEventStatusRequest {
                status: target.to_string(),
            },
            &admin,
        )
        .unwrap();
    }

    let staff = persistence.get_staff_profile("staff-1").unwrap().unwrap();
    assert_eq!(staff.status, "assigned");
}

#[test]
fn test_list_jobs_splits_pending_and_accepted() {
    let (mut persistence, event_id) = setup();
    let ids = issue(&mut persistence, event_id, &["staff-1"]);
    respond(&mut persistence, ids[0], "staff-1", "accept").unwrap();
    issue(&mut persistence, event_id, &["staff-1"]);

    let jobs = list_jobs(&mut persistence, &create_staff_actor("staff-1")).unwrap();
    assert_eq!(jobs.pending.len(), 1);
    assert_eq!(jobs.accepted.len(), 1);
    assert!(jobs.accepted[0].event.as_ref().is_some_and(|e| e.event_id == event_id));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crewcall_api::{
    ApiError, CompleteOnboardingRequest, CompleteOnboardingResponse,
    CreateEventRequest, CreateEventResponse, CreateInviteRequest, CreateInviteResponse,
    DashboardSummaryResponse, EventStaffingResponse, GetEventResponse, IdentityEventRequest,
    IdentityEventResponse, IssueDispatchRequest, IssueDispatchResponse, ListDispatchesResponse,
    ListEligibleStaffResponse, ListEventsResponse, ListInvitesResponse, ListJobsResponse,
    ListMessagesResponse, ListStaffResponse, PostMessageRequest, PostMessageResponse,
    RespondDispatchRequest, RespondDispatchResponse, UpdateEventStatusRequest,
    UpdateEventStatusResponse, UpdateStaffRequest, UpdateStaffResponse, ValidateInviteResponse,
    WhoAmIResponse,
};
use crewcall_persistence::Persistence;

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::SessionProfile;

/// CrewCall Server - HTTP server for the CrewCall staffing system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Public base URL used to build invite sign-up links
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,

    /// Shared secret expected in `X-Webhook-Secret` on identity webhooks.
    /// Falls back to the `CREWCALL_WEBHOOK_SECRET` environment variable.
    #[arg(long)]
    webhook_secret: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer wrapped in a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Broadcaster for the live change feed.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// Public base URL for invite links.
    base_url: Arc<String>,
    /// Shared secret guarding the identity webhook. `None` disables intake.
    webhook_secret: Arc<Option<String>>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Error response type.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::InviteExpired { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidState { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Query parameters for listing staff.
#[derive(Debug, Deserialize)]
struct ListStaffQuery {
    /// Optional city filter.
    city: Option<String>,
    /// Optional availability filter.
    status: Option<String>,
    /// Optional capability filter.
    role: Option<String>,
}

/// Query parameters for the eligible-candidate listing.
#[derive(Debug, Deserialize)]
struct EligibleStaffQuery {
    /// The target event.
    event_id: i64,
    /// The role to staff.
    role: String,
}

// ============================================================================
// Invite endpoints
// ============================================================================

/// Handler for POST `/staff/invite`.
///
/// Creates a staff invite and returns the sign-up URL.
async fn handle_create_invite(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Json(req): Json<CreateInviteRequest>,
) -> Result<Json<CreateInviteResponse>, HttpError> {
    info!(email = %req.email, actor_id = %actor.id, "Handling create invite request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateInviteResponse = crewcall_api::create_staff_invite(
        &mut persistence,
        req,
        &actor,
        &app_state.base_url,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/staff/invite`.
///
/// Lists all invites (admin only).
async fn handle_list_invites(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
) -> Result<Json<ListInvitesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListInvitesResponse =
        crewcall_api::list_staff_invites(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/staff/onboarding/{token}`.
///
/// Pre-auth display of an invite's email, city, and assigned roles.
async fn handle_validate_invite(
    AxumState(app_state): AxumState<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ValidateInviteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ValidateInviteResponse =
        crewcall_api::validate_invite(&mut persistence, &token, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/staff/complete-onboarding`.
///
/// Consumes the invite and promotes the authenticated identity to
/// staff. Per the endpoint contract an unknown, consumed, or expired
/// token is a 400, not a 404.
async fn handle_complete_onboarding(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Json(req): Json<CompleteOnboardingRequest>,
) -> Result<Json<CompleteOnboardingResponse>, HttpError> {
    info!(profile_id = %actor.id, "Handling complete onboarding request");

    let mut persistence = app_state.persistence.lock().await;
    let result = crewcall_api::complete_onboarding(
        &mut persistence,
        &req,
        &actor,
        OffsetDateTime::now_utc(),
    );
    drop(persistence);

    match result {
        Ok(response) => Ok(Json(response)),
        Err(err @ ApiError::ResourceNotFound { .. }) => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }),
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// Event endpoints
// ============================================================================

/// Handler for POST `/events`.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    info!(title = %req.title, actor_id = %actor.id, "Handling create event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse =
        crewcall_api::create_event(&mut persistence, req, &actor, OffsetDateTime::now_utc())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::EventCreated {
        event_id: response.event_id,
    });

    Ok(Json(response))
}

/// Handler for GET `/events`.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
) -> Result<Json<ListEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEventsResponse = crewcall_api::list_events(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}`.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(_actor, _profile): SessionProfile,
    Path(event_id): Path<i64>,
) -> Result<Json<GetEventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetEventResponse = crewcall_api::get_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/status`.
async fn handle_update_event_status(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Path(event_id): Path<i64>,
    Json(req): Json<UpdateEventStatusRequest>,
) -> Result<Json<UpdateEventStatusResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateEventStatusResponse =
        crewcall_api::update_event_status(&mut persistence, event_id, &req, &actor)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::EventStatusChanged {
            event_id,
            status: response.status.clone(),
        });

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/staffing`.
///
/// Per-role and aggregate fulfillment for the event.
async fn handle_get_event_staffing(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(_actor, _profile): SessionProfile,
    Path(event_id): Path<i64>,
) -> Result<Json<EventStaffingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: EventStaffingResponse =
        crewcall_api::get_event_staffing(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Dispatch endpoints
// ============================================================================

/// Handler for POST `/dispatch`.
///
/// Issues dispatch offers to a set of candidates.
async fn handle_issue_dispatch(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Json(req): Json<IssueDispatchRequest>,
) -> Result<Json<IssueDispatchResponse>, HttpError> {
    info!(
        event_id = req.event_id,
        role = %req.staff_role,
        candidates = req.staff_ids.len(),
        "Handling issue dispatch request"
    );

    let event_id: i64 = req.event_id;
    let staff_role: String = req.staff_role.clone();

    let mut persistence = app_state.persistence.lock().await;
    let response: IssueDispatchResponse = crewcall_api::issue_dispatch(
        &mut persistence,
        &req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::DispatchIssued {
        event_id,
        staff_role,
        count: response.dispatches.len(),
    });

    Ok(Json(response))
}

/// Handler for POST `/dispatch/{dispatch_id}/respond`.
async fn handle_respond_dispatch(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Path(dispatch_id): Path<i64>,
    Json(req): Json<RespondDispatchRequest>,
) -> Result<Json<RespondDispatchResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RespondDispatchResponse = crewcall_api::respond_dispatch(
        &mut persistence,
        dispatch_id,
        &req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::DispatchResponded {
            dispatch_id,
            event_id: response.dispatch.event_id,
            status: response.dispatch.status.clone(),
        });

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/dispatches`.
async fn handle_list_event_dispatches(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Path(event_id): Path<i64>,
) -> Result<Json<ListDispatchesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListDispatchesResponse =
        crewcall_api::list_event_dispatches(&mut persistence, event_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/jobs`.
///
/// The acting staff member's offers and placements.
async fn handle_list_jobs(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
) -> Result<Json<ListJobsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListJobsResponse = crewcall_api::list_jobs(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/staff/eligible`.
async fn handle_list_eligible_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Query(query): Query<EligibleStaffQuery>,
) -> Result<Json<ListEligibleStaffResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEligibleStaffResponse = crewcall_api::list_eligible_staff(
        &mut persistence,
        query.event_id,
        &query.role,
        &actor,
    )?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Staff directory endpoints
// ============================================================================

/// Handler for GET `/staff`.
async fn handle_list_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Query(query): Query<ListStaffQuery>,
) -> Result<Json<ListStaffResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListStaffResponse = crewcall_api::list_staff(
        &mut persistence,
        query.city.as_deref(),
        query.status.as_deref(),
        query.role.as_deref(),
        &actor,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/staff/{staff_id}`.
///
/// Administrative edit of a staff member's capabilities, city, and
/// availability.
async fn handle_update_staff(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Path(staff_id): Path<String>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Json<UpdateStaffResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateStaffResponse =
        crewcall_api::update_staff(&mut persistence, &staff_id, &req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Chat endpoints
// ============================================================================

/// Handler for POST `/events/{event_id}/messages`.
async fn handle_post_message(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Path(event_id): Path<i64>,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<PostMessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: PostMessageResponse = crewcall_api::post_message(
        &mut persistence,
        event_id,
        &req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::MessagePosted {
        event_id,
        message_id: response.message.message_id,
    });

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/messages`.
async fn handle_list_messages(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
    Path(event_id): Path<i64>,
) -> Result<Json<ListMessagesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListMessagesResponse =
        crewcall_api::list_messages(&mut persistence, event_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Dashboard, identity, and introspection endpoints
// ============================================================================

/// Handler for GET `/dashboard/summary`.
async fn handle_dashboard_summary(
    AxumState(app_state): AxumState<AppState>,
    SessionProfile(actor, _profile): SessionProfile,
) -> Result<Json<DashboardSummaryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DashboardSummaryResponse =
        crewcall_api::get_dashboard_summary(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/whoami`.
async fn handle_whoami(
    SessionProfile(_actor, profile): SessionProfile,
) -> Json<WhoAmIResponse> {
    Json(crewcall_api::whoami(&profile))
}

/// Handler for POST `/webhooks/identity`.
///
/// Consumes identity-provider account and session lifecycle events.
/// Guarded by the shared `X-Webhook-Secret` header; intake is disabled
/// when no secret is configured.
async fn handle_identity_webhook(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<IdentityEventRequest>,
) -> Result<Json<IdentityEventResponse>, HttpError> {
    let Some(expected) = app_state.webhook_secret.as_deref() else {
        warn!("Rejected identity webhook: no webhook secret configured");
        return Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Identity webhook intake is not configured"),
        });
    };

    let supplied: Option<&str> = headers
        .get("X-Webhook-Secret")
        .and_then(|value| value.to_str().ok());
    if supplied != Some(expected) {
        warn!("Rejected identity webhook: bad secret");
        return Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Invalid webhook secret"),
        });
    }

    info!(event_type = %req.event_type, "Handling identity webhook event");

    let mut persistence = app_state.persistence.lock().await;
    let response: IdentityEventResponse =
        crewcall_api::apply_identity_event(&mut persistence, req, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/staff/invite", post(handle_create_invite))
        .route("/staff/invite", get(handle_list_invites))
        .route("/staff/onboarding/{token}", get(handle_validate_invite))
        .route("/staff/complete-onboarding", post(handle_complete_onboarding))
        .route("/staff/eligible", get(handle_list_eligible_staff))
        .route("/staff", get(handle_list_staff))
        .route("/staff/{staff_id}", post(handle_update_staff))
        .route("/events", post(handle_create_event))
        .route("/events", get(handle_list_events))
        .route("/events/{event_id}", get(handle_get_event))
        .route("/events/{event_id}/status", post(handle_update_event_status))
        .route("/events/{event_id}/staffing", get(handle_get_event_staffing))
        .route("/events/{event_id}/dispatches", get(handle_list_event_dispatches))
        .route("/events/{event_id}/messages", post(handle_post_message))
        .route("/events/{event_id}/messages", get(handle_list_messages))
        .route("/dispatch", post(handle_issue_dispatch))
        .route("/dispatch/{dispatch_id}/respond", post(handle_respond_dispatch))
        .route("/jobs", get(handle_list_jobs))
        .route("/dashboard/summary", get(handle_dashboard_summary))
        .route("/whoami", get(handle_whoami))
        .route("/webhooks/identity", post(handle_identity_webhook))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing CrewCall Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let webhook_secret: Option<String> = args
        .webhook_secret
        .or_else(|| std::env::var("CREWCALL_WEBHOOK_SECRET").ok());
    if webhook_secret.is_none() {
        warn!("No webhook secret configured; identity webhook intake is disabled");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        base_url: Arc::new(args.base_url),
        webhook_secret: Arc::new(webhook_secret),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

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

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use salon_book_api::{
    ApiError, AssignStaffRequest, AssignStaffResponse, CancelBookingRequest,
    CancelBookingResponse, CreateBookingRequest, CreateBookingResponse, GetAvailableSlotsRequest,
    GetAvailableSlotsResponse, HasConflictRequest, HasConflictResponse, IsDateSelectableRequest,
    IsDateSelectableResponse, ListClientBookingsResponse, RescheduleBookingRequest,
    RescheduleBookingResponse, assign_staff, cancel_booking, create_booking, get_available_slots,
    has_conflict, is_date_selectable, list_client_bookings, reschedule_booking,
};
use salon_book_audit::{AuditEvent, Cause};
use salon_book_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Salon Book Server - HTTP server for the salon booking engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// A clock supplying the current wall-clock date and time.
///
/// The engine itself never reads a system clock; the server injects it
/// here so tests can pin time.
type Clock = fn() -> time::PrimitiveDateTime;

fn system_now() -> time::PrimitiveDateTime {
    let now: time::OffsetDateTime = time::OffsetDateTime::now_utc();
    time::PrimitiveDateTime::new(now.date(), now.time())
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for scheduling state and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// The source of the current date and time.
    clock: Clock,
}

/// API request for creating a booking.
///
/// This includes the request cause in addition to the booking data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateBookingApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The booking client.
    client_id: i64,
    /// The appointment date (`YYYY-MM-DD`).
    date: String,
    /// The start time (`HH:MM`).
    start_time: String,
    /// The selected services.
    service_ids: Vec<i64>,
    /// The requested staff member, or `None` for any.
    staff_id: Option<i64>,
    /// Optional free-text notes.
    notes: Option<String>,
}

/// API request for rescheduling a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RescheduleBookingApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The booking to move.
    booking_id: i64,
    /// The client requesting the change.
    client_id: i64,
    /// The new date (`YYYY-MM-DD`).
    date: String,
    /// The new start time (`HH:MM`).
    start_time: String,
    /// The new service selection.
    service_ids: Vec<i64>,
    /// The requested staff member, or `None` for any.
    staff_id: Option<i64>,
    /// Optional free-text notes.
    notes: Option<String>,
}

/// API request for cancelling a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CancelBookingApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The booking to cancel.
    booking_id: i64,
    /// The client requesting the cancellation.
    client_id: i64,
}

/// Serializable representation of an `AuditEvent` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditEventResponse {
    /// The event ID.
    event_id: i64,
    /// The actor ID.
    actor_id: String,
    /// The actor type.
    actor_type: String,
    /// The cause ID.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The action name.
    action_name: String,
    /// Optional action details.
    action_details: Option<String>,
    /// State before the transition.
    before_snapshot: String,
    /// State after the transition.
    after_snapshot: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
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
        match err {
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::PermissionDenied { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

/// Converts an `AuditEvent` and its ID to an `AuditEventResponse`.
fn audit_event_to_response(event_id: i64, event: &AuditEvent) -> AuditEventResponse {
    AuditEventResponse {
        event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}

/// Handler for POST /slots endpoint.
///
/// Returns the bookable start times on a date.
async fn handle_get_available_slots(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GetAvailableSlotsRequest>,
) -> Result<Json<GetAvailableSlotsResponse>, HttpError> {
    info!(
        date = %req.date,
        staff_id = ?req.staff_id,
        "Handling get_available_slots request"
    );

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: GetAvailableSlotsResponse = get_available_slots(&mut persistence, &req, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /dates/selectable endpoint.
///
/// Returns whether a date should be offered for selection.
async fn handle_is_date_selectable(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<IsDateSelectableRequest>,
) -> Result<Json<IsDateSelectableResponse>, HttpError> {
    info!(
        date = %req.date,
        staff_id = ?req.staff_id,
        "Handling is_date_selectable request"
    );

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: IsDateSelectableResponse = is_date_selectable(&mut persistence, &req, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /assign_staff endpoint.
///
/// Auto-assigns a staff member for an interval and service selection.
async fn handle_assign_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignStaffRequest>,
) -> Result<Json<AssignStaffResponse>, HttpError> {
    info!(
        date = %req.date,
        start_time = %req.start_time,
        "Handling assign_staff request"
    );

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: AssignStaffResponse = assign_staff(&mut persistence, &req, now)?;
    drop(persistence);

    info!(staff_id = response.staff_id, "Successfully assigned staff");

    Ok(Json(response))
}

/// Handler for POST /conflicts/check endpoint.
///
/// Checks one staff member's calendar for an overlap.
async fn handle_has_conflict(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<HasConflictRequest>,
) -> Result<Json<HasConflictResponse>, HttpError> {
    info!(
        staff_id = req.staff_id,
        date = %req.date,
        start_time = %req.start_time,
        "Handling has_conflict request"
    );

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: HasConflictResponse = has_conflict(&mut persistence, &req, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /bookings endpoint.
///
/// Creates a booking.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBookingApiRequest>,
) -> Result<Json<CreateBookingResponse>, HttpError> {
    info!(
        client_id = req.client_id,
        date = %req.date,
        start_time = %req.start_time,
        "Handling create_booking request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: CreateBookingRequest = CreateBookingRequest {
        client_id: req.client_id,
        date: req.date,
        start_time: req.start_time,
        service_ids: req.service_ids,
        staff_id: req.staff_id,
        notes: req.notes,
    };

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateBookingResponse = create_booking(&mut persistence, &request, now, cause)?;
    drop(persistence);

    info!(
        booking_id = response.booking.booking_id,
        staff_id = response.booking.staff_id,
        "Successfully created booking"
    );

    Ok(Json(response))
}

/// Handler for POST /bookings/reschedule endpoint.
///
/// Moves an existing booking to a new date, time, or service set.
async fn handle_reschedule_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RescheduleBookingApiRequest>,
) -> Result<Json<RescheduleBookingResponse>, HttpError> {
    info!(
        booking_id = req.booking_id,
        client_id = req.client_id,
        date = %req.date,
        start_time = %req.start_time,
        "Handling reschedule_booking request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: RescheduleBookingRequest = RescheduleBookingRequest {
        booking_id: req.booking_id,
        client_id: req.client_id,
        date: req.date,
        start_time: req.start_time,
        service_ids: req.service_ids,
        staff_id: req.staff_id,
        notes: req.notes,
    };

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: RescheduleBookingResponse =
        reschedule_booking(&mut persistence, &request, now, cause)?;
    drop(persistence);

    info!(
        booking_id = response.booking.booking_id,
        "Successfully rescheduled booking"
    );

    Ok(Json(response))
}

/// Handler for POST /bookings/cancel endpoint.
///
/// Cancels a booking; the row is kept for history.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CancelBookingApiRequest>,
) -> Result<Json<CancelBookingResponse>, HttpError> {
    info!(
        booking_id = req.booking_id,
        client_id = req.client_id,
        "Handling cancel_booking request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: CancelBookingRequest = CancelBookingRequest {
        booking_id: req.booking_id,
        client_id: req.client_id,
    };

    let now: time::PrimitiveDateTime = (app_state.clock)();
    let mut persistence = app_state.persistence.lock().await;
    let response: CancelBookingResponse = cancel_booking(&mut persistence, &request, now, cause)?;
    drop(persistence);

    info!(
        booking_id = response.booking_id,
        "Successfully cancelled booking"
    );

    Ok(Json(response))
}

/// Handler for GET `/clients/{client_id}/bookings` endpoint.
///
/// Lists a client's bookings, ordered by date and start time.
async fn handle_list_client_bookings(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ListClientBookingsResponse>, HttpError> {
    info!(client_id = client_id, "Handling list_client_bookings request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListClientBookingsResponse = list_client_bookings(&mut persistence, client_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /audit/timeline endpoint.
///
/// Returns the ordered audit event timeline.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<AuditEventResponse>>, HttpError> {
    info!("Handling get_audit_timeline request");

    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<(i64, AuditEvent)> = persistence.get_audit_timeline().map_err(|e| {
        error!(error = %e, "Failed to load audit timeline");
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("A storage error occurred"),
        }
    })?;
    drop(persistence);

    let response: Vec<AuditEventResponse> = events
        .iter()
        .map(|(event_id, event)| audit_event_to_response(*event_id, event))
        .collect();

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/slots", post(handle_get_available_slots))
        .route("/dates/selectable", post(handle_is_date_selectable))
        .route("/assign_staff", post(handle_assign_staff))
        .route("/conflicts/check", post(handle_has_conflict))
        .route("/bookings", post(handle_create_booking))
        .route("/bookings/reschedule", post(handle_reschedule_booking))
        .route("/bookings/cancel", post(handle_cancel_booking))
        .route("/clients/{client_id}/bookings", get(handle_list_client_bookings))
        .route("/audit/timeline", get(handle_get_audit_timeline))
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

    info!("Initializing Salon Book Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(std::path::Path::new(db_path))?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: system_now,
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use salon_book_domain::{Price, Service, ShiftTemplate};
    use tower::ServiceExt;

    /// Sunday 2026-03-01 08:00, the morning before the test bookings.
    fn test_now() -> time::PrimitiveDateTime {
        let sunday: time::Date =
            time::Date::from_calendar_date(2026, time::Month::March, 1).unwrap();
        time::PrimitiveDateTime::new(sunday, time::Time::from_hms(8, 0, 0).unwrap())
    }

    /// Helper to create test app state with seeded in-memory persistence:
    /// two staff working Mondays 09:00-17:00, staff 1 performing service 1
    /// only and staff 2 performing services 1 and 2.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");

        let ava: i64 = persistence.add_staff_member("Ava", 1, None).unwrap();
        let ben: i64 = persistence.add_staff_member("Ben", 2, None).unwrap();

        let haircut: i64 = persistence
            .add_service(&Service::new(String::from("Haircut"), 60, Price::Fixed(80), 0).unwrap())
            .unwrap();
        let beard: i64 = persistence
            .add_service(
                &Service::new(String::from("Beard trim"), 30, Price::OpenEnded(40), 0).unwrap(),
            )
            .unwrap();

        let monday_shift: ShiftTemplate = ShiftTemplate::new(
            1,
            time::Time::from_hms(9, 0, 0).unwrap(),
            time::Time::from_hms(17, 0, 0).unwrap(),
        )
        .unwrap();
        persistence.add_shift(ava, &monday_shift).unwrap();
        persistence.add_shift(ben, &monday_shift).unwrap();

        persistence.grant_capability(ava, haircut).unwrap();
        persistence.grant_capability(ben, haircut).unwrap();
        persistence.grant_capability(ben, beard).unwrap();

        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            clock: test_now,
        }
    }

    /// Helper to create a test booking request for the test Monday.
    fn create_test_booking_request(
        client_id: i64,
        start_time: &str,
        staff_id: Option<i64>,
    ) -> CreateBookingApiRequest {
        CreateBookingApiRequest {
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test booking"),
            client_id,
            date: String::from("2026-03-02"),
            start_time: start_time.to_string(),
            service_ids: vec![1],
            staff_id,
            notes: None,
        }
    }

    async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn get_uri(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_of<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_booking_succeeds() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let req_body: CreateBookingApiRequest = create_test_booking_request(100, "10:00", Some(1));
        let response = post_json(app, "/bookings", &req_body).await;

        assert_eq!(response.status(), HttpStatusCode::OK);

        let api_response: CreateBookingResponse = body_of(response).await;
        assert_eq!(api_response.booking.booking_id, 1);
        assert_eq!(api_response.booking.staff_id, 1);
        assert_eq!(api_response.booking.status, "pending");
        assert_eq!(api_response.booking.end_time, "11:00");
    }

    #[tokio::test]
    async fn test_overlapping_booking_is_unprocessable() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let first: CreateBookingApiRequest = create_test_booking_request(100, "10:00", Some(1));
        let response = post_json(app.clone(), "/bookings", &first).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let second: CreateBookingApiRequest = create_test_booking_request(200, "10:30", Some(1));
        let response = post_json(app, "/bookings", &second).await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let error_response: ErrorResponse = body_of(response).await;
        assert!(error_response.error);
        assert!(error_response.message.contains("slot_conflict"));
    }

    #[tokio::test]
    async fn test_bad_date_is_bad_request() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let mut req_body: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        req_body.date = String::from("03/02/2026");
        let response = post_json(app, "/bookings", &req_body).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_available_slots_shrink_after_booking() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let slots_req: GetAvailableSlotsRequest = GetAvailableSlotsRequest {
            date: String::from("2026-03-02"),
            service_ids: vec![1],
            staff_id: Some(1),
        };
        let response = post_json(app.clone(), "/slots", &slots_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let before: GetAvailableSlotsResponse = body_of(response).await;
        assert_eq!(before.slots.len(), 15);
        assert_eq!(before.total_price, "80");

        let booking_req: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        post_json(app.clone(), "/bookings", &booking_req).await;

        let response = post_json(app, "/slots", &slots_req).await;
        let after: GetAvailableSlotsResponse = body_of(response).await;
        assert!(!after.slots.contains(&String::from("10:00")));
        assert_eq!(after.slots.len(), 12);
    }

    #[tokio::test]
    async fn test_assign_staff_follows_roster_order() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let assign_req: AssignStaffRequest = AssignStaffRequest {
            date: String::from("2026-03-02"),
            start_time: String::from("10:00"),
            service_ids: vec![1],
            exclude_booking_id: None,
        };
        let response = post_json(app.clone(), "/assign_staff", &assign_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let first: AssignStaffResponse = body_of(response).await;
        assert_eq!(first.staff_id, 1);
        assert_eq!(first.staff_name, "Ava");

        let booking_req: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        post_json(app.clone(), "/bookings", &booking_req).await;

        let response = post_json(app, "/assign_staff", &assign_req).await;
        let second: AssignStaffResponse = body_of(response).await;
        assert_eq!(second.staff_id, 2);
    }

    #[tokio::test]
    async fn test_cancel_by_non_owner_is_forbidden() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let booking_req: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        post_json(app.clone(), "/bookings", &booking_req).await;

        let cancel_req: CancelBookingApiRequest = CancelBookingApiRequest {
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test cancellation"),
            booking_id: 1,
            client_id: 200,
        };
        let response = post_json(app, "/bookings/cancel", &cancel_req).await;

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_cancel_unknown_booking_is_not_found() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let cancel_req: CancelBookingApiRequest = CancelBookingApiRequest {
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test cancellation"),
            booking_id: 42,
            client_id: 100,
        };
        let response = post_json(app, "/bookings/cancel", &cancel_req).await;

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reschedule_then_list_shows_new_time() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let booking_req: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        post_json(app.clone(), "/bookings", &booking_req).await;

        let reschedule_req: RescheduleBookingApiRequest = RescheduleBookingApiRequest {
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test reschedule"),
            booking_id: 1,
            client_id: 100,
            date: String::from("2026-03-02"),
            start_time: String::from("14:00"),
            service_ids: vec![1],
            staff_id: Some(1),
            notes: None,
        };
        let response = post_json(app.clone(), "/bookings/reschedule", &reschedule_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let rescheduled: RescheduleBookingResponse = body_of(response).await;
        assert_eq!(rescheduled.booking.start_time, "14:00");
        assert_eq!(rescheduled.booking.status, "pending");

        let response = get_uri(app, "/clients/100/bookings").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let list: ListClientBookingsResponse = body_of(response).await;
        assert_eq!(list.bookings.len(), 1);
        assert_eq!(list.bookings[0].start_time, "14:00");
    }

    #[tokio::test]
    async fn test_successful_booking_persists_to_audit_timeline() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let booking_req: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        let response = post_json(app.clone(), "/bookings", &booking_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = get_uri(app, "/audit/timeline").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let events: Vec<AuditEventResponse> = body_of(response).await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action_name, "CreateBooking");
        assert_eq!(events[0].actor_id, "client-100");
        assert_eq!(events[0].actor_type, "client");
    }

    #[tokio::test]
    async fn test_rejected_booking_does_not_mutate_state() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        // Nobody works Tuesdays in the fixture
        let mut req_body: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", None);
        req_body.date = String::from("2026-03-03");
        let response = post_json(app.clone(), "/bookings", &req_body).await;
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let response = get_uri(app, "/audit/timeline").await;
        let events: Vec<AuditEventResponse> = body_of(response).await;
        assert_eq!(events.len(), 0, "No audit events should have been created");
    }

    #[tokio::test]
    async fn test_date_selectable_endpoint() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let monday_req: IsDateSelectableRequest = IsDateSelectableRequest {
            date: String::from("2026-03-02"),
            service_ids: vec![1],
            staff_id: None,
        };
        let response = post_json(app.clone(), "/dates/selectable", &monday_req).await;
        let monday: IsDateSelectableResponse = body_of(response).await;
        assert!(monday.selectable);

        let tuesday_req: IsDateSelectableRequest = IsDateSelectableRequest {
            date: String::from("2026-03-03"),
            service_ids: vec![1],
            staff_id: None,
        };
        let response = post_json(app, "/dates/selectable", &tuesday_req).await;
        let tuesday: IsDateSelectableResponse = body_of(response).await;
        assert!(!tuesday.selectable);
    }

    #[tokio::test]
    async fn test_conflict_check_endpoint() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let booking_req: CreateBookingApiRequest =
            create_test_booking_request(100, "10:00", Some(1));
        post_json(app.clone(), "/bookings", &booking_req).await;

        let conflict_req: HasConflictRequest = HasConflictRequest {
            staff_id: 1,
            date: String::from("2026-03-02"),
            start_time: String::from("10:30"),
            duration_minutes: 60,
            exclude_booking_id: None,
        };
        let response = post_json(app.clone(), "/conflicts/check", &conflict_req).await;
        let overlapping: HasConflictResponse = body_of(response).await;
        assert!(overlapping.conflict);

        let back_to_back: HasConflictRequest = HasConflictRequest {
            start_time: String::from("11:00"),
            ..conflict_req
        };
        let response = post_json(app, "/conflicts/check", &back_to_back).await;
        let clear: HasConflictResponse = body_of(response).await;
        assert!(!clear.conflict);
    }
}

//! Integration tests for the scheduling HTTP endpoints.
//!
//! Drives the full router over the in-memory adapters:
//! 1. Explicit-window generation and idempotent re-runs
//! 2. Window validation errors
//! 3. Persistence failure reporting
//! 4. Upcoming-week generation from an injected clock

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use tutor_scheduler::adapters::http::{app_router, SchedulingHandlers};
use tutor_scheduler::adapters::memory::{InMemoryEnrollmentStore, InMemorySessionStore};
use tutor_scheduler::application::{ScheduleUpcomingWeekHandler, UpdateWeekHandler};
use tutor_scheduler::domain::foundation::{EnrollmentId, ProfileId, SessionStatus};
use tutor_scheduler::domain::scheduling::{
    AvailabilitySlot, Enrollment, ProfileRef, RecurrenceExpander, ReferenceTimezone,
};
use tutor_scheduler::ports::FixedClock;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn enrollment(day: &str, start_time: &str, student: u128, tutor: u128) -> Enrollment {
    Enrollment {
        id: EnrollmentId::new(),
        student: Some(ProfileRef::with_id(ProfileId::from_uuid(Uuid::from_u128(student)))),
        tutor: Some(ProfileRef::with_id(ProfileId::from_uuid(Uuid::from_u128(tutor)))),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        duration: 1.0,
        availability: vec![AvailabilitySlot {
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: "23:00".to_string(),
        }],
        meeting_id: Some("room-7".to_string()),
        summary: "Weekly tutoring".to_string(),
        paused: false,
    }
}

struct TestApp {
    router: Router,
    sessions: Arc<InMemorySessionStore>,
}

fn test_app(enrollments: Vec<Enrollment>, now: &str) -> TestApp {
    let sessions = Arc::new(InMemorySessionStore::new());
    let update_week = Arc::new(UpdateWeekHandler::new(
        Arc::new(InMemoryEnrollmentStore::with_enrollments(enrollments)),
        sessions.clone(),
        sessions.clone(),
        RecurrenceExpander::new(ReferenceTimezone::default()),
    ));
    let upcoming_week = Arc::new(ScheduleUpcomingWeekHandler::new(
        update_week.clone(),
        Arc::new(FixedClock::new(utc(now))),
        Weekday::Mon,
    ));

    TestApp {
        router: app_router(SchedulingHandlers::new(update_week, upcoming_week)),
        sessions,
    }
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn march_week() -> Value {
    json!({
        "week_start": "2024-03-04T05:00:00Z",
        "week_end": "2024-03-11T03:59:00Z"
    })
}

// =============================================================================
// Explicit window
// =============================================================================

#[tokio::test]
async fn update_week_creates_sessions() {
    let app = test_app(
        vec![
            enrollment("Wednesday", "15:00", 1, 2),
            enrollment("friday", "9:30", 3, 2),
        ],
        "2024-03-01T17:00:00Z",
    );

    let (status, body) = post_json(&app.router, "/api/schedule/week", march_week()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 2);
    assert_eq!(body["skipped"], 0);

    let sessions = app.sessions.sessions().await;
    assert_eq!(sessions[0].date, utc("2024-03-06T20:00:00Z"));
    assert_eq!(sessions[1].date, utc("2024-03-08T14:30:00Z"));
    assert!(sessions.iter().all(|s| s.status == SessionStatus::Active));
    assert_eq!(sessions[0].meeting_id.as_deref(), Some("room-7"));
}

#[tokio::test]
async fn update_week_is_idempotent() {
    let app = test_app(
        vec![enrollment("Wednesday", "15:00", 1, 2)],
        "2024-03-01T17:00:00Z",
    );

    post_json(&app.router, "/api/schedule/week", march_week()).await;
    let (status, body) = post_json(&app.router, "/api/schedule/week", march_week()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 0);
    assert_eq!(body["skipped"], 1);
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn spring_forward_gap_shifts_one_hour() {
    let app = test_app(
        vec![enrollment("Sunday", "02:30", 1, 2)],
        "2024-03-01T17:00:00Z",
    );

    let (status, body) = post_json(&app.router, "/api/schedule/week", march_week()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 1);
    // 02:30 does not exist on 2024-03-10; 03:30 EDT is 07:30Z
    assert_eq!(
        app.sessions.sessions().await[0].date,
        utc("2024-03-10T07:30:00Z")
    );
}

// =============================================================================
// Validation and failures
// =============================================================================

#[tokio::test]
async fn missing_bound_is_bad_request() {
    let app = test_app(vec![], "2024-03-01T17:00:00Z");

    let (status, body) = post_json(
        &app.router,
        "/api/schedule/week",
        json!({ "week_start": "2024-03-04T05:00:00Z" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn inverted_window_is_bad_request() {
    let app = test_app(
        vec![enrollment("Wednesday", "15:00", 1, 2)],
        "2024-03-01T17:00:00Z",
    );

    let (status, _) = post_json(
        &app.router,
        "/api/schedule/week",
        json!({
            "week_start": "2024-03-11T03:59:00Z",
            "week_end": "2024-03-04T05:00:00Z"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn oversized_window_is_bad_request() {
    let app = test_app(vec![], "2024-03-01T17:00:00Z");

    let (status, body) = post_json(
        &app.router,
        "/api/schedule/week",
        json!({
            "week_start": "2024-01-01T05:00:00Z",
            "week_end": "2024-03-01T05:00:00Z"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("days"));
}

#[tokio::test]
async fn persistence_failure_is_internal_error() {
    let app = test_app(
        vec![enrollment("Wednesday", "15:00", 1, 2)],
        "2024-03-01T17:00:00Z",
    );
    app.sessions.set_fail_inserts(true);

    let (status, body) = post_json(&app.router, "/api/schedule/week", march_week()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert!(app.sessions.is_empty().await);
}

// =============================================================================
// Upcoming week and health
// =============================================================================

#[tokio::test]
async fn upcoming_week_uses_injected_clock() {
    let app = test_app(
        vec![enrollment("Wednesday", "15:00", 1, 2)],
        "2024-03-01T17:00:00Z",
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/schedule/upcoming-week")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 1);
    assert_eq!(body["window_start"], "2024-03-04T05:00:00+00:00");
    assert_eq!(
        app.sessions.sessions().await[0].date,
        utc("2024-03-06T20:00:00Z")
    );
}

#[tokio::test]
async fn health_reports_reference_timezone() {
    let app = test_app(vec![], "2024-03-01T17:00:00Z");

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timezone"], "America/New_York");
}

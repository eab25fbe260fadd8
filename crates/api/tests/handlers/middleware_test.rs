use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono_tz::Tz;
use roombook_api::{ApiState, app, middleware::error_handling::map_error};
use roombook_core::{
    errors::BookingError, notify::LogNotifier, slots::SlotPolicy, store::MemoryStore,
};
use rstest::rstest;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(BookingError::validation("email", "is required"), StatusCode::BAD_REQUEST)]
#[case(BookingError::NotFound("Room not found".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::already_booked(), StatusCode::CONFLICT)]
#[case(BookingError::Store(eyre::eyre!("pool closed")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(BookingError::Notification("relay down".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn test_validation_body_names_field() {
    let body = body_json(map_error(BookingError::validation("end_time", "must be after start_time"))).await;

    assert_eq!(body["field"], "end_time");
    assert_eq!(body["reason"], "must be after start_time");
}

#[test_log::test(tokio::test)]
async fn test_store_errors_are_not_leaked() {
    let body = body_json(map_error(BookingError::Store(eyre::eyre!(
        "password authentication failed for user roombook"
    ))))
    .await;

    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_health_endpoints() {
    let state = Arc::new(ApiState::new(
        Arc::new(MemoryStore::with_default_rooms()),
        Arc::new(LogNotifier),
        SlotPolicy::default(),
        Tz::UTC,
    ));
    let router = app(state);

    let health = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(body_json(health).await["status"], "ok");

    let ready = router
        .clone()
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    let version = router
        .oneshot(Request::get("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(version).await["version"], env!("CARGO_PKG_VERSION"));
}

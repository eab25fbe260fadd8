use axum::http::{StatusCode, header};
use pretty_assertions::assert_eq;
use roombook_core::models::booking::{
    Booking, BookingStatus, CreateBookingResponse, ListBookingsResponse,
};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{FUTURE_DAY, TestContext};

async fn create(ctx: &TestContext, start: &str, end: &str) -> CreateBookingResponse {
    let response = ctx
        .server
        .post("/api/bookings")
        .json(&ctx.booking_body(start, end))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_booking() {
    let ctx = TestContext::new();

    let created = create(&ctx, "09:00", "12:00").await;

    assert_eq!(created.status, BookingStatus::Booked);
    let stored = ctx.store.bookings().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, created.booking_id);
    assert_eq!(stored[0].full_name, "Grace Hopper");
}

#[tokio::test]
async fn test_duplicate_booking_conflicts() {
    let ctx = TestContext::new();
    create(&ctx, "09:00", "12:00").await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00", "12:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "This room is already booked for the selected time."
    );
    assert_eq!(ctx.store.bookings().unwrap().len(), 1);
}

#[tokio::test]
async fn test_adjacent_booking_is_accepted() {
    let ctx = TestContext::new();
    create(&ctx, "09:00", "12:00").await;
    create(&ctx, "12:00", "13:00").await;

    assert_eq!(ctx.store.bookings().unwrap().len(), 2);
}

#[tokio::test]
async fn test_start_and_end_aliases() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "full_name": "Grace Hopper",
            "email": "grace@example.com",
            "room_id": ctx.room.id,
            "date": FUTURE_DAY,
            "start": "15:00",
            "end": "16:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[rstest]
#[case::end_before_start(json!({"start_time": "12:00", "end_time": "09:00"}), "end_time")]
#[case::missing_name(json!({"full_name": ""}), "full_name")]
#[case::bad_email(json!({"email": "grace"}), "email")]
#[case::bad_date(json!({"date": "14/03/2031"}), "date")]
#[case::missing_room(json!({"room_id": null}), "room_id")]
#[tokio::test]
async fn test_create_booking_validation(#[case] overrides: Value, #[case] field: &str) {
    let ctx = TestContext::new();
    let mut body = ctx.booking_body("09:00", "10:00");
    if let (Some(body), Some(overrides)) = (body.as_object_mut(), overrides.as_object()) {
        for (key, value) in overrides {
            body.insert(key.clone(), value.clone());
        }
    }

    let response = ctx.server.post("/api/bookings").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], field);
    assert!(ctx.store.bookings().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_booking_unknown_room() {
    let ctx = TestContext::new();
    let mut body = ctx.booking_body("09:00", "10:00");
    body["room_id"] = json!(Uuid::new_v4());

    let response = ctx.server.post("/api/bookings").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_booking() {
    let ctx = TestContext::new();
    let created = create(&ctx, "09:00", "10:00").await;

    let response = ctx
        .server
        .get(&format!("/api/bookings/{}", created.booking_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let booking: Booking = response.json();
    assert_eq!(booking.id, created.booking_id);
    assert_eq!(booking.email, "grace@example.com");

    let missing = ctx
        .server
        .get(&format!("/api/bookings/{}", Uuid::new_v4()))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_approve_and_cancel() {
    let ctx = TestContext::new();
    let created = create(&ctx, "09:00", "12:00").await;

    let approved: Booking = ctx
        .server
        .post(&format!("/api/bookings/{}/approve", created.booking_id))
        .await
        .json();
    assert_eq!(approved.status, BookingStatus::Approved);

    let cancelled: Booking = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", created.booking_id))
        .await
        .json();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    // The interval is free again.
    create(&ctx, "09:00", "12:00").await;

    let again = ctx
        .server
        .post(&format!("/api/bookings/{}/approve", created.booking_id))
        .await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(again.json::<Value>()["field"], "status");
}

#[tokio::test]
async fn test_list_bookings_filters() {
    let ctx = TestContext::new();
    let first = create(&ctx, "09:00", "10:00").await;
    create(&ctx, "11:00", "12:00").await;
    ctx.server
        .post(&format!("/api/bookings/{}/cancel", first.booking_id))
        .await
        .assert_status_ok();

    let all: ListBookingsResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("room_id", ctx.room.id)
        .await
        .json();
    assert_eq!(all.bookings.len(), 2);
    assert!(all.bookings[0].start_time < all.bookings[1].start_time);

    let cancelled: ListBookingsResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("status", "cancelled")
        .await
        .json();
    assert_eq!(cancelled.bookings.len(), 1);
    assert_eq!(cancelled.bookings[0].id, first.booking_id);

    let upcoming: ListBookingsResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("scope", "upcoming")
        .await
        .json();
    assert_eq!(upcoming.bookings.len(), 2);

    let today: ListBookingsResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("scope", "today")
        .await
        .json();
    assert!(today.bookings.is_empty());

    let other_day: ListBookingsResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("date", "2031-03-15")
        .await
        .json();
    assert!(other_day.bookings.is_empty());
}

#[rstest]
#[case("scope", "yesterday")]
#[case("status", "pending")]
#[case("room_id", "42")]
#[case("date", "soon")]
#[tokio::test]
async fn test_list_bookings_validation(#[case] field: &str, #[case] value: &str) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/bookings")
        .add_query_param(field, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], field);
}

#[tokio::test]
async fn test_export_bookings_csv() {
    let ctx = TestContext::new();
    let first = create(&ctx, "09:00", "10:00").await;
    let second = create(&ctx, "11:00", "12:30").await;
    ctx.server
        .post(&format!("/api/bookings/{}/cancel", second.booking_id))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .get("/api/bookings/export.csv")
        .add_query_param("status", "booked")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bookings.csv\""
    );
    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "ID,Name,Email,Room,Date,Start,End,Status");
    assert_eq!(
        lines[1],
        format!(
            "{},Grace Hopper,grace@example.com,Conference Room,{FUTURE_DAY},09:00,10:00,booked",
            first.booking_id
        )
    );
}

#[tokio::test]
async fn test_export_bookings_rejects_bad_filter() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/bookings/export.csv")
        .add_query_param("scope", "yesterday")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "scope");
}

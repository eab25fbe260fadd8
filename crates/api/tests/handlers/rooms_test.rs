use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use roombook_core::{
    models::{
        booking::RoomBookingsResponse,
        room::{ListRoomsResponse, Room, RoomStatus},
        slot::ListSlotsResponse,
    },
    store::MemoryStore,
};
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{FUTURE_DAY, TestContext};

#[tokio::test]
async fn test_list_rooms_hides_inactive_rooms() {
    let active = Room::new("Meeting Room", 5);
    let mut inactive = Room::new("Storage", 1);
    inactive.status = RoomStatus::Inactive;
    let store = Arc::new(MemoryStore::with_rooms([active.clone()]));
    store.add_room(inactive).unwrap();
    let ctx = TestContext::with_store(store, active.clone());

    let response = ctx.server.get("/api/rooms").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ListRoomsResponse = response.json();
    assert_eq!(body.rooms, vec![active]);
}

#[tokio::test]
async fn test_list_slots_for_free_day() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", ctx.room.id))
        .add_query_param("date", FUTURE_DAY)
        .add_query_param("duration", "3")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ListSlotsResponse = response.json();
    assert_eq!(body.duration_hours, 3);
    assert_eq!(body.slots.len(), 21);
    assert!(body.slots.iter().all(|slot| slot.available));
    assert_eq!(body.slots[0].label, "08:00 AM - 11:00 AM");
    assert_eq!(body.slots.last().unwrap().label, "06:00 PM - 09:00 PM");
}

#[tokio::test]
async fn test_list_slots_wire_format() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", ctx.room.id))
        .add_query_param("date", FUTURE_DAY)
        .await;

    let body: Value = response.json();
    assert_eq!(body["duration_hours"], 1);
    assert_eq!(body["slots"][0]["start_24"], "08:00");
    assert_eq!(body["slots"][0]["end_24"], "09:00");
    assert_eq!(body["slots"][0]["available"], true);
}

#[tokio::test]
async fn test_list_slots_flags_booked_ranges() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("10:00", "13:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", ctx.room.id))
        .add_query_param("date", FUTURE_DAY)
        .add_query_param("duration", "3")
        .await;

    let body: ListSlotsResponse = response.json();
    let unavailable: Vec<String> = body
        .slots
        .iter()
        .filter(|slot| !slot.available)
        .map(|slot| slot.start.format("%H:%M").to_string())
        .collect();
    assert_eq!(
        unavailable,
        vec!["08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30"]
    );
}

#[tokio::test]
async fn test_list_slots_clamps_duration() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", ctx.room.id))
        .add_query_param("date", FUTURE_DAY)
        .add_query_param("duration", "12")
        .await;

    let body: ListSlotsResponse = response.json();
    assert_eq!(body.duration_hours, 3);
}

#[tokio::test]
async fn test_list_slots_validation() {
    let ctx = TestContext::new();

    let missing_date = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", ctx.room.id))
        .await;
    assert_eq!(missing_date.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(missing_date.json::<Value>()["field"], "date");

    let bad_duration = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", ctx.room.id))
        .add_query_param("date", FUTURE_DAY)
        .add_query_param("duration", "two")
        .await;
    assert_eq!(bad_duration.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_duration.json::<Value>()["field"], "duration");

    let bad_id = ctx
        .server
        .get("/api/rooms/not-a-room/slots")
        .add_query_param("date", FUTURE_DAY)
        .await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.json::<Value>()["field"], "room_id");
}

#[tokio::test]
async fn test_list_slots_unknown_room() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/slots", Uuid::new_v4()))
        .add_query_param("date", FUTURE_DAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_bookings_for_day() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("14:00", "15:30"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/bookings", ctx.room.id))
        .add_query_param("date", FUTURE_DAY)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["bookings"][0]["start_time"], "14:00");
    assert_eq!(body["bookings"][0]["end_time"], "15:30");

    let other_day: RoomBookingsResponse = ctx
        .server
        .get(&format!("/api/rooms/{}/bookings", ctx.room.id))
        .add_query_param("date", "2031-03-15")
        .await
        .json();
    assert!(other_day.bookings.is_empty());
}

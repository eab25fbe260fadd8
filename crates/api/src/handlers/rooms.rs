use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use roombook_core::{
    errors::BookingError,
    models::{
        booking::{BookedRange, RoomBookingsResponse},
        room::ListRoomsResponse,
        slot::{ListSlotsRequest, ListSlotsResponse},
    },
    slots, time,
};

use super::{non_blank, parse_id};
use crate::{ApiState, middleware::error_handling::AppError};

const DEFAULT_DURATION_HOURS: u32 = 1;

#[derive(Debug, Default, Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
    /// Whole hours; clamped to the configured range.
    pub duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

/// Active rooms, for the booking form.
#[axum::debug_handler]
pub async fn list_rooms(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListRoomsResponse>, AppError> {
    let rooms = state.store.list_rooms(true).await?;
    Ok(Json(ListRoomsResponse { rooms }))
}

/// Candidate slots for one room and day.
///
/// ```text
/// GET /api/rooms/:id/slots?date=2026-10-20&duration=3
/// ```
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<ListSlotsResponse>, AppError> {
    let room_id = parse_id("room_id", &id)?;
    let date = non_blank(query.date.as_deref())
        .ok_or_else(|| BookingError::validation("date", "is required"))?;
    let date = time::parse_date("date", date)?;

    let requested = match non_blank(query.duration.as_deref()) {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            BookingError::validation("duration", "must be a whole number of hours")
        })?,
        None => DEFAULT_DURATION_HOURS,
    };
    let duration_hours = state.policy.clamp_hours(requested);

    let request = ListSlotsRequest {
        room_id,
        date,
        duration_hours,
    };
    let slots =
        slots::list_slots(state.store.as_ref(), &state.policy, &request, state.now()).await?;

    Ok(Json(ListSlotsResponse {
        room_id,
        date,
        duration_hours,
        slots,
    }))
}

/// Booked ranges of one room for one day.
#[axum::debug_handler]
pub async fn room_bookings(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<Json<RoomBookingsResponse>, AppError> {
    let room_id = parse_id("room_id", &id)?;
    let date = non_blank(query.date.as_deref())
        .ok_or_else(|| BookingError::validation("date", "is required"))?;
    let date = time::parse_date("date", date)?;

    state
        .store
        .get_room(room_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Room with ID {room_id} not found")))?;

    let bookings = state.store.list_room_bookings(room_id, date).await?;

    Ok(Json(RoomBookingsResponse {
        room_id,
        date,
        bookings: bookings.iter().map(BookedRange::from).collect(),
    }))
}

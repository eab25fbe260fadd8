use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use roombook_core::{
    admin,
    errors::BookingError,
    export,
    models::booking::{
        Booking, BookingFilter, BookingScope, BookingStatus, CreateBookingRequest,
        CreateBookingResponse, ListBookingsResponse,
    },
    time,
};

use super::{non_blank, parse_id};
use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsQuery {
    pub room_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    /// `today` or `upcoming`, relative to the site's current date.
    pub scope: Option<String>,
}

impl ListBookingsQuery {
    fn into_filter(self, today: chrono::NaiveDate) -> Result<BookingFilter, BookingError> {
        let mut filter = BookingFilter {
            room_id: non_blank(self.room_id.as_deref())
                .map(|raw| parse_id("room_id", raw))
                .transpose()?,
            date: non_blank(self.date.as_deref())
                .map(|raw| time::parse_date("date", raw))
                .transpose()?,
            status: non_blank(self.status.as_deref())
                .map(str::parse::<BookingStatus>)
                .transpose()?,
            ..BookingFilter::default()
        };

        if let Some(scope) = non_blank(self.scope.as_deref()) {
            let scope = match scope {
                "today" => BookingScope::Today,
                "upcoming" => BookingScope::Upcoming,
                _ => {
                    return Err(BookingError::validation(
                        "scope",
                        "must be `today` or `upcoming`",
                    ));
                }
            };
            filter = filter.with_scope(scope, today);
        }

        Ok(filter)
    }
}

/// Creates a booking. Answers `201 Created` with the new booking id.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let booking = state.committer.commit(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking_id: booking.id,
            status: booking.status,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let filter = query.into_filter(state.today())?;
    let bookings = state.store.list_bookings(&filter).await?;
    Ok(Json(ListBookingsResponse { bookings }))
}

/// Same filters as [`list_bookings`], rendered as a CSV attachment.
#[axum::debug_handler]
pub async fn export_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter(state.today())?;
    let bookings = state.store.list_bookings(&filter).await?;
    let rooms = state.store.list_rooms(false).await?;
    let body = export::bookings_csv(&bookings, &rooms)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"bookings.csv\"",
            ),
        ],
        body,
    ))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_id("booking_id", &id)?;
    let booking = state
        .store
        .get_booking(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {id} not found")))?;

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn approve_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_id("booking_id", &id)?;
    let booking = admin::transition_booking(state.store.as_ref(), id, BookingStatus::Approved).await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_id("booking_id", &id)?;
    let booking =
        admin::transition_booking(state.store.as_ref(), id, BookingStatus::Cancelled).await?;
    Ok(Json(booking))
}

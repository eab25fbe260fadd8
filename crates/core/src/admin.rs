//! Administrative booking operations: status transitions.

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::booking::{Booking, BookingStatus},
    store::BookingStore,
};

/// Applies an administrative status change to booking `id`.
pub async fn transition_booking(
    store: &dyn BookingStore,
    id: Uuid,
    next: BookingStatus,
) -> BookingResult<Booking> {
    let current = store
        .get_booking(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {id} not found")))?;

    current.status.transition_to(next)?;

    let updated = store
        .update_booking_status(id, current.status, next)
        .await?
        .ok_or_else(|| {
            BookingError::Conflict(format!("Booking {id} was modified by another request"))
        })?;

    info!(booking_id = %id, from = %current.status, to = %next, "booking status changed");
    Ok(updated)
}

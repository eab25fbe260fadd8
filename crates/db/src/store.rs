//! PostgreSQL implementation of [`BookingStore`].
//!
//! Inserts run in a transaction that first takes a transaction-scoped
//! advisory lock keyed by `room_id:date`, so the read, the conflict check and
//! the insert of one partition never interleave with another request's. A
//! partial unique index on `(room_id, date, start_time)` catches identical
//! starts if the lock is ever bypassed.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Report, WrapErr};
use roombook_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, BookingFilter, BookingStatus, NewBooking},
        room::Room,
    },
    store::{BookingStore, ConflictCheck},
};
use uuid::Uuid;

use crate::{
    DbPool,
    models::convert_all,
    repositories::{booking as booking_repo, room as room_repo},
};

#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Whether `err` wraps a unique constraint violation from Postgres.
pub fn is_unique_violation(err: &Report) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn get_room(&self, room_id: Uuid) -> BookingResult<Option<Room>> {
        let room = room_repo::get_room_by_id(&self.pool, room_id).await?;
        Ok(room.map(Room::try_from).transpose()?)
    }

    async fn list_rooms(&self, active_only: bool) -> BookingResult<Vec<Room>> {
        let rooms = room_repo::list_rooms(&self.pool, active_only).await?;
        Ok(convert_all(rooms)?)
    }

    async fn list_room_bookings(
        &self,
        room_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Booking>> {
        let bookings = booking_repo::get_blocking_bookings(&self.pool, room_id, date).await?;
        Ok(convert_all(bookings)?)
    }

    async fn insert_booking(
        &self,
        booking: NewBooking,
        check: &ConflictCheck,
    ) -> BookingResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .wrap_err("failed to start booking transaction")?;

        booking_repo::lock_partition(&mut *tx, booking.room_id, booking.date).await?;

        let existing =
            booking_repo::get_blocking_bookings(&mut *tx, booking.room_id, booking.date).await?;
        let existing: Vec<Booking> = convert_all(existing)?;
        check(&existing)?;

        let created = match booking_repo::create_booking(&mut *tx, &booking).await {
            Ok(created) => created,
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!("Unique index rejected booking for room {}", booking.room_id);
                return Err(BookingError::already_booked());
            }
            Err(err) => return Err(err.into()),
        };

        tx.commit()
            .await
            .wrap_err("failed to commit booking transaction")?;

        Ok(Booking::try_from(created)?)
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let booking = booking_repo::get_booking_by_id(&self.pool, id).await?;
        Ok(booking.map(Booking::try_from).transpose()?)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> BookingResult<Vec<Booking>> {
        let bookings = booking_repo::list_bookings(&self.pool, filter).await?;
        Ok(convert_all(bookings)?)
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> BookingResult<Option<Booking>> {
        let booking = booking_repo::update_booking_status(&self.pool, id, expected, next).await?;
        Ok(booking.map(Booking::try_from).transpose()?)
    }
}

//! Persistence boundary.
//!
//! Rooms and bookings are owned by the store; the core re-reads them on every
//! call and never caches rows between requests.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        booking::{Booking, BookingFilter, BookingStatus, NewBooking},
        room::Room,
    },
};

pub use memory::MemoryStore;

/// Conflict check run by [`BookingStore::insert_booking`] against the
/// partition's current blocking bookings.
pub type ConflictCheck = dyn Fn(&[Booking]) -> BookingResult<()> + Send + Sync;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_room(&self, room_id: Uuid) -> BookingResult<Option<Room>>;

    async fn list_rooms(&self, active_only: bool) -> BookingResult<Vec<Room>>;

    /// Non-cancelled bookings for one room and date, ordered by start time.
    async fn list_room_bookings(&self, room_id: Uuid, date: NaiveDate)
    -> BookingResult<Vec<Booking>>;

    /// Inserts `booking` with status `booked`.
    ///
    /// Implementations must read the blocking bookings of the
    /// `(room_id, date)` partition, run `check` on them and insert the row as
    /// one unit of work that is serialized with every other insert into the
    /// same partition. If `check` fails nothing is written and its error is
    /// returned unchanged.
    async fn insert_booking(&self, booking: NewBooking, check: &ConflictCheck)
    -> BookingResult<Booking>;

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    async fn list_bookings(&self, filter: &BookingFilter) -> BookingResult<Vec<Booking>>;

    /// Moves booking `id` from `expected` to `next`. Returns `None` when the
    /// booking does not exist or its status is no longer `expected`.
    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> BookingResult<Option<Booking>>;
}

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::eyre;
use uuid::Uuid;

use super::{BookingStore, ConflictCheck};
use crate::{
    errors::BookingResult,
    models::{
        booking::{Booking, BookingFilter, BookingStatus, NewBooking},
        room::{DEFAULT_ROOMS, Room},
    },
};

/// Process-local store. A single mutex serializes every insert, which gives
/// the same per-partition guarantee the database store gets from its locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rooms: rooms.into_iter().collect(),
                bookings: Vec::new(),
            }),
        }
    }

    /// A store holding the standard seeded rooms.
    pub fn with_default_rooms() -> Self {
        Self::with_rooms(DEFAULT_ROOMS.iter().map(|(name, capacity, description)| {
            let mut room = Room::new(*name, *capacity);
            room.description = description.to_string();
            room
        }))
    }

    pub fn add_room(&self, room: Room) -> BookingResult<()> {
        self.lock()?.rooms.push(room);
        Ok(())
    }

    /// Stores `booking` as-is, bypassing conflict checks. Meant for seeding
    /// fixtures such as cancelled or orphaned rows.
    pub fn put_booking(&self, booking: Booking) -> BookingResult<()> {
        self.lock()?.bookings.push(booking);
        Ok(())
    }

    /// Snapshot of every stored booking, cancelled ones included.
    pub fn bookings(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.lock()?.bookings.clone())
    }

    fn lock(&self) -> BookingResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| eyre!("memory store lock poisoned").into())
    }
}

impl Inner {
    fn blocking(&self, room_id: Uuid, date: NaiveDate) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|booking| booking.blocks(room_id, date))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.start_time);
        bookings
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn get_room(&self, room_id: Uuid) -> BookingResult<Option<Room>> {
        let inner = self.lock()?;
        Ok(inner.rooms.iter().find(|room| room.id == room_id).cloned())
    }

    async fn list_rooms(&self, active_only: bool) -> BookingResult<Vec<Room>> {
        let inner = self.lock()?;
        Ok(inner
            .rooms
            .iter()
            .filter(|room| !active_only || room.is_active())
            .cloned()
            .collect())
    }

    async fn list_room_bookings(
        &self,
        room_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Booking>> {
        Ok(self.lock()?.blocking(room_id, date))
    }

    async fn insert_booking(
        &self,
        booking: NewBooking,
        check: &ConflictCheck,
    ) -> BookingResult<Booking> {
        let mut inner = self.lock()?;

        let existing = inner.blocking(booking.room_id, booking.date);
        check(&existing)?;

        let booking = booking.into_booking(Uuid::new_v4(), Utc::now());
        inner.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let inner = self.lock()?;
        Ok(inner.bookings.iter().find(|booking| booking.id == id).cloned())
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> BookingResult<Vec<Booking>> {
        let inner = self.lock()?;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| (booking.date, booking.start_time));
        Ok(bookings)
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> BookingResult<Option<Booking>> {
        let mut inner = self.lock()?;
        let updated = inner
            .bookings
            .iter_mut()
            .find(|booking| booking.id == id && booking.status == expected)
            .map(|booking| {
                booking.status = next;
                booking.clone()
            });
        Ok(updated)
    }
}

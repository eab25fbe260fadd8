//! # Slot Generation
//!
//! Enumerates fixed-length candidate slots for one room and one day and flags
//! each as available or booked.
//!
//! ## Algorithm
//!
//! 1. Pick the window start: opening time for a future date, "now" rounded
//!    up to the next step boundary (but never before opening) for today, and
//!    closing time for a past date.
//! 2. Walk candidate starts from the window start in `step_minutes`
//!    increments.
//! 3. Stop as soon as a candidate would end after closing time.
//! 4. Flag a candidate unavailable when it overlaps a blocking booking of the
//!    same room and date.
//!
//! An empty result means "no availability" and is not an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use eyre::{Result, ensure};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        booking::Booking,
        slot::{ListSlotsRequest, Slot},
    },
    overlap,
    store::BookingStore,
    time,
};

/// Operating hours and duration limits used to build slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPolicy {
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub step_minutes: u32,
    pub min_duration: TimeDelta,
    pub max_duration: TimeDelta,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            open_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            close_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
            step_minutes: 30,
            min_duration: TimeDelta::hours(1),
            max_duration: TimeDelta::hours(3),
        }
    }
}

impl SlotPolicy {
    pub fn new(
        open_time: NaiveTime,
        close_time: NaiveTime,
        step_minutes: u32,
        min_duration: TimeDelta,
        max_duration: TimeDelta,
    ) -> Result<Self> {
        ensure!(
            open_time < close_time,
            "opening time {open_time} must be before closing time {close_time}"
        );
        ensure!(step_minutes > 0, "slot step must be at least one minute");
        ensure!(
            min_duration > TimeDelta::zero(),
            "minimum booking duration must be positive"
        );
        ensure!(
            min_duration <= max_duration,
            "minimum booking duration exceeds the maximum"
        );

        Ok(Self {
            open_time,
            close_time,
            step_minutes,
            min_duration,
            max_duration,
        })
    }

    /// Forces `duration` into `[min_duration, max_duration]`.
    pub fn clamp_duration(&self, duration: TimeDelta) -> TimeDelta {
        duration.clamp(self.min_duration, self.max_duration)
    }

    /// Clamps a whole-hour duration the way `clamp_duration` does.
    pub fn clamp_hours(&self, hours: u32) -> u32 {
        let min = whole_hours(self.min_duration).max(1);
        let max = whole_hours(self.max_duration).max(min);
        hours.clamp(min, max)
    }

    /// First instant on `date` from which slots may start, given `now` in the
    /// site time zone.
    pub fn window_start(&self, date: NaiveDate, now: NaiveDateTime) -> NaiveDateTime {
        let open = date.and_time(self.open_time);
        let close = date.and_time(self.close_time);

        if date > now.date() {
            open
        } else if date < now.date() {
            close
        } else {
            open.max(time::round_up_to_step(now, self.step_minutes))
        }
    }

    fn step(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.step_minutes.max(1)))
    }
}

/// Whole hours in `delta`, saturating at the bounds of `u32`.
fn whole_hours(delta: TimeDelta) -> u32 {
    u32::try_from(delta.num_hours().max(0)).unwrap_or(u32::MAX)
}

/// Builds the slot list for `room_id` on `date`.
///
/// `bookings` may contain rows for other rooms, other dates or cancelled
/// rows; only blocking bookings of this room and date affect availability.
pub fn generate_slots(
    policy: &SlotPolicy,
    room_id: Uuid,
    date: NaiveDate,
    duration: TimeDelta,
    bookings: &[Booking],
    now: NaiveDateTime,
) -> Vec<Slot> {
    let duration = policy.clamp_duration(duration);
    let close = date.and_time(policy.close_time);
    let step = policy.step();

    let blocking: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| booking.blocks(room_id, date))
        .collect();

    let mut slots = Vec::new();
    let mut start = policy.window_start(date, now);

    while start < close {
        let end = start + duration;
        if end > close {
            break;
        }

        let available = !overlap::has_conflict(start.time(), end.time(), blocking.iter().copied());
        slots.push(Slot::new(start.time(), end.time(), available));

        start += step;
    }

    slots
}

/// Answers a "list slots" request from current store state.
pub async fn list_slots(
    store: &dyn BookingStore,
    policy: &SlotPolicy,
    request: &ListSlotsRequest,
    now: NaiveDateTime,
) -> BookingResult<Vec<Slot>> {
    let room = store
        .get_room(request.room_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", request.room_id)))?;

    if !room.is_active() {
        return Err(BookingError::validation(
            "room_id",
            "room is not available for booking",
        ));
    }

    let bookings = store.list_room_bookings(room.id, request.date).await?;

    Ok(generate_slots(
        policy,
        room.id,
        request.date,
        request.duration(),
        &bookings,
        now,
    ))
}

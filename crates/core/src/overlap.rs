//! Half-open interval overlap checks.
//!
//! Every caller (slot flagging, commit-time validation, the stores) goes
//! through [`overlaps`]: `[s1, e1)` and `[s2, e2)` conflict iff
//! `s1 < e2 && s2 < e1`. Touching intervals such as `[10:00, 13:00)` and
//! `[13:00, 16:00)` do not conflict.

use chrono::NaiveTime;

use crate::{
    errors::{BookingError, BookingResult},
    models::booking::{Booking, NewBooking},
};

pub fn overlaps<T: PartialOrd>(start_a: T, end_a: T, start_b: T, end_b: T) -> bool {
    start_a < end_b && start_b < end_a
}

/// First non-cancelled booking whose interval overlaps `[start, end)`.
pub fn find_conflict<'a, I>(start: NaiveTime, end: NaiveTime, bookings: I) -> Option<&'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .filter(|booking| booking.status.blocks())
        .find(|booking| overlaps(start, end, booking.start_time, booking.end_time))
}

pub fn has_conflict<'a, I>(start: NaiveTime, end: NaiveTime, bookings: I) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    find_conflict(start, end, bookings).is_some()
}

/// Commit-time check: rejects `candidate` if it overlaps any booking that
/// still blocks the same room and date.
pub fn ensure_no_conflict(candidate: &NewBooking, existing: &[Booking]) -> BookingResult<()> {
    let same_partition = existing
        .iter()
        .filter(|booking| booking.blocks(candidate.room_id, candidate.date));

    match find_conflict(candidate.start_time, candidate.end_time, same_partition) {
        Some(booking) => {
            tracing::debug!(
                conflicting_booking = %booking.id,
                room_id = %candidate.room_id,
                date = %candidate.date,
                "candidate overlaps an existing booking"
            );
            Err(BookingError::already_booked())
        }
        None => Ok(()),
    }
}

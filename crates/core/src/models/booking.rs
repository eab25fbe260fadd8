use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    time::hhmm,
};

/// Lifecycle of a booking.
///
/// New bookings start as `Booked`. An administrator may approve or cancel
/// them; approved bookings may still be cancelled. Cancelled is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Booked,
    Approved,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether a booking in this status occupies its interval.
    pub fn blocks(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Booked, Self::Approved)
                | (Self::Booked, Self::Cancelled)
                | (Self::Approved, Self::Cancelled)
        )
    }

    pub fn transition_to(self, next: Self) -> BookingResult<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(BookingError::validation(
                "status",
                format!("cannot change a {self} booking to {next}"),
            ))
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(Self::Booked),
            "approved" => Ok(Self::Approved),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(BookingError::validation(
                "status",
                format!("unknown booking status `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub room_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking occupies `room_id` on `date`.
    pub fn blocks(&self, room_id: Uuid, date: NaiveDate) -> bool {
        self.room_id == room_id && self.date == date && self.status.blocks()
    }
}

/// A structurally valid booking candidate, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub full_name: String,
    pub email: String,
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewBooking {
    pub fn into_booking(self, id: Uuid, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            full_name: self.full_name,
            email: self.email,
            room_id: self.room_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status: BookingStatus::Booked,
            created_at,
        }
    }
}

/// Raw "create booking" payload. Every field is optional on the wire so that
/// missing values surface as field-level validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub room_id: Option<Uuid>,
    #[serde(default)]
    pub date: String,
    #[serde(default, alias = "start")]
    pub start_time: String,
    #[serde(default, alias = "end")]
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: Uuid,
    pub status: BookingStatus,
}

/// A booked interval as exposed by the per-day availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRange {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl From<&Booking> for BookedRange {
    fn from(booking: &Booking) -> Self {
        Self {
            start_time: booking.start_time,
            end_time: booking.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomBookingsResponse {
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub bookings: Vec<BookedRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<Booking>,
}

/// Relative date window for the admin booking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingScope {
    Today,
    Upcoming,
}

/// Criteria for listing bookings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub room_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Narrows the filter to `scope`, relative to `today` in the site time zone.
    pub fn with_scope(mut self, scope: BookingScope, today: NaiveDate) -> Self {
        match scope {
            BookingScope::Today => self.date = Some(today),
            BookingScope::Upcoming => self.date_from = Some(today),
        }
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.room_id.is_none_or(|id| booking.room_id == id)
            && self.date.is_none_or(|date| booking.date == date)
            && self.date_from.is_none_or(|from| booking.date >= from)
            && self.status.is_none_or(|status| booking.status == status)
    }
}

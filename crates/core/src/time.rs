//! Wall-clock helpers shared by slot generation, validation and the wire format.
//!
//! Dates travel as `YYYY-MM-DD` and times as 24-hour `HH:MM`. Stored times may
//! carry seconds (`HH:MM:SS`), which are accepted on input. The 12-hour
//! `hh:mm AM/PM` form is only produced for display labels.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::errors::{BookingError, BookingResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";
const LABEL_FORMAT: &str = "%I:%M %p";
const PRETTY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Parses a `YYYY-MM-DD` request field.
pub fn parse_date(field: &str, value: &str) -> BookingResult<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::validation(field, "is required"));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| BookingError::validation(field, "must be a date in YYYY-MM-DD format"))
}

/// Parses an `HH:MM` (or `HH:MM:SS`) request field.
pub fn parse_time(field: &str, value: &str) -> BookingResult<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::validation(field, "is required"));
    }

    parse_wall_clock(value)
        .ok_or_else(|| BookingError::validation(field, "must be a time in HH:MM format"))
}

fn parse_wall_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, TIME_FORMAT_WITH_SECONDS))
        .ok()
}

pub fn format_time_24(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn format_time_12(time: NaiveTime) -> String {
    time.format(LABEL_FORMAT).to_string()
}

/// Display label for a range, e.g. `09:30 AM - 12:30 PM`.
pub fn range_label(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", format_time_12(start), format_time_12(end))
}

/// Long-form date used in notifications, e.g. `October 15, 2026`.
pub fn format_date_pretty(date: NaiveDate) -> String {
    date.format(PRETTY_DATE_FORMAT).to_string()
}

/// Rounds `instant` up to the next multiple of `step_minutes` past midnight.
///
/// Seconds are dropped first, so 09:00:40 stays at 09:00 with a 30 minute step.
/// An instant already on a boundary is returned unchanged. The result may fall
/// on the following day.
pub fn round_up_to_step(instant: NaiveDateTime, step_minutes: u32) -> NaiveDateTime {
    let truncated = instant
        - TimeDelta::seconds(i64::from(instant.second()))
        - TimeDelta::nanoseconds(i64::from(instant.nanosecond()));

    if step_minutes == 0 {
        return truncated;
    }

    let minutes = truncated.hour() * 60 + truncated.minute();
    match minutes % step_minutes {
        0 => truncated,
        rem => truncated + TimeDelta::minutes(i64::from(step_minutes - rem)),
    }
}

/// Serde adapter writing `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_time_24(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(raw.trim())
            .ok_or_else(|| de::Error::custom(format!("invalid time `{raw}`, expected HH:MM")))
    }
}

pub mod bookings;
pub mod rooms;

use roombook_core::errors::{BookingError, BookingResult};
use uuid::Uuid;

/// Parses an id taken from the path or query string.
fn parse_id(field: &str, raw: &str) -> BookingResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| BookingError::validation(field, "is not a valid id"))
}

/// Treats blank query values as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

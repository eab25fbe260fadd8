//! CSV export of the admin booking listing.

use std::collections::HashMap;

use eyre::{Result, WrapErr, eyre};
use uuid::Uuid;

use crate::{
    models::{booking::Booking, room::Room},
    time,
};

pub const CSV_HEADER: [&str; 8] = [
    "ID", "Name", "Email", "Room", "Date", "Start", "End", "Status",
];

/// Renders `bookings` as CSV, one row per booking in the given order.
///
/// Room names are resolved from `rooms`; a booking whose room no longer
/// exists gets an empty room column.
pub fn bookings_csv(bookings: &[Booking], rooms: &[Room]) -> Result<Vec<u8>> {
    let names: HashMap<Uuid, &str> = rooms
        .iter()
        .map(|room| (room.id, room.name.as_str()))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .wrap_err("failed to write CSV header")?;

    for booking in bookings {
        writer
            .write_record([
                booking.id.to_string(),
                booking.full_name.clone(),
                booking.email.clone(),
                names.get(&booking.room_id).copied().unwrap_or_default().to_string(),
                booking.date.format("%Y-%m-%d").to_string(),
                time::format_time_24(booking.start_time),
                time::format_time_24(booking.end_time),
                booking.status.to_string(),
            ])
            .wrap_err_with(|| format!("failed to write CSV row for booking {}", booking.id))?;
    }

    writer
        .into_inner()
        .map_err(|err| eyre!("failed to flush CSV export: {}", err.error()))
}

//! Post-commit notifications.
//!
//! Notifiers are best-effort: the committer logs their failures and never lets
//! them change the outcome of a booking that has already been stored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{booking::Booking, room::Room},
    time,
};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn on_booking_confirmed(&self, booking: &Booking, room: &Room) -> BookingResult<()>;
}

/// Guest confirmation plus admin alert for one confirmed booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingNotification {
    pub booking_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_subject: String,
    pub admin_email: Option<String>,
    pub admin_subject: String,
    pub room_name: String,
    pub date: String,
    pub time_range: String,
}

impl BookingNotification {
    pub fn confirmed(booking: &Booking, room: &Room, admin_email: Option<&str>) -> Self {
        let date = time::format_date_pretty(booking.date);
        let start = time::format_time_12(booking.start_time);

        Self {
            booking_id: booking.id,
            guest_name: booking.full_name.clone(),
            guest_email: booking.email.clone(),
            guest_subject: format!("Booking Confirmed: {} on {} at {}", room.name, date, start),
            admin_email: admin_email.map(str::to_string),
            admin_subject: format!("New Booking: {} on {} at {}", room.name, date, start),
            room_name: room.name.clone(),
            time_range: time::range_label(booking.start_time, booking.end_time),
            date,
        }
    }
}

/// Writes confirmations to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn on_booking_confirmed(&self, booking: &Booking, room: &Room) -> BookingResult<()> {
        let notification = BookingNotification::confirmed(booking, room, None);
        tracing::info!(
            booking_id = %notification.booking_id,
            guest_email = %notification.guest_email,
            "{}",
            notification.guest_subject
        );
        Ok(())
    }
}

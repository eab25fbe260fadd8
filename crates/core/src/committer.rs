//! # Booking Commit
//!
//! Turns a raw "create booking" request into a stored booking:
//!
//! 1. Validate every field and resolve the room.
//! 2. Hand the candidate to the store together with the overlap check, so the
//!    check runs against fresh partition state inside the store's serialized
//!    unit of work. A conflict leaves nothing behind.
//! 3. Notify collaborators from a detached task, so a slow or failing
//!    notifier never delays or changes the commit result.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, CreateBookingRequest, NewBooking},
        room::Room,
    },
    notify::Notifier,
    overlap,
    store::BookingStore,
    time,
};

const MAX_NAME_LEN: usize = 191;
const MAX_EMAIL_LEN: usize = 191;

#[derive(Clone)]
pub struct BookingCommitter {
    store: Arc<dyn BookingStore>,
    notifier: Arc<dyn Notifier>,
}

impl BookingCommitter {
    pub fn new(store: Arc<dyn BookingStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Validates and persists `request`. The returned booking carries the new
    /// booking id.
    pub async fn commit(&self, request: CreateBookingRequest) -> BookingResult<Booking> {
        let candidate = validate_request(&request)?;
        let room = self.bookable_room(&candidate).await?;

        let check_candidate = candidate.clone();
        let check = move |existing: &[Booking]| overlap::ensure_no_conflict(&check_candidate, existing);

        let booking = self.store.insert_booking(candidate, &check).await?;

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            date = %booking.date,
            start = %time::format_time_24(booking.start_time),
            end = %time::format_time_24(booking.end_time),
            "booking committed"
        );

        self.notify_detached(booking.clone(), room);

        Ok(booking)
    }

    fn notify_detached(&self, booking: Booking, room: Room) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(err) = notifier.on_booking_confirmed(&booking, &room).await {
                warn!(booking_id = %booking.id, error = %err, "booking notification failed");
            }
        });
    }

    async fn bookable_room(&self, candidate: &NewBooking) -> BookingResult<Room> {
        let room = self
            .store
            .get_room(candidate.room_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Room with ID {} not found", candidate.room_id))
            })?;

        if !room.is_active() {
            return Err(BookingError::validation(
                "room_id",
                "room is not available for booking",
            ));
        }

        Ok(room)
    }
}

/// Structural validation of a "create booking" request.
pub fn validate_request(request: &CreateBookingRequest) -> BookingResult<NewBooking> {
    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(BookingError::validation("full_name", "is required"));
    }
    if full_name.chars().count() > MAX_NAME_LEN {
        return Err(BookingError::validation("full_name", "is too long"));
    }

    let email = request.email.trim();
    if email.is_empty() {
        return Err(BookingError::validation("email", "is required"));
    }
    if !is_valid_email(email) {
        return Err(BookingError::validation("email", "is not a valid email address"));
    }

    let room_id = request
        .room_id
        .ok_or_else(|| BookingError::validation("room_id", "is required"))?;

    let date = time::parse_date("date", &request.date)?;
    let start_time = time::parse_time("start_time", &request.start_time)?;
    let end_time = time::parse_time("end_time", &request.end_time)?;

    if end_time <= start_time {
        return Err(BookingError::validation(
            "end_time",
            "must be after start_time",
        ));
    }

    Ok(NewBooking {
        full_name: full_name.to_string(),
        email: email.to_string(),
        room_id,
        date,
        start_time,
        end_time,
    })
}

/// Syntactic address check: one `@`, a dot-atom local part and a dotted
/// domain of alphanumeric/hyphen labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c));

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}

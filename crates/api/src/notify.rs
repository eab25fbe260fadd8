//! Webhook delivery of booking confirmations.

use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use roombook_core::{
    errors::{BookingError, BookingResult},
    models::{booking::Booking, room::Room},
    notify::{BookingNotification, Notifier},
};
use tracing::debug;

/// Posts a [`BookingNotification`] as JSON to a fixed URL. The receiver is
/// expected to send the guest and admin e-mails.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    admin_email: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: String, admin_email: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("failed to build webhook client")?;

        Ok(Self {
            client,
            url,
            admin_email,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn on_booking_confirmed(&self, booking: &Booking, room: &Room) -> BookingResult<()> {
        let notification =
            BookingNotification::confirmed(booking, room, self.admin_email.as_deref());

        let response = self
            .client
            .post(&self.url)
            .json(&notification)
            .send()
            .await
            .map_err(|err| BookingError::Notification(format!("webhook unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookingError::Notification(format!(
                "webhook answered {status}"
            )));
        }

        debug!(booking_id = %booking.id, %status, "booking notification delivered");
        Ok(())
    }
}

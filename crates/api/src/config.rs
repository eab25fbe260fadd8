//! # API Configuration Module
//!
//! Loads configuration for the room booking server from environment
//! variables, with defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `SITE_TIMEZONE`: IANA zone used to decide "today" and "now" (default: "UTC")
//! - `BOOKING_OPEN_TIME` / `BOOKING_CLOSE_TIME`: bookable hours (default: 08:00 / 21:00)
//! - `BOOKING_SLOT_STEP_MINUTES`: distance between slot starts (default: 30)
//! - `BOOKING_MIN_DURATION_HOURS` / `BOOKING_MAX_DURATION_HOURS`: duration range (default: 1 / 3)
//! - `NOTIFY_WEBHOOK_URL`: endpoint receiving booking confirmations (optional)
//! - `ADMIN_EMAIL`: address copied on confirmations (optional)

use chrono::{NaiveTime, TimeDelta};
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use roombook_core::slots::SlotPolicy;
use std::env;
use tracing::Level;

/// Configuration for the room booking server.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use roombook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    pub cors_origins: Option<Vec<String>>,
    /// Request timeout in seconds
    pub request_timeout: u64,
    pub site_timezone: Tz,
    pub slot_policy: SlotPolicy,
    pub notify_webhook_url: Option<String>,
    pub admin_email: Option<String>,
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or any set value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url =
            var("DATABASE_URL").ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Booking settings
        let site_timezone = match var("SITE_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|err| eyre!("Invalid SITE_TIMEZONE value {name:?}: {err}"))?,
            None => Tz::UTC,
        };

        let defaults = SlotPolicy::default();
        let open_time = parse_clock(var("BOOKING_OPEN_TIME"), defaults.open_time)
            .wrap_err("Invalid BOOKING_OPEN_TIME value")?;
        let close_time = parse_clock(var("BOOKING_CLOSE_TIME"), defaults.close_time)
            .wrap_err("Invalid BOOKING_CLOSE_TIME value")?;
        let step_minutes = var("BOOKING_SLOT_STEP_MINUTES")
            .map(|value| value.parse())
            .transpose()
            .wrap_err("Invalid BOOKING_SLOT_STEP_MINUTES value")?
            .unwrap_or(defaults.step_minutes);
        let min_hours: i64 = var("BOOKING_MIN_DURATION_HOURS")
            .map(|value| value.parse())
            .transpose()
            .wrap_err("Invalid BOOKING_MIN_DURATION_HOURS value")?
            .unwrap_or(defaults.min_duration.num_hours());
        let max_hours: i64 = var("BOOKING_MAX_DURATION_HOURS")
            .map(|value| value.parse())
            .transpose()
            .wrap_err("Invalid BOOKING_MAX_DURATION_HOURS value")?
            .unwrap_or(defaults.max_duration.num_hours());

        let slot_policy = SlotPolicy::new(
            open_time,
            close_time,
            step_minutes,
            TimeDelta::hours(min_hours),
            TimeDelta::hours(max_hours),
        )
        .wrap_err("Invalid booking hours configuration")?;

        // Notification settings
        let notify_webhook_url = var("NOTIFY_WEBHOOK_URL");
        let admin_email = var("ADMIN_EMAIL");

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            site_timezone,
            slot_policy,
            notify_webhook_url,
            admin_email,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_clock(value: Option<String>, default: NaiveTime) -> Result<NaiveTime> {
    match value {
        Some(value) => Ok(NaiveTime::parse_from_str(value.trim(), "%H:%M")?),
        None => Ok(default),
    }
}

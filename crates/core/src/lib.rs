//! # Roombook Core
//!
//! Availability and booking engine for a meeting-room scheduler: slot
//! generation, half-open overlap validation and race-safe booking commits.
//!
//! Persistence and notifications are collaborators behind the
//! [`store::BookingStore`] and [`notify::Notifier`] traits; "now" is always an
//! explicit argument.

pub mod admin;
pub mod committer;
pub mod errors;
pub mod export;
pub mod models;
pub mod notify;
pub mod overlap;
pub mod slots;
pub mod store;
pub mod time;

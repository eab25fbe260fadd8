use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl BookingError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The user-facing "already booked" error.
    pub fn already_booked() -> Self {
        Self::Conflict("This room is already booked for the selected time.".to_string())
    }

    /// Name of the offending request field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

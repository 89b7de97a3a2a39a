//! Messaging errors

use thiserror::Error;

/// Messaging errors
#[derive(Error, Debug)]
pub enum MessagingError {
    /// Booking does not exist
    #[error("booking not found")]
    BookingNotFound,

    /// Tutor profile on the booking does not exist
    #[error("tutor not found")]
    TutorNotFound,

    /// Caller is not a party to the booking
    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    /// Message flagged by the contact-info filter
    ///
    /// The message was persisted for moderation before this error was
    /// returned; the sender sees a rejection.
    #[error("sharing contact information is not allowed ({reason})")]
    ContactInfoDetected {
        /// Which pattern matched
        reason: &'static str,
    },

    /// Database error
    #[error("database error: {0}")]
    Database(String),
}

impl MessagingError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BookingNotFound | Self::TutorNotFound => 404,
            Self::Forbidden(_) | Self::ContactInfoDetected { .. } => 403,
            Self::Database(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::TutorNotFound => "TUTOR_NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::ContactInfoDetected { .. } => "CONTACT_INFO_BLOCKED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<aviator_db::DbError> for MessagingError {
    fn from(err: aviator_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}

//! Booking errors

use thiserror::Error;

/// Booking lifecycle errors
#[derive(Error, Debug)]
pub enum BookingError {
    /// Tutor profile does not exist or is not approved
    #[error("tutor not found")]
    TutorNotFound,

    /// Student does not exist
    #[error("student not found")]
    StudentNotFound,

    /// Booking does not exist
    #[error("booking not found")]
    BookingNotFound,

    /// Tutor has no positive hourly rate to book against
    #[error("tutor has no hourly rate set")]
    MissingHourlyRate,

    /// Lesson shorter than the configured minimum
    #[error("duration must be at least {min} minutes, got {got}")]
    InvalidDuration { min: i32, got: i32 },

    /// Unknown IANA timezone name
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Local datetime does not exist in the timezone (DST gap)
    #[error("invalid local time: {0}")]
    InvalidLocalTime(String),

    /// Requested interval overlaps an existing booking
    #[error("the requested time slot is unavailable")]
    SlotUnavailable,

    /// Transition precondition not met (e.g. accept on a confirmed booking)
    #[error("cannot {action} a booking in status {status}")]
    InvalidTransition {
        action: &'static str,
        status: String,
    },

    /// Caller is not allowed to perform the operation
    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    /// Database error
    #[error("database error: {0}")]
    Database(String),
}

impl BookingError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::TutorNotFound | Self::StudentNotFound | Self::BookingNotFound => 404,
            Self::MissingHourlyRate
            | Self::InvalidDuration { .. }
            | Self::InvalidTimezone(_)
            | Self::InvalidLocalTime(_)
            | Self::SlotUnavailable
            | Self::InvalidTransition { .. } => 400,
            Self::Forbidden(_) => 403,
            Self::Database(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TutorNotFound => "TUTOR_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::MissingHourlyRate => "MISSING_HOURLY_RATE",
            Self::InvalidDuration { .. } => "INVALID_DURATION",
            Self::InvalidTimezone(_) => "INVALID_TIMEZONE",
            Self::InvalidLocalTime(_) => "INVALID_LOCAL_TIME",
            Self::SlotUnavailable => "SLOT_UNAVAILABLE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<aviator_db::DbError> for BookingError {
    fn from(err: aviator_db::DbError) -> Self {
        match err {
            aviator_db::DbError::SlotTaken => Self::SlotUnavailable,
            aviator_db::DbError::NotFound => Self::BookingNotFound,
            aviator_db::DbError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                Self::Database(e.to_string())
            }
        }
    }
}

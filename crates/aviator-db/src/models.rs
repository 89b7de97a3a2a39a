//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Status columns are stored as text; typed accessors parse them into the
//! shared enums.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use aviator_types::{BookingStatus, BookingType, Role, TutorStatus};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    /// IANA timezone name, e.g. "America/New_York"
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tutor profile row from the database
#[derive(Debug, Clone, FromRow)]
pub struct TutorProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub hourly_rate: Decimal,
    pub total_lessons_taught: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking row from the database
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub booking_type: String,
    pub status: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    /// Student's IANA timezone at booking time
    pub timezone: String,
    pub lesson_type: Option<String>,
    pub price_per_hour: Decimal,
    pub total_price: Decimal,
    pub platform_fee: Decimal,
    pub tutor_payout: Decimal,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tutor wallet row from the database
#[derive(Debug, Clone, FromRow)]
pub struct WalletRow {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub balance: Decimal,
    pub pending_balance: Decimal,
    pub total_earned: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chat message row from the database
#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub is_flagged: bool,
    pub flagged_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Booking request row (1:1 companion to a booking with an initial message)
#[derive(Debug, Clone, FromRow)]
pub struct BookingRequestRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub student_id: Uuid,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// Typed accessors from row types to aviator-types domain types

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> aviator_types::UserId {
        aviator_types::UserId(self.id)
    }

    /// Parse the stored role
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

impl TutorProfileRow {
    /// Convert to domain TutorId
    pub fn tutor_id(&self) -> aviator_types::TutorId {
        aviator_types::TutorId(self.id)
    }

    /// Parse the stored approval status
    pub fn status(&self) -> Option<TutorStatus> {
        self.status.parse().ok()
    }
}

impl BookingRow {
    /// Convert to domain BookingId
    pub fn booking_id(&self) -> aviator_types::BookingId {
        aviator_types::BookingId(self.id)
    }

    /// Parse the stored lifecycle status
    pub fn status(&self) -> Option<BookingStatus> {
        self.status.parse().ok()
    }

    /// Parse the stored booking type
    pub fn booking_type(&self) -> Option<BookingType> {
        self.booking_type.parse().ok()
    }

    /// End of the booked interval (`scheduled_at + duration`)
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
    }
}

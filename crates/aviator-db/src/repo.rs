//! Repository traits
//!
//! Define async repository interfaces for database operations. The booking
//! repository owns the multi-row transactions (slot-checked insert,
//! completion credit) so callers cannot split them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;
}

/// Tutor profile repository trait
#[async_trait]
pub trait TutorProfileRepository: Send + Sync {
    /// Find a tutor profile by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<TutorProfileRow>>;

    /// Find a tutor profile by the owning user's ID
    async fn find_by_user_id(&self, user_id: Uuid) -> DbResult<Option<TutorProfileRow>>;
}

/// Booking repository trait
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<BookingRow>>;

    /// Find the tutor's pending/confirmed bookings whose interval overlaps
    /// `[start, end)`, excluding `exclude` if given
    async fn find_overlapping(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> DbResult<Vec<BookingRow>>;

    /// Insert a new booking in `pending` status
    ///
    /// The implementation re-checks slot availability and inserts inside a
    /// single serializable transaction; a conflicting row yields
    /// [`crate::DbError::SlotTaken`]. When `initial_message` is present the
    /// companion booking-request row is inserted in the same transaction.
    async fn create(&self, booking: CreateBooking) -> DbResult<BookingRow>;

    /// List bookings by student, newest first
    async fn list_by_student(&self, student_id: Uuid) -> DbResult<Vec<BookingRow>>;

    /// List bookings by tutor profile, newest first
    async fn list_by_tutor(&self, tutor_id: Uuid) -> DbResult<Vec<BookingRow>>;

    /// List all bookings, newest first (admin)
    async fn list_all(&self, limit: i64) -> DbResult<Vec<BookingRow>>;

    /// Update booking status
    async fn update_status(&self, id: Uuid, status: &str) -> DbResult<()>;

    /// Move a booking to a new scheduled time
    async fn reschedule(&self, id: Uuid, scheduled_at: DateTime<Utc>) -> DbResult<()>;

    /// Cancel a booking with audit fields
    async fn cancel(
        &self,
        id: Uuid,
        reason: &str,
        cancelled_by: Uuid,
        cancelled_at: DateTime<Utc>,
    ) -> DbResult<()>;

    /// Complete a booking and credit the tutor
    ///
    /// Atomically: status → `completed` with `completed_at`, wallet upsert
    /// crediting `pending_balance` and `total_earned` by `payout`, and
    /// `total_lessons_taught + 1` on the tutor profile. All three commit
    /// together or not at all.
    async fn complete(
        &self,
        id: Uuid,
        tutor_id: Uuid,
        payout: Decimal,
        completed_at: DateTime<Utc>,
    ) -> DbResult<()>;
}

/// Create booking input
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub booking_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub timezone: String,
    pub lesson_type: Option<String>,
    pub price_per_hour: Decimal,
    pub total_price: Decimal,
    pub platform_fee: Decimal,
    pub tutor_payout: Decimal,
    /// Optional student message; creates the companion booking request
    pub initial_message: Option<String>,
}

/// Tutor wallet repository trait
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Find a wallet by tutor profile ID
    async fn find_by_tutor_id(&self, tutor_id: Uuid) -> DbResult<Option<WalletRow>>;
}

/// Chat message repository trait
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message
    async fn create(&self, message: CreateMessage) -> DbResult<MessageRow>;

    /// List messages for a booking, oldest first
    async fn list_by_booking(&self, booking_id: Uuid) -> DbResult<Vec<MessageRow>>;
}

/// Create message input
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub is_flagged: bool,
    pub flagged_reason: Option<String>,
}

/// Booking request repository trait
#[async_trait]
pub trait BookingRequestRepository: Send + Sync {
    /// Find the companion request for a booking
    async fn find_by_booking(&self, booking_id: Uuid) -> DbResult<Option<BookingRequestRow>>;
}

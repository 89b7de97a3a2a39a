//! PostgreSQL booking request repository implementation
//!
//! Booking requests are inserted by the booking creation transaction; this
//! repository only reads them back.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::BookingRequestRow;
use crate::repo::BookingRequestRepository;

/// PostgreSQL booking request repository
#[derive(Clone)]
pub struct PgBookingRequestRepository {
    pool: PgPool,
}

impl PgBookingRequestRepository {
    /// Create a new booking request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRequestRepository for PgBookingRequestRepository {
    async fn find_by_booking(&self, booking_id: Uuid) -> DbResult<Option<BookingRequestRow>> {
        let request = sqlx::query_as::<_, BookingRequestRow>(
            r#"
            SELECT id, booking_id, student_id, message, status, created_at
            FROM booking_requests
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }
}

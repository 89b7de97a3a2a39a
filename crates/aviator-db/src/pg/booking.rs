//! PostgreSQL booking repository implementation
//!
//! The slot-checked insert and the completion credit are the two multi-row
//! mutations in the system; both run inside a single transaction here so
//! callers cannot observe partial state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::BookingRow;
use crate::repo::{BookingRepository, CreateBooking};

const BOOKING_COLUMNS: &str = r#"
    id, student_id, tutor_id, booking_type, status, scheduled_at,
    duration_minutes, timezone, lesson_type, price_per_hour, total_price,
    platform_fee, tutor_payout, completed_at, cancelled_at, cancelled_by,
    cancellation_reason, created_at, updated_at
"#;

/// PostgreSQL booking repository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<BookingRow>> {
        let booking = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find_overlapping(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> DbResult<Vec<BookingRow>> {
        // Boundary-exclusive interval intersection: existing.start < new.end
        // AND existing.end > new.start. Back-to-back lessons do not collide.
        let bookings = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE tutor_id = $1
              AND status IN ('pending', 'confirmed')
              AND scheduled_at < $3
              AND scheduled_at + make_interval(mins => duration_minutes) > $2
              AND ($4::uuid IS NULL OR id <> $4)
            ORDER BY scheduled_at
            "#
        ))
        .bind(tutor_id)
        .bind(start)
        .bind(end)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn create(&self, booking: CreateBooking) -> DbResult<BookingRow> {
        let mut tx = self.pool.begin().await?;

        // Serializable isolation closes the race where two concurrent
        // requests both pass the overlap check before either commits.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let end = booking.scheduled_at
            + chrono::Duration::minutes(i64::from(booking.duration_minutes));

        let (conflicts,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM bookings
            WHERE tutor_id = $1
              AND status IN ('pending', 'confirmed')
              AND scheduled_at < $3
              AND scheduled_at + make_interval(mins => duration_minutes) > $2
            "#,
        )
        .bind(booking.tutor_id)
        .bind(booking.scheduled_at)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        if conflicts > 0 {
            return Err(DbError::SlotTaken);
        }

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            INSERT INTO bookings (
                id, student_id, tutor_id, booking_type, status, scheduled_at,
                duration_minutes, timezone, lesson_type, price_per_hour,
                total_price, platform_fee, tutor_payout
            )
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking.id)
        .bind(booking.student_id)
        .bind(booking.tutor_id)
        .bind(&booking.booking_type)
        .bind(booking.scheduled_at)
        .bind(booking.duration_minutes)
        .bind(&booking.timezone)
        .bind(&booking.lesson_type)
        .bind(booking.price_per_hour)
        .bind(booking.total_price)
        .bind(booking.platform_fee)
        .bind(booking.tutor_payout)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ref message) = booking.initial_message {
            sqlx::query(
                r#"
                INSERT INTO booking_requests (id, booking_id, student_id, message, status)
                VALUES ($1, $2, $3, $4, 'pending')
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(booking.id)
            .bind(booking.student_id)
            .bind(message)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row)
    }

    async fn list_by_student(&self, student_id: Uuid) -> DbResult<Vec<BookingRow>> {
        let bookings = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE student_id = $1
            ORDER BY scheduled_at DESC
            "#
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn list_by_tutor(&self, tutor_id: Uuid) -> DbResult<Vec<BookingRow>> {
        let bookings = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE tutor_id = $1
            ORDER BY scheduled_at DESC
            "#
        ))
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn list_all(&self, limit: i64) -> DbResult<Vec<BookingRow>> {
        let bookings = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            ORDER BY scheduled_at DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> DbResult<()> {
        sqlx::query("UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn reschedule(&self, id: Uuid, scheduled_at: DateTime<Utc>) -> DbResult<()> {
        sqlx::query("UPDATE bookings SET scheduled_at = $1, updated_at = NOW() WHERE id = $2")
            .bind(scheduled_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cancel(
        &self,
        id: Uuid,
        reason: &str,
        cancelled_by: Uuid,
        cancelled_at: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'cancelled', cancellation_reason = $1, cancelled_by = $2,
                cancelled_at = $3, updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(reason)
        .bind(cancelled_by)
        .bind(cancelled_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn complete(
        &self,
        id: Uuid,
        tutor_id: Uuid,
        payout: Decimal,
        completed_at: DateTime<Utc>,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'completed', completed_at = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(completed_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        // Atomic increments: concurrent completions for the same tutor must
        // not lose updates.
        sqlx::query(
            r#"
            INSERT INTO tutor_wallets (id, tutor_id, balance, pending_balance, total_earned)
            VALUES ($1, $2, 0, $3, $3)
            ON CONFLICT (tutor_id)
            DO UPDATE SET pending_balance = tutor_wallets.pending_balance + EXCLUDED.pending_balance,
                          total_earned = tutor_wallets.total_earned + EXCLUDED.total_earned,
                          updated_at = NOW()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tutor_id)
        .bind(payout)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE tutor_profiles
            SET total_lessons_taught = total_lessons_taught + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(tutor_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

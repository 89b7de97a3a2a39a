//! Mock repositories for testing
//!
//! In-memory implementations over dashmap. The booking mock mirrors the
//! Postgres repository's transactional behavior: the slot re-check inside
//! `create`, and the wallet/stats credit inside `complete`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use aviator_db::{
    BookingRepository, BookingRequestRow, BookingRow, CreateBooking, DbError, DbResult,
    TutorProfileRepository, TutorProfileRow, UserRepository, UserRow, WalletRepository, WalletRow,
};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user with the given timezone, returning its id
    pub fn insert_user(&self, timezone: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(
            id,
            UserRow {
                id,
                email: format!("user-{id}@example.com"),
                full_name: "Test User".to_string(),
                role: "student".to_string(),
                timezone: timezone.to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .iter()
            .find(|r| r.value().email == email)
            .map(|r| r.value().clone()))
    }
}

/// In-memory tutor profile repository for testing
#[derive(Default, Clone)]
pub struct MockTutorRepository {
    tutors: Arc<DashMap<Uuid, TutorProfileRow>>,
}

impl MockTutorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tutor profile, returning its id
    pub fn insert_tutor(&self, user_id: Uuid, status: &str, hourly_rate: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        self.tutors.insert(
            id,
            TutorProfileRow {
                id,
                user_id,
                status: status.to_string(),
                hourly_rate,
                total_lessons_taught: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }

    /// Change a tutor's live rate (bookings must keep their snapshot)
    pub fn set_rate(&self, id: Uuid, hourly_rate: Decimal) {
        if let Some(mut t) = self.tutors.get_mut(&id) {
            t.hourly_rate = hourly_rate;
        }
    }

    pub fn lessons_taught(&self, id: Uuid) -> i32 {
        self.tutors.get(&id).map(|t| t.total_lessons_taught).unwrap_or(0)
    }

    fn shared(&self) -> Arc<DashMap<Uuid, TutorProfileRow>> {
        Arc::clone(&self.tutors)
    }
}

#[async_trait]
impl TutorProfileRepository for MockTutorRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<TutorProfileRow>> {
        Ok(self.tutors.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> DbResult<Option<TutorProfileRow>> {
        Ok(self
            .tutors
            .iter()
            .find(|r| r.value().user_id == user_id)
            .map(|r| r.value().clone()))
    }
}

/// In-memory wallet repository for testing
#[derive(Default, Clone)]
pub struct MockWalletRepository {
    // Keyed by tutor profile id
    wallets: Arc<DashMap<Uuid, WalletRow>>,
}

impl MockWalletRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn shared(&self) -> Arc<DashMap<Uuid, WalletRow>> {
        Arc::clone(&self.wallets)
    }
}

#[async_trait]
impl WalletRepository for MockWalletRepository {
    async fn find_by_tutor_id(&self, tutor_id: Uuid) -> DbResult<Option<WalletRow>> {
        Ok(self.wallets.get(&tutor_id).map(|r| r.value().clone()))
    }
}

/// In-memory booking repository for testing
#[derive(Clone)]
pub struct MockBookingRepository {
    bookings: Arc<DashMap<Uuid, BookingRow>>,
    requests: Arc<DashMap<Uuid, BookingRequestRow>>,
    wallets: Arc<DashMap<Uuid, WalletRow>>,
    tutors: Arc<DashMap<Uuid, TutorProfileRow>>,
}

impl MockBookingRepository {
    pub fn new(tutors: &MockTutorRepository, wallets: &MockWalletRepository) -> Self {
        Self {
            bookings: Arc::new(DashMap::new()),
            requests: Arc::new(DashMap::new()),
            wallets: wallets.shared(),
            tutors: tutors.shared(),
        }
    }

    /// The companion request for a booking, if any
    pub fn request_for(&self, booking_id: Uuid) -> Option<BookingRequestRow> {
        self.requests.get(&booking_id).map(|r| r.value().clone())
    }

    fn conflicts(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Vec<BookingRow> {
        self.bookings
            .iter()
            .filter(|r| {
                let b = r.value();
                b.tutor_id == tutor_id
                    && (b.status == "pending" || b.status == "confirmed")
                    && Some(b.id) != exclude
                    && b.scheduled_at < end
                    && b.ends_at() > start
            })
            .map(|r| r.value().clone())
            .collect()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<BookingRow>> {
        Ok(self.bookings.get(&id).map(|r| r.value().clone()))
    }

    async fn find_overlapping(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> DbResult<Vec<BookingRow>> {
        Ok(self.conflicts(tutor_id, start, end, exclude))
    }

    async fn create(&self, booking: CreateBooking) -> DbResult<BookingRow> {
        let end = booking.scheduled_at + Duration::minutes(i64::from(booking.duration_minutes));
        if !self.conflicts(booking.tutor_id, booking.scheduled_at, end, None).is_empty() {
            return Err(DbError::SlotTaken);
        }

        let row = BookingRow {
            id: booking.id,
            student_id: booking.student_id,
            tutor_id: booking.tutor_id,
            booking_type: booking.booking_type,
            status: "pending".to_string(),
            scheduled_at: booking.scheduled_at,
            duration_minutes: booking.duration_minutes,
            timezone: booking.timezone,
            lesson_type: booking.lesson_type,
            price_per_hour: booking.price_per_hour,
            total_price: booking.total_price,
            platform_fee: booking.platform_fee,
            tutor_payout: booking.tutor_payout,
            completed_at: None,
            cancelled_at: None,
            cancelled_by: None,
            cancellation_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        if let Some(message) = booking.initial_message {
            self.requests.insert(
                booking.id,
                BookingRequestRow {
                    id: Uuid::new_v4(),
                    booking_id: booking.id,
                    student_id: booking.student_id,
                    message,
                    status: "pending".to_string(),
                    created_at: Utc::now(),
                },
            );
        }

        self.bookings.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_by_student(&self, student_id: Uuid) -> DbResult<Vec<BookingRow>> {
        Ok(self
            .bookings
            .iter()
            .filter(|r| r.value().student_id == student_id)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn list_by_tutor(&self, tutor_id: Uuid) -> DbResult<Vec<BookingRow>> {
        Ok(self
            .bookings
            .iter()
            .filter(|r| r.value().tutor_id == tutor_id)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn list_all(&self, limit: i64) -> DbResult<Vec<BookingRow>> {
        Ok(self
            .bookings
            .iter()
            .take(limit as usize)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: &str) -> DbResult<()> {
        if let Some(mut b) = self.bookings.get_mut(&id) {
            b.status = status.to_string();
            b.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn reschedule(&self, id: Uuid, scheduled_at: DateTime<Utc>) -> DbResult<()> {
        if let Some(mut b) = self.bookings.get_mut(&id) {
            b.scheduled_at = scheduled_at;
            b.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn cancel(
        &self,
        id: Uuid,
        reason: &str,
        cancelled_by: Uuid,
        cancelled_at: DateTime<Utc>,
    ) -> DbResult<()> {
        if let Some(mut b) = self.bookings.get_mut(&id) {
            b.status = "cancelled".to_string();
            b.cancellation_reason = Some(reason.to_string());
            b.cancelled_by = Some(cancelled_by);
            b.cancelled_at = Some(cancelled_at);
            b.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn complete(
        &self,
        id: Uuid,
        tutor_id: Uuid,
        payout: Decimal,
        completed_at: DateTime<Utc>,
    ) -> DbResult<()> {
        if let Some(mut b) = self.bookings.get_mut(&id) {
            b.status = "completed".to_string();
            b.completed_at = Some(completed_at);
            b.updated_at = Utc::now();
        }

        self.wallets
            .entry(tutor_id)
            .and_modify(|w| {
                w.pending_balance += payout;
                w.total_earned += payout;
                w.updated_at = Utc::now();
            })
            .or_insert_with(|| WalletRow {
                id: Uuid::new_v4(),
                tutor_id,
                balance: Decimal::ZERO,
                pending_balance: payout,
                total_earned: payout,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });

        if let Some(mut t) = self.tutors.get_mut(&tutor_id) {
            t.total_lessons_taught += 1;
        }
        Ok(())
    }
}

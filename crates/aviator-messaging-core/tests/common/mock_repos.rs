//! Mock repositories for messaging tests
//!
//! The messaging service only reads bookings and tutor profiles, so these
//! mocks are seeded directly with rows rather than driven through the
//! booking lifecycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

use aviator_db::{
    BookingRepository, BookingRow, CreateBooking, CreateMessage, DbResult, MessageRepository,
    MessageRow, TutorProfileRepository, TutorProfileRow,
};

/// In-memory booking store seeded with prebuilt rows
#[derive(Default, Clone)]
pub struct MockBookingRepository {
    bookings: Arc<DashMap<Uuid, BookingRow>>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a confirmed booking between a student and a tutor profile
    pub fn insert_booking(&self, student_id: Uuid, tutor_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.bookings.insert(
            id,
            BookingRow {
                id,
                student_id,
                tutor_id,
                booking_type: "one_on_one".to_string(),
                status: "confirmed".to_string(),
                scheduled_at: Utc::now(),
                duration_minutes: 60,
                timezone: "UTC".to_string(),
                lesson_type: None,
                price_per_hour: dec!(60),
                total_price: dec!(60.00),
                platform_fee: dec!(9.00),
                tutor_payout: dec!(51.00),
                completed_at: None,
                cancelled_at: None,
                cancelled_by: None,
                cancellation_reason: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<BookingRow>> {
        Ok(self.bookings.get(&id).map(|r| r.value().clone()))
    }

    async fn find_overlapping(
        &self,
        _tutor_id: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _exclude: Option<Uuid>,
    ) -> DbResult<Vec<BookingRow>> {
        Ok(Vec::new())
    }

    async fn create(&self, _booking: CreateBooking) -> DbResult<BookingRow> {
        unreachable!("messaging tests never create bookings")
    }

    async fn list_by_student(&self, _student_id: Uuid) -> DbResult<Vec<BookingRow>> {
        Ok(Vec::new())
    }

    async fn list_by_tutor(&self, _tutor_id: Uuid) -> DbResult<Vec<BookingRow>> {
        Ok(Vec::new())
    }

    async fn list_all(&self, _limit: i64) -> DbResult<Vec<BookingRow>> {
        Ok(Vec::new())
    }

    async fn update_status(&self, _id: Uuid, _status: &str) -> DbResult<()> {
        Ok(())
    }

    async fn reschedule(&self, _id: Uuid, _scheduled_at: DateTime<Utc>) -> DbResult<()> {
        Ok(())
    }

    async fn cancel(
        &self,
        _id: Uuid,
        _reason: &str,
        _cancelled_by: Uuid,
        _cancelled_at: DateTime<Utc>,
    ) -> DbResult<()> {
        Ok(())
    }

    async fn complete(
        &self,
        _id: Uuid,
        _tutor_id: Uuid,
        _payout: Decimal,
        _completed_at: DateTime<Utc>,
    ) -> DbResult<()> {
        Ok(())
    }
}

/// In-memory tutor profile store
#[derive(Default, Clone)]
pub struct MockTutorRepository {
    tutors: Arc<DashMap<Uuid, TutorProfileRow>>,
}

impl MockTutorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an approved tutor profile owned by `user_id`
    pub fn insert_tutor(&self, user_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.tutors.insert(
            id,
            TutorProfileRow {
                id,
                user_id,
                status: "approved".to_string(),
                hourly_rate: dec!(60),
                total_lessons_taught: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
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

/// In-memory message store
#[derive(Default, Clone)]
pub struct MockMessageRepository {
    messages: Arc<DashMap<Uuid, MessageRow>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages, flagged ones included
    pub fn stored_count(&self) -> usize {
        self.messages.len()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn create(&self, message: CreateMessage) -> DbResult<MessageRow> {
        let row = MessageRow {
            id: message.id,
            booking_id: message.booking_id,
            sender_id: message.sender_id,
            body: message.body,
            is_flagged: message.is_flagged,
            flagged_reason: message.flagged_reason,
            created_at: Utc::now(),
        };
        self.messages.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_by_booking(&self, booking_id: Uuid) -> DbResult<Vec<MessageRow>> {
        let mut rows: Vec<MessageRow> = self
            .messages
            .iter()
            .filter(|r| r.value().booking_id == booking_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by_key(|m| m.created_at);
        Ok(rows)
    }
}

//! Booking service - creation, lifecycle transitions, and the earnings ledger

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use aviator_db::{
    BookingRepository, BookingRow, CreateBooking, TutorProfileRepository, UserRepository,
    WalletRepository, WalletRow,
};
use aviator_types::{Actor, BookingId, BookingStatus, BookingType, Role, TutorId, UserId};

use crate::authz::{authorize_transition, authorize_view, BookingParties, Transition};
use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::{pricing, schedule};

/// Input for booking creation
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// Tutor profile to book
    pub tutor_id: TutorId,
    /// Requested start, local to the student's stored timezone
    pub scheduled_at_local: NaiveDateTime,
    /// Lesson length in minutes
    pub duration_minutes: i32,
    /// Kind of lesson
    pub booking_type: BookingType,
    /// Free-form lesson type label ("checkride prep", ...)
    pub lesson_type: Option<String>,
    /// Optional initial message; creates the companion booking request
    pub message: Option<String>,
}

/// Admin filter for booking listings
///
/// Ignored for student and tutor callers, whose listings are always scoped
/// to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    /// Restrict to one student's bookings
    pub student_id: Option<UserId>,
    /// Restrict to one tutor profile's bookings
    pub tutor_id: Option<TutorId>,
}

/// Booking lifecycle service
///
/// Generic over the repository traits so tests can run against in-memory
/// implementations. All pricing fields are snapshotted at creation and
/// never recomputed; only status, schedule, and audit metadata mutate
/// afterwards.
pub struct BookingService<U, T, B, W> {
    config: BookingConfig,
    users: Arc<U>,
    tutors: Arc<T>,
    bookings: Arc<B>,
    wallets: Arc<W>,
}

impl<U, T, B, W> BookingService<U, T, B, W>
where
    U: UserRepository,
    T: TutorProfileRepository,
    B: BookingRepository,
    W: WalletRepository,
{
    /// Create a new booking service
    pub fn new(
        config: BookingConfig,
        users: Arc<U>,
        tutors: Arc<T>,
        bookings: Arc<B>,
        wallets: Arc<W>,
    ) -> Self {
        Self {
            config,
            users,
            tutors,
            bookings,
            wallets,
        }
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create a booking in `pending` status
    ///
    /// Validates the tutor (approved, positive rate), converts the local
    /// start time through the student's IANA timezone, rejects overlapping
    /// slots, and persists the pricing snapshot. The repository re-checks
    /// the slot inside its insert transaction, so a concurrent creation
    /// cannot double-book.
    pub async fn create_booking(
        &self,
        actor: &Actor,
        input: CreateBookingInput,
    ) -> Result<BookingRow, BookingError> {
        let tutor = self
            .tutors
            .find_by_id(input.tutor_id.0)
            .await?
            .ok_or(BookingError::TutorNotFound)?;

        if !tutor.status().is_some_and(|s| s.is_bookable()) {
            return Err(BookingError::TutorNotFound);
        }
        if tutor.hourly_rate <= rust_decimal::Decimal::ZERO {
            return Err(BookingError::MissingHourlyRate);
        }

        let student = self
            .users
            .find_by_id(actor.user_id.0)
            .await?
            .ok_or(BookingError::StudentNotFound)?;

        if input.duration_minutes < self.config.min_duration_minutes {
            return Err(BookingError::InvalidDuration {
                min: self.config.min_duration_minutes,
                got: input.duration_minutes,
            });
        }

        let scheduled_at = schedule::local_to_utc(input.scheduled_at_local, &student.timezone)?;
        let ends_at = schedule::end_of(scheduled_at, input.duration_minutes);

        // Fast-fail before paying for the insert transaction; the repository
        // repeats this check serializably.
        let conflicts = self
            .bookings
            .find_overlapping(input.tutor_id.0, scheduled_at, ends_at, None)
            .await?;
        if !conflicts.is_empty() {
            return Err(BookingError::SlotUnavailable);
        }

        let breakdown = pricing::compute(
            tutor.hourly_rate,
            input.duration_minutes,
            self.config.platform_fee_percent,
        );

        let booking = self
            .bookings
            .create(CreateBooking {
                id: Uuid::new_v4(),
                student_id: student.id,
                tutor_id: tutor.id,
                booking_type: input.booking_type.to_string(),
                scheduled_at,
                duration_minutes: input.duration_minutes,
                timezone: student.timezone.clone(),
                lesson_type: input.lesson_type,
                price_per_hour: breakdown.price_per_hour,
                total_price: breakdown.total_price,
                platform_fee: breakdown.platform_fee,
                tutor_payout: breakdown.tutor_payout,
                initial_message: input.message,
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            tutor_id = %tutor.id,
            student_id = %student.id,
            scheduled_at = %scheduled_at,
            total_price = %breakdown.total_price,
            "Booking created"
        );

        Ok(booking)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a single booking, visible to its parties and admins
    pub async fn get_booking(
        &self,
        actor: &Actor,
        id: BookingId,
    ) -> Result<BookingRow, BookingError> {
        let booking = self.load(id).await?;
        let parties = self.parties_of(&booking).await?;
        authorize_view(actor, &parties)?;
        Ok(booking)
    }

    /// List bookings scoped to the caller
    ///
    /// Students see their own, tutors see their profile's. Admins see all
    /// (capped by config) or, with a filter, one student's or one tutor's.
    pub async fn list_bookings(
        &self,
        actor: &Actor,
        filter: ListFilter,
    ) -> Result<Vec<BookingRow>, BookingError> {
        match actor.role {
            Role::Student => Ok(self.bookings.list_by_student(actor.user_id.0).await?),
            Role::Tutor => {
                let profile = self
                    .tutors
                    .find_by_user_id(actor.user_id.0)
                    .await?
                    .ok_or(BookingError::TutorNotFound)?;
                Ok(self.bookings.list_by_tutor(profile.id).await?)
            }
            Role::Admin => {
                if let Some(student_id) = filter.student_id {
                    Ok(self.bookings.list_by_student(student_id.0).await?)
                } else if let Some(tutor_id) = filter.tutor_id {
                    Ok(self.bookings.list_by_tutor(tutor_id.0).await?)
                } else {
                    Ok(self.bookings.list_all(self.config.admin_list_limit).await?)
                }
            }
        }
    }

    /// Get the wallet for the calling tutor
    ///
    /// Wallets are created lazily on first completion; a tutor with no
    /// completed lessons gets a zeroed view.
    pub async fn wallet(&self, actor: &Actor) -> Result<Option<WalletRow>, BookingError> {
        let profile = self
            .tutors
            .find_by_user_id(actor.user_id.0)
            .await?
            .ok_or(BookingError::TutorNotFound)?;
        Ok(self.wallets.find_by_tutor_id(profile.id).await?)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Tutor accepts a pending booking
    pub async fn accept(&self, actor: &Actor, id: BookingId) -> Result<BookingRow, BookingError> {
        let booking = self.load(id).await?;
        let parties = self.parties_of(&booking).await?;
        authorize_transition(actor, &parties, Transition::Accept)?;
        self.require_status(&booking, BookingStatus::Pending, Transition::Accept)?;

        self.bookings
            .update_status(booking.id, &BookingStatus::Confirmed.to_string())
            .await?;

        tracing::info!(booking_id = %booking.id, "Booking confirmed");
        self.load(id).await
    }

    /// Tutor declines a pending booking
    pub async fn decline(&self, actor: &Actor, id: BookingId) -> Result<BookingRow, BookingError> {
        let booking = self.load(id).await?;
        let parties = self.parties_of(&booking).await?;
        authorize_transition(actor, &parties, Transition::Decline)?;
        self.require_status(&booking, BookingStatus::Pending, Transition::Decline)?;

        self.bookings
            .cancel(booking.id, "Declined by tutor", actor.user_id.0, Utc::now())
            .await?;

        tracing::info!(booking_id = %booking.id, "Booking declined by tutor");
        self.load(id).await
    }

    /// Either party moves a non-terminal booking to a new time
    ///
    /// The new local time is interpreted in the timezone stored on the
    /// booking, and the slot is re-checked against the tutor's other
    /// bookings.
    pub async fn reschedule(
        &self,
        actor: &Actor,
        id: BookingId,
        new_local: NaiveDateTime,
    ) -> Result<BookingRow, BookingError> {
        let booking = self.load(id).await?;
        let parties = self.parties_of(&booking).await?;
        authorize_transition(actor, &parties, Transition::Reschedule)?;
        self.require_non_terminal(&booking, Transition::Reschedule)?;

        let scheduled_at = schedule::local_to_utc(new_local, &booking.timezone)?;
        let ends_at = schedule::end_of(scheduled_at, booking.duration_minutes);

        let conflicts = self
            .bookings
            .find_overlapping(booking.tutor_id, scheduled_at, ends_at, Some(booking.id))
            .await?;
        if !conflicts.is_empty() {
            return Err(BookingError::SlotUnavailable);
        }

        self.bookings.reschedule(booking.id, scheduled_at).await?;

        tracing::info!(booking_id = %booking.id, scheduled_at = %scheduled_at, "Booking rescheduled");
        self.load(id).await
    }

    /// Either party cancels a non-terminal booking
    pub async fn cancel(
        &self,
        actor: &Actor,
        id: BookingId,
        reason: &str,
    ) -> Result<BookingRow, BookingError> {
        let booking = self.load(id).await?;
        let parties = self.parties_of(&booking).await?;
        authorize_transition(actor, &parties, Transition::Cancel)?;
        self.require_non_terminal(&booking, Transition::Cancel)?;

        self.bookings
            .cancel(booking.id, reason, actor.user_id.0, Utc::now())
            .await?;

        tracing::info!(booking_id = %booking.id, cancelled_by = %actor.user_id, "Booking cancelled");
        self.load(id).await
    }

    /// Tutor marks a confirmed booking delivered
    ///
    /// Credits the tutor wallet (`pending_balance` and `total_earned` by
    /// the snapshotted payout) and bumps `total_lessons_taught`, all inside
    /// the repository's completion transaction.
    pub async fn complete(&self, actor: &Actor, id: BookingId) -> Result<BookingRow, BookingError> {
        let booking = self.load(id).await?;
        let parties = self.parties_of(&booking).await?;
        authorize_transition(actor, &parties, Transition::Complete)?;
        self.require_status(&booking, BookingStatus::Confirmed, Transition::Complete)?;

        self.bookings
            .complete(booking.id, booking.tutor_id, booking.tutor_payout, Utc::now())
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            tutor_id = %booking.tutor_id,
            payout = %booking.tutor_payout,
            "Booking completed, tutor credited"
        );
        self.load(id).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn load(&self, id: BookingId) -> Result<BookingRow, BookingError> {
        self.bookings
            .find_by_id(id.0)
            .await?
            .ok_or(BookingError::BookingNotFound)
    }

    /// Resolve the two user accounts party to a booking
    async fn parties_of(&self, booking: &BookingRow) -> Result<BookingParties, BookingError> {
        let tutor = self
            .tutors
            .find_by_id(booking.tutor_id)
            .await?
            .ok_or(BookingError::TutorNotFound)?;

        Ok(BookingParties {
            student_user_id: UserId(booking.student_id),
            tutor_user_id: UserId(tutor.user_id),
        })
    }

    fn status_of(&self, booking: &BookingRow) -> Result<BookingStatus, BookingError> {
        booking
            .status()
            .ok_or_else(|| BookingError::Database(format!("unknown status: {}", booking.status)))
    }

    fn require_status(
        &self,
        booking: &BookingRow,
        expected: BookingStatus,
        transition: Transition,
    ) -> Result<(), BookingError> {
        let status = self.status_of(booking)?;
        if status != expected {
            return Err(BookingError::InvalidTransition {
                action: transition.verb(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn require_non_terminal(
        &self,
        booking: &BookingRow,
        transition: Transition,
    ) -> Result<(), BookingError> {
        let status = self.status_of(booking)?;
        if status.is_terminal() {
            return Err(BookingError::InvalidTransition {
                action: transition.verb(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl<U, T, B, W> std::fmt::Debug for BookingService<U, T, B, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("config", &self.config)
            .finish()
    }
}

//! Messaging service - booking-scoped chat with contact-info filtering

use std::sync::Arc;

use uuid::Uuid;

use aviator_db::{
    BookingRepository, CreateMessage, MessageRepository, MessageRow, TutorProfileRepository,
};
use aviator_types::{Actor, BookingId};

use crate::error::MessagingError;
use crate::filter::ContactInfoFilter;

/// Messaging service
///
/// Senders must be a party to the booking. Flagged messages are persisted
/// (moderation needs to see them) and then rejected to the sender.
pub struct MessagingService<B, T, M> {
    filter: ContactInfoFilter,
    bookings: Arc<B>,
    tutors: Arc<T>,
    messages: Arc<M>,
}

impl<B, T, M> MessagingService<B, T, M>
where
    B: BookingRepository,
    T: TutorProfileRepository,
    M: MessageRepository,
{
    /// Create a new messaging service
    pub fn new(bookings: Arc<B>, tutors: Arc<T>, messages: Arc<M>) -> Self {
        Self {
            filter: ContactInfoFilter::new(),
            bookings,
            tutors,
            messages,
        }
    }

    /// Send a message on a booking's chat
    ///
    /// If the body trips the contact-info filter the message is stored with
    /// `is_flagged = true` and the call returns
    /// [`MessagingError::ContactInfoDetected`]; the stored copy is the one
    /// intentional side effect of a failed call in this system.
    pub async fn send_message(
        &self,
        actor: &Actor,
        booking_id: BookingId,
        body: &str,
    ) -> Result<MessageRow, MessagingError> {
        self.require_party(actor, booking_id).await?;

        let flagged_reason = self.filter.detect(body);

        let message = self
            .messages
            .create(CreateMessage {
                id: Uuid::new_v4(),
                booking_id: booking_id.0,
                sender_id: actor.user_id.0,
                body: body.to_string(),
                is_flagged: flagged_reason.is_some(),
                flagged_reason: flagged_reason.map(String::from),
            })
            .await?;

        if let Some(reason) = flagged_reason {
            tracing::warn!(
                booking_id = %booking_id,
                sender_id = %actor.user_id,
                reason,
                "Message flagged for contact info"
            );
            return Err(MessagingError::ContactInfoDetected { reason });
        }

        Ok(message)
    }

    /// List a booking's messages
    ///
    /// Parties see the clean history; admins also see flagged messages.
    pub async fn list_messages(
        &self,
        actor: &Actor,
        booking_id: BookingId,
    ) -> Result<Vec<MessageRow>, MessagingError> {
        if !actor.is_admin() {
            self.require_party(actor, booking_id).await?;
        }

        let mut messages = self.messages.list_by_booking(booking_id.0).await?;
        if !actor.is_admin() {
            messages.retain(|m| !m.is_flagged);
        }
        Ok(messages)
    }

    async fn require_party(
        &self,
        actor: &Actor,
        booking_id: BookingId,
    ) -> Result<(), MessagingError> {
        let booking = self
            .bookings
            .find_by_id(booking_id.0)
            .await?
            .ok_or(MessagingError::BookingNotFound)?;

        let tutor = self
            .tutors
            .find_by_id(booking.tutor_id)
            .await?
            .ok_or(MessagingError::TutorNotFound)?;

        if actor.user_id.0 != booking.student_id && actor.user_id.0 != tutor.user_id {
            return Err(MessagingError::Forbidden("not a party to this booking"));
        }
        Ok(())
    }
}

impl<B, T, M> std::fmt::Debug for MessagingService<B, T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingService").finish_non_exhaustive()
    }
}

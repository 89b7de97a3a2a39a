//! Transition authorization
//!
//! One closed set of transitions and one check shared by every mutation,
//! instead of ad hoc role comparisons in each handler.

use aviator_types::{Actor, Role, UserId};

use crate::BookingError;

/// A mutating booking transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Tutor confirms a pending booking
    Accept,
    /// Tutor declines a pending booking
    Decline,
    /// Either party moves the lesson
    Reschedule,
    /// Either party cancels
    Cancel,
    /// Tutor marks the lesson delivered
    Complete,
}

impl Transition {
    /// Verb for error messages
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
            Self::Reschedule => "reschedule",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }
}

/// The two user accounts party to a booking
#[derive(Debug, Clone, Copy)]
pub struct BookingParties {
    /// Student's user id
    pub student_user_id: UserId,
    /// Tutor's user id (resolved from the tutor profile on the booking)
    pub tutor_user_id: UserId,
}

impl BookingParties {
    /// Whether the actor is the student or the tutor on the booking
    pub fn includes(&self, actor: &Actor) -> bool {
        actor.user_id == self.student_user_id || actor.user_id == self.tutor_user_id
    }
}

/// Check that `actor` may perform `transition` on a booking between
/// `parties`
///
/// Tutor-only transitions require the tutor on the booking; reschedule and
/// cancel accept either party. Admins have read access elsewhere but do
/// not act on behalf of parties.
pub fn authorize_transition(
    actor: &Actor,
    parties: &BookingParties,
    transition: Transition,
) -> Result<(), BookingError> {
    match transition {
        Transition::Accept | Transition::Decline | Transition::Complete => {
            if actor.role == Role::Tutor && actor.user_id == parties.tutor_user_id {
                Ok(())
            } else {
                Err(BookingError::Forbidden(
                    "only the tutor on this booking may do that",
                ))
            }
        }
        Transition::Reschedule | Transition::Cancel => {
            if parties.includes(actor) {
                Ok(())
            } else {
                Err(BookingError::Forbidden(
                    "only a party to this booking may do that",
                ))
            }
        }
    }
}

/// Check that `actor` may view a booking between `parties`
///
/// Parties see their own bookings; admins see everything.
pub fn authorize_view(actor: &Actor, parties: &BookingParties) -> Result<(), BookingError> {
    if actor.is_admin() || parties.includes(actor) {
        Ok(())
    } else {
        Err(BookingError::Forbidden("not a party to this booking"))
    }
}

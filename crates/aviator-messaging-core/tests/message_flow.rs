//! Messaging integration tests
//!
//! Covers party authorization, the persist-then-reject behavior for flagged
//! bodies, and visibility of flagged messages to admins only.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use aviator_messaging_core::{MessagingError, MessagingService};
use aviator_types::{Actor, BookingId, Role, UserId};

use common::{MockBookingRepository, MockMessageRepository, MockTutorRepository};

struct TestEnv {
    messages: Arc<MockMessageRepository>,
    service: MessagingService<MockBookingRepository, MockTutorRepository, MockMessageRepository>,
    student: Actor,
    tutor: Actor,
    booking_id: BookingId,
}

fn setup() -> TestEnv {
    let bookings = Arc::new(MockBookingRepository::new());
    let tutors = Arc::new(MockTutorRepository::new());
    let messages = Arc::new(MockMessageRepository::new());

    let student_id = Uuid::new_v4();
    let tutor_user_id = Uuid::new_v4();
    let tutor_profile_id = tutors.insert_tutor(tutor_user_id);
    let booking_id = BookingId(bookings.insert_booking(student_id, tutor_profile_id));

    let service = MessagingService::new(
        Arc::clone(&bookings),
        Arc::clone(&tutors),
        Arc::clone(&messages),
    );

    TestEnv {
        messages,
        service,
        student: Actor {
            user_id: UserId(student_id),
            role: Role::Student,
        },
        tutor: Actor {
            user_id: UserId(tutor_user_id),
            role: Role::Tutor,
        },
        booking_id,
    }
}

fn admin() -> Actor {
    Actor {
        user_id: UserId(Uuid::new_v4()),
        role: Role::Admin,
    }
}

#[tokio::test]
async fn parties_can_exchange_messages() {
    let env = setup();

    let sent = env
        .service
        .send_message(&env.student, env.booking_id, "See you at the hangar")
        .await
        .unwrap();
    assert!(!sent.is_flagged);
    assert_eq!(sent.sender_id, env.student.user_id.0);

    env.service
        .send_message(&env.tutor, env.booking_id, "Roger, bring your logbook")
        .await
        .unwrap();

    let history = env
        .service
        .list_messages(&env.student, env.booking_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn flagged_message_is_stored_then_rejected() {
    let env = setup();

    let err = env
        .service
        .send_message(&env.student, env.booking_id, "email me at pilot@gmail.com")
        .await
        .unwrap_err();
    assert!(matches!(err, MessagingError::ContactInfoDetected { .. }));

    // The flagged copy is persisted for moderation
    assert_eq!(env.messages.stored_count(), 1);

    // But hidden from both parties
    let student_view = env
        .service
        .list_messages(&env.student, env.booking_id)
        .await
        .unwrap();
    assert!(student_view.is_empty());
    let tutor_view = env
        .service
        .list_messages(&env.tutor, env.booking_id)
        .await
        .unwrap();
    assert!(tutor_view.is_empty());
}

#[tokio::test]
async fn phone_number_is_flagged() {
    let env = setup();

    let err = env
        .service
        .send_message(&env.student, env.booking_id, "call me at 555-123-4567")
        .await
        .unwrap_err();
    assert!(matches!(err, MessagingError::ContactInfoDetected { .. }));
}

#[tokio::test]
async fn admin_sees_flagged_messages() {
    let env = setup();

    let _ = env
        .service
        .send_message(&env.student, env.booking_id, "find me on telegram")
        .await;
    env.service
        .send_message(&env.student, env.booking_id, "ready for tomorrow")
        .await
        .unwrap();

    let moderation_view = env
        .service
        .list_messages(&admin(), env.booking_id)
        .await
        .unwrap();
    assert_eq!(moderation_view.len(), 2);
    assert_eq!(moderation_view.iter().filter(|m| m.is_flagged).count(), 1);
}

#[tokio::test]
async fn strangers_cannot_send_or_read() {
    let env = setup();

    let stranger = Actor {
        user_id: UserId(Uuid::new_v4()),
        role: Role::Student,
    };

    let err = env
        .service
        .send_message(&stranger, env.booking_id, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, MessagingError::Forbidden(_)));

    let err = env
        .service
        .list_messages(&stranger, env.booking_id)
        .await
        .unwrap_err();
    assert!(matches!(err, MessagingError::Forbidden(_)));
}

#[tokio::test]
async fn unknown_booking_is_not_found() {
    let env = setup();

    let err = env
        .service
        .send_message(&env.student, BookingId(Uuid::new_v4()), "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, MessagingError::BookingNotFound));
}

//! PostgreSQL repository implementations

mod booking;
mod booking_request;
mod message;
mod tutor;
mod user;
mod wallet;

pub use booking::PgBookingRepository;
pub use booking_request::PgBookingRequestRepository;
pub use message::PgMessageRepository;
pub use tutor::PgTutorProfileRepository;
pub use user::PgUserRepository;
pub use wallet::PgWalletRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub tutors: PgTutorProfileRepository,
    pub bookings: PgBookingRepository,
    pub wallets: PgWalletRepository,
    pub messages: PgMessageRepository,
    pub booking_requests: PgBookingRequestRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            tutors: PgTutorProfileRepository::new(pool.clone()),
            bookings: PgBookingRepository::new(pool.clone()),
            wallets: PgWalletRepository::new(pool.clone()),
            messages: PgMessageRepository::new(pool.clone()),
            booking_requests: PgBookingRequestRepository::new(pool),
        }
    }
}

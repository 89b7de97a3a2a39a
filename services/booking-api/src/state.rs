//! Application state for the Booking API service.

use std::sync::Arc;

use aviator_booking_core::BookingService;
use aviator_db::pg::{
    PgBookingRepository, PgMessageRepository, PgTutorProfileRepository, PgUserRepository,
    PgWalletRepository, Repositories,
};
use aviator_db::DbPool;
use aviator_messaging_core::MessagingService;

use crate::config::Config;

/// Booking service over the Postgres repositories
pub type AppBookingService = BookingService<
    PgUserRepository,
    PgTutorProfileRepository,
    PgBookingRepository,
    PgWalletRepository,
>;

/// Messaging service over the Postgres repositories
pub type AppMessagingService =
    MessagingService<PgBookingRepository, PgTutorProfileRepository, PgMessageRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Booking lifecycle service
    pub booking: Arc<AppBookingService>,
    /// Messaging service (contact-info filtered chat)
    pub messaging: Arc<AppMessagingService>,
    /// Database repositories (for direct access if needed)
    pub repos: Repositories,
    /// Database pool (for health checks)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(pool: DbPool, config: Config) -> Self {
        let repos = Repositories::new(pool.clone());

        let booking = BookingService::new(
            config.booking.clone(),
            Arc::new(repos.users.clone()),
            Arc::new(repos.tutors.clone()),
            Arc::new(repos.bookings.clone()),
            Arc::new(repos.wallets.clone()),
        );

        let messaging = MessagingService::new(
            Arc::new(repos.bookings.clone()),
            Arc::new(repos.tutors.clone()),
            Arc::new(repos.messages.clone()),
        );

        Self {
            booking: Arc::new(booking),
            messaging: Arc::new(messaging),
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Booking configuration

use rust_decimal::Decimal;

/// Booking service configuration
///
/// Injected into [`crate::BookingService`] at construction; nothing in the
/// core reads configuration globally.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Percentage of the lesson price retained by the platform
    pub platform_fee_percent: Decimal,
    /// Minimum bookable lesson length in minutes
    pub min_duration_minutes: i32,
    /// Row cap for admin list-all queries
    pub admin_list_limit: i64,
}

impl BookingConfig {
    /// Create a config with the given platform fee percentage
    pub fn new(platform_fee_percent: Decimal) -> Self {
        Self {
            platform_fee_percent,
            min_duration_minutes: 30,
            admin_list_limit: 500,
        }
    }

    /// Set the minimum lesson duration
    pub fn with_min_duration(mut self, minutes: i32) -> Self {
        self.min_duration_minutes = minutes;
        self
    }

    /// Set the admin list cap
    pub fn with_admin_list_limit(mut self, limit: i64) -> Self {
        self.admin_list_limit = limit;
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::new(Decimal::from(15))
    }
}

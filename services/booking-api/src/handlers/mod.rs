//! REST API handlers

pub mod bookings;
pub mod health;
pub mod messages;
pub mod wallet;

pub use bookings::*;
pub use health::*;
pub use messages::*;
pub use wallet::*;

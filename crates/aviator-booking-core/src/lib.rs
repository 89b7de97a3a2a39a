//! Aviator Booking Core
//!
//! The booking lifecycle and ledger component:
//! - Booking creation with timezone conversion, slot conflict detection,
//!   and a pricing snapshot taken at creation time
//! - The status state machine (accept / decline / reschedule / cancel /
//!   complete) with a single shared authorization check
//! - Wallet crediting and lesson-count stats on completion
//!
//! Persistence is abstracted behind the repository traits in `aviator-db`;
//! the two multi-row mutations (slot-checked insert, completion credit) are
//! transactional inside the Postgres repositories.

pub mod authz;
pub mod config;
pub mod error;
pub mod pricing;
pub mod schedule;
pub mod service;

pub use authz::{authorize_transition, BookingParties, Transition};
pub use config::BookingConfig;
pub use error::BookingError;
pub use pricing::PricingBreakdown;
pub use service::{BookingService, CreateBookingInput, ListFilter};

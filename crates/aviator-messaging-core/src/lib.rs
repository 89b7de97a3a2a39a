//! Aviator Messaging Core
//!
//! Booking-scoped chat with the contact-info filter. Messages that match a
//! contact pattern (email, phone, Telegram, WhatsApp) are persisted with a
//! flag for moderation, but the sender is told the send failed. This
//! persist-then-reject behavior is deliberate and callers must expect it.

pub mod error;
pub mod filter;
pub mod service;

pub use error::MessagingError;
pub use filter::ContactInfoFilter;
pub use service::MessagingService;

//! Aviator Types - Shared domain types
//!
//! This crate contains domain types used across AviatorTutor services:
//! - Entity identifiers (users, tutor profiles, bookings, messages)
//! - Actor roles and the authenticated actor
//! - Booking status and type enums

pub mod actor;
pub mod booking;
pub mod id;

pub use actor::*;
pub use booking::*;
pub use id::*;

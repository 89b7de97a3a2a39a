//! Booking status and type enums

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking
///
/// `pending → {confirmed, cancelled}`; `confirmed → {completed, cancelled}`;
/// `completed`, `cancelled` and `no_show` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting tutor acceptance
    Pending,
    /// Accepted by the tutor
    Confirmed,
    /// Lesson delivered; wallet credited
    Completed,
    /// Cancelled or declined; audit fields record who and why
    Cancelled,
    /// Student did not attend
    NoShow,
}

impl BookingStatus {
    /// Whether this status admits no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NoShow => write!(f, "no_show"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

/// Error parsing a booking status string
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid booking status: {0}")]
pub struct StatusParseError(pub String);

/// Kind of lesson being booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// A single student with a tutor
    OneOnOne,
    /// A group class (enrollment handled by a separate entity)
    GroupClass,
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneOnOne => write!(f, "one_on_one"),
            Self::GroupClass => write!(f, "group_class"),
        }
    }
}

impl std::str::FromStr for BookingType {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_on_one" => Ok(Self::OneOnOne),
            "group_class" => Ok(Self::GroupClass),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

/// Approval status of a tutor profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorStatus {
    /// Application submitted, not yet reviewed
    Pending,
    /// Approved; bookable
    Approved,
    /// Application rejected
    Rejected,
    /// Suspended by back office
    Suspended,
}

impl TutorStatus {
    /// Whether bookings may be created against this profile
    pub const fn is_bookable(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for TutorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for TutorStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "suspended" => Ok(Self::Suspended),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

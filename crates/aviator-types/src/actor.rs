//! Actor roles and the authenticated caller

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Role of an authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A learner booking lessons
    Student,
    /// A tutor teaching lessons
    Tutor,
    /// Back-office administrator (read access across the marketplace)
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Tutor => write!(f, "tutor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "tutor" => Ok(Self::Tutor),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error parsing a role string
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// Authenticated caller identity, supplied by the auth layer
///
/// The booking core never inspects credentials; it receives the already
/// authenticated user id and role and applies authorization rules on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The caller's user id
    pub user_id: UserId,
    /// The caller's role
    pub role: Role,
}

impl Actor {
    /// Create an actor
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Whether this actor is an admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

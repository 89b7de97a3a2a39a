//! Aviator DB - Database abstractions
//!
//! SQLx-based database layer for AviatorTutor services.
//!
//! # Example
//!
//! ```rust,ignore
//! use aviator_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/aviator").await?;
//! let repos = Repositories::new(pool);
//!
//! // Use repositories
//! let tutor = repos.tutors.find_by_id(tutor_id).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;

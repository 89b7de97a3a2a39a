//! PostgreSQL tutor wallet repository implementation
//!
//! Wallets are only mutated by the completion transaction owned by the
//! booking repository; this repository is read-only.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::WalletRow;
use crate::repo::WalletRepository;

/// PostgreSQL tutor wallet repository
#[derive(Clone)]
pub struct PgWalletRepository {
    pool: PgPool,
}

impl PgWalletRepository {
    /// Create a new wallet repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalletRepository for PgWalletRepository {
    async fn find_by_tutor_id(&self, tutor_id: Uuid) -> DbResult<Option<WalletRow>> {
        let wallet = sqlx::query_as::<_, WalletRow>(
            r#"
            SELECT id, tutor_id, balance, pending_balance, total_earned,
                   created_at, updated_at
            FROM tutor_wallets
            WHERE tutor_id = $1
            "#,
        )
        .bind(tutor_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(wallet)
    }
}

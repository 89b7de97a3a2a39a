//! PostgreSQL chat message repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::MessageRow;
use crate::repo::{CreateMessage, MessageRepository};

/// PostgreSQL message repository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, message: CreateMessage) -> DbResult<MessageRow> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, booking_id, sender_id, body, is_flagged, flagged_reason)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, booking_id, sender_id, body, is_flagged, flagged_reason, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.booking_id)
        .bind(message.sender_id)
        .bind(&message.body)
        .bind(message.is_flagged)
        .bind(&message.flagged_reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_booking(&self, booking_id: Uuid) -> DbResult<Vec<MessageRow>> {
        let messages = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, booking_id, sender_id, body, is_flagged, flagged_reason, created_at
            FROM messages
            WHERE booking_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}

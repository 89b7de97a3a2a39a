//! PostgreSQL tutor profile repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::TutorProfileRow;
use crate::repo::TutorProfileRepository;

/// PostgreSQL tutor profile repository
#[derive(Clone)]
pub struct PgTutorProfileRepository {
    pool: PgPool,
}

impl PgTutorProfileRepository {
    /// Create a new tutor profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TutorProfileRepository for PgTutorProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<TutorProfileRow>> {
        let tutor = sqlx::query_as::<_, TutorProfileRow>(
            r#"
            SELECT id, user_id, status, hourly_rate, total_lessons_taught,
                   created_at, updated_at
            FROM tutor_profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tutor)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> DbResult<Option<TutorProfileRow>> {
        let tutor = sqlx::query_as::<_, TutorProfileRow>(
            r#"
            SELECT id, user_id, status, hourly_rate, total_lessons_taught,
                   created_at, updated_at
            FROM tutor_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tutor)
    }
}

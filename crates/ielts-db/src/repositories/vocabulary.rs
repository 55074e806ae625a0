use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::VocabularyReviewState;

/// Lock a word owned by `user_id` for review.
pub async fn lock_for_review<'e, E>(
    executor: E,
    vocabulary_id: Uuid,
    user_id: Uuid,
) -> Result<Option<VocabularyReviewState>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, correct_streak, last_reviewed_at
            FROM vocabularies
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
        "#,
    )
    .bind(vocabulary_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn apply_review<'e, E>(
    executor: E,
    vocabulary_id: Uuid,
    correct_streak: i32,
    xp_gained: i32,
    reviewed_at: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE vocabularies
            SET correct_streak = $2,
                xp = xp + $3,
                last_reviewed_at = $4,
                updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(vocabulary_id)
    .bind(correct_streak)
    .bind(xp_gained)
    .bind(reviewed_at)
    .execute(executor)
    .await?;

    Ok(())
}

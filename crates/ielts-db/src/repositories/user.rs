use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{UserStreak, UserXp};

pub async fn exists<'e, E>(executor: E, user_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
}

pub async fn find_streak<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<UserStreak>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT current_streak, longest_streak, last_studied_at
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Read the streak columns and hold the row lock until the transaction ends.
pub async fn lock_streak<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<UserStreak>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT current_streak, longest_streak, last_studied_at
            FROM users
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn update_streak<'e, E>(
    executor: E,
    user_id: Uuid,
    current_streak: i32,
    longest_streak: i32,
    last_studied_at: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET current_streak = $2,
                longest_streak = $3,
                last_studied_at = $4,
                updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(current_streak)
    .bind(longest_streak)
    .bind(last_studied_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn lock_xp<'e, E>(executor: E, user_id: Uuid) -> Result<Option<UserXp>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT xp, level::text AS level, xp_to_next
            FROM users
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn update_xp<'e, E>(
    executor: E,
    user_id: Uuid,
    xp: i32,
    level: &str,
    xp_to_next: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET xp = $2, level = $3::level, xp_to_next = $4, updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(xp)
    .bind(level)
    .bind(xp_to_next)
    .execute(executor)
    .await?;

    Ok(())
}

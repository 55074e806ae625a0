use ielts_engine::{
    FinishedResult, RecommendationStore, StoreError, StreakState, StreakStore, TestSummary,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repositories::{test, user};

/// PostgreSQL-backed store for the recommendation and streak engines.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RecommendationStore for PgStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, StoreError> {
        user::exists(&self.pool, user_id)
            .await
            .map_err(StoreError::new)
    }

    async fn finished_results(&self, user_id: Uuid) -> Result<Vec<FinishedResult>, StoreError> {
        test::list_finished_results(&self.pool, user_id)
            .await
            .map_err(StoreError::new)?
            .into_iter()
            .map(|row| FinishedResult::try_from(row).map_err(StoreError::new))
            .collect()
    }

    async fn tests_excluding(&self, test_ids: &[Uuid]) -> Result<Vec<TestSummary>, StoreError> {
        test::list_excluding(&self.pool, test_ids)
            .await
            .map_err(StoreError::new)?
            .into_iter()
            .map(|row| TestSummary::try_from(row).map_err(StoreError::new))
            .collect()
    }
}

impl StreakStore for PgStore {
    async fn find_streak(&self, user_id: Uuid) -> Result<Option<StreakState>, StoreError> {
        let row = user::find_streak(&self.pool, user_id)
            .await
            .map_err(StoreError::new)?;
        Ok(row.map(StreakState::from))
    }

    async fn update_streak_with<F>(
        &self,
        user_id: Uuid,
        apply: F,
    ) -> Result<Option<StreakState>, StoreError>
    where
        F: FnOnce(&StreakState) -> Option<StreakState> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(StoreError::new)?;

        // Row lock serialises concurrent activity for the same user.
        let Some(row) = user::lock_streak(&mut *tx, user_id)
            .await
            .map_err(StoreError::new)?
        else {
            return Ok(None);
        };
        let current = StreakState::from(row);

        let Some(next) = apply(&current) else {
            tx.commit().await.map_err(StoreError::new)?;
            return Ok(Some(current));
        };

        user::update_streak(
            &mut *tx,
            user_id,
            next.current_streak,
            next.longest_streak,
            next.last_studied_at,
        )
        .await
        .map_err(StoreError::new)?;
        tx.commit().await.map_err(StoreError::new)?;

        Ok(Some(next))
    }
}

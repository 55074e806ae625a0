//! Persistence collaborator seams.
//!
//! The engine never talks to a database directly. Implementations live in the
//! db crate (PostgreSQL) and in tests (in-memory).

use std::{error::Error as StdError, future::Future};

use thiserror::Error;
use uuid::Uuid;

use crate::model::{FinishedResult, StreakState, TestSummary};

/// Any failure reported by the backing store.
#[derive(Debug, Error)]
#[error("persistence failure: {0}")]
pub struct StoreError(#[source] Box<dyn StdError + Send + Sync + 'static>);

impl StoreError {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }
}

/// Reads needed to recommend tests.
pub trait RecommendationStore: Sync {
    fn user_exists(&self, user_id: Uuid) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Finished results only; in-progress attempts are excluded.
    fn finished_results(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<FinishedResult>, StoreError>> + Send;

    /// Every test whose id is not in `test_ids`.
    fn tests_excluding(
        &self,
        test_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<TestSummary>, StoreError>> + Send;
}

/// Streak fields of the user row.
pub trait StreakStore: Sync {
    fn find_streak(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<StreakState>, StoreError>> + Send;

    /// Atomically read the streak, pass it to `apply` and persist what it returns.
    ///
    /// `apply` returning `None` leaves the row untouched. Resolves to `None` when
    /// the user does not exist, otherwise to the state now stored.
    fn update_streak_with<F>(
        &self,
        user_id: Uuid,
        apply: F,
    ) -> impl Future<Output = Result<Option<StreakState>, StoreError>> + Send
    where
        F: FnOnce(&StreakState) -> Option<StreakState> + Send;
}

//! Test recommendation.
//!
//! Candidates are scored against the learner profile, the best few are kept as
//! a pool and the pool is shuffled before the final cut. Relevance decides what
//! can be surfaced; the shuffle decides which of those surface this time.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    model::TestSummary,
    profile::LearnerProfile,
    store::{RecommendationStore, StoreError},
};

/// Number of tests returned when the caller does not ask for a specific amount.
pub const DEFAULT_LIMIT: usize = 2;

/// Bonus for tests that train the learner's weakest skill.
pub const WEAKEST_SKILL_BONUS: i32 = 50;
/// Bonus for tests at the learner's current level.
pub const LEVEL_MATCH_BONUS: i32 = 30;
/// Bonus for tests one level above the learner.
pub const STEP_UP_BONUS: i32 = 15;
/// Bonus for tests one level below the learner.
pub const STEP_DOWN_BONUS: i32 = 5;
/// Penalty for tests two or more levels away.
pub const LEVEL_GAP_PENALTY: i32 = -20;

/// Jitter is drawn uniformly from `[0, JITTER_RANGE)`.
pub const JITTER_RANGE: f64 = 10.0;

const MIN_POOL_SIZE: usize = 5;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A candidate with its final score (base score plus jitter).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTest {
    pub test: TestSummary,
    pub score: f64,
}

/// Deterministic part of a candidate's score.
pub fn base_score(test: &TestSummary, profile: &LearnerProfile) -> i32 {
    let skill = if test.test_type == profile.weakest_skill {
        WEAKEST_SKILL_BONUS
    } else {
        0
    };

    let level = match test.level.rank() - profile.current_level.rank() {
        0 => LEVEL_MATCH_BONUS,
        1 => STEP_UP_BONUS,
        -1 => STEP_DOWN_BONUS,
        _ => LEVEL_GAP_PENALTY,
    };

    skill + level
}

/// Size of the pool the final selection is shuffled from: `max(limit * 3, 5)`.
pub const fn pool_size(limit: usize) -> usize {
    let scaled = limit.saturating_mul(3);
    if scaled > MIN_POOL_SIZE {
        scaled
    } else {
        MIN_POOL_SIZE
    }
}

/// Score every candidate and sort best first.
pub fn rank_candidates<R>(
    candidates: Vec<TestSummary>,
    profile: &LearnerProfile,
    rng: &mut R,
) -> Vec<ScoredTest>
where
    R: Rng + ?Sized,
{
    let mut scored: Vec<ScoredTest> = candidates
        .into_iter()
        .map(|test| {
            let score = f64::from(base_score(&test, profile)) + rng.gen_range(0.0..JITTER_RANGE);
            ScoredTest { test, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Pick up to `limit` tests: rank, keep the top [`pool_size`], shuffle, cut.
pub fn select<R>(
    candidates: Vec<TestSummary>,
    profile: &LearnerProfile,
    limit: usize,
    rng: &mut R,
) -> Vec<TestSummary>
where
    R: Rng + ?Sized,
{
    let mut pool: Vec<TestSummary> = rank_candidates(candidates, profile, rng)
        .into_iter()
        .take(pool_size(limit))
        .map(|scored| scored.test)
        .collect();

    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}

/// Recommend up to `limit` tests the user has not finished yet.
///
/// # Errors
///
/// [`RecommendError::UserNotFound`] when the user does not exist, and
/// [`RecommendError::Store`] when any read fails. No partial result is
/// returned in either case.
pub async fn recommend<S, R>(
    store: &S,
    user_id: Uuid,
    limit: usize,
    rng: &mut R,
) -> Result<Vec<TestSummary>, RecommendError>
where
    S: RecommendationStore,
    R: Rng + Send + ?Sized,
{
    if !store.user_exists(user_id).await? {
        return Err(RecommendError::UserNotFound(user_id));
    }

    let history = store.finished_results(user_id).await?;
    let completed: HashSet<Uuid> = history.iter().map(|r| r.test_id).collect();
    let completed_ids: Vec<Uuid> = completed.iter().copied().collect();

    let candidates: Vec<TestSummary> = store
        .tests_excluding(&completed_ids)
        .await?
        .into_iter()
        .filter(|test| !completed.contains(&test.id))
        .collect();

    if candidates.is_empty() {
        tracing::info!(%user_id, "no untaken tests left to recommend");
        return Ok(Vec::new());
    }

    let profile = LearnerProfile::from_history(&history, rng);
    tracing::debug!(
        %user_id,
        level = %profile.current_level,
        weakest_skill = %profile.weakest_skill,
        average_band = profile.average_band,
        candidates = candidates.len(),
        "scoring recommendation candidates"
    );

    Ok(select(candidates, &profile, limit, rng))
}

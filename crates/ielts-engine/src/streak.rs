//! Daily learning streak.
//!
//! Days are calendar days in a fixed UTC offset chosen by the deployment. A
//! learner keeps the streak when they come back one or two days after the last
//! session: one skipped day is forgiven.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    model::StreakState,
    store::{StoreError, StreakStore},
};

/// Largest gap in days that still continues a streak.
pub const GRACE_DAYS: i64 = 2;

/// What a new activity does to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// First activity ever.
    Started,
    /// Within the grace window of the last activity.
    Continued,
    /// Gap too long, the streak starts over at 1.
    Restarted,
    /// Already studied today. Nothing is written.
    AlreadyRecorded,
}

impl StreakTransition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Continued => "continued",
            Self::Restarted => "restarted",
            Self::AlreadyRecorded => "already_recorded",
        }
    }

    /// Decide the transition for an activity at `now`.
    pub fn classify(
        last_studied_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Self {
        let Some(last) = last_studied_at else {
            return Self::Started;
        };

        match calendar_days_between(last, now, offset) {
            // A last study date in the future means clock skew; treat it as today.
            d if d <= 0 => Self::AlreadyRecorded,
            1..=GRACE_DAYS => Self::Continued,
            _ => Self::Restarted,
        }
    }

    /// The state to persist, or `None` when nothing should be written.
    pub fn apply(self, state: &StreakState, now: DateTime<Utc>) -> Option<StreakState> {
        let current_streak = match self {
            Self::AlreadyRecorded => return None,
            Self::Started | Self::Restarted => 1,
            Self::Continued => state.current_streak.saturating_add(1),
        };

        Some(StreakState {
            current_streak,
            longest_streak: state.longest_streak.max(current_streak),
            last_studied_at: Some(now),
        })
    }
}

/// Whole calendar days from `earlier` to `later`, both read in `offset`.
pub fn calendar_days_between(
    earlier: DateTime<Utc>,
    later: DateTime<Utc>,
    offset: FixedOffset,
) -> i64 {
    let from = earlier.with_timezone(&offset).date_naive();
    let to = later.with_timezone(&offset).date_naive();
    (to - from).num_days()
}

/// Outcome of recording an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakRecord {
    pub transition: StreakTransition,
    pub state: StreakState,
}

/// Record today's learning activity for `user_id`.
///
/// Idempotent per calendar day. Resolves to `Ok(None)` when the user does not
/// exist; that case is not an error.
pub async fn record_activity<S>(
    store: &S,
    user_id: Uuid,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<Option<StreakRecord>, StoreError>
where
    S: StreakStore,
{
    let mut transition = StreakTransition::AlreadyRecorded;
    let state = store
        .update_streak_with(user_id, |state| {
            transition = StreakTransition::classify(state.last_studied_at, now, offset);
            transition.apply(state, now)
        })
        .await?;

    let Some(state) = state else {
        tracing::debug!(%user_id, "streak not recorded, user does not exist");
        return Ok(None);
    };

    tracing::info!(
        %user_id,
        transition = transition.as_str(),
        current_streak = state.current_streak,
        longest_streak = state.longest_streak,
        "learning activity recorded"
    );

    Ok(Some(StreakRecord { transition, state }))
}

/// [`record_activity`] for callers where the streak is a side effect.
///
/// Persistence failures are logged and swallowed so they never fail the
/// enclosing operation.
pub async fn record_activity_best_effort<S>(
    store: &S,
    user_id: Uuid,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Option<StreakRecord>
where
    S: StreakStore,
{
    match record_activity(store, user_id, now, offset).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "failed to update learning streak");
            None
        }
    }
}

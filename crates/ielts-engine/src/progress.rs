//! XP and level progression for vocabulary review sessions.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::{model::Level, streak::calendar_days_between};

/// XP for one correct answer on a word not yet reviewed today.
pub const XP_PER_CORRECT_ANSWER: i32 = 10;

/// XP needed to leave `level`.
pub const fn xp_threshold(level: Level) -> i32 {
    match level {
        Level::Low => 100,
        Level::Mid => 350,
        Level::High => 1000,
        Level::Great => 100,
    }
}

/// A user's XP bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpProgress {
    pub xp: i32,
    pub level: Level,
    pub xp_to_next: i32,
}

impl XpProgress {
    /// Add `gained` XP, levelling up as many times as the total allows.
    ///
    /// Leftover XP carries over into the next level.
    pub fn gain(self, gained: i32) -> Self {
        let mut xp = self.xp.saturating_add(gained.max(0));
        let mut level = self.level;
        let mut xp_to_next = if self.xp_to_next > 0 {
            self.xp_to_next
        } else {
            xp_threshold(level)
        };

        while xp >= xp_to_next {
            xp -= xp_to_next;
            level = level.next();
            xp_to_next = xp_threshold(level);
        }

        Self {
            xp,
            level,
            xp_to_next,
        }
    }
}

/// Result of reviewing one vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordReview {
    pub correct_streak: i32,
    pub xp_gained: i32,
}

/// Score one answer.
///
/// A correct answer extends the word's correct streak; a wrong one resets it.
/// XP is only granted the first time the word is reviewed on a calendar day.
pub fn review_word(
    is_correct: bool,
    correct_streak: i32,
    last_reviewed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> WordReview {
    let reviewed_today =
        last_reviewed_at.is_some_and(|last| calendar_days_between(last, now, offset) <= 0);

    WordReview {
        correct_streak: if is_correct {
            correct_streak.saturating_add(1)
        } else {
            0
        },
        xp_gained: if is_correct && !reviewed_today {
            XP_PER_CORRECT_ANSWER
        } else {
            0
        },
    }
}

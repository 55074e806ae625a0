use chrono::{DateTime, Utc};
use ielts_engine::{FinishedResult, Level, ParseEnumError, StreakState, TestSummary};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Streak columns of `users`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserStreak {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_studied_at: Option<DateTime<Utc>>,
}

impl From<UserStreak> for StreakState {
    fn from(row: UserStreak) -> Self {
        Self {
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
            last_studied_at: row.last_studied_at,
        }
    }
}

/// XP columns of `users`, `level` read back as text
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserXp {
    pub xp: i32,
    pub level: String,
    pub xp_to_next: i32,
}

impl UserXp {
    pub fn level(&self) -> Result<Level, ParseEnumError> {
        self.level.parse()
    }
}

/// Recommendable test, enum columns read back as text
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestRow {
    pub id: Uuid,
    pub title: String,
    pub test_type: String,
    pub level: String,
}

impl TryFrom<TestRow> for TestSummary {
    type Error = ParseEnumError;

    fn try_from(row: TestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            test_type: row.test_type.parse()?,
            level: row.level.parse()?,
        })
    }
}

/// A finished attempt joined with its test type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinishedResultRow {
    pub test_id: Uuid,
    pub test_type: String,
    pub band_score: f64,
}

impl TryFrom<FinishedResultRow> for FinishedResult {
    type Error = ParseEnumError;

    fn try_from(row: FinishedResultRow) -> Result<Self, Self::Error> {
        Ok(Self {
            test_id: row.test_id,
            test_type: row.test_type.parse()?,
            band_score: row.band_score,
        })
    }
}

/// Review state of one vocabulary item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VocabularyReviewState {
    pub id: Uuid,
    pub correct_streak: i32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

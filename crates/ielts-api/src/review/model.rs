use ielts_engine::Level;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Most answers accepted in one review session.
pub const MAX_REVIEW_ANSWERS: u64 = 200;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ReviewRequest {
    pub user_id: Uuid,
    #[validate(length(
        min = 1,
        max = MAX_REVIEW_ANSWERS,
        message = "must contain between 1 and 200 answers"
    ))]
    pub answers: Vec<ReviewAnswer>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ReviewAnswer {
    pub vocabulary_id: Uuid,
    pub is_correct: bool,
}

/// The user's XP bar after the session plus what the session changed.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
    pub xp: i32,
    pub level: Level,
    pub xp_to_next: i32,
    pub xp_gained: i32,
    pub reviewed: usize,
    /// Answers whose word does not exist or belongs to someone else
    pub skipped: usize,
}

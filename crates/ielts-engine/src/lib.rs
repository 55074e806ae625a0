//! Decision core for the IELTS practice platform.
//!
//! This crate holds the business rules that sit between the HTTP layer and the
//! database: ranking not-yet-attempted tests for a learner, keeping the daily
//! learning streak, and awarding review XP. Persistence is reached only through
//! the traits in [`store`], so every rule can be exercised without a database.

pub mod model;
pub mod profile;
pub mod progress;
pub mod recommend;
pub mod store;
pub mod streak;

pub use model::{FinishedResult, Level, ParseEnumError, Skill, StreakState, TestSummary};
pub use profile::LearnerProfile;
pub use recommend::{RecommendError, recommend};
pub use store::{RecommendationStore, StoreError, StreakStore};
pub use streak::{StreakRecord, StreakTransition, record_activity, record_activity_best_effort};

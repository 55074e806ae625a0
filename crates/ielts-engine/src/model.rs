use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a stored enum label does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// The four IELTS skills a test can assess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Listening,
    Reading,
    Writing,
    Speaking,
}

impl Skill {
    /// Every skill, in the order used to break ties between equal averages.
    pub const ALL: [Self; 4] = [Self::Listening, Self::Reading, Self::Writing, Self::Speaking];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listening => "listening",
            Self::Reading => "reading",
            Self::Writing => "writing",
            Self::Speaking => "speaking",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Listening => 0,
            Self::Reading => 1,
            Self::Writing => 2,
            Self::Speaking => 3,
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "skill",
                value: s.to_string(),
            })
    }
}

/// Difficulty level of a test, also used as the learner's level.
///
/// Variants are declared in ascending order so `Ord` follows difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Mid,
    High,
    Great,
}

impl Level {
    pub const ALL: [Self; 4] = [Self::Low, Self::Mid, Self::High, Self::Great];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
            Self::Great => "great",
        }
    }

    /// Numeric rank, `low = 1` through `great = 4`.
    pub const fn rank(self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Mid => 2,
            Self::High => 3,
            Self::Great => 4,
        }
    }

    /// Band an average IELTS score into a level.
    ///
    /// * `< 4.0` → low
    /// * `< 6.0` → mid
    /// * `< 7.5` → high
    /// * otherwise → great
    pub fn from_band(band: f64) -> Self {
        if band < 4.0 {
            Self::Low
        } else if band < 6.0 {
            Self::Mid
        } else if band < 7.5 {
            Self::High
        } else {
            Self::Great
        }
    }

    /// The next level up; `great` is the ceiling.
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Mid,
            Self::Mid => Self::High,
            Self::High | Self::Great => Self::Great,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "level",
                value: s.to_string(),
            })
    }
}

/// A test that can be recommended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSummary {
    pub id: Uuid,
    pub title: String,
    pub test_type: Skill,
    pub level: Level,
}

/// One finished attempt, projected to what the profile needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishedResult {
    pub test_id: Uuid,
    pub test_type: Skill,
    pub band_score: f64,
}

/// Streak columns of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_studied_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_band_thresholds() {
        assert_eq!(Level::from_band(0.0), Level::Low);
        assert_eq!(Level::from_band(3.5), Level::Low);
        assert_eq!(Level::from_band(4.0), Level::Mid);
        assert_eq!(Level::from_band(5.5), Level::Mid);
        assert_eq!(Level::from_band(6.0), Level::High);
        assert_eq!(Level::from_band(7.0), Level::High);
        assert_eq!(Level::from_band(7.5), Level::Great);
        assert_eq!(Level::from_band(9.0), Level::Great);
    }

    #[test]
    fn test_level_rank_follows_ordering() {
        let ranks: Vec<i32> = Level::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert!(Level::Low < Level::Great);
        assert_eq!(Level::High.next(), Level::Great);
        assert_eq!(Level::Great.next(), Level::Great);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("reading".parse::<Skill>(), Ok(Skill::Reading));
        assert_eq!("SPEAKING".parse::<Skill>(), Ok(Skill::Speaking));
        assert_eq!("Mid".parse::<Level>(), Ok(Level::Mid));
        assert!("grammar".parse::<Skill>().is_err());

        let err = "expert".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "unknown level `expert`");
    }

    #[test]
    fn test_display_matches_stored_labels() {
        for skill in Skill::ALL {
            assert_eq!(skill.to_string().parse::<Skill>(), Ok(skill));
        }
        assert_eq!(Level::Great.to_string(), "great");
    }
}

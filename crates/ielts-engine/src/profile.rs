//! Learner profile derived from finished test history.

use rand::Rng;
use serde::Serialize;

use crate::model::{FinishedResult, Level, Skill};

/// What the recommender knows about a learner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearnerProfile {
    pub current_level: Level,
    pub weakest_skill: Skill,
    pub average_band: f64,
}

impl LearnerProfile {
    /// Build a profile from the learner's finished results.
    ///
    /// With no history the learner starts at [`Level::Low`] with a weakest skill
    /// drawn uniformly from `rng`. Otherwise the weakest skill is the one with
    /// the lowest average band; equal averages resolve to the skill that comes
    /// first in [`Skill::ALL`].
    pub fn from_history<R>(history: &[FinishedResult], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut totals = [(0.0_f64, 0_u32); Skill::ALL.len()];
        for result in history {
            let entry = &mut totals[result.test_type.index()];
            entry.0 += result.band_score;
            entry.1 += 1;
        }

        let weakest = Skill::ALL
            .into_iter()
            .filter_map(|skill| {
                let (sum, count) = totals[skill.index()];
                (count > 0).then(|| (skill, sum / f64::from(count)))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        let Some((weakest_skill, _)) = weakest else {
            return Self::cold_start(rng);
        };

        let total: f64 = history.iter().map(|r| r.band_score).sum();
        let average_band = total / history.len() as f64;

        Self {
            current_level: Level::from_band(average_band),
            weakest_skill,
            average_band,
        }
    }

    fn cold_start<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            current_level: Level::Low,
            weakest_skill: Skill::ALL[rng.gen_range(0..Skill::ALL.len())],
            average_band: 0.0,
        }
    }
}

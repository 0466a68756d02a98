//! Score snapshot assembly.
//!
//! A [`ScoreSnapshot`] is the full derived wellbeing picture for one window
//! of triggers: the four sub-scores, their composite, the volatility trend,
//! and summary stats. It is a pure function's output — it carries no
//! identity and no mutation path, and serializes directly to the JSON the
//! tracking app serves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scores::{
    composite_score, density_score, reactivity_index, recovery_speed_score, round2,
    stability_score, SubScores,
};
use crate::core::volatility::{detect_trend_with, VolatilityParams, VolatilityTrend};
use crate::trigger::types::{EmotionCategory, Trigger};

/// Scoring period applied when the caller does not specify one.
pub const DEFAULT_PERIOD_DAYS: u32 = 7;

/// Derived, immutable wellbeing scores over one trigger window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// Emotional stability, 0–100
    pub stability_score: f64,
    /// Reactivity (sudden-onset weighting), 0–100
    pub reactivity_index: f64,
    /// Trigger density over the period, 0–100
    pub trigger_density_score: f64,
    /// Recovery speed, 0–100 (50 when nothing was recorded)
    pub recovery_speed_score: f64,
    /// Weighted blend of the four sub-scores
    pub composite_score: f64,
    /// Fortnight trend and the rolling averages behind it
    pub volatility: VolatilityTrend,
    /// Number of triggers scored
    pub trigger_count: usize,
    /// Mean intensity, 2 decimals, 0 when empty
    pub avg_intensity: f64,
    /// Most frequent category; first encountered wins ties
    pub dominant_emotion: Option<EmotionCategory>,
}

/// Assembles [`ScoreSnapshot`]s from trigger sets.
///
/// The builder only carries the volatility parameters; everything else about
/// a snapshot is a function of the call's inputs. Identical triggers, period,
/// and `now` produce bit-identical snapshots, so results are safely cacheable
/// and the builder can be shared across threads.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    volatility: VolatilityParams,
}

impl SnapshotBuilder {
    /// Builder with the default volatility windows.
    pub fn new() -> Self {
        Self {
            volatility: VolatilityParams::default(),
        }
    }

    /// Override the volatility windows/band.
    pub fn with_volatility_params(mut self, params: VolatilityParams) -> Self {
        self.volatility = params;
        self
    }

    /// Compute a snapshot over `triggers` for a period of `days_in_period`
    /// days, anchored at `now`.
    pub fn build(
        &self,
        triggers: &[Trigger],
        days_in_period: u32,
        now: DateTime<Utc>,
    ) -> ScoreSnapshot {
        let sub_scores = SubScores {
            stability: stability_score(triggers),
            reactivity: reactivity_index(triggers),
            density: density_score(triggers.len(), days_in_period),
            recovery: recovery_speed_score(triggers),
        };

        ScoreSnapshot {
            stability_score: sub_scores.stability,
            reactivity_index: sub_scores.reactivity,
            trigger_density_score: sub_scores.density,
            recovery_speed_score: sub_scores.recovery,
            composite_score: composite_score(&sub_scores),
            volatility: detect_trend_with(triggers, now, &self.volatility),
            trigger_count: triggers.len(),
            avg_intensity: avg_intensity(triggers),
            dominant_emotion: dominant_emotion(triggers),
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build one snapshot with default parameters.
pub fn build_snapshot(
    triggers: &[Trigger],
    days_in_period: u32,
    now: DateTime<Utc>,
) -> ScoreSnapshot {
    SnapshotBuilder::new().build(triggers, days_in_period, now)
}

/// Mean intensity rounded to 2 decimals, 0 for an empty set.
fn avg_intensity(triggers: &[Trigger]) -> f64 {
    if triggers.is_empty() {
        return 0.0;
    }
    let sum: f64 = triggers.iter().map(|t| f64::from(t.intensity)).sum();
    round2(sum / triggers.len() as f64)
}

/// Most frequent category, tallied in input order so that ties resolve to
/// whichever category was encountered first.
fn dominant_emotion(triggers: &[Trigger]) -> Option<EmotionCategory> {
    let mut tallies: Vec<(EmotionCategory, usize)> = Vec::new();
    for trigger in triggers {
        match tallies
            .iter_mut()
            .find(|(category, _)| *category == trigger.emotion_category)
        {
            Some((_, count)) => *count += 1,
            None => tallies.push((trigger.emotion_category, 1)),
        }
    }

    let mut best: Option<(EmotionCategory, usize)> = None;
    for (category, count) in tallies {
        let replace = match best {
            None => true,
            Some((_, best_count)) => count > best_count,
        };
        if replace {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

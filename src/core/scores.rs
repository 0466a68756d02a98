//! Sub-score computation over trigger sets.
//!
//! All scores are normalized to 0–100 where higher always means healthier:
//! fewer, less intense, faster-recovering events. Each function is pure and
//! total — degenerate input resolves to a documented fallback, never an
//! error. Inputs are assumed pre-validated (see [`crate::trigger::ingest`]).

use statrs::statistics::Statistics;

use crate::trigger::types::Trigger;

/// Intensity at or above which an entry counts as "high" for stability.
pub const HIGH_INTENSITY_THRESHOLD: u8 = 8;

/// Gap (minutes) beyond which an entry counts as sudden onset.
pub const SUDDEN_ONSET_GAP_MINUTES: f64 = 30.0;

/// Reactivity weight for sudden-onset entries.
pub const SUDDEN_ONSET_WEIGHT: f64 = 1.5;

/// Reactivity weight for sustained entries.
pub const SUSTAINED_WEIGHT: f64 = 1.0;

/// Density penalty per trigger-per-day; 5 events/day floors the score at 0.
pub const DENSITY_PENALTY_PER_DAILY_TRIGGER: f64 = 20.0;

/// Recovery time (minutes) at or beyond which the score floors at 0.
pub const RECOVERY_CEILING_MINUTES: f64 = 120.0;

/// Score returned when no entry has a recorded recovery time. Deliberately
/// neutral rather than the 100 the other scores use for empty input:
/// recovery has no natural "healthy default".
pub const NEUTRAL_RECOVERY_SCORE: f64 = 50.0;

/// Composite blend weights; they sum to 1.0.
pub const STABILITY_WEIGHT: f64 = 0.35;
pub const REACTIVITY_WEIGHT: f64 = 0.25;
pub const DENSITY_WEIGHT: f64 = 0.20;
pub const RECOVERY_WEIGHT: f64 = 0.20;

/// The four sub-scores feeding the composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub stability: f64,
    pub reactivity: f64,
    pub density: f64,
    pub recovery: f64,
}

/// Emotional stability score.
///
/// `100 − (avg/10)·40 − (stddev/10)·30 − high_ratio·30`, where `stddev` is
/// the population standard deviation (divide by n) and `high_ratio` is the
/// fraction of entries at intensity 8+. Empty input scores 100: no data is
/// read as stable. A single entry has zero deviation, so its variance term
/// vanishes — intended, not a bug.
pub fn stability_score(triggers: &[Trigger]) -> f64 {
    if triggers.is_empty() {
        return 100.0;
    }

    let intensities: Vec<f64> = triggers.iter().map(|t| f64::from(t.intensity)).collect();
    let avg = intensities.iter().mean();
    let std_dev = intensities.iter().population_std_dev();

    let high_count = triggers
        .iter()
        .filter(|t| t.intensity >= HIGH_INTENSITY_THRESHOLD)
        .count();
    let high_ratio = high_count as f64 / triggers.len() as f64;

    let score = 100.0 - (avg / 10.0) * 40.0 - (std_dev / 10.0) * 30.0 - high_ratio * 30.0;
    clamp_score(score)
}

/// Reactivity index.
///
/// Entries are stable-sorted by `occurred_at` (ties keep their given
/// relative order). Each entry is weighted by how abruptly it arrived: more
/// than 30 minutes since the previous entry — including the first entry,
/// whose gap is infinite — counts as sudden onset at weight 1.5, otherwise
/// sustained at 1.0. `raw = Σ(intensity·weight)/n`; the score is
/// `100 − (raw/10)·100`. Empty input scores 100.
pub fn reactivity_index(triggers: &[Trigger]) -> f64 {
    if triggers.is_empty() {
        return 100.0;
    }

    let mut sorted: Vec<&Trigger> = triggers.iter().collect();
    sorted.sort_by_key(|t| t.occurred_at);

    let mut weighted_sum = 0.0;
    for (i, trigger) in sorted.iter().enumerate() {
        let minutes_since_prev = if i == 0 {
            f64::INFINITY
        } else {
            let gap = trigger.occurred_at - sorted[i - 1].occurred_at;
            gap.num_milliseconds() as f64 / 60_000.0
        };

        let weight = if minutes_since_prev > SUDDEN_ONSET_GAP_MINUTES {
            SUDDEN_ONSET_WEIGHT
        } else {
            SUSTAINED_WEIGHT
        };
        weighted_sum += f64::from(trigger.intensity) * weight;
    }

    let raw_reactivity = weighted_sum / sorted.len() as f64;
    clamp_score(100.0 - (raw_reactivity / 10.0) * 100.0)
}

/// Trigger density score: fewer triggers per day is healthier.
///
/// `score = 100 − min(count/days · 20, 100)`. Returns 100 when the period is
/// zero days or there are no triggers — zero events and no data are
/// deliberately conflated here, so callers must not distinguish them through
/// this score.
pub fn density_score(trigger_count: usize, days_in_period: u32) -> f64 {
    if days_in_period == 0 || trigger_count == 0 {
        return 100.0;
    }

    let density = trigger_count as f64 / f64::from(days_in_period);
    let penalty = (density * DENSITY_PENALTY_PER_DAILY_TRIGGER).min(100.0);
    clamp_score(100.0 - penalty)
}

/// Recovery speed score over entries that recorded a recovery time.
///
/// `score = 100 − min((avg_minutes/120)·100, 100)`; two hours or more floors
/// the score at 0. When nothing qualifies the score is the neutral 50 (see
/// [`NEUTRAL_RECOVERY_SCORE`]).
pub fn recovery_speed_score(triggers: &[Trigger]) -> f64 {
    let recoveries: Vec<f64> = triggers
        .iter()
        .filter_map(|t| t.recovery_minutes)
        .map(f64::from)
        .collect();

    if recoveries.is_empty() {
        return NEUTRAL_RECOVERY_SCORE;
    }

    let avg_recovery = recoveries.iter().mean();
    let penalty = ((avg_recovery / RECOVERY_CEILING_MINUTES) * 100.0).min(100.0);
    clamp_score(100.0 - penalty)
}

/// Weighted blend of the four sub-scores: stability 35%, reactivity 25%,
/// density 20%, recovery 20%. Inputs are already bounded, so no clamp is
/// needed beyond rounding.
pub fn composite_score(scores: &SubScores) -> f64 {
    let composite = scores.stability * STABILITY_WEIGHT
        + scores.reactivity * REACTIVITY_WEIGHT
        + scores.density * DENSITY_WEIGHT
        + scores.recovery * RECOVERY_WEIGHT;
    round2(composite)
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamp into the 0–100 score range, then round to 2 decimals.
fn clamp_score(score: f64) -> f64 {
    round2(score.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::types::EmotionCategory;
    use chrono::{Duration, Utc};

    fn trigger(intensity: u8, minutes_ago: i64) -> Trigger {
        Trigger::new(
            "test",
            EmotionCategory::Other,
            intensity,
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[test]
    fn test_empty_input_defaults() {
        assert_eq!(stability_score(&[]), 100.0);
        assert_eq!(reactivity_index(&[]), 100.0);
        assert_eq!(density_score(0, 7), 100.0);
        assert_eq!(recovery_speed_score(&[]), NEUTRAL_RECOVERY_SCORE);
    }

    #[test]
    fn test_stability_single_entry_has_no_variance_term() {
        // avg 5 costs 20 points; stddev and high ratio are both zero
        let score = stability_score(&[trigger(5, 0)]);
        assert!((score - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_stability_uniform_high_intensity() {
        // avg 8 -> 32, stddev 0 -> 0, high ratio 1.0 -> 30
        let triggers: Vec<Trigger> = (0..4).map(|i| trigger(8, i * 60)).collect();
        let score = stability_score(&triggers);
        assert!((score - 38.0).abs() < 0.001);
    }

    #[test]
    fn test_stability_non_increasing_in_average_intensity() {
        // Single entries below the high threshold: variance and high ratio
        // stay fixed at zero while the average climbs.
        let mut previous = f64::INFINITY;
        for intensity in 1..=7u8 {
            let score = stability_score(&[trigger(intensity, 0)]);
            assert!(score <= previous, "score rose from {previous} to {score}");
            previous = score;
        }
    }

    #[test]
    fn test_reactivity_lone_maximal_trigger_floors_at_zero() {
        let score = reactivity_index(&[trigger(10, 0)]);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_reactivity_sustained_weighs_less_than_sudden() {
        // 10 minutes apart: first entry is sudden (infinite gap), second is
        // sustained. raw = (4*1.5 + 4*1.0)/2 = 5 -> score 50.
        let sustained = vec![trigger(4, 10), trigger(4, 0)];
        assert!((reactivity_index(&sustained) - 50.0).abs() < 0.001);

        // 40 minutes apart: both sudden. raw = 6 -> score 40.
        let sudden = vec![trigger(4, 40), trigger(4, 0)];
        assert!((reactivity_index(&sudden) - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_reactivity_identical_timestamps_are_deterministic() {
        let at = Utc::now();
        let triggers = vec![
            Trigger::new("a", EmotionCategory::Anger, 6, at),
            Trigger::new("b", EmotionCategory::Fear, 2, at),
        ];
        let first = reactivity_index(&triggers);
        let second = reactivity_index(&triggers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_density_floor_and_midpoints() {
        assert_eq!(density_score(5, 1), 0.0);
        assert_eq!(density_score(7, 7), 80.0);
        assert_eq!(density_score(40, 1), 0.0);
    }

    #[test]
    fn test_density_zero_days_means_no_signal() {
        assert_eq!(density_score(7, 0), 100.0);
    }

    #[test]
    fn test_recovery_extremes() {
        let slow: Vec<Trigger> = (0..3).map(|i| trigger(5, i).with_recovery(120)).collect();
        assert_eq!(recovery_speed_score(&slow), 0.0);

        let instant: Vec<Trigger> = (0..3).map(|i| trigger(5, i).with_recovery(0)).collect();
        assert_eq!(recovery_speed_score(&instant), 100.0);
    }

    #[test]
    fn test_recovery_ignores_unrecorded_entries() {
        // Only the two recorded recoveries count: avg 60 -> score 50.
        let triggers = vec![
            trigger(5, 0).with_recovery(30),
            trigger(5, 10),
            trigger(5, 20).with_recovery(90),
        ];
        assert!((recovery_speed_score(&triggers) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_composite_known_blend() {
        let scores = SubScores {
            stability: 80.0,
            reactivity: 60.0,
            density: 100.0,
            recovery: 50.0,
        };
        // 28 + 15 + 20 + 10
        assert_eq!(composite_score(&scores), 73.0);
    }

    #[test]
    fn test_composite_of_empty_set_defaults() {
        let scores = SubScores {
            stability: 100.0,
            reactivity: 100.0,
            density: 100.0,
            recovery: NEUTRAL_RECOVERY_SCORE,
        };
        assert_eq!(composite_score(&scores), 90.0);
    }

    #[test]
    fn test_composite_is_pure() {
        let scores = SubScores {
            stability: 42.13,
            reactivity: 77.77,
            density: 12.5,
            recovery: 90.01,
        };
        assert_eq!(composite_score(&scores), composite_score(&scores));
    }

    #[test]
    fn test_all_scores_stay_in_range() {
        let triggers: Vec<Trigger> = (0..20)
            .map(|i| trigger(if i % 3 == 0 { 10 } else { 3 }, i * 45).with_recovery(i as u32 * 30))
            .collect();

        for score in [
            stability_score(&triggers),
            reactivity_index(&triggers),
            density_score(triggers.len(), 7),
            recovery_speed_score(&triggers),
        ] {
            assert!((0.0..=100.0).contains(&score), "score out of range: {score}");
        }
    }
}

//! Volatility trend detection over a rolling fortnight.
//!
//! Compares mean intensity in the most recent window against the window
//! before it. This is a point-in-time comparison, not a significance test:
//! small samples produce noisy trends, which is accepted behavior.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scores::round2;
use crate::trigger::types::Trigger;

/// Default length of each comparison window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Default half-width of the band around zero delta that reads as stable.
pub const DEFAULT_STABLE_BAND: f64 = 0.5;

/// Direction the user's intensity pattern is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        };
        f.write_str(label)
    }
}

/// Window length and classification band for trend detection.
///
/// The defaults are the load-bearing values; changing them changes what the
/// product reports, so overrides are a deliberate configuration act.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolatilityParams {
    /// Length of each comparison bucket in days. Triggers older than two
    /// windows are excluded outright.
    pub window_days: i64,
    /// Deltas within ±this band classify as stable.
    pub stable_band: f64,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            stable_band: DEFAULT_STABLE_BAND,
        }
    }
}

/// The detected trend plus the two rolling averages it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityTrend {
    pub trend: TrendDirection,
    /// `recent_avg − prior_avg`, rounded to 2 decimals.
    pub delta: f64,
    pub recent_avg: f64,
    pub prior_avg: f64,
}

/// Detect the trend with default windows (7 recent days vs the 7 before).
///
/// `now` is the evaluation anchor and is injected rather than read from the
/// system clock, so identical inputs always yield identical output.
pub fn detect_trend(triggers: &[Trigger], now: DateTime<Utc>) -> VolatilityTrend {
    detect_trend_with(triggers, now, &VolatilityParams::default())
}

/// Detect the trend with explicit parameters.
pub fn detect_trend_with(
    triggers: &[Trigger],
    now: DateTime<Utc>,
    params: &VolatilityParams,
) -> VolatilityTrend {
    let window = Duration::days(params.window_days);
    let recent_cutoff = now - window;
    let prior_cutoff = recent_cutoff - window;

    let recent_avg = mean_intensity(
        triggers
            .iter()
            .filter(|t| t.occurred_at >= recent_cutoff),
    );
    let prior_avg = mean_intensity(
        triggers
            .iter()
            .filter(|t| t.occurred_at >= prior_cutoff && t.occurred_at < recent_cutoff),
    );

    // Classify on the raw delta; rounding is presentation only.
    let delta = recent_avg - prior_avg;
    let trend = if delta < -params.stable_band {
        TrendDirection::Improving
    } else if delta > params.stable_band {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    VolatilityTrend {
        trend,
        delta: round2(delta),
        recent_avg: round2(recent_avg),
        prior_avg: round2(prior_avg),
    }
}

/// Mean intensity of a bucket, 0 when the bucket is empty.
fn mean_intensity<'a>(bucket: impl Iterator<Item = &'a Trigger>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for trigger in bucket {
        sum += f64::from(trigger.intensity);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

//! Markdown report generation.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::snapshot::build_snapshot;
use crate::insights::rollup::{daily_rollups, emotion_tallies};
use crate::trigger::types::Trigger;

/// Rollup days shown at the end of the report.
const ROLLUP_TAIL_DAYS: usize = 14;

/// Build a markdown wellbeing report over one trigger window.
///
/// `now` anchors the scoring period and the volatility windows; `tz` sets
/// the local calendar used for daily rollups.
pub fn build_report(triggers: &[Trigger], days: u32, now: DateTime<Utc>, tz: Tz) -> String {
    let snapshot = build_snapshot(triggers, days, now);
    let tallies = emotion_tallies(triggers);
    let rollups = daily_rollups(triggers, tz);

    let mut output = String::new();

    let _ = writeln!(output, "# Emotional Wellbeing Report");
    let _ = writeln!(
        output,
        "Covering the {} days up to {} ({} triggers)",
        days,
        now.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
        snapshot.trigger_count
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Scores");
    let _ = writeln!(output, "- Composite: {:.2}", snapshot.composite_score);
    let _ = writeln!(output, "- Stability: {:.2}", snapshot.stability_score);
    let _ = writeln!(output, "- Reactivity: {:.2}", snapshot.reactivity_index);
    let _ = writeln!(output, "- Density: {:.2}", snapshot.trigger_density_score);
    let _ = writeln!(output, "- Recovery: {:.2}", snapshot.recovery_speed_score);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Trend: {} (recent avg {:.2} vs prior {:.2}, delta {:+.2})",
        snapshot.volatility.trend,
        snapshot.volatility.recent_avg,
        snapshot.volatility.prior_avg,
        snapshot.volatility.delta
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Emotions");

    if tallies.is_empty() {
        let _ = writeln!(output, "No triggers recorded for this window.");
    } else {
        for tally in tallies.iter().take(5) {
            let _ = writeln!(output, "- {}: {} triggers", tally.category, tally.count);
        }
    }

    let mut recent = triggers.to_vec();
    recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Triggers");

    if recent.is_empty() {
        let _ = writeln!(output, "No triggers recorded for this window.");
    } else {
        for trigger in recent.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}, intensity {}) on {}",
                trigger.title,
                trigger.emotion_category,
                trigger.intensity,
                trigger.occurred_at.with_timezone(&tz).format("%Y-%m-%d")
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Daily Intensity");

    if rollups.is_empty() {
        let _ = writeln!(output, "No triggers recorded for this window.");
    } else {
        let skip = rollups.len().saturating_sub(ROLLUP_TAIL_DAYS);
        for rollup in rollups.iter().skip(skip) {
            let _ = writeln!(
                output,
                "- {}: avg {:.2} across {} triggers",
                rollup.date, rollup.avg_intensity, rollup.count
            );
        }
    }

    output
}

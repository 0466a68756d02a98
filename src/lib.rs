//! Triggerscope - Deterministic emotional wellbeing scoring.
//!
//! This library computes derived wellbeing scores from self-reported
//! emotional trigger events: four sub-scores, a weighted composite, and a
//! rolling volatility trend, assembled into a serializable snapshot.
//!
//! # Determinism Guarantees
//!
//! - **Pure computation**: No I/O, no ambient clock, no shared state inside
//!   the engine
//! - **Injected time**: The evaluation instant is always a parameter, so
//!   identical inputs yield bit-identical snapshots
//! - **Total functions**: The engine never fails; degenerate input resolves
//!   to documented fallback scores
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Triggerscope                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │   Ingest    │──▶│   Scores    │──▶│  Snapshot   │       │
//! │  │ (validate)  │   │ (4 + blend) │   │ (assemble)  │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         │          ┌─────────────┐          │              │
//! │         └─────────▶│ Volatility  │──────────┤              │
//! │                    │  (7d vs 7d) │          ▼              │
//! │                    └─────────────┘   ┌─────────────┐       │
//! │  ┌─────────────┐   ┌─────────────┐   │   History   │       │
//! │  │  Insights   │   │   Report    │   │   (JSONL)   │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use triggerscope::{build_snapshot, EmotionCategory, Trigger};
//!
//! let now = Utc::now();
//! let triggers = vec![
//!     Trigger::new("missed deadline", EmotionCategory::Anxiety, 7, now).with_recovery(40),
//!     Trigger::new("evening walk", EmotionCategory::Calm, 2, now),
//! ];
//!
//! let snapshot = build_snapshot(&triggers, 7, now);
//! assert!(snapshot.composite_score <= 100.0);
//! ```

pub mod config;
pub mod core;
pub mod history;
pub mod insights;
pub mod report;
pub mod trigger;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use core::{
    build_snapshot, composite_score, density_score, detect_trend, reactivity_index,
    recovery_speed_score, stability_score, ScoreSnapshot, SnapshotBuilder, SubScores,
    TrendDirection, VolatilityParams, VolatilityTrend, DEFAULT_PERIOD_DAYS,
};
pub use history::{HistoryEntry, SnapshotHistory, DEFAULT_HISTORY_MONTHS};
pub use insights::{
    cluster_by_emotion, daily_rollups, emotion_tallies, ClusterError, DailyRollup, EmotionCluster,
    EmotionTally,
};
pub use report::build_report;
pub use trigger::{load_triggers, validate, EmotionCategory, IngestError, RawTrigger, Trigger};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Methodology disclosure that can be displayed to users.
pub const SCORING_METHODOLOGY: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║              TRIGGERSCOPE - SCORING METHODOLOGY                  ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  All scores run 0-100, where 100 always means healthier.         ║
║                                                                  ║
║  ◆ STABILITY (35% of composite):                                 ║
║    Penalizes average intensity, intensity spread, and the        ║
║    share of severe (8+) triggers.                                ║
║                                                                  ║
║  ◆ REACTIVITY (25%):                                             ║
║    Weights triggers arriving out of the blue (>30 min gap)       ║
║    1.5x against sustained ones.                                  ║
║                                                                  ║
║  ◆ DENSITY (20%):                                                ║
║    Triggers per day; 5+ per day floors the score at 0.           ║
║                                                                  ║
║  ◆ RECOVERY (20%):                                               ║
║    Average recorded recovery time; 2 hours floors the score      ║
║    at 0. With nothing recorded the score is a neutral 50 -       ║
║    unlike the other three, which read no data as a healthy       ║
║    100, recovery has no natural healthy default.                 ║
║                                                                  ║
║  ◆ TREND:                                                        ║
║    Mean intensity of the last 7 days against the 7 before;       ║
║    a shift past 0.5 reads as improving or declining.             ║
║                                                                  ║
║  Scores are descriptive self-tracking aids, not clinical         ║
║  instruments or diagnoses.                                       ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methodology_contents() {
        assert!(SCORING_METHODOLOGY.contains("METHODOLOGY"));
        assert!(SCORING_METHODOLOGY.contains("STABILITY"));
        assert!(SCORING_METHODOLOGY.contains("neutral 50"));
        assert!(SCORING_METHODOLOGY.contains("not clinical"));
    }
}

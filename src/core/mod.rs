//! Core scoring engine.
//!
//! This module contains:
//! - Sub-score and composite computation from trigger sets
//! - Volatility trend detection over rolling windows
//! - Score snapshot assembly for export

pub mod scores;
pub mod snapshot;
pub mod volatility;

// Re-export commonly used types
pub use scores::{
    composite_score, density_score, reactivity_index, recovery_speed_score, stability_score,
    SubScores,
};
pub use snapshot::{build_snapshot, ScoreSnapshot, SnapshotBuilder, DEFAULT_PERIOD_DAYS};
pub use volatility::{detect_trend, TrendDirection, VolatilityParams, VolatilityTrend};

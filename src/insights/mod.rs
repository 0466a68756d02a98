//! Deterministic insight computations layered over scored triggers.

pub mod clusters;
pub mod rollup;

// Re-export commonly used types
pub use clusters::{cluster_by_emotion, ClusterError, EmotionCluster, MIN_CLUSTER_TRIGGERS};
pub use rollup::{daily_rollups, emotion_tallies, DailyRollup, EmotionTally};

//! Deterministic by-emotion clustering.
//!
//! Groups a trigger window into one cluster per emotion category. This is
//! the rule-based companion to any model-driven thematic clustering: it
//! needs no external calls and always produces the same clusters for the
//! same input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::scores::round2;
use crate::trigger::types::{EmotionCategory, Trigger};

/// Fewest triggers worth clustering at all.
pub const MIN_CLUSTER_TRIGGERS: usize = 3;

/// A group of triggers sharing an emotion category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionCluster {
    /// Display name, e.g. "ANGER Cluster"
    pub name: String,
    pub description: String,
    /// Ids of the member triggers, in input order
    pub trigger_ids: Vec<Uuid>,
    pub centroid_emotion: EmotionCategory,
    /// Mean member intensity, 2 decimals
    pub avg_intensity: f64,
    /// Member count
    pub frequency: usize,
    /// Latest `occurred_at` among members
    pub last_seen: DateTime<Utc>,
    /// When this clustering was computed
    pub created_at: DateTime<Utc>,
}

/// Why clustering was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    NotEnoughTriggers { found: usize },
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterError::NotEnoughTriggers { found } => {
                write!(
                    f,
                    "need at least {MIN_CLUSTER_TRIGGERS} triggers to cluster, found {found}"
                )
            }
        }
    }
}

impl std::error::Error for ClusterError {}

/// Group `triggers` into one cluster per emotion category.
///
/// Clusters are emitted in first-encounter order of their category, so
/// output order is a deterministic function of input order. `now` stamps
/// each cluster's `created_at`.
pub fn cluster_by_emotion(
    triggers: &[Trigger],
    now: DateTime<Utc>,
) -> Result<Vec<EmotionCluster>, ClusterError> {
    if triggers.len() < MIN_CLUSTER_TRIGGERS {
        return Err(ClusterError::NotEnoughTriggers {
            found: triggers.len(),
        });
    }

    let mut groups: Vec<(EmotionCategory, Vec<&Trigger>)> = Vec::new();
    for trigger in triggers {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == trigger.emotion_category)
        {
            Some((_, members)) => members.push(trigger),
            None => groups.push((trigger.emotion_category, vec![trigger])),
        }
    }

    let clusters = groups
        .into_iter()
        .map(|(category, members)| {
            let intensity_sum: f64 = members.iter().map(|t| f64::from(t.intensity)).sum();
            let last_seen = members
                .iter()
                .map(|t| t.occurred_at)
                .max()
                .unwrap_or(now);

            EmotionCluster {
                name: format!("{} Cluster", category.as_str().to_uppercase()),
                description: format!("Auto cluster by emotion category: {category}"),
                trigger_ids: members.iter().map(|t| t.id).collect(),
                centroid_emotion: category,
                avg_intensity: round2(intensity_sum / members.len() as f64),
                frequency: members.len(),
                last_seen,
                created_at: now,
            }
        })
        .collect();

    Ok(clusters)
}

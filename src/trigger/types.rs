//! Core record types for the Triggerscope scoring engine.
//!
//! A [`Trigger`] is an immutable fact once scored: the engine never mutates
//! one and never stores them beyond the slice it is handed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of emotion categories a trigger can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Anger,
    Fear,
    Sadness,
    Joy,
    Disgust,
    Surprise,
    Shame,
    Anxiety,
    Grief,
    Frustration,
    Overwhelm,
    Calm,
    Other,
}

impl EmotionCategory {
    /// All categories, in canonical order.
    pub const ALL: [EmotionCategory; 13] = [
        EmotionCategory::Anger,
        EmotionCategory::Fear,
        EmotionCategory::Sadness,
        EmotionCategory::Joy,
        EmotionCategory::Disgust,
        EmotionCategory::Surprise,
        EmotionCategory::Shame,
        EmotionCategory::Anxiety,
        EmotionCategory::Grief,
        EmotionCategory::Frustration,
        EmotionCategory::Overwhelm,
        EmotionCategory::Calm,
        EmotionCategory::Other,
    ];

    /// Lowercase wire name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Anger => "anger",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Joy => "joy",
            EmotionCategory::Disgust => "disgust",
            EmotionCategory::Surprise => "surprise",
            EmotionCategory::Shame => "shame",
            EmotionCategory::Anxiety => "anxiety",
            EmotionCategory::Grief => "grief",
            EmotionCategory::Frustration => "frustration",
            EmotionCategory::Overwhelm => "overwhelm",
            EmotionCategory::Calm => "calm",
            EmotionCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for EmotionCategory {
    fn default() -> Self {
        EmotionCategory::Other
    }
}

/// A single self-reported emotional trigger event.
///
/// Invariants (enforced at the ingest boundary, assumed by the engine):
/// `intensity` is in 1..=10; `recovery_minutes` of `None` means "not
/// recorded", which is semantically distinct from `Some(0)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    /// Stable identity, used by clustering output
    pub id: Uuid,
    /// Short user-provided description of the event
    pub title: String,
    /// Category the user filed the emotion under
    pub emotion_category: EmotionCategory,
    /// Subjective severity, 1 (mild) to 10 (extreme)
    pub intensity: u8,
    /// When the event reportedly happened (not insertion time)
    pub occurred_at: DateTime<Utc>,
    /// Minutes until the user felt regulated again, if they recorded it
    pub recovery_minutes: Option<u32>,
}

impl Trigger {
    /// Create a trigger with a fresh id and no recovery time.
    pub fn new(
        title: impl Into<String>,
        emotion_category: EmotionCategory,
        intensity: u8,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            emotion_category,
            intensity,
            occurred_at,
            recovery_minutes: None,
        }
    }

    /// Attach a recorded recovery time.
    pub fn with_recovery(mut self, minutes: u32) -> Self {
        self.recovery_minutes = Some(minutes);
        self
    }
}

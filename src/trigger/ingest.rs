//! Boundary validation for incoming trigger records.
//!
//! The scoring engine assumes well-formed [`Trigger`]s and does not defend
//! against range violations, so everything entering the system passes
//! through here first. Raw records are loosely shaped (optional fields,
//! untrusted numbers) and are checked and defaulted into `Trigger`s.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::trigger::types::{EmotionCategory, Trigger};

/// Default intensity applied when a record omits it.
pub const DEFAULT_INTENSITY: u8 = 5;

/// A trigger record as it arrives from the outside world.
///
/// Field defaults mirror the ingestion behavior of the tracking app:
/// category falls back to `other`, intensity to 5, and a missing
/// `occurred_at` is stamped with the ingestion instant.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrigger {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub emotion_category: Option<EmotionCategory>,
    pub intensity: Option<i64>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub recovery_minutes: Option<i64>,
}

/// Why a single record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingTitle,
    IntensityOutOfRange(i64),
    NegativeRecovery(i64),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingTitle => write!(f, "title is required"),
            ValidationError::IntensityOutOfRange(v) => {
                write!(f, "intensity {v} is outside 1..=10")
            }
            ValidationError::NegativeRecovery(v) => {
                write!(f, "recovery_minutes {v} is negative")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a trigger file.
#[derive(Debug)]
pub enum IngestError {
    Io(String),
    /// The file as a whole failed to parse (JSON array input).
    Parse(String),
    /// One record failed to parse; `index` is 1-based.
    Record { index: usize, message: String },
    /// One record parsed but violated an invariant; `index` is 1-based.
    Invalid { index: usize, error: ValidationError },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io(e) => write!(f, "IO error: {e}"),
            IngestError::Parse(e) => write!(f, "Parse error: {e}"),
            IngestError::Record { index, message } => {
                write!(f, "Record {index}: parse error: {message}")
            }
            IngestError::Invalid { index, error } => {
                write!(f, "Record {index}: {error}")
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Validate one raw record into a [`Trigger`].
///
/// `now` is the ingestion instant and is injected rather than read from the
/// system clock so callers (and tests) control it. It stamps records that
/// omit `occurred_at`.
pub fn validate(raw: RawTrigger, now: DateTime<Utc>) -> Result<Trigger, ValidationError> {
    let title = match raw.title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ValidationError::MissingTitle),
    };

    let intensity = raw.intensity.unwrap_or(DEFAULT_INTENSITY as i64);
    if !(1..=10).contains(&intensity) {
        return Err(ValidationError::IntensityOutOfRange(intensity));
    }

    let recovery_minutes = match raw.recovery_minutes {
        Some(v) if v < 0 => return Err(ValidationError::NegativeRecovery(v)),
        Some(v) => Some(v as u32),
        None => None,
    };

    Ok(Trigger {
        id: raw.id.unwrap_or_else(Uuid::new_v4),
        title,
        emotion_category: raw.emotion_category.unwrap_or_default(),
        intensity: intensity as u8,
        occurred_at: raw.occurred_at.unwrap_or(now),
        recovery_minutes,
    })
}

/// Parse a JSON array of raw records and validate every one.
pub fn triggers_from_json(content: &str, now: DateTime<Utc>) -> Result<Vec<Trigger>, IngestError> {
    let raw: Vec<RawTrigger> =
        serde_json::from_str(content).map_err(|e| IngestError::Parse(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(i, record)| {
            validate(record, now).map_err(|error| IngestError::Invalid {
                index: i + 1,
                error,
            })
        })
        .collect()
}

/// Parse JSON Lines (one record per line, blank lines ignored) and validate
/// every record.
pub fn triggers_from_jsonl(content: &str, now: DateTime<Utc>) -> Result<Vec<Trigger>, IngestError> {
    let mut triggers = Vec::new();

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let index = i + 1;
        let raw: RawTrigger = serde_json::from_str(line).map_err(|e| IngestError::Record {
            index,
            message: e.to_string(),
        })?;
        triggers.push(validate(raw, now).map_err(|error| IngestError::Invalid { index, error })?);
    }

    Ok(triggers)
}

/// Load triggers from a file.
///
/// A `.json` extension is read as a JSON array; anything else is treated as
/// JSON Lines.
pub fn load_triggers(path: &Path, now: DateTime<Utc>) -> Result<Vec<Trigger>, IngestError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| IngestError::Io(e.to_string()))?;

    let is_array = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let triggers = if is_array {
        triggers_from_json(&content, now)?
    } else {
        triggers_from_jsonl(&content, now)?
    };

    tracing::debug!(
        count = triggers.len(),
        path = %path.display(),
        "loaded triggers"
    );

    Ok(triggers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawTrigger {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let now = Utc::now();
        let trigger = validate(raw(r#"{"title": "spilled coffee"}"#), now).unwrap();

        assert_eq!(trigger.title, "spilled coffee");
        assert_eq!(trigger.emotion_category, EmotionCategory::Other);
        assert_eq!(trigger.intensity, DEFAULT_INTENSITY);
        assert_eq!(trigger.occurred_at, now);
        assert_eq!(trigger.recovery_minutes, None);
    }

    #[test]
    fn test_title_is_required() {
        let now = Utc::now();
        assert_eq!(
            validate(raw(r#"{"intensity": 3}"#), now).unwrap_err(),
            ValidationError::MissingTitle
        );
        assert_eq!(
            validate(raw(r#"{"title": "   "}"#), now).unwrap_err(),
            ValidationError::MissingTitle
        );
    }

    #[test]
    fn test_intensity_range_enforced() {
        let now = Utc::now();
        for bad in [0, 11, -3] {
            let json = format!(r#"{{"title": "x", "intensity": {bad}}}"#);
            assert_eq!(
                validate(raw(&json), now).unwrap_err(),
                ValidationError::IntensityOutOfRange(bad)
            );
        }
        let ok = validate(raw(r#"{"title": "x", "intensity": 10}"#), now).unwrap();
        assert_eq!(ok.intensity, 10);
    }

    #[test]
    fn test_negative_recovery_rejected() {
        let now = Utc::now();
        assert_eq!(
            validate(raw(r#"{"title": "x", "recovery_minutes": -1}"#), now).unwrap_err(),
            ValidationError::NegativeRecovery(-1)
        );
        let zero = validate(raw(r#"{"title": "x", "recovery_minutes": 0}"#), now).unwrap();
        assert_eq!(zero.recovery_minutes, Some(0));
    }

    #[test]
    fn test_jsonl_reports_one_based_line() {
        let now = Utc::now();
        let content = "{\"title\": \"ok\"}\n\n{\"title\": \"bad\", \"intensity\": 42}\n";
        match triggers_from_jsonl(content, now).unwrap_err() {
            IngestError::Invalid { index, error } => {
                assert_eq!(index, 3);
                assert_eq!(error, ValidationError::IntensityOutOfRange(42));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_array_round_trip() {
        let now = Utc::now();
        let content = r#"[
            {"title": "argument", "emotion_category": "anger", "intensity": 8},
            {"title": "walk", "emotion_category": "calm", "intensity": 2, "recovery_minutes": 15}
        ]"#;
        let triggers = triggers_from_json(content, now).unwrap();
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].emotion_category, EmotionCategory::Anger);
        assert_eq!(triggers[1].recovery_minutes, Some(15));
    }

    #[test]
    fn test_unknown_category_is_a_parse_error() {
        let now = Utc::now();
        let content = r#"[{"title": "x", "emotion_category": "ennui"}]"#;
        assert!(matches!(
            triggers_from_json(content, now).unwrap_err(),
            IngestError::Parse(_)
        ));
    }
}

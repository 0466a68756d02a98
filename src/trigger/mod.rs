//! Trigger records and the validation boundary they enter through.

pub mod ingest;
pub mod types;

// Re-export commonly used types
pub use ingest::{load_triggers, validate, IngestError, RawTrigger, ValidationError};
pub use types::{EmotionCategory, Trigger};

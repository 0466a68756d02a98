//! Append-only snapshot history.
//!
//! Stores one [`HistoryEntry`] per line as JSON Lines, so recording a
//! snapshot is a single appending write and history survives crashes
//! mid-write (a torn final line is skipped on load, not fatal).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::core::snapshot::ScoreSnapshot;

/// Query window applied when the caller does not specify one.
pub const DEFAULT_HISTORY_MONTHS: u32 = 6;

/// One recorded snapshot plus the context it was computed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the snapshot was recorded
    pub recorded_at: DateTime<Utc>,
    /// Scoring period the snapshot covered
    pub period_days: u32,
    pub snapshot: ScoreSnapshot,
}

/// File-backed snapshot history.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    path: PathBuf,
}

impl SnapshotHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file (and parent directories) on
    /// first use.
    pub fn append(&self, entry: &HistoryEntry) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;

        tracing::debug!(path = %self.path.display(), "recorded snapshot");
        Ok(())
    }

    /// Load every entry, ascending by `recorded_at`.
    ///
    /// A missing file reads as empty history. Corrupt lines are skipped
    /// with a warning rather than failing the whole load.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, std::io::Error> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let mut entries: Vec<HistoryEntry> = Vec::new();

        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(
                        line = i + 1,
                        path = %self.path.display(),
                        error = %e,
                        "skipping corrupt history line"
                    );
                }
            }
        }

        entries.sort_by_key(|e| e.recorded_at);
        Ok(entries)
    }

    /// Load entries recorded within the last `months` calendar months of
    /// `now`, ascending by `recorded_at`.
    pub fn recent_months(
        &self,
        months: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<HistoryEntry>, std::io::Error> {
        let cutoff = now
            .checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let mut entries = self.load()?;
        entries.retain(|e| e.recorded_at >= cutoff);
        Ok(entries)
    }
}

//! Daily rollups and emotion tallies.
//!
//! Rollups bucket triggers by the user's local calendar day, so an event at
//! 23:30 in New York lands on the day the user experienced it rather than
//! the UTC day it falls on. The timezone is a named [`chrono_tz::Tz`]
//! supplied by configuration.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::scores::round2;
use crate::trigger::types::{EmotionCategory, Trigger};

/// One local calendar day's worth of triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    /// Local calendar date in the rollup timezone
    pub date: NaiveDate,
    /// Mean intensity that day, 2 decimals
    pub avg_intensity: f64,
    /// Number of triggers that day
    pub count: usize,
}

/// How often one category appeared in a trigger set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionTally {
    pub category: EmotionCategory,
    pub count: usize,
}

/// Bucket triggers by local calendar day, ascending by date.
///
/// Days with no triggers produce no rollup; consumers render gaps
/// themselves.
pub fn daily_rollups(triggers: &[Trigger], tz: Tz) -> Vec<DailyRollup> {
    let mut buckets: Vec<(NaiveDate, f64, usize)> = Vec::new();

    for trigger in triggers {
        let date = trigger.occurred_at.with_timezone(&tz).date_naive();
        match buckets.iter_mut().find(|(d, _, _)| *d == date) {
            Some((_, sum, count)) => {
                *sum += f64::from(trigger.intensity);
                *count += 1;
            }
            None => buckets.push((date, f64::from(trigger.intensity), 1)),
        }
    }

    buckets.sort_by_key(|(date, _, _)| *date);
    buckets
        .into_iter()
        .map(|(date, sum, count)| DailyRollup {
            date,
            avg_intensity: round2(sum / count as f64),
            count,
        })
        .collect()
}

/// Count triggers per category, descending by count.
///
/// The tally walks the input once, so a stable sort leaves tied categories
/// in first-encounter order.
pub fn emotion_tallies(triggers: &[Trigger]) -> Vec<EmotionTally> {
    let mut tallies: Vec<EmotionTally> = Vec::new();

    for trigger in triggers {
        match tallies
            .iter_mut()
            .find(|t| t.category == trigger.emotion_category)
        {
            Some(tally) => tally.count += 1,
            None => tallies.push(EmotionTally {
                category: trigger.emotion_category,
                count: 1,
            }),
        }
    }

    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

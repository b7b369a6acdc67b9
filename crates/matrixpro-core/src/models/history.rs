//! Archived week snapshots.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{HistoryStats, PlannerRow};

/// A frozen snapshot of one archived week.
///
/// Created once at archival time. The rows are a deep copy of the week's
/// pre-rollover state; the stats describe that same state. Conceptually
/// immutable afterwards, except through the explicit archived-entry edit
/// operation, which replaces the rows and recomputes the stats while leaving
/// the identity fields untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier, distinct from any row id
    pub id: String,

    /// Position in the archive, 1-based. Counts archives made, not calendar
    /// weeks.
    pub week_number: u32,

    /// Display label uniquely identifying the archived week
    pub week_range: String,

    /// When the week was archived (UTC)
    pub timestamp: Timestamp,

    /// Deep copy of the rows as they stood before rollover
    pub rows: Vec<PlannerRow>,

    /// Metrics computed over the snapshot rows
    pub stats: HistoryStats,
}

/// Compact archive information for list display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub week_number: u32,
    pub week_range: String,
    pub timestamp: Timestamp,
    pub stats: HistoryStats,
}

impl From<&HistoryEntry> for HistorySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            week_number: entry.week_number,
            week_range: entry.week_range.clone(),
            timestamp: entry.timestamp,
            stats: entry.stats,
        }
    }
}

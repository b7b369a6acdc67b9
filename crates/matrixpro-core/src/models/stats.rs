//! Completion statistics over a row set.

use serde::{Deserialize, Serialize};

use super::{PlannerRow, PriorityGroup};

/// Filled-cell counts per priority group.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupCounts {
    #[serde(rename = "P1")]
    pub p1: u32,
    #[serde(rename = "P2")]
    pub p2: u32,
    #[serde(rename = "P3")]
    pub p3: u32,
    #[serde(rename = "Meeting")]
    pub meeting: u32,
}

impl GroupCounts {
    /// Count for a single group.
    pub fn get(&self, group: PriorityGroup) -> u32 {
        match group {
            PriorityGroup::P1 => self.p1,
            PriorityGroup::P2 => self.p2,
            PriorityGroup::P3 => self.p3,
            PriorityGroup::Meeting => self.meeting,
        }
    }

    fn bump(&mut self, group: PriorityGroup) {
        match group {
            PriorityGroup::P1 => self.p1 += 1,
            PriorityGroup::P2 => self.p2 += 1,
            PriorityGroup::P3 => self.p3 += 1,
            PriorityGroup::Meeting => self.meeting += 1,
        }
    }

    /// Sum across all groups. Always equals the total task count of the
    /// stats this distribution belongs to.
    pub fn total(&self) -> u32 {
        self.p1 + self.p2 + self.p3 + self.meeting
    }
}

/// Productivity metrics derived from a row set.
///
/// Derived only; never hand-edited. Recomputed whenever an archived entry's
/// rows are edited.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    /// Filled cells across all rows and weekdays
    pub total_tasks: u32,

    /// Filled cells marked complete
    pub completed_tasks: u32,

    /// Percentage of filled cells marked complete, rounded half-up.
    /// Defined as 0 when there are no filled cells.
    pub completion_rate: u32,

    /// Filled cells attributed to each row's priority group
    pub distribution: GroupCounts,
}

/// Aggregates a row set into completion metrics.
///
/// A cell counts iff its text is non-blank after trimming; each counted cell
/// attributes to exactly one group, so the distribution sums to the total.
/// Pure and deterministic; safe to call on current or historical rows alike.
pub fn calculate_stats(rows: &[PlannerRow]) -> HistoryStats {
    let mut total_tasks = 0u32;
    let mut completed_tasks = 0u32;
    let mut distribution = GroupCounts::default();

    for row in rows {
        for (_, cell) in row.days.iter() {
            if cell.is_filled() {
                total_tasks += 1;
                distribution.bump(row.priority_group);
                if cell.completed {
                    completed_tasks += 1;
                }
            }
        }
    }

    let completion_rate = if total_tasks > 0 {
        (f64::from(completed_tasks) * 100.0 / f64::from(total_tasks)).round() as u32
    } else {
        0
    };

    HistoryStats {
        total_tasks,
        completed_tasks,
        completion_rate,
        distribution,
    }
}

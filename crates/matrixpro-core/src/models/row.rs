//! Planner row model: one labeled initiative tracked across the week.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WeekDays;

/// Type-safe enumeration of priority groups.
///
/// Used for both display grouping and statistics bucketing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PriorityGroup {
    /// Critical work
    P1,
    P2,
    P3,
    /// Engagement and syncs
    Meeting,
}

impl PriorityGroup {
    /// All groups in display order.
    pub const ALL: [PriorityGroup; 4] = [
        PriorityGroup::P1,
        PriorityGroup::P2,
        PriorityGroup::P3,
        PriorityGroup::Meeting,
    ];

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityGroup::P1 => "P1",
            PriorityGroup::P2 => "P2",
            PriorityGroup::P3 => "P3",
            PriorityGroup::Meeting => "Meeting",
        }
    }

    /// Default effort label for a freshly added row of this group.
    pub fn default_effort(&self) -> &'static str {
        match self {
            PriorityGroup::Meeting => "-",
            _ => "10%",
        }
    }
}

impl FromStr for PriorityGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p1" => Ok(PriorityGroup::P1),
            "p2" => Ok(PriorityGroup::P2),
            "p3" => Ok(PriorityGroup::P3),
            "meeting" => Ok(PriorityGroup::Meeting),
            _ => Err(format!("Invalid priority group: {s}")),
        }
    }
}

/// One labeled task row tracked across the five weekdays.
///
/// Row ids are generated at creation time and are unique within the active
/// row set. They carry no meaning across archived snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRow {
    /// Unique identifier for the row
    pub id: String,

    /// Priority group the row belongs to
    pub priority_group: PriorityGroup,

    /// Target effort share shown next to the label (free-form, e.g. "30%")
    pub effort_label: String,

    /// Display label of the row
    pub label: String,

    /// Cell state for each weekday
    pub days: WeekDays,
}

impl PlannerRow {
    /// Creates a new empty row for a group with a fresh id and the standard
    /// default label and effort.
    pub fn new(group: PriorityGroup) -> Self {
        Self {
            id: new_row_id(),
            priority_group: group,
            effort_label: group.default_effort().to_string(),
            label: "New Strategic Priority".to_string(),
            days: WeekDays::default(),
        }
    }

    /// Total cells on the row that are filled.
    pub fn filled_cells(&self) -> usize {
        self.days.iter().filter(|(_, cell)| cell.is_filled()).count()
    }
}

/// Generate a fresh row identifier.
pub fn new_row_id() -> String {
    Uuid::new_v4().to_string()
}

fn starter_row(group: PriorityGroup, effort: &str, label: &str) -> PlannerRow {
    PlannerRow {
        id: new_row_id(),
        priority_group: group,
        effort_label: effort.to_string(),
        label: label.to_string(),
        days: WeekDays::default(),
    }
}

/// The standard four rows every new board starts with.
pub fn starter_rows() -> Vec<PlannerRow> {
    vec![
        starter_row(PriorityGroup::P1, "50%", "STRATEGIC INITIATIVES"),
        starter_row(PriorityGroup::P2, "30%", "OPERATIONAL TASKS"),
        starter_row(PriorityGroup::P3, "15%", "SUPPORT & AD-HOC"),
        starter_row(PriorityGroup::Meeting, "5%", "ENGAGEMENT & SYNCS"),
    ]
}

//! Collection and composite wrapper types for display.
//!
//! Newtype wrappers give collections a Display implementation with graceful
//! empty-collection handling, so every interface renders lists the same way.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Board, HistorySummary, PlannerRow, PriorityGroup},
    sync::WorkItem,
};

/// The active board together with its current week's rows, rendered as the
/// full grid grouped by priority section.
pub struct BoardView {
    pub board: Board,
    pub rows: Vec<PlannerRow>,
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Weekly Matrix Board: {}", self.board.name)?;
        writeln!(f)?;
        writeln!(f, "- Email: {}", self.board.email)?;
        writeln!(f, "- Rows: {}", self.rows.len())?;
        writeln!(f)?;

        for group in PriorityGroup::ALL {
            writeln!(f, "## {group} Priority Section")?;
            writeln!(f)?;

            let mut any = false;
            for row in self.rows.iter().filter(|r| r.priority_group == group) {
                any = true;
                write!(f, "{row}")?;
            }
            if !any {
                writeln!(f, "No rows in this section.")?;
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

/// Newtype wrapper for displaying collections of archive summaries.
pub struct HistorySummaries(pub Vec<HistorySummary>);

impl HistorySummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, HistorySummary> {
        self.0.iter()
    }
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Week {}: {} ({}/{}, {}%)",
            self.week_number,
            self.week_range,
            self.stats.completed_tasks,
            self.stats.total_tasks,
            self.stats.completion_rate
        )?;
        writeln!(f)?;
        writeln!(f, "- Archived: {}", LocalDateTime(&self.timestamp))?;
        writeln!(f)
    }
}

impl fmt::Display for HistorySummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No archived weeks.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of boards.
pub struct Boards(pub Vec<Board>);

impl Boards {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of boards in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Boards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No boards found.")
        } else {
            for board in &self.0 {
                write!(f, "{board}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying fetched work items.
pub struct WorkItems(pub Vec<WorkItem>);

impl WorkItems {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of work items in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for WorkItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No assigned work items found.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}

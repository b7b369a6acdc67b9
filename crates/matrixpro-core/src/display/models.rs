//! Display implementations for domain models.
//!
//! All Display implementations produce markdown for rich terminal rendering.
//! They live here, separated from the model definitions, to keep data
//! structures and presentation concerns apart.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Board, HistoryEntry, HistoryStats, PlannerRow, PriorityGroup, Weekday},
    sync::WorkItem,
};

impl fmt::Display for PriorityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlannerRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} [{} / {}]",
            self.label, self.priority_group, self.effort_label
        )?;
        writeln!(f)?;
        writeln!(f, "- Row ID: `{}`", self.id)?;

        let mut any = false;
        for (day, cell) in self.days.iter() {
            if cell.is_filled() {
                any = true;
                let marker = if cell.completed { "[x]" } else { "[ ]" };
                // Multi-line task text folds onto one list line.
                let text = cell.text.replace('\n', " / ");
                writeln!(f, "- {day}: {marker} {text}")?;
            }
        }
        if !any {
            writeln!(f, "- No tasks scheduled.")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for HistoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Total tasks: {}", self.total_tasks)?;
        writeln!(
            f,
            "- Completed: {} ({}%)",
            self.completed_tasks, self.completion_rate
        )?;
        writeln!(
            f,
            "- Distribution: P1 {}, P2 {}, P3 {}, Meeting {}",
            self.distribution.p1,
            self.distribution.p2,
            self.distribution.p3,
            self.distribution.meeting
        )
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Week {}: {}", self.week_number, self.week_range)?;
        writeln!(f)?;
        writeln!(f, "- Archived: {}", LocalDateTime(&self.timestamp))?;
        write!(f, "{}", self.stats)?;
        writeln!(f)?;

        if self.rows.is_empty() {
            writeln!(f, "No rows in this snapshot.")?;
        } else {
            for row in &self.rows {
                write!(f, "{row}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Email: {}", self.email)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### #{} {} (P{}, {})",
            self.id, self.title, self.priority, self.state
        )?;
        writeln!(f)?;
        writeln!(f, "- Assigned to: {}", self.assigned_to)?;
        if let Some(comment) = self.comments.first() {
            writeln!(f, "- Last comment: {}", comment.replace('\n', " "))?;
        }
        writeln!(f)
    }
}

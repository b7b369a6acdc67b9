//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{HistoryEntry, PlannerRow};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<PlannerRow> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added row '{}'", self.resource.label)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with
/// optional change tracking.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<PlannerRow> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated row '{}'", self.resource.label)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<HistoryEntry> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated archived week {}; stats recomputed",
            self.resource.week_number
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a completed deploy.
///
/// Alongside the archived entry it reports what the carry-forward did to the
/// working grid: how many filled cells were cleared as done and how many
/// were carried into the next week.
pub struct DeployResult {
    pub entry: HistoryEntry,
    pub carried: u32,
    pub cleared: u32,
}

impl DeployResult {
    /// Derive the carry-forward counts from a freshly archived entry.
    pub fn from_entry(entry: HistoryEntry) -> Self {
        let mut carried = 0;
        let mut cleared = 0;
        for row in &entry.rows {
            for (_, cell) in row.days.iter() {
                if cell.is_filled() {
                    if cell.completed {
                        cleared += 1;
                    } else {
                        carried += 1;
                    }
                }
            }
        }
        Self {
            entry,
            carried,
            cleared,
        }
    }
}

impl fmt::Display for DeployResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Archived week '{}' as week {}",
            self.entry.week_range, self.entry.week_number
        )?;
        writeln!(f)?;
        write!(f, "{}", self.entry.stats)?;
        writeln!(f, "- Cells cleared as done: {}", self.cleared)?;
        writeln!(f, "- Cells carried into next week: {}", self.carried)?;
        Ok(())
    }
}

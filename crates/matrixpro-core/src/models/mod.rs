//! Data models for the weekly planning board.
//!
//! This module contains the core domain models: the weekday grid primitives,
//! planner rows, archived week snapshots, derived statistics, and the board
//! identity and settings records. Display implementations live in
//! [`crate::display::models`] to keep data structures separate from
//! presentation.
//!
//! # Shape of the grid
//!
//! A board holds an ordered list of [`PlannerRow`]s, each tagged with a
//! [`PriorityGroup`] and carrying exactly one [`DayState`] cell per
//! [`Weekday`] (enforced structurally by [`WeekDays`]). Archiving a week
//! freezes a deep copy of the rows plus computed [`HistoryStats`] into a
//! [`HistoryEntry`].

pub mod board;
pub mod day;
pub mod history;
pub mod row;
pub mod settings;
pub mod stats;


// Re-export all public types at the models level
pub use board::Board;
pub use day::{DayState, WeekDays, Weekday};
pub use history::{HistoryEntry, HistorySummary};
pub use row::{new_row_id, starter_rows, PlannerRow, PriorityGroup};
pub use settings::BoardSettings;
pub use stats::{calculate_stats, GroupCounts, HistoryStats};

//! Core library for the MatrixPro weekly planning board.
//!
//! This crate provides the business logic for a priority-matrix planner:
//! grid rows crossed with the Monday..Friday weekdays, completion
//! statistics, week archival with carry-forward rollover, SQLite
//! persistence, and the external-service boundaries (work-item sync,
//! planning assistant).
//!
//! # Quick Start
//!
//! ```rust
//! use matrixpro_core::{params::{Login, SetCell}, MatrixBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a coordinator instance
//! let matrix = MatrixBuilder::new()
//!     .with_database_path(Some("matrix.db"))
//!     .build()
//!     .await?;
//!
//! // Log in; a new board starts with the standard starter rows
//! let board = matrix
//!     .login(&Login {
//!         name: "Dev".to_string(),
//!         email: "dev@example.com".to_string(),
//!     })
//!     .await?;
//! println!("Active board: {}", board.name);
//!
//! // Fill a cell on the first row
//! let rows = matrix.rows().await?;
//! matrix
//!     .set_cell(&SetCell {
//!         row_id: rows[0].id.clone(),
//!         day: "monday".to_string(),
//!         text: "Ship the release".to_string(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Archiving a week (`deploy_week`) freezes a snapshot with computed stats
//! and rolls incomplete work forward into the next week; see
//! [`rollover`] for the rules.

pub mod assistant;
pub mod db;
pub mod display;
pub mod error;
pub mod matrix;
pub mod models;
pub mod params;
pub mod rollover;
pub mod sync;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    BoardView, Boards, CreateResult, DeployResult, HistorySummaries, LocalDateTime,
    OperationStatus, UpdateResult, WorkItems,
};
pub use error::{MatrixError, Result};
pub use matrix::{Matrix, MatrixBuilder};
pub use models::{
    calculate_stats, Board, BoardSettings, DayState, GroupCounts, HistoryEntry, HistoryStats,
    HistorySummary, PlannerRow, PriorityGroup, WeekDays, Weekday,
};
pub use rollover::{archive_week, carry_forward, RolloverPolicy};
pub use sync::{WorkItem, WorkItemSource};

//! High-level board API.
//!
//! This module provides the main [`Matrix`] interface for interacting with
//! the planning board. It is the central coordinator between the interface
//! layers and the database, implementing the business logic for boards, grid
//! rows, cells, and week archival.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │  (formatted     │───▶│ (board_ops,     │───▶│    (via db/)    │
//! │   wrappers)     │    │  cell_ops,      │    │                 │
//! │                 │    │  week_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Interface layer       Business logic         Data persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Matrix`] instances with configuration
//! - [`board_ops`]: Session, board, row, and settings operations
//! - [`cell_ops`]: Day-cell edits, including external payload drops
//! - [`week_ops`]: Deploy (archive + rollover) and archive access
//! - [`handlers`]: Operations returning display wrappers for the interfaces
//!
//! Every operation clones the database path and runs its blocking SQLite
//! work on `tokio::task::spawn_blocking` with a fresh connection, so the
//! coordinator itself stays `Send` and cheap to share. The statistics and
//! rollover logic invoked underneath is pure and synchronous.

use std::path::PathBuf;

use crate::error::MatrixError;

pub mod board_ops;
pub mod builder;
pub mod cell_ops;
pub mod handlers;
pub mod week_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::MatrixBuilder;

/// Main interface for managing a planning board.
pub struct Matrix {
    pub(crate) db_path: PathBuf,
}

impl Matrix {
    /// Creates a new coordinator with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

/// Maps a blocking-task join failure into a typed error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> MatrixError {
    MatrixError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

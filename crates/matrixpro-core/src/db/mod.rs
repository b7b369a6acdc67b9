//! Database operations and SQLite management for boards and archives.
//!
//! This module provides the low-level persistence layer for the MatrixPro
//! board system. It handles SQLite connections, schema management, and the
//! query interfaces for boards, grid rows, and history entries.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod board_queries;
pub mod history_queries;
pub mod migrations;
pub mod row_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

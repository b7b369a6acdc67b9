//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, MatrixError, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if the rollover identity policy column exists in settings
        let has_identity_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('settings') WHERE name = 'preserve_row_identity'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_identity_column {
            self.connection
                .execute(
                    "ALTER TABLE settings ADD COLUMN preserve_row_identity INTEGER NOT NULL DEFAULT 1",
                    [],
                )
                .map_err(|e| {
                    MatrixError::database_error(
                        "Failed to add preserve_row_identity column to settings table",
                        e,
                    )
                })?;
        }

        Ok(())
    }
}

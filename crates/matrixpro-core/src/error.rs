//! Error types for the board engine.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all board operations.
#[derive(Error, Debug)]
pub enum MatrixError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Board not found for the given ID
    #[error("Board with ID {id} not found")]
    BoardNotFound { id: u64 },
    /// Row not found on the current board
    #[error("Row '{id}' not found on this board")]
    RowNotFound { id: String },
    /// Archived week not found for the given number
    #[error("Week {week_number} not found in the archive")]
    WeekNotFound { week_number: u32 },
    /// No active session
    #[error("No active session. Log in to a board first")]
    NotLoggedIn,
    /// A week with this range label is already archived
    #[error("Week '{week_range}' has already been archived")]
    DuplicateWeek { week_range: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// External work-item sync failures (network, auth, malformed response)
    #[error("Sync error: {message}")]
    Sync { message: String },
    /// Assistant request failures
    #[error("Assistant error: {message}")]
    Assistant { message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl MatrixError {
    /// Creates a database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MatrixError::database_error(message, e))
    }
}

/// Extension trait mapping HTTP failures into the adapter error variants.
pub trait HttpResultExt<T> {
    /// Map an HTTP error into a sync failure with a message.
    fn sync_context(self, message: &str) -> Result<T>;

    /// Map an HTTP error into an assistant failure with a message.
    fn assistant_context(self, message: &str) -> Result<T>;
}

impl<T> HttpResultExt<T> for std::result::Result<T, reqwest::Error> {
    fn sync_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MatrixError::Sync {
            message: format!("{message}: {e}"),
        })
    }

    fn assistant_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MatrixError::Assistant {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, MatrixError>;

//! Builder for creating and configuring Matrix instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::{join_error, Matrix};
use crate::{
    db::Database,
    error::{MatrixError, Result},
};

/// Builder for creating and configuring Matrix instances.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    database_path: Option<PathBuf>,
}

impl MatrixBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/matrixpro/matrixpro.db` or
    /// `~/.local/share/matrixpro/matrixpro.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured coordinator instance.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::FileSystem` if the database path is invalid
    /// Returns `MatrixError::Database` if database initialization fails
    pub async fn build(self) -> Result<Matrix> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MatrixError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), MatrixError>(())
        })
        .await
        .map_err(join_error)??;

        Ok(Matrix::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("matrixpro")
            .place_data_file("matrixpro.db")
            .map_err(|e| MatrixError::XdgDirectory(e.to_string()))
    }
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Session, board, row, and settings operations.

use tokio::task;

use super::{join_error, Matrix};
use crate::{
    db::Database,
    error::{MatrixError, Result},
    models::{Board, BoardSettings, PlannerRow},
    params::{AddRow, Login, RowId, UpdateRow, UpdateSettings},
};

impl Matrix {
    /// Logs in to the board for an email, creating it on first use, and
    /// makes it the active session. A new board starts with the standard
    /// starter rows and default settings.
    pub async fn login(&self, params: &Login) -> Result<Board> {
        params.validate()?;
        let db_path = self.db_path.clone();
        let name = params.name.clone();
        let email = params.email.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.open_board(&name, &email)?;
            db.set_active_board(board.id)?;
            Ok(board)
        })
        .await
        .map_err(join_error)?
    }

    /// Clears the active session.
    pub async fn logout(&self) -> Result<()> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.clear_session()
        })
        .await
        .map_err(join_error)?
    }

    /// Returns the active session's board.
    pub async fn current_board(&self) -> Result<Board> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.require_active_board()
        })
        .await
        .map_err(join_error)?
    }

    /// Lists all boards, the multi-user archive sidebar.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_boards()
        })
        .await
        .map_err(join_error)?
    }

    /// Loads the current week's rows for the active board.
    pub async fn rows(&self) -> Result<Vec<PlannerRow>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.load_rows(board.id)
        })
        .await
        .map_err(join_error)?
    }

    /// Appends a new row to the active board's grid.
    pub async fn add_row(&self, params: &AddRow) -> Result<PlannerRow> {
        let group = params.validate()?;
        let db_path = self.db_path.clone();
        let label = params.label.clone();
        let effort_label = params.effort_label.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;

            let mut row = PlannerRow::new(group);
            if let Some(label) = label {
                row.label = label;
            }
            if let Some(effort) = effort_label {
                row.effort_label = effort;
            }

            db.append_row(board.id, &row)?;
            Ok(row)
        })
        .await
        .map_err(join_error)?
    }

    /// Updates a row's label and/or effort share.
    pub async fn update_row(&self, params: &UpdateRow) -> Result<PlannerRow> {
        params.validate()?;
        let db_path = self.db_path.clone();
        let row_id = params.id.clone();
        let label = params.label.clone();
        let effort_label = params.effort_label.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.update_row_meta(board.id, &row_id, label.as_deref(), effort_label.as_deref())
        })
        .await
        .map_err(join_error)?
    }

    /// Removes a row (and its cells) from the active board.
    pub async fn remove_row(&self, params: &RowId) -> Result<()> {
        let db_path = self.db_path.clone();
        let row_id = params.id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.delete_row(board.id, &row_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Loads the active board's settings.
    pub async fn settings(&self) -> Result<BoardSettings> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.get_settings(board.id)
        })
        .await
        .map_err(join_error)?
    }

    /// Applies a partial settings update and returns the merged record.
    pub async fn update_settings(&self, params: &UpdateSettings) -> Result<BoardSettings> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            let mut settings = db.get_settings(board.id)?;

            merge_settings(&mut settings, params);

            db.save_settings(board.id, &settings)?;
            Ok(settings)
        })
        .await
        .map_err(join_error)?
    }

    /// Resolves a board by ID for read-only archive access.
    pub(crate) fn resolve_board(db: &Database, id: u64) -> Result<Board> {
        db.get_board(id)?.ok_or(MatrixError::BoardNotFound { id })
    }
}

fn merge_settings(settings: &mut BoardSettings, params: UpdateSettings) {
    if let Some(user_name) = params.user_name {
        settings.user_name = user_name;
    }
    if let Some(company_email) = params.company_email {
        settings.company_email = company_email;
    }
    if let Some(devops_pat) = params.devops_pat {
        settings.devops_pat = Some(devops_pat);
    }
    if let Some(organization) = params.organization {
        settings.organization = organization;
    }
    if let Some(project) = params.project {
        settings.project = project;
    }
    if let Some(cors_proxy) = params.cors_proxy {
        settings.cors_proxy = Some(cors_proxy);
    }
    if let Some(use_proxy) = params.use_proxy {
        settings.use_proxy = use_proxy;
    }
    if let Some(preserve) = params.preserve_row_identity {
        settings.preserve_row_identity = preserve;
    }
}

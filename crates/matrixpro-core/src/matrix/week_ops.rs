//! Deploy (archive + rollover) and archive access.

use tokio::task;

use super::{join_error, Matrix};
use crate::{
    db::Database,
    error::Result,
    models::{HistoryEntry, PlannerRow},
    params::{BoardId, Deploy, EditWeek, WeekRef},
    rollover::RolloverPolicy,
};

impl Matrix {
    /// Archives the active board's current week under the given range label
    /// and installs the carried-forward rows for the next week.
    ///
    /// The rollover identity policy comes from the board settings unless the
    /// parameters override it. Snapshot and row rewrite commit in a single
    /// transaction; on any failure the board is unchanged.
    pub async fn deploy_week(
        &self,
        params: &Deploy,
    ) -> Result<(HistoryEntry, Vec<PlannerRow>)> {
        let db_path = self.db_path.clone();
        let week_range = params.week_range.clone();
        let fresh_row_ids = params.fresh_row_ids;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            let settings = db.get_settings(board.id)?;

            let policy = RolloverPolicy {
                preserve_row_identity: match fresh_row_ids {
                    Some(fresh) => !fresh,
                    None => settings.preserve_row_identity,
                },
            };

            db.deploy_week(board.id, &week_range, policy)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists the active board's archive, most recent first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.list_history(board.id)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists another board's archive read-only.
    pub async fn board_history(&self, params: &BoardId) -> Result<Vec<HistoryEntry>> {
        let db_path = self.db_path.clone();
        let board_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let board = Self::resolve_board(&db, board_id)?;
            db.list_history(board.id)
        })
        .await
        .map_err(join_error)?
    }

    /// Retrieves one archived week, from the active board or (read-only)
    /// from another board.
    pub async fn show_week(&self, params: &WeekRef) -> Result<Option<HistoryEntry>> {
        let db_path = self.db_path.clone();
        let week_number = params.week_number;
        let board_override = params.board;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let board = match board_override {
                Some(id) => Self::resolve_board(&db, id)?,
                None => db.require_active_board()?,
            };
            db.get_week(board.id, week_number)
        })
        .await
        .map_err(join_error)?
    }

    /// Replaces an archived week's rows on the active board and recomputes
    /// its stats. Only the session's own archive is editable; other boards'
    /// entries stay read-only.
    pub async fn edit_week(&self, params: &EditWeek) -> Result<HistoryEntry> {
        let rows = params.validate()?;
        let db_path = self.db_path.clone();
        let week_number = params.week_number;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.update_week_rows(board.id, week_number, &rows)
        })
        .await
        .map_err(join_error)?
    }
}

//! Day-cell operations, including external payload drops.

use log::warn;
use tokio::task;

use super::{join_error, Matrix};
use crate::{
    db::Database,
    error::Result,
    models::DayState,
    params::{CellRef, DropPayload, SetCell},
    sync::WorkItem,
};

impl Matrix {
    /// Writes a cell's task text. An empty string clears the cell's text
    /// while leaving its completed flag alone.
    pub async fn set_cell(&self, params: &SetCell) -> Result<DayState> {
        let day = params.validate()?;
        let db_path = self.db_path.clone();
        let row_id = params.row_id.clone();
        let text = params.text.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.set_cell_text(board.id, &row_id, day, &text)
        })
        .await
        .map_err(join_error)?
    }

    /// Flips a cell's completed flag.
    pub async fn toggle_cell(&self, params: &CellRef) -> Result<DayState> {
        let day = params.validate()?;
        let db_path = self.db_path.clone();
        let row_id = params.row_id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            db.toggle_cell(board.id, &row_id, day)
        })
        .await
        .map_err(join_error)?
    }

    /// Resets a cell entirely: text cleared and completed flag dropped.
    pub async fn clear_cell(&self, params: &CellRef) -> Result<DayState> {
        let day = params.validate()?;
        let db_path = self.db_path.clone();
        let row_id = params.row_id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let board = db.require_active_board()?;
            let cell = db.set_cell_text(board.id, &row_id, day, "")?;
            if cell.completed {
                return db.toggle_cell(board.id, &row_id, day);
            }
            Ok(cell)
        })
        .await
        .map_err(join_error)?
    }

    /// Drops a work-item payload into a cell, assigning the formatted task
    /// text.
    ///
    /// A malformed payload is logged and ignored: the cell is left untouched
    /// and `Ok(None)` is returned. Row and weekday problems still surface as
    /// errors.
    pub async fn drop_work_item(&self, params: &DropPayload) -> Result<Option<DayState>> {
        let item = match WorkItem::from_payload(&params.payload) {
            Ok(item) => item,
            Err(e) => {
                warn!("Ignoring malformed work-item payload: {e}");
                return Ok(None);
            }
        };

        let set = SetCell {
            row_id: params.row_id.clone(),
            day: params.day.clone(),
            text: item.cell_text(),
        };
        self.set_cell(&set).await.map(Some)
    }
}

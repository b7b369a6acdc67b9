//! Handler operations that return formatted wrapper types.
//!
//! Interfaces (CLI, MCP) call these instead of the raw operations when they
//! want display-ready output.

use super::Matrix;
use crate::{
    display::{BoardView, Boards, DeployResult, HistorySummaries, UpdateResult},
    error::Result,
    models::{HistoryEntry, HistorySummary},
    params::{BoardId, Deploy, EditWeek},
};

impl Matrix {
    /// The active board rendered with its full grid.
    pub async fn board_view(&self) -> Result<BoardView> {
        let board = self.current_board().await?;
        let rows = self.rows().await?;
        Ok(BoardView { board, rows })
    }

    /// All boards as a displayable list.
    pub async fn boards_summary(&self) -> Result<Boards> {
        Ok(Boards(self.list_boards().await?))
    }

    /// Archive listing (most recent first) for the active board, or
    /// read-only for another board.
    pub async fn history_summaries(&self, board: Option<u64>) -> Result<HistorySummaries> {
        let entries = match board {
            Some(id) => self.board_history(&BoardId { id }).await?,
            None => self.history().await?,
        };
        let summaries: Vec<HistorySummary> = entries.iter().map(Into::into).collect();
        Ok(HistorySummaries(summaries))
    }

    /// Deploys the current week and wraps the outcome with carry-forward
    /// counts for display.
    pub async fn deploy_result(&self, params: &Deploy) -> Result<DeployResult> {
        let (entry, _next_rows) = self.deploy_week(params).await?;
        Ok(DeployResult::from_entry(entry))
    }

    /// Edits an archived week and wraps the refreshed entry for display.
    pub async fn edit_week_result(&self, params: &EditWeek) -> Result<UpdateResult<HistoryEntry>> {
        let entry = self.edit_week(params).await?;
        Ok(UpdateResult::new(entry))
    }
}

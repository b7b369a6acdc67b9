//! Archive queries and the transactional deploy.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, MatrixError, Result},
    models::{calculate_stats, GroupCounts, HistoryEntry, HistoryStats, PlannerRow},
    rollover::{self, RolloverPolicy},
};

const HISTORY_COLUMNS: &str = "id, week_number, week_range, archived_at, rows_json, \
     total_tasks, completed_tasks, completion_rate, dist_p1, dist_p2, dist_p3, dist_meeting";
const INSERT_ENTRY_SQL: &str = "INSERT INTO history_entries (id, board_id, week_number, \
     week_range, archived_at, rows_json, total_tasks, completed_tasks, completion_rate, \
     dist_p1, dist_p2, dist_p3, dist_meeting) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_ENTRY_ROWS_SQL: &str = "UPDATE history_entries SET rows_json = ?1, \
     total_tasks = ?2, completed_tasks = ?3, completion_rate = ?4, dist_p1 = ?5, dist_p2 = ?6, \
     dist_p3 = ?7, dist_meeting = ?8 WHERE board_id = ?9 AND week_number = ?10";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let archived_at: i64 = row.get(3)?;
    let timestamp = Timestamp::from_millisecond(archived_at).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
    })?;

    let rows_json: String = row.get(4)?;
    let rows: Vec<PlannerRow> = serde_json::from_str(&rows_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
    })?;

    Ok(HistoryEntry {
        id: row.get(0)?,
        week_number: row.get(1)?,
        week_range: row.get(2)?,
        timestamp,
        rows,
        stats: HistoryStats {
            total_tasks: row.get(5)?,
            completed_tasks: row.get(6)?,
            completion_rate: row.get(7)?,
            distribution: GroupCounts {
                p1: row.get(8)?,
                p2: row.get(9)?,
                p3: row.get(10)?,
                meeting: row.get(11)?,
            },
        },
    })
}

/// Loads a board's archive, most recent first.
pub(crate) fn read_history(conn: &Connection, board_id: u64) -> Result<Vec<HistoryEntry>> {
    let sql = format!(
        "SELECT {HISTORY_COLUMNS} FROM history_entries WHERE board_id = ?1 \
         ORDER BY archived_at DESC, week_number DESC"
    );
    let mut stmt = conn
        .prepare(&sql)
        .db_context("Failed to prepare history query")?;

    let result = stmt
        .query_map(params![board_id as i64], entry_from_row)
        .db_context("Failed to query history")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch history");
    result
}

fn insert_entry(conn: &Connection, board_id: u64, entry: &HistoryEntry) -> Result<()> {
    let rows_json = serde_json::to_string(&entry.rows)?;
    conn.execute(
        INSERT_ENTRY_SQL,
        params![
            entry.id,
            board_id as i64,
            entry.week_number,
            entry.week_range,
            entry.timestamp.as_millisecond(),
            rows_json,
            entry.stats.total_tasks,
            entry.stats.completed_tasks,
            entry.stats.completion_rate,
            entry.stats.distribution.p1,
            entry.stats.distribution.p2,
            entry.stats.distribution.p3,
            entry.stats.distribution.meeting,
        ],
    )
    .map_err(|e| MatrixError::database_error("Failed to insert history entry", e))?;
    Ok(())
}

impl super::Database {
    /// Archives the current week and installs the carried-forward rows, all
    /// in one transaction.
    ///
    /// The snapshot and the next-week rows are computed by the pure rollover
    /// engine; nothing is visible to readers until both halves commit, so a
    /// failed write leaves the board exactly as it was.
    pub fn deploy_week(
        &mut self,
        board_id: u64,
        week_range: &str,
        policy: RolloverPolicy,
    ) -> Result<(HistoryEntry, Vec<PlannerRow>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows = super::row_queries::read_rows(&tx, board_id)?;
        let history = read_history(&tx, board_id)?;

        let (entry, next_rows) = rollover::archive_week(&rows, &history, week_range, policy)?;

        insert_entry(&tx, board_id, &entry)?;
        super::row_queries::replace_rows(&tx, board_id, &next_rows)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok((entry, next_rows))
    }

    /// Lists a board's archive, most recent first.
    pub fn list_history(&self, board_id: u64) -> Result<Vec<HistoryEntry>> {
        read_history(&self.connection, board_id)
    }

    /// Retrieves one archived week by its archive position.
    pub fn get_week(&self, board_id: u64, week_number: u32) -> Result<Option<HistoryEntry>> {
        let sql = format!(
            "SELECT {HISTORY_COLUMNS} FROM history_entries WHERE board_id = ?1 AND week_number = ?2"
        );
        self.connection
            .query_row(&sql, params![board_id as i64, week_number], entry_from_row)
            .optional()
            .db_context("Failed to query history entry")
    }

    /// Replaces an archived week's rows and recomputes its stats.
    ///
    /// Identity fields (id, week number, range label, timestamp) are left
    /// untouched.
    pub fn update_week_rows(
        &mut self,
        board_id: u64,
        week_number: u32,
        rows: &[PlannerRow],
    ) -> Result<HistoryEntry> {
        let stats = calculate_stats(rows);
        let rows_json = serde_json::to_string(rows)?;

        let affected = self
            .connection
            .execute(
                UPDATE_ENTRY_ROWS_SQL,
                params![
                    rows_json,
                    stats.total_tasks,
                    stats.completed_tasks,
                    stats.completion_rate,
                    stats.distribution.p1,
                    stats.distribution.p2,
                    stats.distribution.p3,
                    stats.distribution.meeting,
                    board_id as i64,
                    week_number,
                ],
            )
            .map_err(|e| MatrixError::database_error("Failed to update history entry", e))?;

        if affected == 0 {
            return Err(MatrixError::WeekNotFound { week_number });
        }

        self.get_week(board_id, week_number)?
            .ok_or(MatrixError::WeekNotFound { week_number })
    }
}

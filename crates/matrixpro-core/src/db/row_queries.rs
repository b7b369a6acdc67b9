//! Grid row and day-cell queries.

use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, MatrixError, Result},
    models::{DayState, PlannerRow, PriorityGroup, WeekDays, Weekday},
};

const INSERT_ROW_SQL: &str = "INSERT INTO rows (id, board_id, priority_group, effort_label, \
     label, position) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_CELL_SQL: &str =
    "INSERT INTO day_cells (row_id, weekday, text, completed) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ROWS_SQL: &str = "SELECT id, priority_group, effort_label, label FROM rows \
     WHERE board_id = ?1 ORDER BY position, id";
const SELECT_ROW_SQL: &str = "SELECT id, priority_group, effort_label, label FROM rows \
     WHERE board_id = ?1 AND id = ?2";
const SELECT_CELLS_SQL: &str =
    "SELECT weekday, text, completed FROM day_cells WHERE row_id = ?1";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position) + 1, 0) FROM rows WHERE board_id = ?1";
const DELETE_ROW_SQL: &str = "DELETE FROM rows WHERE board_id = ?1 AND id = ?2";
const DELETE_BOARD_ROWS_SQL: &str = "DELETE FROM rows WHERE board_id = ?1";
const DELETE_BOARD_CELLS_SQL: &str =
    "DELETE FROM day_cells WHERE row_id IN (SELECT id FROM rows WHERE board_id = ?1)";
const UPDATE_CELL_TEXT_SQL: &str = "UPDATE day_cells SET text = ?1 WHERE row_id = ?2 AND \
     weekday = ?3 AND row_id IN (SELECT id FROM rows WHERE board_id = ?4)";
const TOGGLE_CELL_SQL: &str = "UPDATE day_cells SET completed = NOT completed WHERE row_id = ?1 \
     AND weekday = ?2 AND row_id IN (SELECT id FROM rows WHERE board_id = ?3)";
const SELECT_CELL_SQL: &str =
    "SELECT text, completed FROM day_cells WHERE row_id = ?1 AND weekday = ?2";

/// Inserts a row and its five cells. Shared by board creation, row append,
/// and the rollover rewrite, all of which run inside a caller-owned
/// transaction.
pub(crate) fn insert_row_tx(
    conn: &Connection,
    board_id: u64,
    row: &PlannerRow,
    position: u32,
) -> Result<()> {
    conn.execute(
        INSERT_ROW_SQL,
        params![
            row.id,
            board_id as i64,
            row.priority_group.as_str(),
            row.effort_label,
            row.label,
            position,
        ],
    )
    .map_err(|e| MatrixError::database_error("Failed to insert row", e))?;

    for (day, cell) in row.days.iter() {
        conn.execute(
            INSERT_CELL_SQL,
            params![row.id, day.as_str(), cell.text, cell.completed],
        )
        .map_err(|e| MatrixError::database_error("Failed to insert day cell", e))?;
    }

    Ok(())
}

/// Loads the full row set of a board in grid order.
pub(crate) fn read_rows(conn: &Connection, board_id: u64) -> Result<Vec<PlannerRow>> {
    let mut stmt = conn
        .prepare(SELECT_ROWS_SQL)
        .db_context("Failed to prepare row query")?;

    let shells = stmt
        .query_map(params![board_id as i64], row_shell_from_row)
        .db_context("Failed to query rows")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch rows")?;

    shells
        .into_iter()
        .map(|shell| attach_cells(conn, shell))
        .collect()
}

/// Replaces a board's entire row set, preserving the given ordering.
pub(crate) fn replace_rows(conn: &Connection, board_id: u64, rows: &[PlannerRow]) -> Result<()> {
    conn.execute(DELETE_BOARD_CELLS_SQL, params![board_id as i64])
        .map_err(|e| MatrixError::database_error("Failed to clear day cells", e))?;
    conn.execute(DELETE_BOARD_ROWS_SQL, params![board_id as i64])
        .map_err(|e| MatrixError::database_error("Failed to clear rows", e))?;

    for (position, row) in rows.iter().enumerate() {
        insert_row_tx(conn, board_id, row, position as u32)?;
    }

    Ok(())
}

fn row_shell_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlannerRow> {
    let group_str: String = row.get(1)?;
    let priority_group = group_str.parse::<PriorityGroup>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid priority group: {group_str}"),
            )),
        )
    })?;

    Ok(PlannerRow {
        id: row.get(0)?,
        priority_group,
        effort_label: row.get(2)?,
        label: row.get(3)?,
        days: WeekDays::default(),
    })
}

fn attach_cells(conn: &Connection, mut shell: PlannerRow) -> Result<PlannerRow> {
    let mut stmt = conn
        .prepare(SELECT_CELLS_SQL)
        .db_context("Failed to prepare cell query")?;

    let cells = stmt
        .query_map(params![shell.id], |row| {
            let weekday: String = row.get(0)?;
            let text: String = row.get(1)?;
            let completed: bool = row.get(2)?;
            Ok((weekday, DayState { text, completed }))
        })
        .db_context("Failed to query day cells")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch day cells")?;

    for (weekday, cell) in cells {
        let day = weekday.parse::<Weekday>().map_err(|reason| {
            MatrixError::invalid_input("weekday", reason)
        })?;
        *shell.days.get_mut(day) = cell;
    }

    Ok(shell)
}

impl super::Database {
    /// Loads the current row set of a board.
    pub fn load_rows(&self, board_id: u64) -> Result<Vec<PlannerRow>> {
        read_rows(&self.connection, board_id)
    }

    /// Retrieves a single row with its cells.
    pub fn get_row(&self, board_id: u64, row_id: &str) -> Result<Option<PlannerRow>> {
        let shell = self
            .connection
            .query_row(
                SELECT_ROW_SQL,
                params![board_id as i64, row_id],
                row_shell_from_row,
            )
            .optional()
            .db_context("Failed to query row")?;

        match shell {
            Some(shell) => Ok(Some(attach_cells(&self.connection, shell)?)),
            None => Ok(None),
        }
    }

    /// Appends a row to the end of a board's grid.
    pub fn append_row(&mut self, board_id: u64, row: &PlannerRow) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let position: u32 = tx
            .query_row(NEXT_POSITION_SQL, params![board_id as i64], |r| r.get(0))
            .map_err(|e| MatrixError::database_error("Failed to compute row position", e))?;

        insert_row_tx(&tx, board_id, row, position)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Removes a row (and its cells) from a board.
    pub fn delete_row(&mut self, board_id: u64, row_id: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute("DELETE FROM day_cells WHERE row_id = ?1", params![row_id])
            .map_err(|e| MatrixError::database_error("Failed to delete day cells", e))?;
        let affected = tx
            .execute(DELETE_ROW_SQL, params![board_id as i64, row_id])
            .map_err(|e| MatrixError::database_error("Failed to delete row", e))?;

        if affected == 0 {
            return Err(MatrixError::RowNotFound {
                id: row_id.to_string(),
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Updates a row's label and/or effort share, returning the updated row.
    pub fn update_row_meta(
        &mut self,
        board_id: u64,
        row_id: &str,
        label: Option<&str>,
        effort_label: Option<&str>,
    ) -> Result<PlannerRow> {
        let mut assignments = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(label) = label {
            assignments.push("label = ?");
            values.push(Box::new(label.to_string()));
        }
        if let Some(effort) = effort_label {
            assignments.push("effort_label = ?");
            values.push(Box::new(effort.to_string()));
        }

        if assignments.is_empty() {
            return Err(MatrixError::invalid_input(
                "label",
                "Provide a label and/or an effort share to update",
            ));
        }

        let sql = format!(
            "UPDATE rows SET {} WHERE board_id = ? AND id = ?",
            assignments.join(", ")
        );
        values.push(Box::new(board_id as i64));
        values.push(Box::new(row_id.to_string()));

        let value_refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|b| &**b).collect();
        let affected = self
            .connection
            .execute(&sql, &value_refs[..])
            .map_err(|e| MatrixError::database_error("Failed to update row", e))?;

        if affected == 0 {
            return Err(MatrixError::RowNotFound {
                id: row_id.to_string(),
            });
        }

        self.get_row(board_id, row_id)?
            .ok_or_else(|| MatrixError::RowNotFound {
                id: row_id.to_string(),
            })
    }

    /// Writes a cell's task text, returning the new cell state.
    pub fn set_cell_text(
        &mut self,
        board_id: u64,
        row_id: &str,
        day: Weekday,
        text: &str,
    ) -> Result<DayState> {
        let affected = self
            .connection
            .execute(
                UPDATE_CELL_TEXT_SQL,
                params![text, row_id, day.as_str(), board_id as i64],
            )
            .map_err(|e| MatrixError::database_error("Failed to update cell text", e))?;

        if affected == 0 {
            return Err(MatrixError::RowNotFound {
                id: row_id.to_string(),
            });
        }

        self.get_cell(row_id, day)
    }

    /// Flips a cell's completed flag, returning the new cell state.
    pub fn toggle_cell(&mut self, board_id: u64, row_id: &str, day: Weekday) -> Result<DayState> {
        let affected = self
            .connection
            .execute(
                TOGGLE_CELL_SQL,
                params![row_id, day.as_str(), board_id as i64],
            )
            .map_err(|e| MatrixError::database_error("Failed to toggle cell", e))?;

        if affected == 0 {
            return Err(MatrixError::RowNotFound {
                id: row_id.to_string(),
            });
        }

        self.get_cell(row_id, day)
    }

    fn get_cell(&self, row_id: &str, day: Weekday) -> Result<DayState> {
        self.connection
            .query_row(SELECT_CELL_SQL, params![row_id, day.as_str()], |row| {
                Ok(DayState {
                    text: row.get(0)?,
                    completed: row.get(1)?,
                })
            })
            .db_context("Failed to read back cell")
    }
}

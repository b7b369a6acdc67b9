//! Board, session, and settings queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, MatrixError, Result},
    models::{starter_rows, Board, BoardSettings},
};

const INSERT_BOARD_SQL: &str =
    "INSERT INTO boards (name, email, created_at) VALUES (?1, ?2, ?3)";
const SELECT_BOARD_BY_EMAIL_SQL: &str =
    "SELECT id, name, email, created_at FROM boards WHERE email = ?1";
const SELECT_BOARD_SQL: &str = "SELECT id, name, email, created_at FROM boards WHERE id = ?1";
const LIST_BOARDS_SQL: &str =
    "SELECT id, name, email, created_at FROM boards ORDER BY created_at ASC";
const INSERT_DEFAULT_SETTINGS_SQL: &str =
    "INSERT INTO settings (board_id, user_name, company_email) VALUES (?1, ?2, ?3)";
const SET_SESSION_SQL: &str = "INSERT OR REPLACE INTO session (slot, board_id) VALUES (0, ?1)";
const CLEAR_SESSION_SQL: &str = "DELETE FROM session WHERE slot = 0";
const SELECT_SESSION_SQL: &str = "SELECT board_id FROM session WHERE slot = 0";
const SELECT_SETTINGS_SQL: &str = "SELECT user_name, company_email, devops_pat, organization, \
     project, cors_proxy, use_proxy, preserve_row_identity FROM settings WHERE board_id = ?1";
const SAVE_SETTINGS_SQL: &str = "INSERT OR REPLACE INTO settings (board_id, user_name, \
     company_email, devops_pat, organization, project, cors_proxy, use_proxy, \
     preserve_row_identity) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

pub(crate) fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
        })?,
    })
}

impl super::Database {
    /// Finds the board for an email, creating it on first login.
    ///
    /// A freshly created board receives the standard starter rows and default
    /// settings seeded with the login identity. An existing board keeps its
    /// stored name.
    pub fn open_board(&mut self, name: &str, email: &str) -> Result<Board> {
        let email = email.trim().to_lowercase();

        if let Some(board) = self
            .connection
            .query_row(SELECT_BOARD_BY_EMAIL_SQL, params![&email], board_from_row)
            .optional()
            .db_context("Failed to query board by email")?
        {
            return Ok(board);
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        tx.execute(INSERT_BOARD_SQL, params![name, &email, now.to_string()])
            .map_err(|e| MatrixError::database_error("Failed to insert board", e))?;
        let board_id = tx.last_insert_rowid() as u64;

        tx.execute(
            INSERT_DEFAULT_SETTINGS_SQL,
            params![board_id as i64, name, &email],
        )
        .map_err(|e| MatrixError::database_error("Failed to insert default settings", e))?;

        for (position, row) in starter_rows().iter().enumerate() {
            super::row_queries::insert_row_tx(&tx, board_id, row, position as u32)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Board {
            id: board_id,
            name: name.to_string(),
            email,
            created_at: now,
        })
    }

    /// Retrieves a board by its ID.
    pub fn get_board(&self, id: u64) -> Result<Option<Board>> {
        self.connection
            .query_row(SELECT_BOARD_SQL, params![id as i64], board_from_row)
            .optional()
            .db_context("Failed to query board")
    }

    /// Lists all boards, oldest first.
    pub fn list_boards(&self) -> Result<Vec<Board>> {
        let mut stmt = self
            .connection
            .prepare(LIST_BOARDS_SQL)
            .db_context("Failed to prepare board listing")?;
        let boards = stmt
            .query_map([], board_from_row)
            .db_context("Failed to query boards")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch boards")?;
        Ok(boards)
    }

    /// Marks a board as the active session.
    pub fn set_active_board(&mut self, board_id: u64) -> Result<()> {
        self.connection
            .execute(SET_SESSION_SQL, params![board_id as i64])
            .db_context("Failed to store session")?;
        Ok(())
    }

    /// Clears the active session.
    pub fn clear_session(&mut self) -> Result<()> {
        self.connection
            .execute(CLEAR_SESSION_SQL, [])
            .db_context("Failed to clear session")?;
        Ok(())
    }

    /// Returns the board of the active session, if any.
    pub fn active_board(&self) -> Result<Option<Board>> {
        let board_id: Option<i64> = self
            .connection
            .query_row(SELECT_SESSION_SQL, [], |row| row.get(0))
            .optional()
            .db_context("Failed to query session")?;

        match board_id {
            Some(id) => self.get_board(id as u64),
            None => Ok(None),
        }
    }

    /// Returns the board of the active session or fails if nobody is logged
    /// in.
    pub fn require_active_board(&self) -> Result<Board> {
        self.active_board()?.ok_or(MatrixError::NotLoggedIn)
    }

    /// Loads the settings stored for a board.
    pub fn get_settings(&self, board_id: u64) -> Result<BoardSettings> {
        let settings = self
            .connection
            .query_row(SELECT_SETTINGS_SQL, params![board_id as i64], |row| {
                Ok(BoardSettings {
                    user_name: row.get(0)?,
                    company_email: row.get(1)?,
                    devops_pat: row.get(2)?,
                    organization: row.get(3)?,
                    project: row.get(4)?,
                    cors_proxy: row.get(5)?,
                    use_proxy: row.get(6)?,
                    preserve_row_identity: row.get(7)?,
                })
            })
            .optional()
            .db_context("Failed to query settings")?;

        // Boards created before the settings table gained rows fall back to
        // defaults rather than failing.
        Ok(settings.unwrap_or_default())
    }

    /// Persists the full settings record for a board.
    pub fn save_settings(&mut self, board_id: u64, settings: &BoardSettings) -> Result<()> {
        self.connection
            .execute(
                SAVE_SETTINGS_SQL,
                params![
                    board_id as i64,
                    settings.user_name,
                    settings.company_email,
                    settings.devops_pat,
                    settings.organization,
                    settings.project,
                    settings.cors_proxy,
                    settings.use_proxy,
                    settings.preserve_row_identity,
                ],
            )
            .db_context("Failed to save settings")?;
        Ok(())
    }
}

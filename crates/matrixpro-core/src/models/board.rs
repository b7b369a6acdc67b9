//! Board identity record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A user's planning board: the document every row set, archive, and
/// settings record hangs off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    /// Unique identifier for the board
    pub id: u64,

    /// Display name of the board owner
    pub name: String,

    /// Owner email; unique across boards and used as the sync identity
    pub email: String,

    /// Timestamp when the board was created (UTC)
    pub created_at: Timestamp,
}

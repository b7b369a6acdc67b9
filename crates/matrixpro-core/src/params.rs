//! Parameter structures for board operations.
//!
//! Shared parameter types usable across interfaces (CLI, MCP) without
//! framework-specific derives. Interface layers wrap these with their own
//! derives (clap args, MCP schema wrappers) and convert via `From`/accessor
//! methods, keeping the core free of UI dependencies:
//!
//! ```text
//! CLI Args (clap) ──▶ Core Params ◀── MCP Params (serde/schemars)
//! ```
//!
//! Types that accept loosely-typed user input (group names, weekdays, row
//! JSON) expose a `validate()` method returning the strongly-typed form, so
//! every interface funnels through the same checks.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MatrixError, Result},
    models::{PlannerRow, PriorityGroup, Weekday},
};

/// Parameters for logging in to (or creating) a board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Login {
    /// Display name of the board owner
    pub name: String,
    /// Owner email; identifies the board
    pub email: String,
}

impl Login {
    /// Validate that both identity fields are usable.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MatrixError::invalid_input("name", "Name must not be empty"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(MatrixError::invalid_input(
                "email",
                "A valid email address is required",
            ));
        }
        Ok(())
    }
}

/// Generic parameters for operations requiring just a board ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BoardId {
    /// The ID of the board to operate on
    pub id: u64,
}

/// Parameters for adding a row to the current board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddRow {
    /// Priority group for the new row ('P1', 'P2', 'P3', or 'Meeting')
    pub group: String,
    /// Optional label; defaults to the standard new-row label
    pub label: Option<String>,
    /// Optional effort share label; defaults per group
    pub effort_label: Option<String>,
}

impl AddRow {
    /// Parse the group string into its typed form.
    pub fn validate(&self) -> Result<PriorityGroup> {
        PriorityGroup::from_str(&self.group).map_err(|_| {
            MatrixError::invalid_input(
                "group",
                format!(
                    "Invalid priority group: {}. Must be 'P1', 'P2', 'P3', or 'Meeting'",
                    self.group
                ),
            )
        })
    }
}

/// Generic parameters for operations requiring just a row ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RowId {
    /// The ID of the row to operate on
    pub id: String,
}

/// Parameters for updating a row's label and/or effort share.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateRow {
    /// Row ID to update (required)
    pub id: String,
    /// Updated display label
    pub label: Option<String>,
    /// Updated effort share label
    pub effort_label: Option<String>,
}

impl UpdateRow {
    /// Require at least one field to change.
    pub fn validate(&self) -> Result<()> {
        if self.label.is_none() && self.effort_label.is_none() {
            return Err(MatrixError::invalid_input(
                "label",
                "Provide a label and/or an effort share to update",
            ));
        }
        Ok(())
    }
}

/// Parameters addressing a single day cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CellRef {
    /// Row the cell belongs to
    pub row_id: String,
    /// Weekday of the cell ('monday'..'friday')
    pub day: String,
}

impl CellRef {
    /// Parse the weekday string into its typed form.
    pub fn validate(&self) -> Result<Weekday> {
        parse_weekday(&self.day)
    }
}

/// Parameters for writing a cell's task text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetCell {
    /// Row the cell belongs to
    pub row_id: String,
    /// Weekday of the cell ('monday'..'friday')
    pub day: String,
    /// New task text (empty clears the cell)
    pub text: String,
}

impl SetCell {
    /// Parse the weekday string into its typed form.
    pub fn validate(&self) -> Result<Weekday> {
        parse_weekday(&self.day)
    }
}

/// Parameters for dropping an external work-item payload into a cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DropPayload {
    /// Row the cell belongs to
    pub row_id: String,
    /// Weekday of the cell ('monday'..'friday')
    pub day: String,
    /// JSON-encoded work-item payload
    pub payload: String,
}

/// Parameters for archiving the current week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Deploy {
    /// Display label uniquely identifying the week being archived
    pub week_range: String,
    /// Override the configured rollover identity policy: true assigns fresh
    /// row ids during the transition
    pub fresh_row_ids: Option<bool>,
}

/// Parameters for listing an archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListHistory {
    /// Board to read from; defaults to the active session's board
    pub board: Option<u64>,
}

/// Parameters addressing one archived week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeekRef {
    /// Archive position (1-based; 1 is the oldest archive)
    pub week_number: u32,
    /// Board to read from; defaults to the active session's board
    pub board: Option<u64>,
}

/// Parameters for editing an archived week's rows in place.
///
/// Stats are recomputed from the edited rows; the entry's identity fields
/// (id, week number, range, timestamp) are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditWeek {
    /// Archive position of the entry to edit
    pub week_number: u32,
    /// JSON-encoded replacement row list
    pub rows_json: String,
}

impl EditWeek {
    /// Parse the replacement rows.
    pub fn validate(&self) -> Result<Vec<PlannerRow>> {
        serde_json::from_str(&self.rows_json).map_err(|e| {
            MatrixError::invalid_input("rows_json", format!("Malformed row JSON: {e}"))
        })
    }
}

/// Parameters for partially updating board settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateSettings {
    pub user_name: Option<String>,
    pub company_email: Option<String>,
    pub devops_pat: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub cors_proxy: Option<String>,
    pub use_proxy: Option<bool>,
    pub preserve_row_identity: Option<bool>,
}

fn parse_weekday(day: &str) -> Result<Weekday> {
    Weekday::from_str(day).map_err(|_| {
        MatrixError::invalid_input(
            "day",
            format!("Invalid weekday: {day}. Must be one of monday..friday"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validate_rejects_blank_name() {
        let params = Login {
            name: "  ".to_string(),
            email: "dev@example.com".to_string(),
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            MatrixError::InvalidInput { field, .. } if field == "name"
        ));
    }

    #[test]
    fn test_login_validate_requires_plausible_email() {
        let params = Login {
            name: "Dev".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(params.validate().is_err());

        let params = Login {
            name: "Dev".to_string(),
            email: "dev@example.com".to_string(),
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_add_row_validate_parses_group() {
        let mut params = AddRow::default();
        params.group = "meeting".to_string();
        assert_eq!(params.validate().unwrap(), PriorityGroup::Meeting);

        params.group = "p9".to_string();
        let err = params.validate().unwrap_err();
        assert!(matches!(err, MatrixError::InvalidInput { field, .. } if field == "group"));
    }

    #[test]
    fn test_update_row_requires_some_change() {
        let params = UpdateRow {
            id: "r1".to_string(),
            label: None,
            effort_label: None,
        };
        assert!(params.validate().is_err());

        let params = UpdateRow {
            id: "r1".to_string(),
            label: Some("Renamed".to_string()),
            effort_label: None,
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_cell_ref_validate_parses_weekday() {
        let params = CellRef {
            row_id: "r1".to_string(),
            day: "wed".to_string(),
        };
        assert_eq!(params.validate().unwrap(), Weekday::Wednesday);

        let params = CellRef {
            row_id: "r1".to_string(),
            day: "sunday".to_string(),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_edit_week_validate_rejects_malformed_json() {
        let params = EditWeek {
            week_number: 1,
            rows_json: "not json".to_string(),
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            MatrixError::InvalidInput { field, .. } if field == "rows_json"
        ));
    }

    #[test]
    fn test_edit_week_validate_accepts_row_list() {
        let rows = vec![PlannerRow::new(PriorityGroup::P1)];
        let params = EditWeek {
            week_number: 1,
            rows_json: serde_json::to_string(&rows).unwrap(),
        };
        assert_eq!(params.validate().unwrap(), rows);
    }
}

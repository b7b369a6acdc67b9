//! Command handlers and clap argument definitions.
//!
//! Implements the parameter wrapper pattern: each command gets a clap `Args`
//! struct with CLI-specific attributes (flags, help text, value enums) and an
//! explicit conversion into the framework-free core parameter type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! The [`Cli`] struct owns the coordinator and the terminal renderer and
//! turns operation results into rendered markdown.

use std::io::Read;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::warn;
use matrixpro_core::{
    assistant::{plan_context, Assistant, GeminiClient},
    display::{CreateResult, OperationStatus, UpdateResult, WorkItems},
    params::{
        AddRow, CellRef, Deploy, DropPayload, EditWeek, Login, RowId, SetCell, UpdateRow,
        UpdateSettings, WeekRef,
    },
    sync::{DevOpsClient, WorkItemSource},
    Matrix,
};

use crate::renderer::TerminalRenderer;

/// Command dispatcher owning the coordinator and renderer.
pub struct Cli {
    matrix: Matrix,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(matrix: Matrix, renderer: TerminalRenderer) -> Self {
        Self { matrix, renderer }
    }

    /// Default action: render the active board's grid.
    pub async fn show_board(&self) -> Result<()> {
        let view = self.matrix.board_view().await?;
        self.renderer.render(&view.to_string())
    }

    pub async fn handle_board_command(&self, command: BoardCommands) -> Result<()> {
        match command {
            BoardCommands::Login(args) => {
                let board = self.matrix.login(&args.into()).await?;
                let status = OperationStatus::success(format!(
                    "Logged in to board '{}' ({})",
                    board.name, board.email
                ));
                self.renderer.render(&status.to_string())
            }
            BoardCommands::Show => self.show_board().await,
            BoardCommands::List => {
                let boards = self.matrix.boards_summary().await?;
                self.renderer.render(&format!("# Boards\n\n{boards}"))
            }
            BoardCommands::Logout => {
                self.matrix.logout().await?;
                let status = OperationStatus::success("Signed out".to_string());
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn handle_row_command(&self, command: RowCommands) -> Result<()> {
        match command {
            RowCommands::Add(args) => {
                let row = self.matrix.add_row(&args.into()).await?;
                let result = CreateResult::new(row);
                self.renderer.render(&result.to_string())
            }
            RowCommands::Update(args) => {
                let mut changes = Vec::new();
                if args.label.is_some() {
                    changes.push("Updated label".to_string());
                }
                if args.effort.is_some() {
                    changes.push("Updated effort share".to_string());
                }

                let row = self.matrix.update_row(&args.into()).await?;
                let result = UpdateResult::with_changes(row, changes);
                self.renderer.render(&result.to_string())
            }
            RowCommands::Remove(args) => {
                self.matrix.remove_row(&RowId { id: args.id.clone() }).await?;
                let status =
                    OperationStatus::success(format!("Removed row '{}'", args.id));
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn handle_cell_command(&self, command: CellCommands) -> Result<()> {
        match command {
            CellCommands::Set(args) => {
                let mut text = args.text.clone();
                if args.polish {
                    text = polish_text(text).await;
                }

                let day = args.day;
                let cell = self
                    .matrix
                    .set_cell(&SetCell {
                        row_id: args.row_id,
                        day: day.to_string(),
                        text,
                    })
                    .await?;
                let status = OperationStatus::success(format!(
                    "Set {day} cell to '{}'",
                    cell.text
                ));
                self.renderer.render(&status.to_string())
            }
            CellCommands::Toggle(args) => {
                let day = args.day;
                let cell = self.matrix.toggle_cell(&args.into()).await?;
                let state = if cell.completed { "complete" } else { "incomplete" };
                let status =
                    OperationStatus::success(format!("Marked {day} cell {state}"));
                self.renderer.render(&status.to_string())
            }
            CellCommands::Clear(args) => {
                let day = args.day;
                self.matrix.clear_cell(&args.into()).await?;
                let status = OperationStatus::success(format!("Cleared {day} cell"));
                self.renderer.render(&status.to_string())
            }
            CellCommands::Drop(args) => {
                let day = args.day;
                let dropped = self
                    .matrix
                    .drop_work_item(&DropPayload {
                        row_id: args.row_id,
                        day: day.to_string(),
                        payload: args.payload,
                    })
                    .await?;
                let status = match dropped {
                    Some(cell) => OperationStatus::success(format!(
                        "Dropped work item into {day}: '{}'",
                        cell.text.lines().next().unwrap_or_default()
                    )),
                    None => OperationStatus::failure(
                        "Ignored malformed work-item payload".to_string(),
                    ),
                };
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn deploy(&self, args: DeployArgs) -> Result<()> {
        let week_range = resolve_week_range(args.start.as_deref(), args.end.as_deref())?;
        let result = self
            .matrix
            .deploy_result(&Deploy {
                week_range,
                fresh_row_ids: args.fresh_row_ids.then_some(true),
            })
            .await?;
        self.renderer.render(&result.to_string())
    }

    pub async fn handle_history_command(&self, command: HistoryCommands) -> Result<()> {
        match command {
            HistoryCommands::List(args) => {
                let summaries = self.matrix.history_summaries(args.board).await?;
                self.renderer
                    .render(&format!("# Archived Weeks\n\n{summaries}"))
            }
            HistoryCommands::Show(args) => {
                let entry = self
                    .matrix
                    .show_week(&WeekRef {
                        week_number: args.week_number,
                        board: args.board,
                    })
                    .await?
                    .ok_or_else(|| anyhow!("Week {} not found", args.week_number))?;
                self.renderer.render(&entry.to_string())
            }
            HistoryCommands::Edit(args) => {
                let rows_json = read_rows_json(&args.rows_json)?;
                let result = self
                    .matrix
                    .edit_week_result(&EditWeek {
                        week_number: args.week_number,
                        rows_json,
                    })
                    .await?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn sync(&self, args: SyncArgs) -> Result<()> {
        let board = self.matrix.current_board().await?;
        let settings = self.matrix.settings().await?;
        let client = DevOpsClient::from_settings(&settings)?;

        let items = client.fetch_assigned(&board.email).await?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        self.renderer.render(&format!(
            "# Assigned Work Items\n\n{}",
            WorkItems(items)
        ))
    }

    pub async fn ask(&self, args: AskArgs) -> Result<()> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set to use the assistant")?;

        let rows = self.matrix.rows().await?;
        let context = plan_context(&rows)?;

        let answer = GeminiClient::new(api_key).ask(&args.question, &context).await?;
        self.renderer.render(&answer)
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => {
                let settings = self.matrix.settings().await?;
                let pat_state = if settings.devops_pat.is_some() {
                    "configured"
                } else {
                    "not set"
                };
                let proxy = settings.cors_proxy.as_deref().unwrap_or("none");

                let markdown = format!(
                    "# Settings\n\n\
                     - Name: {}\n\
                     - Email: {}\n\
                     - DevOps PAT: {pat_state}\n\
                     - Organization: {}\n\
                     - Project: {}\n\
                     - Proxy: {proxy} (enabled: {})\n\
                     - Preserve row identity across rollover: {}\n",
                    settings.user_name,
                    settings.company_email,
                    settings.organization,
                    settings.project,
                    settings.use_proxy,
                    settings.preserve_row_identity,
                );
                self.renderer.render(&markdown)
            }
            SettingsCommands::Set(args) => {
                let params: UpdateSettings = args.into();
                if params == UpdateSettings::default() {
                    bail!("Provide at least one setting to change");
                }

                self.matrix.update_settings(&params).await?;
                let status = OperationStatus::success("Settings saved".to_string());
                self.renderer.render(&status.to_string())
            }
        }
    }
}

/// Runs text through the assistant's spelling pass when an API key is
/// available; otherwise stores it as-is.
async fn polish_text(text: String) -> String {
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => GeminiClient::new(key).fix_spelling(&text).await,
        _ => {
            warn!("GEMINI_API_KEY is not set; storing text unpolished");
            text
        }
    }
}

/// Builds the archive label for a deploy: an explicit START/END pair, or the
/// current week's Monday..Friday.
fn resolve_week_range(start: Option<&str>, end: Option<&str>) -> Result<String> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => {
            let start: jiff::civil::Date = start
                .parse()
                .with_context(|| format!("Invalid start date '{start}'"))?;
            let end: jiff::civil::Date = end
                .parse()
                .with_context(|| format!("Invalid end date '{end}'"))?;
            (start, end)
        }
        (None, None) => current_week()?,
        _ => bail!("--start and --end must be provided together"),
    };

    if start > end {
        bail!("Start date {start} is after end date {end}");
    }

    Ok(format!("{start} TO {end}"))
}

/// The current week's Monday and Friday.
fn current_week() -> Result<(jiff::civil::Date, jiff::civil::Date)> {
    let today = jiff::Zoned::now().date();
    let offset = i64::from(today.weekday().to_monday_zero_offset());
    let monday = today.checked_sub(jiff::Span::new().days(offset))?;
    let friday = monday.checked_add(jiff::Span::new().days(4))?;
    Ok((monday, friday))
}

/// Reads the replacement row JSON from a file path, or stdin when "-".
fn read_rows_json(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read rows JSON from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read rows JSON from '{source}'"))
    }
}

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Log in to a board, creating it on first use
///
/// A new board starts with the standard four starter rows (P1 strategic
/// initiatives through Meeting syncs) and default settings seeded with this
/// identity. The board becomes the active session for all other commands.
#[derive(Args)]
pub struct LoginArgs {
    /// Display name of the board owner
    pub name: String,
    /// Owner email; identifies the board
    pub email: String,
}

impl From<LoginArgs> for Login {
    fn from(val: LoginArgs) -> Self {
        Login {
            name: val.name,
            email: val.email,
        }
    }
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Log in to a board, creating it on first use
    #[command(alias = "l")]
    Login(LoginArgs),
    /// Show the active board's grid
    #[command(alias = "s")]
    Show,
    /// List all boards
    #[command(alias = "ls")]
    List,
    /// Sign out of the active session
    Logout,
}

/// Add a new row to the active board
#[derive(Args)]
pub struct AddRowArgs {
    /// Priority group for the new row
    pub group: PriorityGroupArg,
    /// Label for the row; defaults to the standard new-row label
    #[arg(short, long)]
    pub label: Option<String>,
    /// Effort share label, e.g. '25%'; defaults per group
    #[arg(short, long)]
    pub effort: Option<String>,
}

impl From<AddRowArgs> for AddRow {
    fn from(val: AddRowArgs) -> Self {
        AddRow {
            group: val.group.to_string(),
            label: val.label,
            effort_label: val.effort,
        }
    }
}

/// Update a row's label and/or effort share
#[derive(Args)]
pub struct UpdateRowArgs {
    /// ID of the row to update
    pub id: String,
    /// Updated label
    #[arg(short, long)]
    pub label: Option<String>,
    /// Updated effort share label
    #[arg(short, long)]
    pub effort: Option<String>,
}

impl From<UpdateRowArgs> for UpdateRow {
    fn from(val: UpdateRowArgs) -> Self {
        UpdateRow {
            id: val.id,
            label: val.label,
            effort_label: val.effort,
        }
    }
}

/// Remove a row and its cells
#[derive(Args)]
pub struct RemoveRowArgs {
    /// ID of the row to remove
    pub id: String,
}

#[derive(Subcommand)]
pub enum RowCommands {
    /// Add a new row to the active board
    #[command(alias = "a")]
    Add(AddRowArgs),
    /// Update a row's label and/or effort share
    #[command(alias = "u")]
    Update(UpdateRowArgs),
    /// Remove a row and its cells
    #[command(alias = "rm")]
    Remove(RemoveRowArgs),
}

/// Write a cell's task text
#[derive(Args)]
pub struct SetCellArgs {
    /// Row the cell belongs to
    pub row_id: String,
    /// Weekday of the cell
    pub day: WeekdayArg,
    /// Task text (an empty string clears the text)
    pub text: String,
    /// Run the text through the assistant's spelling pass first
    #[arg(long)]
    pub polish: bool,
}

/// Address a single cell
#[derive(Args)]
pub struct CellArgs {
    /// Row the cell belongs to
    pub row_id: String,
    /// Weekday of the cell
    pub day: WeekdayArg,
}

impl From<CellArgs> for CellRef {
    fn from(val: CellArgs) -> Self {
        CellRef {
            row_id: val.row_id,
            day: val.day.to_string(),
        }
    }
}

/// Drop a work-item payload into a cell
///
/// The payload is the JSON emitted by `mx sync --json`. A malformed payload
/// is logged and ignored without touching the grid.
#[derive(Args)]
pub struct DropArgs {
    /// Row the cell belongs to
    pub row_id: String,
    /// Weekday of the cell
    pub day: WeekdayArg,
    /// JSON-encoded work-item payload
    pub payload: String,
}

#[derive(Subcommand)]
pub enum CellCommands {
    /// Write a cell's task text
    #[command(alias = "s")]
    Set(SetCellArgs),
    /// Flip a cell's completed flag
    #[command(alias = "t")]
    Toggle(CellArgs),
    /// Reset a cell entirely
    Clear(CellArgs),
    /// Drop a work-item payload into a cell
    #[command(alias = "d")]
    Drop(DropArgs),
}

/// Archive the current week and roll incomplete work forward
///
/// Completed cells are cleared for the next week; incomplete cells carry
/// forward unchanged. The archived snapshot keeps the pre-rollover state
/// with its completion stats. Without explicit dates the label covers the
/// current week's Monday..Friday.
#[derive(Args)]
pub struct DeployArgs {
    /// Week start date (YYYY-MM-DD); requires --end
    #[arg(long)]
    pub start: Option<String>,
    /// Week end date (YYYY-MM-DD); requires --start
    #[arg(long)]
    pub end: Option<String>,
    /// Assign fresh row ids during the rollover instead of the configured
    /// identity policy
    #[arg(long)]
    pub fresh_row_ids: bool,
}

/// List archived weeks
#[derive(Args)]
pub struct HistoryListArgs {
    /// Board to read instead of the active session's (read-only)
    #[arg(long)]
    pub board: Option<u64>,
}

/// Show one archived week
#[derive(Args)]
pub struct HistoryShowArgs {
    /// Archive position (1 is the oldest archive)
    pub week_number: u32,
    /// Board to read instead of the active session's (read-only)
    #[arg(long)]
    pub board: Option<u64>,
}

/// Replace an archived week's rows and recompute its stats
#[derive(Args)]
pub struct HistoryEditArgs {
    /// Archive position of the entry to edit
    pub week_number: u32,
    /// Path to the replacement row JSON, or '-' for stdin
    #[arg(long)]
    pub rows_json: String,
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List archived weeks
    #[command(aliases = ["l", "ls"])]
    List(HistoryListArgs),
    /// Show one archived week
    #[command(alias = "s")]
    Show(HistoryShowArgs),
    /// Replace an archived week's rows and recompute its stats
    #[command(alias = "e")]
    Edit(HistoryEditArgs),
}

/// Fetch assigned work items from Azure DevOps
///
/// Runs the configured WIQL query for open Feature work items assigned to
/// the board's email, fetches details and each item's latest comment, and
/// lists them. Use --json to emit drop payloads for `mx cell drop`.
#[derive(Args)]
pub struct SyncArgs {
    /// Emit the items as JSON drop payloads instead of a rendered list
    #[arg(long)]
    pub json: bool,
}

/// Ask the planning assistant about the current board
#[derive(Args)]
pub struct AskArgs {
    /// Free-text question; the current rows are sent along as context
    pub question: String,
}

/// Change board settings
#[derive(Args, Default)]
pub struct SetSettingsArgs {
    /// Display name
    #[arg(long)]
    pub user_name: Option<String>,
    /// Identity email used for the work-item query
    #[arg(long)]
    pub company_email: Option<String>,
    /// Azure DevOps personal access token
    #[arg(long)]
    pub devops_pat: Option<String>,
    /// Azure DevOps organization
    #[arg(long)]
    pub organization: Option<String>,
    /// Azure DevOps project
    #[arg(long)]
    pub project: Option<String>,
    /// Proxy prefix for sync requests
    #[arg(long)]
    pub cors_proxy: Option<String>,
    /// Route sync requests through the proxy
    #[arg(long)]
    pub use_proxy: Option<bool>,
    /// Keep row ids across week rollovers
    #[arg(long)]
    pub preserve_row_identity: Option<bool>,
}

impl From<SetSettingsArgs> for UpdateSettings {
    fn from(val: SetSettingsArgs) -> Self {
        UpdateSettings {
            user_name: val.user_name,
            company_email: val.company_email,
            devops_pat: val.devops_pat,
            organization: val.organization,
            project: val.project,
            cors_proxy: val.cors_proxy,
            use_proxy: val.use_proxy,
            preserve_row_identity: val.preserve_row_identity,
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the active board's settings (PAT masked)
    #[command(alias = "s")]
    Show,
    /// Change one or more settings
    Set(SetSettingsArgs),
}

/// Command-line argument representation of priority groups
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityGroupArg {
    P1,
    P2,
    P3,
    Meeting,
}

impl std::fmt::Display for PriorityGroupArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityGroupArg::P1 => write!(f, "P1"),
            PriorityGroupArg::P2 => write!(f, "P2"),
            PriorityGroupArg::P3 => write!(f, "P3"),
            PriorityGroupArg::Meeting => write!(f, "Meeting"),
        }
    }
}

/// Command-line argument representation of weekdays
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum WeekdayArg {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl std::fmt::Display for WeekdayArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekdayArg::Monday => write!(f, "monday"),
            WeekdayArg::Tuesday => write!(f, "tuesday"),
            WeekdayArg::Wednesday => write!(f, "wednesday"),
            WeekdayArg::Thursday => write!(f, "thursday"),
            WeekdayArg::Friday => write!(f, "friday"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_week_range_formats_label() {
        let label = resolve_week_range(Some("2026-01-12"), Some("2026-01-16")).unwrap();
        assert_eq!(label, "2026-01-12 TO 2026-01-16");
    }

    #[test]
    fn test_resolve_week_range_rejects_inverted_dates() {
        assert!(resolve_week_range(Some("2026-01-16"), Some("2026-01-12")).is_err());
    }

    #[test]
    fn test_resolve_week_range_requires_both_dates() {
        assert!(resolve_week_range(Some("2026-01-12"), None).is_err());
        assert!(resolve_week_range(None, Some("2026-01-16")).is_err());
    }

    #[test]
    fn test_resolve_week_range_defaults_to_current_week() {
        let label = resolve_week_range(None, None).unwrap();
        let (monday, friday) = current_week().unwrap();
        assert_eq!(label, format!("{monday} TO {friday}"));
        assert_eq!(monday.weekday(), jiff::civil::Weekday::Monday);
        assert_eq!(friday.weekday(), jiff::civil::Weekday::Friday);
    }
}

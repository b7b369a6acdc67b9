//! MCP server implementation for MatrixPro
//!
//! Implements the Model Context Protocol server, giving AI assistants a
//! standardized interface to the weekly planning board.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use matrixpro_core::Matrix;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

use handlers::{
    AddRow, CellRef, Deploy, EditWeek, ListHistory, McpHandlers, McpResult, RowId, SetCell,
    UpdateRow, WeekRef,
};

/// MCP server for MatrixPro
#[derive(Clone)]
pub struct MatrixMcpServer {
    matrix: Arc<Mutex<Matrix>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MatrixMcpServer {
    /// Create a new MatrixPro MCP server
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix: Arc::new(Mutex::new(matrix)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "show_board",
        description = "Show the active board's full grid: every row grouped by priority section (P1, P2, P3, Meeting) with its weekday cells, task text, and completion markers. Start here to see what is planned and what carried forward from last week."
    )]
    async fn show_board(&self) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.show_board().await
    }

    #[tool(
        name = "list_boards",
        description = "List every board with its ID, owner name, and email. Other users' boards are readable through list_history/show_week with their board ID; only the active session's board can be modified."
    )]
    async fn list_boards(&self) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.list_boards().await
    }

    #[tool(
        name = "add_row",
        description = "Add a new row to the active board. Requires a priority group ('P1', 'P2', 'P3', or 'Meeting'); optionally set a label and an effort share like '25%'. Returns the new row with its generated ID for cell edits."
    )]
    async fn add_row(&self, params: Parameters<AddRow>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.add_row(params).await
    }

    #[tool(
        name = "update_row",
        description = "Update a row's label and/or effort share by row ID. At least one of the two fields must be provided. The row's cells and priority group are unaffected."
    )]
    async fn update_row(&self, params: Parameters<UpdateRow>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.update_row(params).await
    }

    #[tool(
        name = "remove_row",
        description = "Remove a row and all of its day cells from the active board. This cannot be undone; archived snapshots that include the row are unaffected."
    )]
    async fn remove_row(&self, params: Parameters<RowId>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.remove_row(params).await
    }

    #[tool(
        name = "set_cell",
        description = "Write a day cell's task text. Identify the cell by row ID and weekday ('monday'..'friday'). An empty string clears the text. Keep one concrete task per cell."
    )]
    async fn set_cell(&self, params: Parameters<SetCell>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.set_cell(params).await
    }

    #[tool(
        name = "toggle_cell",
        description = "Flip a day cell's completed flag by row ID and weekday. Completed cells are cleared at the next deploy; incomplete cells carry forward into the next week."
    )]
    async fn toggle_cell(&self, params: Parameters<CellRef>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.toggle_cell(params).await
    }

    #[tool(
        name = "deploy_week",
        description = "Archive the current week under a range label (e.g. '2026-01-12 TO 2026-01-16') and start the next week: completed cells are cleared, incomplete cells carry forward unchanged. The label must be unique per board; a duplicate is rejected. Set fresh_row_ids=true to regenerate row ids during the transition."
    )]
    async fn deploy_week(&self, params: Parameters<Deploy>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.deploy_week(params).await
    }

    #[tool(
        name = "list_history",
        description = "List archived weeks newest first, with week number, range label, and completion stats. Pass a board ID to browse another user's archive read-only; omit it for the active board."
    )]
    async fn list_history(&self, params: Parameters<ListHistory>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.list_history(params).await
    }

    #[tool(
        name = "show_week",
        description = "Show one archived week in full: its stats and the frozen row snapshot. Identify it by week number (1 is the oldest archive); pass a board ID to read another user's archive."
    )]
    async fn show_week(&self, params: Parameters<WeekRef>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.show_week(params).await
    }

    #[tool(
        name = "edit_week",
        description = "Replace an archived week's rows with edited row JSON and recompute its stats. Only the active session's own archive is editable. The entry's week number, range label, and timestamp never change."
    )]
    async fn edit_week(&self, params: Parameters<EditWeek>) -> McpResult {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.edit_week(params).await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let handlers = McpHandlers::new(self.matrix.clone());
        handlers.get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MatrixMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "matrixpro".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"MatrixPro is a weekly priority matrix: labeled rows grouped by priority (P1 critical, P2 operational, P3 support, Meeting syncs) crossed with the Monday..Friday weekdays.

## Core Concepts
- **Rows**: One initiative each, with a label, a priority group, and an effort share
- **Cells**: One task slot per row per weekday, with text and a completed flag
- **Deploy**: Archives the week as an immutable snapshot with completion stats, clears completed cells, and carries incomplete cells into the next week

## Workflow Examples

### Planning a Week
1. `show_board` to see current rows and carried-forward tasks
2. `set_cell` to schedule tasks into weekday cells
3. `add_row` / `update_row` when the row structure needs to change

### Closing a Week
1. `toggle_cell` for everything that got done
2. `deploy_week` with the week's range label
3. `list_history` / `show_week` to review past weeks and completion trends

### Browsing Other Users
- `list_boards` shows every board; pass a board ID to `list_history` or `show_week` for read-only archive access

## Best Practices
- One concrete task per cell
- Leave unfinished cells alone at deploy time; carry-forward is automatic
- Use `edit_week` sparingly; it rewrites an archived snapshot and recomputes its stats"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: MatrixMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting MatrixPro MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

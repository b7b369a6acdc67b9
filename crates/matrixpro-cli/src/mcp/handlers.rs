//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use matrixpro_core::{
    display::{CreateResult, OperationStatus, UpdateResult},
    params as core, Matrix,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{errors::to_mcp_error, prompts::prompt_templates};

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Provides JSON deserialization and schema generation for any parameter
/// type, keeping the core types clean of framework dependencies. The
/// transparent serde attribute passes straight through to the wrapped type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type AddRow = McpParams<core::AddRow>;
pub type UpdateRow = McpParams<core::UpdateRow>;
pub type RowId = McpParams<core::RowId>;
pub type SetCell = McpParams<core::SetCell>;
pub type CellRef = McpParams<core::CellRef>;
pub type Deploy = McpParams<core::Deploy>;
pub type ListHistory = McpParams<core::ListHistory>;
pub type WeekRef = McpParams<core::WeekRef>;
pub type EditWeek = McpParams<core::EditWeek>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    matrix: Arc<Mutex<Matrix>>,
}

impl McpHandlers {
    pub fn new(matrix: Arc<Mutex<Matrix>>) -> Self {
        Self { matrix }
    }

    pub async fn show_board(&self) -> McpResult {
        debug!("show_board");

        let view = self
            .matrix
            .lock()
            .await
            .board_view()
            .await
            .map_err(|e| to_mcp_error("Failed to load board", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            view.to_string(),
        )]))
    }

    pub async fn list_boards(&self) -> McpResult {
        debug!("list_boards");

        let boards = self
            .matrix
            .lock()
            .await
            .boards_summary()
            .await
            .map_err(|e| to_mcp_error("Failed to list boards", &e))?;

        let result = format!("# Boards\n\n{boards}");
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn add_row(&self, Parameters(params): Parameters<AddRow>) -> McpResult {
        debug!("add_row: {:?}", params);

        let row = self
            .matrix
            .lock()
            .await
            .add_row(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add row", &e))?;

        let result = CreateResult::new(row);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn update_row(&self, Parameters(params): Parameters<UpdateRow>) -> McpResult {
        debug!("update_row: {:?}", params);

        let inner_params = params.as_ref();
        let mut changes = Vec::new();
        if inner_params.label.is_some() {
            changes.push("Updated label".to_string());
        }
        if inner_params.effort_label.is_some() {
            changes.push("Updated effort share".to_string());
        }

        let row = self
            .matrix
            .lock()
            .await
            .update_row(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to update row", &e))?;

        let result = UpdateResult::with_changes(row, changes);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn remove_row(&self, Parameters(params): Parameters<RowId>) -> McpResult {
        debug!("remove_row: {:?}", params);

        let inner_params = params.as_ref();
        self.matrix
            .lock()
            .await
            .remove_row(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove row", &e))?;

        let result =
            OperationStatus::success(format!("Removed row '{}'", inner_params.id));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn set_cell(&self, Parameters(params): Parameters<SetCell>) -> McpResult {
        debug!("set_cell: {:?}", params);

        let inner_params = params.as_ref();
        let cell = self
            .matrix
            .lock()
            .await
            .set_cell(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to set cell", &e))?;

        let result = OperationStatus::success(format!(
            "Set {} cell on row '{}' to '{}'",
            inner_params.day, inner_params.row_id, cell.text
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn toggle_cell(&self, Parameters(params): Parameters<CellRef>) -> McpResult {
        debug!("toggle_cell: {:?}", params);

        let inner_params = params.as_ref();
        let cell = self
            .matrix
            .lock()
            .await
            .toggle_cell(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to toggle cell", &e))?;

        let state = if cell.completed { "complete" } else { "incomplete" };
        let result = OperationStatus::success(format!(
            "Marked {} cell on row '{}' {state}",
            inner_params.day, inner_params.row_id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn deploy_week(&self, Parameters(params): Parameters<Deploy>) -> McpResult {
        debug!("deploy_week: {:?}", params);

        let result = self
            .matrix
            .lock()
            .await
            .deploy_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to deploy week", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn list_history(&self, Parameters(params): Parameters<ListHistory>) -> McpResult {
        debug!("list_history: {:?}", params);

        let summaries = self
            .matrix
            .lock()
            .await
            .history_summaries(params.as_ref().board)
            .await
            .map_err(|e| to_mcp_error("Failed to list history", &e))?;

        let result = format!("# Archived Weeks\n\n{summaries}");
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn show_week(&self, Parameters(params): Parameters<WeekRef>) -> McpResult {
        debug!("show_week: {:?}", params);

        let inner_params = params.as_ref();
        let entry = self
            .matrix
            .lock()
            .await
            .show_week(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to load week", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Week {} not found", inner_params.week_number),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            entry.to_string(),
        )]))
    }

    pub async fn edit_week(&self, Parameters(params): Parameters<EditWeek>) -> McpResult {
        debug!("edit_week: {:?}", params);

        let result = self
            .matrix
            .lock()
            .await
            .edit_week_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to edit week", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let templates = prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(McpError::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(McpError::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            // Check if any required arguments are missing
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(McpError::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}

//! Error handling utilities for MCP server

use matrixpro_core::MatrixError;
use rmcp::ErrorData;

/// Helper to convert board errors to MCP errors
pub fn to_mcp_error(message: &str, error: &MatrixError) -> ErrorData {
    ErrorData::internal_error(format!("{}: {}", message, error), None)
}

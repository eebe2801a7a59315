//! In-process tool execution
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly with a JSON
//! argument object, skipping the stdio transport.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let tools = server.list_tools();
//! let result = server
//!     .call_tool("list_issues", serde_json::json!({ "repo": "octo/kanban" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use serde_json::Value;

/// Error type for embedded tool calls
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("tool execution failed: {0}")]
    ExecutionError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// A protocol error whose code has no dedicated variant
    #[error("mcp error: {0}")]
    McpError(String),
}

/// Classifies a protocol error by its code so embedders can match on the
/// variant instead of inspecting numeric codes.
impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        let message = err.message.to_string();
        let code = err.code;
        if code == ErrorCode::METHOD_NOT_FOUND {
            EmbeddableError::ToolNotFound(message)
        } else if code == ErrorCode::INVALID_PARAMS || code == ErrorCode::INVALID_REQUEST {
            EmbeddableError::InvalidParams(message)
        } else if code == ErrorCode::INTERNAL_ERROR {
            EmbeddableError::ExecutionError(message)
        } else {
            EmbeddableError::McpError(message)
        }
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server that can be driven in-process
///
/// Implementations must be `Send + Sync`; hosts may issue calls from several
/// tasks at once.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used in MCP configuration files
    fn server_name(&self) -> &str;

    /// Every tool with its name, description and input schema
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute `name` with a JSON object of arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }

    fn server_version(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{internal_error, invalid_params, method_not_found};

    #[test]
    fn test_error_codes_map_to_variants() {
        assert!(matches!(
            EmbeddableError::from(method_not_found("Unknown tool: nope")),
            EmbeddableError::ToolNotFound(_)
        ));
        assert!(matches!(
            EmbeddableError::from(invalid_params("title is required")),
            EmbeddableError::InvalidParams(_)
        ));
        assert!(matches!(
            EmbeddableError::from(internal_error("gh exited 1")),
            EmbeddableError::ExecutionError(_)
        ));
    }

    #[test]
    fn test_message_survives_classification() {
        match EmbeddableError::from(internal_error("HTTP 404: Not Found")) {
            EmbeddableError::ExecutionError(msg) => assert!(msg.contains("HTTP 404")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}

//! Failure taxonomy for tool calls
//!
//! Every handler returns [`KanbanError`]; the dispatcher turns it into a
//! JSON-RPC error through [`IntoMcpError`] exactly once.

use mcp_common::{
    internal_error, invalid_params, invalid_request, method_not_found, IntoMcpError, McpError,
};
use thiserror::Error;

use crate::gh::GhError;
use crate::repo::IdentityError;

#[derive(Debug, Error)]
pub enum KanbanError {
    /// Arguments missing, empty or of the wrong shape
    #[error("{0}")]
    InvalidParams(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Gateway(#[from] GhError),

    /// The temp payload could not be written
    #[error("failed to write temp payload: {0}")]
    Payload(#[from] std::io::Error),

    #[error("Unknown tool: {0}")]
    MethodNotFound(String),

    /// Already classified, passed through unchanged
    #[error("{}", .0.message)]
    Classified(McpError),
}

impl KanbanError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}

impl From<serde_json::Error> for KanbanError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidParams(format!("invalid arguments: {e}"))
    }
}

impl From<McpError> for KanbanError {
    fn from(e: McpError) -> Self {
        Self::Classified(e)
    }
}

impl IntoMcpError for KanbanError {
    fn into_mcp_error(self) -> McpError {
        match self {
            KanbanError::InvalidParams(msg) => invalid_params(msg),
            KanbanError::Identity(e) if e.is_discovery() => invalid_request(e.to_string()),
            KanbanError::Identity(e) => invalid_params(e.to_string()),
            KanbanError::Gateway(e) => internal_error(format!("GitHub CLI error: {e}")),
            e @ KanbanError::Payload(_) => internal_error(format!("GitHub CLI error: {e}")),
            KanbanError::MethodNotFound(name) => method_not_found(format!("Unknown tool: {name}")),
            KanbanError::Classified(e) => e,
        }
    }
}

pub type KanbanResult<T> = Result<T, KanbanError>;

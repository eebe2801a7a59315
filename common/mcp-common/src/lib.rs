//! MCP Common - shared plumbing for the MCP servers in this workspace
//!
//! - **Initialization**: [`init_tracing`] sends logs to stderr
//! - **Results**: [`json_success`] builds tool responses, [`result_text`]
//!   reads them back
//! - **Errors**: [`IntoMcpError`] and the classification helpers pick the
//!   JSON-RPC error code for a failure
//! - **Embedding**: [`EmbeddableMcp`] drives a server's tools in-process

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{
    internal_error, invalid_params, invalid_request, method_not_found, IntoMcpError, McpResult,
};
pub use init::init_tracing;
pub use result::{json_success, result_text};

pub use rmcp::{
    model::{CallToolResult, ErrorCode, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;

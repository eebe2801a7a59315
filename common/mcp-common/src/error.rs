//! Error classification helpers for MCP servers
//!
//! Every failure leaves a server as an [`McpError`] carrying a JSON-RPC code.
//! The helpers here pick the code so call sites only supply the message.

use rmcp::model::ErrorCode;
use rmcp::ErrorData as McpError;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Conversion of a domain error into a classified MCP error
///
/// Implement this for a server's own error enum so the classification lives
/// in one `match` instead of being decided at every `map_err`.
///
/// ```rust,ignore
/// impl IntoMcpError for MyError {
///     fn into_mcp_error(self) -> McpError {
///         match self {
///             MyError::BadInput(msg) => invalid_params(msg),
///             other => internal_error(other.to_string()),
///         }
///     }
/// }
/// ```
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for McpError {
    fn into_mcp_error(self) -> McpError {
        self
    }
}

/// Internal failure: an external tool or the server itself broke
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// The caller's arguments failed a required-field or format check
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// The request is well-formed but cannot be served in the current context
/// (for example a path that is not a working copy)
pub fn invalid_request(message: impl Into<String>) -> McpError {
    McpError::invalid_request(message.into(), None)
}

/// The requested tool or method does not exist
pub fn method_not_found(message: impl Into<String>) -> McpError {
    McpError::new(ErrorCode::METHOD_NOT_FOUND, message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_pick_codes() {
        assert_eq!(internal_error("x").code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(invalid_params("x").code, ErrorCode::INVALID_PARAMS);
        assert_eq!(invalid_request("x").code, ErrorCode::INVALID_REQUEST);
        assert_eq!(method_not_found("x").code, ErrorCode::METHOD_NOT_FOUND);
    }

    #[test]
    fn test_mcp_error_passes_through_unchanged() {
        let original = invalid_params("title is required");
        let converted = original.clone().into_mcp_error();
        assert_eq!(converted.code, original.code);
        assert_eq!(converted.message, original.message);
    }
}

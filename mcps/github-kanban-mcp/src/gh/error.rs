//! Error types for gh CLI operations

use thiserror::Error;

/// Errors that can occur when executing gh CLI commands
#[derive(Error, Debug)]
pub enum GhError {
    /// The gh command failed with a non-zero exit code
    #[error("gh command failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Exit code from the gh process
        code: i32,
        /// Standard error output from gh, verbatim
        stderr: String,
    },

    /// Failed to spawn the gh process
    #[error("failed to spawn gh process: {0}")]
    SpawnError(#[from] std::io::Error),

    /// Failed to parse JSON output from gh
    #[error("failed to parse gh JSON output: {0}")]
    ParseError(#[from] serde_json::Error),

    /// gh answered, but not in the shape we rely on
    #[error("unexpected response format: {0}")]
    UnexpectedOutput(String),

    /// gh CLI is not installed or not in PATH
    #[error("gh CLI not found - ensure gh is installed and in PATH")]
    NotFound,

    /// gh CLI is not authenticated
    #[error("gh CLI not authenticated - run 'gh auth login' first")]
    NotAuthenticated,
}

impl GhError {
    /// The tracker refused to create something because it is already there
    pub fn is_already_exists(&self) -> bool {
        matches!(self, GhError::CommandFailed { stderr, .. } if stderr.contains("already exists"))
    }
}

/// Result type alias for gh operations
pub type GhResult<T> = Result<T, GhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_keeps_stderr_verbatim() {
        let err = GhError::CommandFailed {
            code: 1,
            stderr: "GraphQL: Could not resolve to an Issue with the number of 999.".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Could not resolve to an Issue with the number of 999."));
    }

    #[test]
    fn test_already_exists_detection() {
        let exists = GhError::CommandFailed {
            code: 1,
            stderr: "label with name \"bug\" already exists; use `--force` to update its color and description".to_string(),
        };
        assert!(exists.is_already_exists());
        assert!(!GhError::NotFound.is_already_exists());
    }
}

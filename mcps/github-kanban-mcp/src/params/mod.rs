//! Parameter types for the kanban tools
//!
//! Every tool accepts the same repository fields, flattened into its own
//! arguments. Required fields are non-optional so a missing one fails
//! deserialization; empty strings are rejected by the `validate` helpers.

mod comment;
mod issue;

pub use comment::*;
pub use issue::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{KanbanError, KanbanResult};
use crate::repo::RepoInput;

/// Repository selection shared by every tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RepoParams {
    #[schemars(description = "Repository owner (user or organization)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[schemars(
        description = "Repository name, or OWNER/REPO. Takes precedence over path when given"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[schemars(
        description = "Path to a local clone; the repository is read from its origin remote"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl RepoParams {
    pub fn input(&self) -> RepoInput<'_> {
        RepoInput {
            owner: self.owner.as_deref(),
            repo: self.repo.as_deref(),
            path: self.path.as_deref(),
        }
    }
}

/// An issue number sent either as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IssueNumber {
    Number(u64),
    Text(String),
}

impl IssueNumber {
    /// Positive decimal number; `"#42"` and `" 42 "` are accepted
    pub fn value(&self) -> KanbanResult<u64> {
        let parsed = match self {
            IssueNumber::Number(n) => Some(*n),
            IssueNumber::Text(s) => {
                let digits = s.trim().trim_start_matches('#');
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    digits.parse().ok()
                } else {
                    None
                }
            }
        };

        match parsed {
            Some(n) if n > 0 => Ok(n),
            _ => Err(KanbanError::invalid_params(format!(
                "issue_number must be a positive integer, got {}",
                self
            ))),
        }
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueNumber::Number(n) => write!(f, "{n}"),
            IssueNumber::Text(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<u64> for IssueNumber {
    fn from(n: u64) -> Self {
        IssueNumber::Number(n)
    }
}

/// Reject a required string that is present but blank
pub(crate) fn require_text(field: &str, value: &str) -> KanbanResult<()> {
    if value.trim().is_empty() {
        return Err(KanbanError::invalid_params(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Drop blank entries from an optional list
pub(crate) fn clean_list(values: &Option<Vec<String>>) -> Vec<String> {
    values
        .iter()
        .flatten()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

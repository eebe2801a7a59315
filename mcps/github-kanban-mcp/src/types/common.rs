//! Shapes shared by several gh JSON outputs

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A GitHub user as embedded in issue JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// A label as embedded in issue JSON or returned by `gh label list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRef {
    pub name: String,

    /// Hex color without `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Issue state, always rendered lowercase
///
/// gh emits `OPEN`/`CLOSED`; callers send `open`/`closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[serde(alias = "OPEN", alias = "Open")]
    Open,
    #[serde(alias = "CLOSED", alias = "Closed")]
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }

    /// The gh subcommand that moves an issue into this state
    pub fn transition_command(&self) -> &'static str {
        match self {
            IssueState::Open => "reopen",
            IssueState::Closed => "close",
        }
    }
}

/// `list_issues` state filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateFilter::Open => "open",
            StateFilter::Closed => "closed",
            StateFilter::All => "all",
        }
    }
}

//! Issue parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{require_text, IssueNumber, RepoParams};
use crate::error::{KanbanError, KanbanResult};
use crate::types::{IssueState, StateFilter};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListIssuesParams {
    #[serde(flatten)]
    pub repository: RepoParams,
    #[schemars(description = "Issue state filter (open, closed, all). Default: open")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateFilter>,
    #[schemars(description = "Only issues carrying all of these labels")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[schemars(description = "Maximum number of issues to return (default: 30)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListIssuesParams {
    pub fn validate(&self) -> KanbanResult<()> {
        if self.limit == Some(0) {
            return Err(KanbanError::invalid_params("limit must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    #[serde(flatten)]
    pub repository: RepoParams,
    #[schemars(description = "Issue title")]
    pub title: String,
    #[schemars(description = "Emoji prepended to the title, e.g. 🐛")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[schemars(description = "Issue body in markdown")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[schemars(description = "Labels to apply; missing labels are created")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[schemars(description = "Usernames to assign (@me for self)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl CreateIssueParams {
    pub fn validate(&self) -> KanbanResult<()> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIssueParams {
    #[serde(flatten)]
    pub repository: RepoParams,
    #[schemars(description = "Issue number")]
    pub issue_number: IssueNumber,
    #[schemars(description = "New issue title")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[schemars(description = "Emoji prepended to the new title; ignored without title")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[schemars(description = "New issue body in markdown")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[schemars(description = "Move the issue to this state (open, closed)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    #[schemars(description = "Labels to add; missing labels are created")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[schemars(description = "Usernames to add as assignees")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl UpdateIssueParams {
    pub fn validate(&self) -> KanbanResult<u64> {
        if let Some(ref title) = self.title {
            require_text("title", title)?;
        }
        self.issue_number.value()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteIssueParams {
    #[serde(flatten)]
    pub repository: RepoParams,
    #[schemars(description = "Issue number")]
    pub issue_number: IssueNumber,
}

impl DeleteIssueParams {
    pub fn validate(&self) -> KanbanResult<u64> {
        self.issue_number.value()
    }
}

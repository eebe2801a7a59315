//! Issue records as gh returns them, and the summaries tools return
//!
//! Every tool response is one of the summary structs below serialized as
//! JSON, so callers see a single response convention across operations.

use serde::{Deserialize, Serialize};

use super::common::{IssueState, LabelRef, User};

/// An issue row from `gh issue list --json ...`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl IssueRecord {
    /// Fields requested from `gh issue list`
    pub fn list_fields() -> &'static [&'static str] {
        &[
            "number",
            "title",
            "state",
            "labels",
            "assignees",
            "createdAt",
            "updatedAt",
            "url",
        ]
    }
}

/// A single issue from `gh issue view --json ...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueView {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub state: Option<IssueState>,
    pub url: String,
}

impl IssueView {
    /// Fields requested after a mutation to confirm it
    pub fn view_fields() -> &'static [&'static str] {
        &["number", "title", "state", "url"]
    }
}

/// One entry of the `list_issues` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<IssueRecord> for IssueSummary {
    fn from(record: IssueRecord) -> Self {
        Self {
            number: record.number,
            title: record.title,
            state: record.state,
            labels: record.labels.into_iter().map(|l| l.name).collect(),
            assignees: record.assignees.into_iter().map(|u| u.login).collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            url: record.url,
        }
    }
}

/// `create_issue` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub title: String,
    pub url: String,
}

impl From<IssueView> for CreatedIssue {
    fn from(view: IssueView) -> Self {
        Self {
            number: view.number,
            title: view.title,
            url: view.url,
        }
    }
}

/// `update_issue` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedIssue {
    pub number: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    pub url: String,
}

impl From<IssueView> for UpdatedIssue {
    fn from(view: IssueView) -> Self {
        Self {
            number: view.number,
            title: view.title,
            state: view.state,
            url: view.url,
        }
    }
}

/// `delete_issue` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedIssue {
    pub number: u64,
    pub deleted: bool,
    pub message: String,
}

/// `add_comment` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentedIssue {
    pub number: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_url: Option<String>,
}

/// Issue number from the URL `gh issue create` prints
///
/// gh prints `https://<host>/<owner>/<repo>/issues/<n>`; the number is the
/// last path segment. Any other shape is a format error, not a panic.
pub fn issue_number_from_url(output: &str) -> Option<u64> {
    let url = output.lines().rev().map(str::trim).find(|l| !l.is_empty())?;
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let number = segments.next()?.parse::<u64>().ok()?;
    match segments.next() {
        Some("issues") => Some(number),
        _ => None,
    }
}

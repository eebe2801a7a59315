//! Type definitions for GitHub entities and tool responses

pub mod common;
pub mod issue;

pub use common::{IssueState, LabelRef, StateFilter, User};
pub use issue::{
    issue_number_from_url, CommentedIssue, CreatedIssue, DeletedIssue, IssueRecord, IssueSummary,
    IssueView, UpdatedIssue,
};

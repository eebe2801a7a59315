//! Issue handler implementations

use mcp_common::{json_success, CallToolResult};
use tracing::info;

use super::{display_title, fetch_issue, transition, HandlerContext};
use crate::error::KanbanResult;
use crate::gh::{run_json, GhCommand, GhError};
use crate::params::{
    clean_list, CreateIssueParams, DeleteIssueParams, ListIssuesParams, UpdateIssueParams,
};
use crate::repo::RepositoryRef;
use crate::types::{
    issue_number_from_url, CreatedIssue, DeletedIssue, IssueRecord, IssueSummary, UpdatedIssue,
};

const DEFAULT_LIST_LIMIT: u32 = 30;

/// List issues, filtered by state and labels
pub async fn list_issues(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    params: ListIssuesParams,
) -> KanbanResult<CallToolResult> {
    params.validate()?;
    let labels = clean_list(&params.labels);

    let cmd = GhCommand::new(["issue", "list"])
        .repo(repo)
        .flag("--state", params.state.unwrap_or_default().as_str())
        .flag_each("--label", &labels)
        .flag("--limit", params.limit.unwrap_or(DEFAULT_LIST_LIMIT).to_string())
        .json_fields(IssueRecord::list_fields());

    let records: Vec<IssueRecord> = run_json(ctx.gateway, &cmd).await?;
    let issues: Vec<IssueSummary> = records.into_iter().map(Into::into).collect();

    Ok(json_success(&issues)?)
}

/// Create an issue, creating any missing labels first
pub async fn create_issue(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    params: CreateIssueParams,
) -> KanbanResult<CallToolResult> {
    params.validate()?;
    let assignees = clean_list(&params.assignees);
    let title = display_title(params.emoji.as_deref(), &params.title);

    let labels = clean_list(&params.labels);
    let report = ctx.labels().ensure(repo, &labels).await?;
    let labels = report.usable(labels);

    let payload = match params.body.as_deref().filter(|b| !b.is_empty()) {
        Some(body) => Some(ctx.payloads.acquire("issue_body_", body)?),
        None => None,
    };

    let mut cmd = GhCommand::new(["issue", "create"])
        .repo(repo)
        .flag("--title", title.as_str());
    cmd = match payload {
        Some(ref payload) => cmd.body_file(payload.path()),
        // Without a body gh would open an editor
        None => cmd.flag("--body", ""),
    };
    let cmd = cmd
        .flag_each("--label", &labels)
        .flag_each("--assignee", &assignees);

    let output = ctx.gateway.run(&cmd).await?;
    if let Some(payload) = payload {
        payload.release();
    }

    let number = issue_number_from_url(&output).ok_or_else(|| {
        GhError::UnexpectedOutput(format!("no issue URL in `gh issue create` output: {output}"))
    })?;
    info!(repo = %repo, number, "issue created");

    let view = fetch_issue(ctx, repo, number).await?;
    Ok(json_success(&CreatedIssue::from(view))?)
}

/// Update an issue: state change first, then one edit, then a fresh view
pub async fn update_issue(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    params: UpdateIssueParams,
) -> KanbanResult<CallToolResult> {
    let number = params.validate()?;
    let assignees = clean_list(&params.assignees);
    let title = params
        .title
        .as_deref()
        .map(|t| display_title(params.emoji.as_deref(), t));

    let labels = clean_list(&params.labels);
    let report = ctx.labels().ensure(repo, &labels).await?;
    let labels = report.usable(labels);

    let payload = match params.body.as_deref() {
        Some(body) => Some(ctx.payloads.acquire("update_body_", body)?),
        None => None,
    };

    if let Some(state) = params.state {
        transition(ctx, repo, number, state).await?;
    }

    let edits_requested =
        title.is_some() || payload.is_some() || !labels.is_empty() || !assignees.is_empty();
    if edits_requested {
        let mut cmd = GhCommand::new(["issue", "edit"])
            .arg(number.to_string())
            .repo(repo)
            .flag_opt("--title", title);
        if let Some(ref payload) = payload {
            cmd = cmd.body_file(payload.path());
        }
        let cmd = cmd
            .flag_each("--add-label", &labels)
            .flag_each("--add-assignee", &assignees);
        ctx.gateway.run(&cmd).await?;
    }
    if let Some(payload) = payload {
        payload.release();
    }

    let view = fetch_issue(ctx, repo, number).await?;
    info!(repo = %repo, number, "issue updated");
    Ok(json_success(&UpdatedIssue::from(view))?)
}

/// Permanently delete an issue; never prompts
pub async fn delete_issue(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    params: DeleteIssueParams,
) -> KanbanResult<CallToolResult> {
    let number = params.validate()?;

    let cmd = GhCommand::new(["issue", "delete"])
        .arg(number.to_string())
        .repo(repo)
        .switch("--yes");
    ctx.gateway.run(&cmd).await?;
    info!(repo = %repo, number, "issue deleted");

    Ok(json_success(&DeletedIssue {
        number,
        deleted: true,
        message: format!("Issue #{number} deleted from {repo}"),
    })?)
}

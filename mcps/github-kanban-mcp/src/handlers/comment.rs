//! Comment handler implementation

use mcp_common::{json_success, CallToolResult};
use tracing::info;

use super::{fetch_issue, transition, HandlerContext};
use crate::error::KanbanResult;
use crate::gh::GhCommand;
use crate::params::AddCommentParams;
use crate::repo::RepositoryRef;
use crate::types::CommentedIssue;

/// Comment on an issue, optionally moving it to a new state first
pub async fn add_comment(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    params: AddCommentParams,
) -> KanbanResult<CallToolResult> {
    let number = params.validate()?;
    let payload = ctx.payloads.acquire("comment_body_", &params.body)?;

    if let Some(state) = params.state {
        transition(ctx, repo, number, state).await?;
    }

    let cmd = GhCommand::new(["issue", "comment"])
        .arg(number.to_string())
        .repo(repo)
        .body_file(payload.path());
    let output = ctx.gateway.run(&cmd).await?;
    payload.release();

    // gh prints the new comment's URL
    let comment_url = output
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| l.starts_with("http"))
        .map(str::to_string);
    info!(repo = %repo, number, "comment added");

    let view = fetch_issue(ctx, repo, number).await?;
    Ok(json_success(&CommentedIssue {
        number: view.number,
        title: view.title,
        state: view.state,
        url: view.url,
        comment_url,
    })?)
}

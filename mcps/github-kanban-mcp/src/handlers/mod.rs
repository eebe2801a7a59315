//! Handler implementations for the kanban tools
//!
//! Each handler is a linear pipeline: validate, prepare (labels, temp body),
//! run the gh calls in order, then summarize. Handlers receive an already
//! resolved [`RepositoryRef`] and never read configuration themselves.

mod comment;
mod issue;

pub use comment::*;
pub use issue::*;

use tracing::debug;

use crate::config::LabelMode;
use crate::error::KanbanResult;
use crate::gh::{run_json, GhCommand, GhGateway};
use crate::labels::LabelEnsurer;
use crate::payload::PayloadChannel;
use crate::repo::RepositoryRef;
use crate::types::{IssueState, IssueView};

/// What a handler may touch
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub gateway: &'a dyn GhGateway,
    pub payloads: &'a PayloadChannel,
    pub label_mode: LabelMode,
}

impl<'a> HandlerContext<'a> {
    pub fn labels(&self) -> LabelEnsurer<'a> {
        LabelEnsurer::new(self.gateway, self.label_mode)
    }
}

/// `gh issue close|reopen N`
async fn transition(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    number: u64,
    state: IssueState,
) -> KanbanResult<()> {
    let cmd = GhCommand::new(["issue", state.transition_command()])
        .arg(number.to_string())
        .repo(repo);
    ctx.gateway.run(&cmd).await?;
    debug!(number, state = state.as_str(), "issue state changed");
    Ok(())
}

/// `gh issue view N --json number,title,state,url`
async fn fetch_issue(
    ctx: &HandlerContext<'_>,
    repo: &RepositoryRef,
    number: u64,
) -> KanbanResult<IssueView> {
    let cmd = GhCommand::new(["issue", "view"])
        .arg(number.to_string())
        .repo(repo)
        .json_fields(IssueView::view_fields());
    Ok(run_json(ctx.gateway, &cmd).await?)
}

/// `"<emoji> <title>"`, or the title alone when no emoji is given
fn display_title(emoji: Option<&str>, title: &str) -> String {
    let title = title.trim();
    match emoji.map(str::trim).filter(|e| !e.is_empty()) {
        Some(emoji) => format!("{emoji} {title}"),
        None => title.to_string(),
    }
}

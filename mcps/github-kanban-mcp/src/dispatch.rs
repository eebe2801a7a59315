//! Request dispatcher
//!
//! One entry point for every tool call: parse the operation name, decode and
//! check the arguments, resolve the repository once, run the handler, and
//! classify any failure into a protocol error. Nothing below this layer
//! builds an `McpError` from scratch.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use mcp_common::{CallToolResult, IntoMcpError, McpResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::{Config, LabelMode};
use crate::error::{KanbanError, KanbanResult};
use crate::gh::GhGateway;
use crate::handlers::{self, HandlerContext};
use crate::params::{
    AddCommentParams, CreateIssueParams, DeleteIssueParams, ListIssuesParams, RepoParams,
    UpdateIssueParams,
};
use crate::payload::PayloadChannel;
use crate::repo::{IdentityResolver, RepositoryRef};

/// The tools this server answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListIssues,
    CreateIssue,
    UpdateIssue,
    DeleteIssue,
    AddComment,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ListIssues,
        Operation::CreateIssue,
        Operation::UpdateIssue,
        Operation::DeleteIssue,
        Operation::AddComment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListIssues => "list_issues",
            Operation::CreateIssue => "create_issue",
            Operation::UpdateIssue => "update_issue",
            Operation::DeleteIssue => "delete_issue",
            Operation::AddComment => "add_comment",
        }
    }
}

impl FromStr for Operation {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| KanbanError::MethodNotFound(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool call as it arrives: operation name plus raw arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRequest {
    pub operation: String,
    #[serde(default)]
    pub arguments: Value,
}

impl OperationRequest {
    pub fn new(operation: impl Into<String>, arguments: Value) -> Self {
        Self {
            operation: operation.into(),
            arguments,
        }
    }
}

/// Routes tool calls to handlers
///
/// Holds the configuration-derived collaborators; built once at startup and
/// shared by every request. There is no per-request mutable state.
pub struct Dispatcher {
    gateway: Arc<dyn GhGateway>,
    resolver: IdentityResolver,
    payloads: PayloadChannel,
    label_mode: LabelMode,
}

impl Dispatcher {
    pub fn new(config: &Config, gateway: Arc<dyn GhGateway>) -> Self {
        Self {
            gateway,
            resolver: IdentityResolver::new(&config.github),
            payloads: PayloadChannel::new(config.scratch.dir()),
            label_mode: config.labels.mode,
        }
    }

    /// Handle one request, classifying any failure
    pub async fn dispatch(&self, request: OperationRequest) -> McpResult<CallToolResult> {
        self.call(&request.operation, request.arguments).await
    }

    /// Same as [`Dispatcher::dispatch`] with the parts passed separately
    pub async fn call(&self, operation: &str, arguments: Value) -> McpResult<CallToolResult> {
        self.route(operation, arguments).await.map_err(|e| {
            let err = e.into_mcp_error();
            warn!(operation, code = err.code.0, message = %err.message, "tool call failed");
            err
        })
    }

    async fn route(&self, operation: &str, arguments: Value) -> KanbanResult<CallToolResult> {
        let op: Operation = operation.parse()?;
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        let ctx = HandlerContext {
            gateway: self.gateway.as_ref(),
            payloads: &self.payloads,
            label_mode: self.label_mode,
        };

        match op {
            Operation::ListIssues => {
                let params: ListIssuesParams = serde_json::from_value(arguments)?;
                let repo = self.resolve(op, &params.repository)?;
                handlers::list_issues(&ctx, &repo, params).await
            }
            Operation::CreateIssue => {
                let params: CreateIssueParams = serde_json::from_value(arguments)?;
                let repo = self.resolve(op, &params.repository)?;
                handlers::create_issue(&ctx, &repo, params).await
            }
            Operation::UpdateIssue => {
                let params: UpdateIssueParams = serde_json::from_value(arguments)?;
                let repo = self.resolve(op, &params.repository)?;
                handlers::update_issue(&ctx, &repo, params).await
            }
            Operation::DeleteIssue => {
                let params: DeleteIssueParams = serde_json::from_value(arguments)?;
                let repo = self.resolve(op, &params.repository)?;
                handlers::delete_issue(&ctx, &repo, params).await
            }
            Operation::AddComment => {
                let params: AddCommentParams = serde_json::from_value(arguments)?;
                let repo = self.resolve(op, &params.repository)?;
                handlers::add_comment(&ctx, &repo, params).await
            }
        }
    }

    fn resolve(&self, op: Operation, params: &RepoParams) -> KanbanResult<RepositoryRef> {
        let repo = self.resolver.resolve(&params.input())?;
        info!(operation = %op, repo = %repo, "dispatching");
        Ok(repo)
    }
}

//! MCP Server implementation
//!
//! Exposes the five kanban tools over rmcp. Each tool method only forwards
//! its typed arguments to the [`Dispatcher`], so the stdio server and the
//! embedded [`EmbeddableMcp`] surface behave identically.

use std::sync::Arc;

use mcp_common::{async_trait, invalid_params, EmbeddableMcp, EmbeddableResult, McpError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::dispatch::{Dispatcher, Operation};
use crate::gh::{GhCli, GhGateway};
use crate::params::{
    AddCommentParams, CreateIssueParams, DeleteIssueParams, ListIssuesParams, UpdateIssueParams,
};

/// The GitHub kanban MCP server
#[derive(Clone)]
pub struct GitHubKanbanServer {
    dispatcher: Arc<Dispatcher>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GitHubKanbanServer {
    /// Server backed by the `gh` CLI, configured from file and environment
    pub fn new() -> Self {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Self {
        let gateway = Arc::new(GhCli::new(&config.github));
        Self::with_gateway(&config, gateway)
    }

    /// Server talking to an arbitrary gateway
    pub fn with_gateway(config: &Config, gateway: Arc<dyn GhGateway>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(config, gateway)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List issues in a GitHub repository as kanban cards. Filter by state (open, closed, all) and labels"
    )]
    async fn list_issues(
        &self,
        Parameters(params): Parameters<ListIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(Operation::ListIssues, &params).await
    }

    #[tool(
        description = "Create an issue. Missing labels are created automatically; an optional emoji is prefixed to the title"
    )]
    async fn create_issue(
        &self,
        Parameters(params): Parameters<CreateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(Operation::CreateIssue, &params).await
    }

    #[tool(
        description = "Update an issue: change state (open, closed), title, body, and add labels or assignees"
    )]
    async fn update_issue(
        &self,
        Parameters(params): Parameters<UpdateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(Operation::UpdateIssue, &params).await
    }

    #[tool(description = "Permanently delete an issue. Does not ask for confirmation")]
    async fn delete_issue(
        &self,
        Parameters(params): Parameters<DeleteIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(Operation::DeleteIssue, &params).await
    }

    #[tool(
        description = "Add a markdown comment to an issue, optionally changing its state first"
    )]
    async fn add_comment(
        &self,
        Parameters(params): Parameters<AddCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward(Operation::AddComment, &params).await
    }
}

impl GitHubKanbanServer {
    async fn forward<P: Serialize>(
        &self,
        op: Operation,
        params: &P,
    ) -> Result<CallToolResult, McpError> {
        let arguments = serde_json::to_value(params).map_err(|e| invalid_params(e.to_string()))?;
        self.dispatcher.call(op.as_str(), arguments).await
    }
}

impl Default for GitHubKanbanServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl rmcp::ServerHandler for GitHubKanbanServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "GitHub kanban MCP Server - manages GitHub issues as kanban cards \
                 (list, create, update, delete, comment) using the gh CLI. \
                 Select the repository with owner/repo or with the path of a local clone. \
                 Requires gh to be installed and authenticated."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for GitHubKanbanServer {
    fn server_name(&self) -> &str {
        "github-kanban"
    }

    fn server_description(&self) -> Option<&str> {
        Some("GitHub issues as a kanban board, through the gh CLI")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        self.dispatcher.call(name, params).await.map_err(Into::into)
    }
}

//! GitHub Kanban MCP Server
//!
//! Serves the kanban tools over stdio.
//!
//! # Requirements
//!
//! - GitHub CLI (`gh`) must be installed and in PATH (or set `GH_PATH`)
//! - `gh` must be authenticated (`gh auth login`), or `GITHUB_TOKEN` set
//!
//! # Usage
//!
//! Configure in `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "github-kanban": {
//!       "command": "./target/release/github-kanban-mcp",
//!       "env": { "GITHUB_OWNER": "octo" }
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;

use github_kanban_mcp::{gh::GhCli, Config, GitHubKanbanServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mcp_common::init_tracing("github_kanban_mcp")?;

    tracing::info!("Starting GitHub Kanban MCP Server");

    let config = Config::load();
    let gh = Arc::new(GhCli::new(&config.github));

    // Errors are reported per tool call as well
    if let Err(e) = gh.check_available().await {
        tracing::warn!("gh CLI check failed: {}", e);
    }

    let server = GitHubKanbanServer::with_gateway(&config, gh);

    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

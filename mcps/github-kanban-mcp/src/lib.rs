//! GitHub Kanban MCP Library
//!
//! MCP tools that treat a GitHub repository's issues as a kanban board,
//! driven through the `gh` CLI.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use github_kanban_mcp::GitHubKanbanServer;
//! use mcp_common::EmbeddableMcp;
//!
//! let server = GitHubKanbanServer::new();
//! let result = server
//!     .call_tool("create_issue", serde_json::json!({ "repo": "octo/kanban", "title": "Card" }))
//!     .await?;
//! ```
//!
//! # Tools
//! - `list_issues`, `create_issue`, `update_issue`, `delete_issue`, `add_comment`
//!
//! # Requirements
//! - `gh` CLI installed and authenticated (`gh auth login`)

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gh;
pub mod handlers;
pub mod labels;
pub mod params;
pub mod payload;
pub mod repo;
pub mod server;
pub mod types;

pub use config::Config;
pub use dispatch::{Dispatcher, Operation, OperationRequest};
pub use error::{KanbanError, KanbanResult};
pub use server::GitHubKanbanServer;

// Re-export parameter types for direct API usage
pub use params::*;

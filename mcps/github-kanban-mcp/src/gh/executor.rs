//! The gateway to the tracker
//!
//! [`GhGateway`] is the only seam through which the server reaches GitHub.
//! [`GhCli`] is the production implementation: it spawns the `gh` binary with
//! a structured argument vector and folds every failure into [`GhError`].
//! Tests substitute a recording fake.
//!
//! ```rust,ignore
//! let gh = GhCli::new(&config.github);
//! let url = gh.run(&GhCommand::new(["issue", "create"]).repo(&repo).flag("--title", "T")).await?;
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::command::GhCommand;
use super::error::{GhError, GhResult};
use crate::config::GitHubConfig;

/// Something that can execute gh commands
#[async_trait]
pub trait GhGateway: Send + Sync {
    /// Run `command` and return its trimmed stdout
    ///
    /// A non-zero exit is an error; stdout is opaque to the gateway.
    async fn run(&self, command: &GhCommand) -> GhResult<String>;
}

/// Run `command` and decode its stdout as JSON
pub async fn run_json<T: DeserializeOwned>(
    gateway: &dyn GhGateway,
    command: &GhCommand,
) -> GhResult<T> {
    let stdout = gateway.run(command).await?;
    Ok(serde_json::from_str(&stdout)?)
}

/// Gateway backed by the GitHub CLI binary
#[derive(Debug, Clone)]
pub struct GhCli {
    program: String,
    host: Option<String>,
    token: Option<String>,
}

impl GhCli {
    pub fn new(config: &GitHubConfig) -> Self {
        let host = Some(config.host.clone()).filter(|h| !h.eq_ignore_ascii_case("github.com"));
        Self {
            program: config.gh_path.clone(),
            host,
            token: config.token.clone(),
        }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .env("GH_PROMPT_DISABLED", "1")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref host) = self.host {
            cmd.env("GH_HOST", host);
        }
        if let Some(ref token) = self.token {
            cmd.env("GH_TOKEN", token);
        }
        cmd
    }

    /// Check if gh CLI is available and authenticated
    #[instrument(skip(self))]
    pub async fn check_available(&self) -> GhResult<()> {
        debug!("checking gh availability");

        let output = self
            .command(&["auth".to_string(), "status".to_string()])
            .spawn()
            .map_err(spawn_error)?
            .wait_with_output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            if is_auth_failure(&stderr) {
                return Err(GhError::NotAuthenticated);
            }
        }

        debug!("gh is available and authenticated");
        Ok(())
    }
}

#[async_trait]
impl GhGateway for GhCli {
    #[instrument(skip(self, command), fields(cmd = %command))]
    async fn run(&self, command: &GhCommand) -> GhResult<String> {
        debug!("executing: {}", command);

        let output = self
            .command(command.args())
            .spawn()
            .map_err(spawn_error)?
            .wait_with_output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);

            if is_auth_failure(&stderr) {
                error!("gh authentication required");
                return Err(GhError::NotAuthenticated);
            }

            error!(code, stderr = %stderr, "gh command failed");
            return Err(GhError::CommandFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn spawn_error(e: std::io::Error) -> GhError {
    if e.kind() == std::io::ErrorKind::NotFound {
        GhError::NotFound
    } else {
        GhError::SpawnError(e)
    }
}

fn is_auth_failure(stderr: &str) -> bool {
    stderr.contains("gh auth login") || stderr.contains("not logged in")
}

//! Configuration loading for github-kanban-mcp
//!
//! Sources, lowest to highest precedence:
//! 1. Default values
//! 2. `GITHUB_KANBAN_CONFIG_PATH`, else `~/.binks/github-kanban.toml`
//! 3. Environment variables (`GITHUB_OWNER`, `GITHUB_REPO`, `GH_HOST`,
//!    `GITHUB_TOKEN`/`GH_TOKEN`, `GH_PATH`, `GITHUB_KANBAN_SCRATCH_DIR`,
//!    `GITHUB_KANBAN_LABEL_MODE`)
//!
//! The resulting [`Config`] is built once in `main` and handed to the
//! dispatcher; nothing below the server reads the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub scratch: ScratchConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

/// Tracker connection and default repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Tracker host; also the host expected in `origin` remote URLs
    #[serde(default = "default_host")]
    pub host: String,
    /// Owner used when a call names only a repository, or nothing at all
    #[serde(default)]
    pub owner: Option<String>,
    /// Repository used when a call carries no repository input
    #[serde(default)]
    pub repo: Option<String>,
    /// Forwarded to the CLI as `GH_TOKEN`; `gh` resolves credentials itself
    /// when unset
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// CLI binary name or path
    #[serde(default = "default_gh_path")]
    pub gh_path: String,
}

/// Where temp payload files are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScratchConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default)]
    pub mode: LabelMode,
}

/// How the label ensurer treats a label it fails to create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelMode {
    /// The first failure aborts the operation
    #[default]
    Strict,
    /// Failures are logged and reported; the operation continues
    BestEffort,
}

impl LabelMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "best-effort" | "best_effort" | "besteffort" => Some(Self::BestEffort),
            _ => None,
        }
    }
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_gh_path() -> String {
    "gh".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            owner: None,
            repo: None,
            token: None,
            gh_path: default_gh_path(),
        }
    }
}

impl ScratchConfig {
    /// Configured directory, or `<system temp>/github-kanban-mcp`
    pub fn dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("github-kanban-mcp"))
    }
}

impl Config {
    /// Load the file layer, then apply the process environment on top
    ///
    /// A missing file is not an error. An unreadable or malformed file is
    /// logged and ignored so the server still starts from env alone.
    pub fn load() -> Self {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => match Self::read_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            _ => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn read_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GITHUB_KANBAN_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".binks").join("github-kanban.toml"))
    }

    /// Overlay environment values, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(owner) = non_empty("GITHUB_OWNER") {
            self.github.owner = Some(owner);
        }
        if let Some(repo) = non_empty("GITHUB_REPO") {
            self.github.repo = Some(repo);
        }
        if let Some(host) = non_empty("GH_HOST") {
            self.github.host = host;
        }
        if let Some(token) = non_empty("GITHUB_TOKEN").or_else(|| non_empty("GH_TOKEN")) {
            self.github.token = Some(token);
        }
        if let Some(gh_path) = non_empty("GH_PATH") {
            self.github.gh_path = gh_path;
        }
        if let Some(dir) = non_empty("GITHUB_KANBAN_SCRATCH_DIR") {
            self.scratch.dir = Some(PathBuf::from(dir));
        }
        if let Some(mode) = non_empty("GITHUB_KANBAN_LABEL_MODE") {
            match LabelMode::parse(&mode) {
                Some(mode) => self.labels.mode = mode,
                None => tracing::warn!("Unknown GITHUB_KANBAN_LABEL_MODE '{}', keeping {:?}", mode, self.labels.mode),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.host, "github.com");
        assert_eq!(config.github.gh_path, "gh");
        assert_eq!(config.labels.mode, LabelMode::Strict);
        assert!(config.scratch.dir().ends_with("github-kanban-mcp"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: Config = toml::from_str(
            r#"
            [github]
            owner = "from-file"
            host = "ghe.example.com"

            [labels]
            mode = "best-effort"
            "#,
        )
        .unwrap();
        assert_eq!(config.labels.mode, LabelMode::BestEffort);

        config.apply_env(env(&[
            ("GITHUB_OWNER", "from-env"),
            ("GITHUB_TOKEN", "ghp_secret"),
            ("GITHUB_KANBAN_LABEL_MODE", "strict"),
        ]));

        assert_eq!(config.github.owner.as_deref(), Some("from-env"));
        assert_eq!(config.github.host, "ghe.example.com");
        assert_eq!(config.github.token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.labels.mode, LabelMode::Strict);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[("GITHUB_OWNER", "  "), ("GH_HOST", "")]));
        assert!(config.github.owner.is_none());
        assert_eq!(config.github.host, "github.com");
    }

    #[test]
    fn test_unknown_label_mode_keeps_current() {
        let mut config = Config::default();
        config.apply_env(env(&[("GITHUB_KANBAN_LABEL_MODE", "sometimes")]));
        assert_eq!(config.labels.mode, LabelMode::Strict);
    }

    #[test]
    fn test_token_is_not_serialized() {
        let mut config = Config::default();
        config.github.token = Some("ghp_secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("ghp_secret"));
    }
}

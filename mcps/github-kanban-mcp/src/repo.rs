//! Repository identity resolution
//!
//! Decides which `owner/name` a tool call targets. Explicit input always wins
//! over discovery, and discovery only reads the working copy's git metadata:
//! nothing here touches the network.
//!
//! Order:
//! 1. `owner` + `repo`
//! 2. `repo` as `owner/name`, or a bare `repo` with the configured owner
//! 3. `path` to a working copy, via its `origin` remote
//! 4. the configured default repository

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::config::GitHubConfig;

/// A tracker-hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Build a ref, validating both halves as slugs
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, IdentityError> {
        let owner = owner.into();
        let name = name.into();
        validate_slug("owner", &owner)?;
        validate_slug("repo", &name)?;
        Ok(Self { owner, name })
    }

    /// Parse `owner/name`, splitting on the first `/`
    pub fn parse(slug: &str) -> Result<Self, IdentityError> {
        match slug.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Self::new(owner, name),
            _ => Err(IdentityError::MalformedSlug(slug.to_string())),
        }
    }

    /// `owner/name`, the form `gh -R` expects
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn validate_slug(field: &'static str, value: &str) -> Result<(), IdentityError> {
    if value.is_empty() {
        return Err(IdentityError::EmptyField(field));
    }
    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(IdentityError::InvalidSlug {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Why a repository could not be identified
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid {field} '{value}': must not contain '/' or whitespace")]
    InvalidSlug { field: &'static str, value: String },

    #[error("repository '{0}' is not in OWNER/REPO format")]
    MalformedSlug(String),

    #[error("path '{}' is not a git repository (no .git found)", .0.display())]
    NotARepository(PathBuf),

    #[error("git remote 'origin' is not configured for '{}'; add one with `git remote add origin <url>`", .0.display())]
    NoOriginRemote(PathBuf),

    #[error("unrecognized remote URL format for host {host}: {url}")]
    UnrecognizedUrl { host: String, url: String },

    #[error("failed to read git metadata at '{}': {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("repository is required: pass owner and repo, repo as OWNER/REPO, or path to a local clone")]
    InsufficientInput,
}

impl IdentityError {
    /// Discovery failures are about the caller's environment, not argument
    /// shape; they are reported as invalid requests.
    pub fn is_discovery(&self) -> bool {
        matches!(
            self,
            Self::NotARepository(_)
                | Self::NoOriginRemote(_)
                | Self::UnrecognizedUrl { .. }
                | Self::Metadata { .. }
        )
    }
}

/// The repository fields of one tool call
#[derive(Debug, Clone, Default)]
pub struct RepoInput<'a> {
    pub owner: Option<&'a str>,
    pub repo: Option<&'a str>,
    pub path: Option<&'a str>,
}

/// Resolves [`RepoInput`] into a [`RepositoryRef`]
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    host: String,
    default_owner: Option<String>,
    default_repo: Option<String>,
}

/// `<host>[/:]<owner>/<name>[.git][/]` anchored at the end of the URL
static REMOTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[@/])(?P<host>[^/:@\s]+)[/:](?P<owner>[^/:\s]+)/(?P<name>[^/\s]+?)(?:\.git)?/?$",
    )
    .expect("remote URL pattern is valid")
});

impl IdentityResolver {
    pub fn new(config: &GitHubConfig) -> Self {
        Self {
            host: config.host.trim().to_string(),
            default_owner: config.owner.clone(),
            default_repo: config.repo.clone(),
        }
    }

    pub fn resolve(&self, input: &RepoInput<'_>) -> Result<RepositoryRef, IdentityError> {
        // An empty string counts as present: a caller who sends owner="" made
        // a mistake that should surface, not silently fall through.
        match (input.owner, input.repo) {
            (Some(owner), Some(repo)) => return RepositoryRef::new(owner.trim(), repo.trim()),
            (None, Some(repo)) => return self.from_repo_only(repo.trim()),
            _ => {}
        }

        if let Some(path) = input.path {
            return self.discover(Path::new(path));
        }

        self.from_defaults(input.owner)
    }

    fn from_repo_only(&self, repo: &str) -> Result<RepositoryRef, IdentityError> {
        if repo.contains('/') {
            return RepositoryRef::parse(repo);
        }
        match &self.default_owner {
            Some(owner) => RepositoryRef::new(owner.clone(), repo),
            None => Err(IdentityError::MalformedSlug(repo.to_string())),
        }
    }

    fn from_defaults(&self, owner: Option<&str>) -> Result<RepositoryRef, IdentityError> {
        let repo = self
            .default_repo
            .as_deref()
            .ok_or(IdentityError::InsufficientInput)?;
        let (default_owner, name) = match repo.split_once('/') {
            Some((owner, name)) => (Some(owner), name),
            None => (self.default_owner.as_deref(), repo),
        };
        let owner = owner
            .or(default_owner)
            .ok_or(IdentityError::InsufficientInput)?;
        RepositoryRef::new(owner.trim(), name)
    }

    /// Read `<path>/.git/config` and parse the `origin` remote URL
    pub fn discover(&self, path: &Path) -> Result<RepositoryRef, IdentityError> {
        let git_dir = locate_git_dir(path)?;
        let config_path = git_dir.join("config");
        debug!(config = %config_path.display(), "reading git metadata");

        let content =
            std::fs::read_to_string(&config_path).map_err(|source| IdentityError::Metadata {
                path: config_path.clone(),
                source,
            })?;

        let url = origin_url(&content)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| IdentityError::NoOriginRemote(path.to_path_buf()))?;

        self.parse_remote_url(&url)
    }

    /// Extract `owner/name` from a remote URL on the configured host
    pub fn parse_remote_url(&self, url: &str) -> Result<RepositoryRef, IdentityError> {
        let unrecognized = || IdentityError::UnrecognizedUrl {
            host: self.host.clone(),
            url: url.to_string(),
        };
        let captures = REMOTE_URL.captures(url.trim()).ok_or_else(unrecognized)?;
        if !captures["host"].eq_ignore_ascii_case(&self.host) {
            return Err(unrecognized());
        }
        RepositoryRef::new(&captures["owner"], &captures["name"]).map_err(|_| unrecognized())
    }
}

/// Find the metadata directory, following a `gitdir:` pointer file
fn locate_git_dir(path: &Path) -> Result<PathBuf, IdentityError> {
    let dot_git = path.join(".git");
    if dot_git.is_dir() {
        return Ok(dot_git);
    }
    if dot_git.is_file() {
        let pointer = std::fs::read_to_string(&dot_git).map_err(|source| IdentityError::Metadata {
            path: dot_git.clone(),
            source,
        })?;
        if let Some(target) = pointer.trim().strip_prefix("gitdir:") {
            let target = PathBuf::from(target.trim());
            let resolved = if target.is_absolute() {
                target
            } else {
                path.join(target)
            };
            // Worktrees keep `config` in the common dir
            let common = resolved.join("commondir");
            if let Ok(rel) = std::fs::read_to_string(&common) {
                return Ok(resolved.join(rel.trim()));
            }
            return Ok(resolved);
        }
    }
    Err(IdentityError::NotARepository(path.to_path_buf()))
}

/// `url` of the `[remote "origin"]` section of a git config file
pub fn origin_url(config: &str) -> Option<String> {
    let mut in_origin = false;
    for line in config.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_origin = is_origin_header(line);
            continue;
        }
        if !in_origin || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            if key.trim().eq_ignore_ascii_case("url") {
                return Some(value.trim().trim_matches('"').to_string());
            }
        }
    }
    None
}

fn is_origin_header(line: &str) -> bool {
    let inner = line.trim_start_matches('[').trim_end_matches(']').trim();
    match inner.split_once(char::is_whitespace) {
        Some((section, name)) => {
            section.eq_ignore_ascii_case("remote") && name.trim().trim_matches('"') == "origin"
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IdentityResolver {
        IdentityResolver::new(&GitHubConfig::default())
    }

    fn write_git_config(dir: &Path, body: &str) {
        std::fs::create_dir_all(dir.join(".git")).unwrap();
        std::fs::write(dir.join(".git").join("config"), body).unwrap();
    }

    #[test]
    fn test_explicit_owner_and_repo() {
        let input = RepoInput {
            owner: Some("octo"),
            repo: Some("kanban"),
            path: None,
        };
        let repo = resolver().resolve(&input).unwrap();
        assert_eq!(repo.slug(), "octo/kanban");
    }

    #[test]
    fn test_explicit_empty_owner_fails() {
        let input = RepoInput {
            owner: Some(""),
            repo: Some("kanban"),
            path: None,
        };
        assert!(matches!(
            resolver().resolve(&input),
            Err(IdentityError::EmptyField("owner"))
        ));
    }

    #[test]
    fn test_combined_repo_string() {
        let input = RepoInput {
            repo: Some("octo/kanban"),
            ..Default::default()
        };
        assert_eq!(resolver().resolve(&input).unwrap().slug(), "octo/kanban");
    }

    #[test]
    fn test_combined_repo_string_rejects_extra_segments() {
        for bad in ["octo/kan/ban", "/kanban", "octo/", "octo kanban/x"] {
            let input = RepoInput {
                repo: Some(bad),
                ..Default::default()
            };
            assert!(resolver().resolve(&input).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_bare_repo_uses_default_owner() {
        let config = GitHubConfig {
            owner: Some("octo".to_string()),
            ..Default::default()
        };
        let input = RepoInput {
            repo: Some("kanban"),
            ..Default::default()
        };
        let repo = IdentityResolver::new(&config).resolve(&input).unwrap();
        assert_eq!(repo.slug(), "octo/kanban");
    }

    #[test]
    fn test_bare_repo_without_default_owner_fails() {
        let input = RepoInput {
            repo: Some("kanban"),
            ..Default::default()
        };
        assert!(matches!(
            resolver().resolve(&input),
            Err(IdentityError::MalformedSlug(_))
        ));
    }

    #[test]
    fn test_configured_default_repository() {
        let config = GitHubConfig {
            repo: Some("octo/board".to_string()),
            ..Default::default()
        };
        let repo = IdentityResolver::new(&config)
            .resolve(&RepoInput::default())
            .unwrap();
        assert_eq!(repo.slug(), "octo/board");
    }

    #[test]
    fn test_nothing_to_go_on() {
        assert!(matches!(
            resolver().resolve(&RepoInput::default()),
            Err(IdentityError::InsufficientInput)
        ));
    }

    #[test]
    fn test_discover_https_remote() {
        let dir = tempfile::tempdir().unwrap();
        write_git_config(
            dir.path(),
            "[core]\n\tbare = false\n[remote \"origin\"]\n\turl = https://github.com/octo/kanban.git\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n",
        );
        let input = RepoInput {
            path: dir.path().to_str(),
            ..Default::default()
        };
        assert_eq!(resolver().resolve(&input).unwrap().slug(), "octo/kanban");
    }

    #[test]
    fn test_explicit_input_beats_path() {
        // The path is not even a repository; it must never be read
        let dir = tempfile::tempdir().unwrap();
        let input = RepoInput {
            owner: Some("octo"),
            repo: Some("kanban"),
            path: dir.path().to_str(),
        };
        assert_eq!(resolver().resolve(&input).unwrap().slug(), "octo/kanban");
    }

    #[test]
    fn test_discover_not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolver().discover(dir.path()).unwrap_err();
        assert!(matches!(err, IdentityError::NotARepository(_)));
        assert!(err.is_discovery());
    }

    #[test]
    fn test_discover_without_origin() {
        let dir = tempfile::tempdir().unwrap();
        write_git_config(
            dir.path(),
            "[remote \"upstream\"]\n\turl = git@github.com:octo/kanban.git\n",
        );
        assert!(matches!(
            resolver().discover(dir.path()),
            Err(IdentityError::NoOriginRemote(_))
        ));
    }

    #[test]
    fn test_discover_follows_gitdir_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real-git");
        std::fs::create_dir_all(&real).unwrap();
        std::fs::write(
            real.join("config"),
            "[remote \"origin\"]\n\turl = git@github.com:octo/kanban.git\n",
        )
        .unwrap();
        let checkout = dir.path().join("checkout");
        std::fs::create_dir_all(&checkout).unwrap();
        std::fs::write(
            checkout.join(".git"),
            format!("gitdir: {}\n", real.display()),
        )
        .unwrap();

        assert_eq!(resolver().discover(&checkout).unwrap().slug(), "octo/kanban");
    }

    #[test]
    fn test_discover_worktree_reads_common_dir() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main");
        write_git_config(
            &main,
            "[remote \"origin\"]\n\turl = https://github.com/octo/kanban.git\n",
        );
        let worktree_meta = main.join(".git").join("worktrees").join("feature");
        std::fs::create_dir_all(&worktree_meta).unwrap();
        std::fs::write(worktree_meta.join("commondir"), "../..\n").unwrap();
        // Decoy: a worktree's own dir is never the source of the remote
        std::fs::write(
            worktree_meta.join("config"),
            "[remote \"origin\"]\n\turl = https://github.com/decoy/wrong.git\n",
        )
        .unwrap();

        let feature = dir.path().join("feature");
        std::fs::create_dir_all(&feature).unwrap();
        std::fs::write(
            feature.join(".git"),
            "gitdir: ../main/.git/worktrees/feature\n",
        )
        .unwrap();

        assert_eq!(resolver().discover(&feature).unwrap().slug(), "octo/kanban");
    }

    #[test]
    fn test_parse_remote_url_variants() {
        let r = resolver();
        for url in [
            "https://github.com/octo/kanban.git",
            "https://github.com/octo/kanban",
            "git@github.com:octo/kanban.git",
            "ssh://git@github.com/octo/kanban.git",
            "https://token@github.com/octo/kanban.git",
        ] {
            assert_eq!(r.parse_remote_url(url).unwrap().slug(), "octo/kanban", "{url}");
        }
    }

    #[test]
    fn test_parse_remote_url_rejects_other_hosts() {
        let err = resolver()
            .parse_remote_url("https://gitlab.com/octo/kanban.git")
            .unwrap_err();
        assert!(matches!(err, IdentityError::UnrecognizedUrl { .. }));
        assert!(err.to_string().contains("gitlab.com"));
    }

    #[test]
    fn test_parse_remote_url_enterprise_host() {
        let config = GitHubConfig {
            host: "ghe.example.com".to_string(),
            ..Default::default()
        };
        let r = IdentityResolver::new(&config);
        assert_eq!(
            r.parse_remote_url("git@ghe.example.com:team/board.git")
                .unwrap()
                .slug(),
            "team/board"
        );
        assert!(r.parse_remote_url("git@github.com:team/board.git").is_err());
    }

    #[test]
    fn test_origin_url_stops_at_next_section() {
        let config = "[remote \"origin\"]\n\tfetch = x\n[branch \"main\"]\n\turl = nope\n";
        assert_eq!(origin_url(config), None);
    }
}

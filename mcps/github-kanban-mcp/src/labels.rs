//! Label ensurer
//!
//! gh refuses to apply a label that does not exist in the repository, so
//! before creating or editing an issue with labels every missing label is
//! created with a random color. Existing labels are never touched.
//!
//! Check-then-create: one `gh label list`, then one `gh label create` per
//! missing name. A create that loses a race ("already exists") counts as
//! success.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LabelMode;
use crate::gh::{run_json, GhCommand, GhError, GhGateway, GhResult};
use crate::repo::RepositoryRef;
use crate::types::LabelRef;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Upper bound on labels fetched when checking what exists
const LABEL_LIST_LIMIT: &str = "1000";

/// Six uniformly random uppercase hex digits, no `#`
pub fn random_color() -> String {
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect()
}

/// What one `ensure` call did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnsureReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
    pub failed: Vec<String>,
}

impl EnsureReport {
    /// `labels` without the ones that could not be created
    pub fn usable(&self, labels: Vec<String>) -> Vec<String> {
        labels
            .into_iter()
            .filter(|l| !self.failed.iter().any(|f| f.eq_ignore_ascii_case(l.trim())))
            .collect()
    }
}

pub struct LabelEnsurer<'a> {
    gateway: &'a dyn GhGateway,
    mode: LabelMode,
}

impl<'a> LabelEnsurer<'a> {
    pub fn new(gateway: &'a dyn GhGateway, mode: LabelMode) -> Self {
        Self { gateway, mode }
    }

    /// Make sure every label in `desired` exists in `repo`
    ///
    /// In [`LabelMode::Strict`] the first failure is returned. In
    /// [`LabelMode::BestEffort`] failures are logged and listed in the report.
    pub async fn ensure(&self, repo: &RepositoryRef, desired: &[String]) -> GhResult<EnsureReport> {
        let mut report = EnsureReport::default();
        if desired.is_empty() {
            return Ok(report);
        }

        let existing = self.existing_labels(repo).await?;

        for name in dedup(desired) {
            if existing.iter().any(|e| e.eq_ignore_ascii_case(name)) {
                report.existing.push(name.to_string());
                continue;
            }

            match self.create(repo, name).await {
                Ok(()) => report.created.push(name.to_string()),
                Err(e) if e.is_already_exists() => {
                    debug!(label = name, "label appeared concurrently");
                    report.existing.push(name.to_string());
                }
                Err(e) => match self.mode {
                    LabelMode::Strict => return Err(e),
                    LabelMode::BestEffort => {
                        warn!(label = name, error = %e, "failed to create label");
                        report.failed.push(name.to_string());
                    }
                },
            }
        }

        Ok(report)
    }

    async fn existing_labels(&self, repo: &RepositoryRef) -> GhResult<Vec<String>> {
        let cmd = GhCommand::new(["label", "list"])
            .repo(repo)
            .flag("--limit", LABEL_LIST_LIMIT)
            .json_fields(&["name"]);

        match run_json::<Vec<LabelRef>>(self.gateway, &cmd).await {
            Ok(labels) => Ok(labels.into_iter().map(|l| l.name).collect()),
            Err(e @ GhError::NotAuthenticated) | Err(e @ GhError::NotFound) => Err(e),
            Err(e) if self.mode == LabelMode::Strict => Err(e),
            Err(e) => {
                // Without the list every label is attempted; creates that hit
                // an existing label are tolerated anyway.
                warn!(repo = %repo, error = %e, "failed to list labels");
                Ok(Vec::new())
            }
        }
    }

    async fn create(&self, repo: &RepositoryRef, name: &str) -> GhResult<()> {
        let color = random_color();
        // Name goes after `--` so one starting with `-` is not read as a flag
        let cmd = GhCommand::new(["label", "create"])
            .repo(repo)
            .flag("--color", color.as_str())
            .arg("--")
            .arg(name);
        self.gateway.run(&cmd).await?;
        info!(repo = %repo, label = name, color = %color, "label created");
        Ok(())
    }
}

/// Trimmed, non-empty, first occurrence wins
fn dedup(labels: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(labels.len());
    for label in labels.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(label)) {
            seen.push(label);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers `label list` from a fixed set and records creates
    struct LabelStub {
        existing: Vec<&'static str>,
        fail_create: Option<&'static str>,
        creates: Mutex<Vec<(String, String)>>,
        last_create: Mutex<Vec<String>>,
    }

    impl LabelStub {
        fn new(existing: Vec<&'static str>) -> Self {
            Self {
                existing,
                fail_create: None,
                creates: Mutex::new(Vec::new()),
                last_create: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GhGateway for LabelStub {
        async fn run(&self, command: &GhCommand) -> GhResult<String> {
            if command.is(&["label", "list"]) {
                let labels: Vec<_> = self
                    .existing
                    .iter()
                    .map(|n| serde_json::json!({ "name": n }))
                    .collect();
                return Ok(serde_json::to_string(&labels)?);
            }
            *self.last_create.lock().unwrap() = command.args().to_vec();
            let name = command.args().last().cloned().unwrap_or_default();
            let color = command.value_of("--color").unwrap_or_default().to_string();
            if self.fail_create == Some(name.as_str()) {
                return Err(GhError::CommandFailed {
                    code: 1,
                    stderr: "HTTP 422: Validation Failed".to_string(),
                });
            }
            self.creates.lock().unwrap().push((name, color));
            Ok(String::new())
        }
    }

    fn repo() -> RepositoryRef {
        RepositoryRef::new("octo", "kanban").unwrap()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_random_color_format() {
        for _ in 0..500 {
            let color = random_color();
            assert_eq!(color.len(), 6);
            assert!(color
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[tokio::test]
    async fn test_creates_only_missing_labels() {
        let stub = LabelStub::new(vec!["bug"]);
        let ensurer = LabelEnsurer::new(&stub, LabelMode::Strict);

        let report = ensurer
            .ensure(&repo(), &labels(&["bug", "todo", "Todo", " "]))
            .await
            .unwrap();

        assert_eq!(report.existing, vec!["bug"]);
        assert_eq!(report.created, vec!["todo"]);
        let creates = stub.creates.lock().unwrap();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].0, "todo");
        assert_eq!(creates[0].1.len(), 6);
    }

    #[tokio::test]
    async fn test_nothing_to_do_makes_no_calls() {
        let stub = LabelStub::new(vec![]);
        let report = LabelEnsurer::new(&stub, LabelMode::Strict)
            .ensure(&repo(), &[])
            .await
            .unwrap();
        assert_eq!(report, EnsureReport::default());
    }

    #[tokio::test]
    async fn test_strict_mode_raises() {
        let mut stub = LabelStub::new(vec![]);
        stub.fail_create = Some("broken");
        let result = LabelEnsurer::new(&stub, LabelMode::Strict)
            .ensure(&repo(), &labels(&["broken", "fine"]))
            .await;
        assert!(matches!(result, Err(GhError::CommandFailed { .. })));
    }

    #[tokio::test]
    async fn test_best_effort_mode_records_and_continues() {
        let mut stub = LabelStub::new(vec![]);
        stub.fail_create = Some("broken");
        let report = LabelEnsurer::new(&stub, LabelMode::BestEffort)
            .ensure(&repo(), &labels(&["broken", "fine"]))
            .await
            .unwrap();
        assert_eq!(report.failed, vec!["broken"]);
        assert_eq!(report.created, vec!["fine"]);
        assert_eq!(
            report.usable(labels(&["Broken", "fine", "bug"])),
            vec!["fine", "bug"]
        );
    }

    #[tokio::test]
    async fn test_dash_prefixed_name_follows_separator() {
        let stub = LabelStub::new(vec![]);
        LabelEnsurer::new(&stub, LabelMode::Strict)
            .ensure(&repo(), &labels(&["-wip"]))
            .await
            .unwrap();

        let argv = stub.last_create.lock().unwrap().clone();
        assert_eq!(&argv[..2], ["label", "create"]);
        assert_eq!(&argv[argv.len() - 2..], ["--", "-wip"]);
    }
}

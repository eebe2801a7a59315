//! Argument-vector construction for gh invocations
//!
//! User text (titles, label names, assignees) is only ever placed as a
//! separate argv element. Nothing is joined into a shell string, so quotes,
//! backticks and `$()` in a title reach GitHub unchanged.

use std::fmt;
use std::path::Path;

use crate::repo::RepositoryRef;

/// One gh invocation, as an ordered argument vector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GhCommand {
    args: Vec<String>,
}

impl GhCommand {
    /// Start from subcommand words, e.g. `["issue", "list"]`
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Positional argument
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// `-R owner/name`
    pub fn repo(self, repo: &RepositoryRef) -> Self {
        self.flag("-R", repo.slug())
    }

    /// `<flag> <value>`
    pub fn flag(mut self, flag: &str, value: impl Into<String>) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.into());
        self
    }

    /// `<flag> <value>` when the value is present
    pub fn flag_opt(self, flag: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.flag(flag, value),
            None => self,
        }
    }

    /// `<flag> <v>` once per value; gh treats repeated list flags as a union
    pub fn flag_each<I, S>(mut self, flag: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.args.push(flag.to_string());
            self.args.push(value.into());
        }
        self
    }

    /// `--body-file <path>`
    pub fn body_file(self, path: &Path) -> Self {
        self.flag("--body-file", path.display().to_string())
    }

    /// Bare switch such as `--yes`
    pub fn switch(mut self, flag: &str) -> Self {
        self.args.push(flag.to_string());
        self
    }

    /// `--json a,b,c`
    pub fn json_fields(self, fields: &[&str]) -> Self {
        self.flag("--json", fields.join(","))
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the command starts with these subcommand words
    pub fn is(&self, words: &[&str]) -> bool {
        self.args.len() >= words.len() && self.args.iter().zip(words).all(|(a, w)| a == w)
    }

    /// Value following `flag`, if present
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Every value following a repeated `flag`
    pub fn values_of(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }
}

impl fmt::Display for GhCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gh {}", self.args.join(" "))
    }
}

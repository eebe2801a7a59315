//! Temp payload files for multi-line bodies
//!
//! Issue and comment bodies go to gh through `--body-file`, never through an
//! argument, so markdown with quotes, backticks or newlines survives intact.
//!
//! A [`TempPayload`] owns its file: dropping it deletes the file, so every
//! exit path of a handler (success, `?` on a gateway error, early return)
//! releases it. Deletion errors are logged and swallowed.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{debug, warn};

/// Creates temp payloads under one scratch directory
#[derive(Debug, Clone)]
pub struct PayloadChannel {
    dir: PathBuf,
}

impl PayloadChannel {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` verbatim to a fresh, uniquely named file
    ///
    /// The scratch directory is created on first use. Names are random, so
    /// concurrent calls sharing the directory never collide.
    pub fn acquire(&self, prefix: &str, content: &str) -> std::io::Result<TempPayload> {
        std::fs::create_dir_all(&self.dir)?;

        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".md")
            .tempfile_in(&self.dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        let path = file.into_temp_path();
        debug!(path = %path.display(), bytes = content.len(), "temp payload written");
        Ok(TempPayload { path: Some(path) })
    }
}

/// A body file that lives until it is released or dropped
#[derive(Debug)]
pub struct TempPayload {
    path: Option<TempPath>,
}

impl TempPayload {
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Delete the file now instead of at end of scope
    pub fn release(mut self) {
        self.delete();
    }

    fn delete(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.to_path_buf();
            match path.close() {
                Ok(()) => debug!(path = %shown.display(), "temp payload released"),
                Err(e) => warn!(path = %shown.display(), error = %e, "failed to remove temp payload"),
            }
        }
    }
}

impl Drop for TempPayload {
    fn drop(&mut self) {
        self.delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_writes_content_verbatim() {
        let scratch = tempfile::tempdir().unwrap();
        let channel = PayloadChannel::new(scratch.path().join("nested"));
        let body = "## Steps\n\n1. run `echo \"$HOME\"`\n2. see 'quotes'\n";

        let payload = channel.acquire("issue_body_", body).unwrap();
        assert!(payload.path().starts_with(channel.dir()));
        assert_eq!(std::fs::read_to_string(payload.path()).unwrap(), body);
    }

    #[test]
    fn test_release_deletes_file() {
        let scratch = tempfile::tempdir().unwrap();
        let channel = PayloadChannel::new(scratch.path());

        let payload = channel.acquire("comment_body_", "hi").unwrap();
        let path = payload.path().to_path_buf();
        payload.release();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_deletes_file() {
        let scratch = tempfile::tempdir().unwrap();
        let channel = PayloadChannel::new(scratch.path());

        let path = {
            let payload = channel.acquire("update_body_", "hi").unwrap();
            payload.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_at_release_is_not_an_error() {
        let scratch = tempfile::tempdir().unwrap();
        let channel = PayloadChannel::new(scratch.path());

        let payload = channel.acquire("issue_body_", "hi").unwrap();
        std::fs::remove_file(payload.path()).unwrap();
        payload.release();
    }

    #[test]
    fn test_concurrent_payloads_get_distinct_paths() {
        let scratch = tempfile::tempdir().unwrap();
        let channel = PayloadChannel::new(scratch.path());

        let a = channel.acquire("issue_body_", "a").unwrap();
        let b = channel.acquire("issue_body_", "b").unwrap();
        assert_ne!(a.path(), b.path());
    }
}

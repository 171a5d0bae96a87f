//! SCM (Source Control Management) abstraction layer.
//!
//! The journal repository is driven through the git CLI.

mod git;

use anyhow::{anyhow, Result};
use std::path::Path;
use std::process::Command;

pub use git::GitScm;

/// Trait for source control operations used by the journal bot.
pub trait Scm {
    /// Root of the working tree.
    fn workdir(&self) -> &Path;

    /// Point HEAD at `branch` (used before the first commit of a fresh repository).
    fn set_head_branch(&self, branch: &str) -> Result<()>;

    /// Set a key in the repository-local config.
    fn set_config(&self, key: &str, value: &str) -> Result<()>;

    /// Get the current commit hash.
    fn current_commit_hash(&self) -> Result<String>;

    /// Stage a single path, relative to the working tree.
    fn stage_path(&self, path: &Path) -> Result<()>;

    /// Check whether anything is staged for the next commit.
    fn has_staged_changes(&self) -> Result<bool>;

    /// Commit staged changes with a message.
    fn commit(&self, message: &str) -> Result<()>;

    /// Check if a remote exists.
    fn has_remote(&self, name: &str) -> bool;

    /// Push a branch to a remote repository.
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Check if a directory is a Git repository.
pub fn is_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Check whether the git executable can be run.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Open an existing Git repository.
pub fn open(path: &Path) -> Result<Box<dyn Scm>> {
    if is_repo(path) {
        Ok(Box::new(GitScm::open(path)?))
    } else {
        Err(anyhow!(
            "No Git repository found at '{}'. Expected .git directory.",
            path.display()
        ))
    }
}

/// Initialize a new Git repository.
pub fn init(path: &Path) -> Result<Box<dyn Scm>> {
    Ok(Box::new(GitScm::init(path)?))
}

//! Stage, commit and push a journal entry.

use std::path::{Path, PathBuf};

use crate::entry::EntryDate;
use crate::error::{JournalError, Result};
use crate::scm::Scm;

/// Where a successful publish ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Committed and pushed to the remote
    Pushed,
    /// Committed locally; no remote is configured
    Committed,
}

/// Remote and branch a commit is pushed to.
#[derive(Debug, Clone)]
pub struct PushTarget {
    pub remote: String,
    pub branch: String,
}

impl Default for PushTarget {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Commit message for the entry of `date`
pub fn commit_message(date: &EntryDate) -> String {
    format!("Add journal entry for {}", date.date_str())
}

fn relative_to_workdir(repo: &dyn Scm, entry_path: &Path) -> Result<PathBuf> {
    let entry = entry_path
        .canonicalize()
        .unwrap_or_else(|_| entry_path.to_path_buf());

    entry
        .strip_prefix(repo.workdir())
        .map(Path::to_path_buf)
        .map_err(|_| JournalError::EntryOutsideRepo(entry_path.to_path_buf()))
}

/// Commit the entry at `entry_path` and push it when the remote exists.
///
/// Returns [`JournalError::NoChanges`] without committing when staging the
/// entry leaves nothing to commit.
pub fn publish(
    repo: &dyn Scm,
    entry_path: &Path,
    target: &PushTarget,
    date: &EntryDate,
) -> Result<PublishOutcome> {
    let relative_path = relative_to_workdir(repo, entry_path)?;

    repo.stage_path(&relative_path)
        .map_err(|e| JournalError::Git(format!("{e:#}")))?;

    let staged = repo
        .has_staged_changes()
        .map_err(|e| JournalError::Git(format!("{e:#}")))?;
    if !staged {
        log::info!("No changes to commit");
        return Err(JournalError::NoChanges);
    }

    let message = commit_message(date);
    repo.commit(&message)
        .map_err(|e| JournalError::Git(format!("{e:#}")))?;

    if let Ok(hash) = repo.current_commit_hash() {
        log::debug!("Committed {} as {}", relative_path.display(), &hash[..hash.len().min(8)]);
    }

    if repo.has_remote(&target.remote) {
        log::info!("Pushing changes to remote repository...");
        repo.push(&target.remote, &target.branch)
            .map_err(|e| JournalError::Push(format!("{e:#}")))?;
        Ok(PublishOutcome::Pushed)
    } else {
        log::info!("No remote repository configured. Skipping push.");
        log::info!(
            "To push manually, set up a remote repository and run: git push -u {} {}",
            target.remote,
            target.branch
        );
        Ok(PublishOutcome::Committed)
    }
}

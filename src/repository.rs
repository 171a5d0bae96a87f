//! Journal repository setup.

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::config::Identity;
use crate::error::{JournalError, Result};
use crate::scm::{self, Scm};

/// README written into a freshly initialized journal repository
pub const README_CONTENT: &str = "# Daily Journal\n\nThis repository contains my daily journal entries, automatically committed by my journal bot.";

const INITIAL_COMMIT_MESSAGE: &str = "Initial commit: Add README";

/// Open the journal repository at `path`, creating it on first use.
///
/// A fresh repository gets HEAD pointed at `branch`, the local identity, and
/// an initial commit containing `README.md`. An existing README is committed
/// as-is. An existing repository is opened without modification.
pub fn ensure_repository(path: &Path, identity: &Identity, branch: &str) -> Result<Box<dyn Scm>> {
    let result = if scm::is_repo(path) {
        scm::open(path)
    } else {
        initialize(path, identity, branch)
    };

    result.map_err(|e| JournalError::RepoInit(format!("{e:#}")))
}

fn initialize(path: &Path, identity: &Identity, branch: &str) -> anyhow::Result<Box<dyn Scm>> {
    log::info!("Initializing git repository at {}...", path.display());

    let repo = scm::init(path)?;
    repo.set_head_branch(branch)?;
    repo.set_config("user.name", &identity.name)?;
    repo.set_config("user.email", &identity.email)?;

    let readme_path = repo.workdir().join("README.md");
    if !readme_path.exists() {
        fs::write(&readme_path, README_CONTENT)
            .with_context(|| format!("Failed to write {}", readme_path.display()))?;
    }

    repo.stage_path(Path::new("README.md"))?;
    repo.commit(INITIAL_COMMIT_MESSAGE)?;
    log::info!("Created README and made initial commit");

    Ok(repo)
}

use chrono::{DateTime, Local};
use std::path::PathBuf;

use crate::config::JournalConfig;
use crate::entry::{EntryComposer, EntryDate};
use crate::error::Result;
use crate::prompts::PromptProvider;
use crate::publisher::{self, PublishOutcome, PushTarget};
use crate::repository;

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub entry_path: PathBuf,
    pub date: String,
    pub publish: PublishOutcome,
}

/// Runs the repository → entry → commit pipeline for one day.
pub struct JournalBot {
    config: JournalConfig,
}

impl JournalBot {
    pub fn new(config: JournalConfig) -> Self {
        Self { config }
    }

    fn push_target(&self) -> PushTarget {
        PushTarget {
            remote: self.config.remote.clone(),
            branch: self.config.branch.clone(),
        }
    }

    /// Ensure the repository exists without writing an entry.
    pub fn init_only(&self) -> Result<PathBuf> {
        let repo = repository::ensure_repository(
            &self.config.repo_path,
            &self.config.identity,
            &self.config.branch,
        )?;
        Ok(repo.workdir().to_path_buf())
    }

    /// Run the full pipeline with the current local time.
    pub fn run(&self, provider: &mut dyn PromptProvider) -> Result<RunOutcome> {
        self.run_at(provider, Local::now())
    }

    /// Run the full pipeline as if it were `now`.
    pub fn run_at(
        &self,
        provider: &mut dyn PromptProvider,
        now: DateTime<Local>,
    ) -> Result<RunOutcome> {
        let repo = repository::ensure_repository(
            &self.config.repo_path,
            &self.config.identity,
            &self.config.branch,
        )?;
        log::debug!("Repository ready at {}", repo.workdir().display());

        if self.config.access_token.is_some() {
            log::debug!("Access token loaded; pushing with local git credentials");
        }

        let entry_path = EntryComposer::new(repo.workdir(), provider).compose(now)?;
        let date = EntryDate::new(now.date_naive());

        let publish = publisher::publish(repo.as_ref(), &entry_path, &self.push_target(), &date)?;
        log::info!(
            "Successfully committed journal entry for {}",
            date.date_str()
        );

        Ok(RunOutcome {
            entry_path,
            date: date.date_str(),
            publish,
        })
    }
}

/// How a logged run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// Today's entry was already committed
    NothingToDo,
    Failed,
}

/// Run the bot once and log the outcome.
///
/// "No changes" is logged at info level; every other error is logged at
/// error level with its message. Nothing is propagated to the caller.
pub fn run_with_status(config: JournalConfig, provider: &mut dyn PromptProvider) -> RunStatus {
    log::info!("Running journal bot...");
    report(JournalBot::new(config).run(provider))
}

fn report(result: Result<RunOutcome>) -> RunStatus {
    match result {
        Ok(_) => {
            log::info!("Journal bot completed successfully!");
            RunStatus::Completed
        }
        Err(e) if e.is_no_changes() => {
            log::info!("Journal entry is already committed; nothing to do.");
            RunStatus::NothingToDo
        }
        Err(e) => {
            log::error!("{e}");
            log::error!("Journal bot failed to complete.");
            RunStatus::Failed
        }
    }
}

/// Run the bot once; `true` only when an entry was committed.
pub fn run_journal_bot(config: JournalConfig, provider: &mut dyn PromptProvider) -> bool {
    run_with_status(config, provider) == RunStatus::Completed
}

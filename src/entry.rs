//! Daily entry layout and creation.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{JournalError, Result};
use crate::prompts::{PromptProvider, JOURNAL_PROMPTS};

/// Directory under the repository root holding all entries
pub const JOURNALS_DIR: &str = "journals";

const PLACEHOLDER: &str = "_Write your thoughts here..._";

/// The calendar date an entry is keyed by, and the names derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryDate {
    date: NaiveDate,
}

impl EntryDate {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// `YYYY-MM-DD`
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Lowercase English month name and year, e.g. `march-2024`
    pub fn month_year(&self) -> String {
        format!(
            "{}-{}",
            self.date.format("%B").to_string().to_lowercase(),
            self.date.year()
        )
    }

    /// Zero-padded day of month
    pub fn day_number(&self) -> String {
        self.date.format("%d").to_string()
    }

    /// `journals/<month_year>/<day_number>`, relative to the repository root
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(JOURNALS_DIR)
            .join(self.month_year())
            .join(self.day_number())
    }

    /// Canonical entry file, relative to the repository root
    pub fn relative_path(&self) -> PathBuf {
        self.relative_dir().join(format!("{}.md", self.date_str()))
    }
}

/// Render the markdown body of an entry.
pub fn render_entry(date: &EntryDate, prompts: &[String], generated_at: DateTime<Local>) -> String {
    let mut content = format!("# Journal Entry: {}\n\n", date.date_str());

    for prompt in prompts {
        content.push_str(&format!("## {prompt}\n\n{PLACEHOLDER}\n\n"));
    }

    content.push_str(&format!(
        "\nCreated automatically by Journal Bot on {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    content
}

/// Whether `path` exists and was modified at or after local midnight of `now`'s day.
pub fn written_today(path: &Path, now: DateTime<Local>) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };

    match local_midnight(now) {
        Some(midnight) => modified >= SystemTime::from(midnight),
        None => false,
    }
}

fn local_midnight(now: DateTime<Local>) -> Option<DateTime<Local>> {
    let naive = now.date_naive().and_time(NaiveTime::MIN);
    Local.from_local_datetime(&naive).earliest()
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| JournalError::file(dir, e))?;
        log::info!("Created directory at {}", dir.display());
    }
    Ok(())
}

/// Builds today's entry under a repository root.
pub struct EntryComposer<'a> {
    root: PathBuf,
    provider: &'a mut dyn PromptProvider,
}

impl<'a> EntryComposer<'a> {
    pub fn new(root: impl Into<PathBuf>, provider: &'a mut dyn PromptProvider) -> Self {
        Self {
            root: root.into(),
            provider,
        }
    }

    /// Create the entry for `now`'s date and return its path.
    ///
    /// An entry already written today is returned untouched, without asking
    /// the prompt provider.
    pub fn compose(&mut self, now: DateTime<Local>) -> Result<PathBuf> {
        let date = EntryDate::new(now.date_naive());
        let date_str = date.date_str();

        let journals_dir = self.root.join(JOURNALS_DIR);
        let month_dir = journals_dir.join(date.month_year());
        let day_dir = month_dir.join(date.day_number());
        ensure_dir(&journals_dir)?;
        ensure_dir(&month_dir)?;
        ensure_dir(&day_dir)?;

        let file_path = day_dir.join(format!("{date_str}.md"));

        if written_today(&file_path, now) {
            log::info!("Journal entry for {date_str} already exists. Skipping creation.");
            return Ok(file_path);
        }

        let prompts = self.provider.select(&JOURNAL_PROMPTS)?;
        let content = render_entry(&date, &prompts, now);
        fs::write(&file_path, content).map_err(|e| JournalError::file(&file_path, e))?;

        log::info!("Created journal entry: {}", file_path.display());
        Ok(file_path)
    }
}

/// Compose the entry for the current local date.
pub fn compose_today_entry(root: &Path, provider: &mut dyn PromptProvider) -> Result<PathBuf> {
    EntryComposer::new(root, provider).compose(Local::now())
}

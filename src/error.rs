use std::path::PathBuf;
use thiserror::Error;

/// Journal bot error types
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Error setting up repository: {0}")]
    RepoInit(String),

    #[error("No changes to commit")]
    NoChanges,

    #[error("Failed to push journal entry: {0}")]
    Push(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Entry '{}' is not inside the repository", .0.display())]
    EntryOutsideRepo(PathBuf),
}

impl JournalError {
    /// Wrap an I/O failure with the file or directory it concerned.
    pub fn file(path: &std::path::Path, source: std::io::Error) -> Self {
        JournalError::File {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this is the expected "nothing to do" outcome rather than a failure.
    pub fn is_no_changes(&self) -> bool {
        matches!(self, JournalError::NoChanges)
    }
}

/// Result type for journal bot operations
pub type Result<T> = std::result::Result<T, JournalError>;

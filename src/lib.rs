//! # journal-bot
//!
//! A command-line tool that creates a daily markdown journal entry and commits
//! it to a Git repository.
//!
//! ## Overview
//!
//! Each run makes sure the journal repository exists, writes today's entry at
//! `journals/<month>-<year>/<day>/<YYYY-MM-DD>.md` from up to three chosen
//! prompts, commits it, and pushes to `origin` when that remote is configured.
//! An entry already written today is left alone.
//!
//! ## Architecture
//!
//! - Configuration and logging ([`config`], [`logger`], [`error`])
//! - Git access through the CLI ([`scm`])
//! - Repository setup ([`repository`])
//! - Entry layout and prompt selection ([`entry`], [`prompts`])
//! - Committing and pushing ([`publisher`])
//! - The per-run pipeline ([`bot`])

/// One-shot pipeline tying repository setup, entry creation and publishing together.
pub mod bot;

/// Startup configuration from defaults, a TOML file and environment variables.
///
/// Also locates the platform config directory (XDG on Linux, Application
/// Support on macOS, AppData on Windows) holding `config.toml` and the log file.
pub mod config;

/// Date-keyed entry paths, markdown rendering and the once-per-day check.
pub mod entry;

/// Error kinds separating "nothing to commit" from genuine failures.
pub mod error;

/// Logging configuration.
///
/// Log lines go to stdout and to a persistent log file in the config
/// directory. The level is controlled with `RUST_LOG`.
pub mod logger;

/// The fixed prompt list and the interactive, piped and scripted prompt providers.
pub mod prompts;

/// Staging, committing and pushing a journal entry.
pub mod publisher;

/// First-run repository initialization with identity and README commit.
pub mod repository;

/// Git repository operations via the git CLI.
pub mod scm;

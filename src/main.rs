use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

use journal_bot::bot::{self, JournalBot, RunStatus};
use journal_bot::config::JournalConfig;
use journal_bot::entry::EntryDate;
use journal_bot::logger;
use journal_bot::prompts::{
    InquirePrompter, LinePrompter, PromptProvider, ScriptedPrompter, JOURNAL_PROMPTS,
};

#[derive(Parser)]
#[command(name = "journal-bot")]
#[command(about = "Create and commit today's journal entry", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the journal repository (overrides config and JOURNAL_REPO_PATH)
    #[arg(short, long, global = true)]
    repo: Option<PathBuf>,

    /// Config file to load instead of the default config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create today's entry, commit it and push if a remote exists (default)
    Run {
        /// Answer the prompt questions non-interactively (number, text or 'done')
        #[arg(short, long = "prompt")]
        prompts: Vec<String>,
    },

    /// Only set up the journal repository
    Init,

    /// Print the entry path for a date
    Path {
        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List the built-in journal prompts
    Prompts,
}

fn load_config(repo: Option<PathBuf>, config_file: Option<PathBuf>) -> Result<JournalConfig> {
    if let Err(e) = logger::init_logger() {
        log::warn!("File logging unavailable, logging to stdout only: {e:#}");
    }

    let mut config =
        JournalConfig::load(config_file.as_deref()).context("Failed to load configuration")?;
    if let Some(repo) = repo {
        config.repo_path = repo;
    }
    Ok(config)
}

fn prompt_provider(scripted: Vec<String>) -> Box<dyn PromptProvider> {
    if !scripted.is_empty() {
        Box::new(ScriptedPrompter::new(scripted))
    } else if atty::is(atty::Stream::Stdin) {
        Box::new(InquirePrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}

fn run(config: JournalConfig, prompts: Vec<String>) {
    let mut provider = prompt_provider(prompts);
    if bot::run_with_status(config, provider.as_mut()) == RunStatus::Failed {
        std::process::exit(1);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Path { date }) => {
            let date = date.map(EntryDate::new).unwrap_or_else(EntryDate::today);
            println!("{}", date.relative_path().display());
        }
        Some(Commands::Prompts) => {
            for (i, prompt) in JOURNAL_PROMPTS.iter().enumerate() {
                println!("{:>2}. {}", i + 1, prompt);
            }
        }
        Some(Commands::Init) => {
            let config = load_config(cli.repo, cli.config)?;
            let workdir = JournalBot::new(config).init_only()?;
            println!(
                "{} {}",
                "Journal repository ready at".green().bold(),
                workdir.display()
            );
        }
        Some(Commands::Run { prompts }) => run(load_config(cli.repo, cli.config)?, prompts),
        None => run(load_config(cli.repo, cli.config)?, Vec::new()),
    }

    Ok(())
}

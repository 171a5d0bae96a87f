//! End-to-end runs against real git repositories in temporary directories.

use chrono::{Local, TimeZone};
use journal_bot::bot::JournalBot;
use journal_bot::config::{Identity, JournalConfig};
use journal_bot::entry::{EntryComposer, EntryDate};
use journal_bot::error::JournalError;
use journal_bot::prompts::ScriptedPrompter;
use journal_bot::publisher::{publish, PublishOutcome, PushTarget};
use journal_bot::repository::ensure_repository;
use journal_bot::scm;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn identity() -> Identity {
    Identity {
        name: "Workflow Test".to_string(),
        email: "workflow@example.com".to_string(),
    }
}

fn config_for(path: &Path) -> JournalConfig {
    JournalConfig {
        repo_path: path.to_path_buf(),
        identity: identity(),
        access_token: Some("unused-token".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_example_entry_for_march_fifth() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let now = Local.with_ymd_and_hms(2024, 3, 5, 21, 15, 0).earliest().unwrap();

    let outcome = JournalBot::new(config_for(temp.path()))
        .run_at(&mut ScriptedPrompter::new(["1", "3", "done"]), now)
        .unwrap();

    let expected = temp
        .path()
        .canonicalize()
        .unwrap()
        .join("journals/march-2024/05/2024-03-05.md");
    assert_eq!(outcome.entry_path, expected);

    let content = fs::read_to_string(&expected).unwrap();
    let headings: Vec<&str> = content.lines().filter(|l| l.starts_with("## ")).collect();
    assert_eq!(
        headings,
        vec!["## What went well today?", "## What am I grateful for today?"]
    );
    assert!(content.starts_with("# Journal Entry: 2024-03-05"));
    assert!(content.ends_with("Created automatically by Journal Bot on 2024-03-05 21:15:00"));

    assert_eq!(
        git(temp.path(), &["log", "-1", "--format=%s"]),
        "Add journal entry for 2024-03-05"
    );
    assert_eq!(
        git(temp.path(), &["log", "-1", "--format=%an <%ae>"]),
        "Workflow Test <workflow@example.com>"
    );
}

#[test]
fn test_zero_prompts_still_produce_entry() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let now = Local.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).earliest().unwrap();

    let outcome = JournalBot::new(config_for(temp.path()))
        .run_at(&mut ScriptedPrompter::new(["done"]), now)
        .unwrap();

    let content = fs::read_to_string(&outcome.entry_path).unwrap();
    assert!(content.contains("# Journal Entry: 2024-03-05"));
    assert!(content.contains("Created automatically by Journal Bot on"));
    assert!(!content.contains("## "));
}

#[test]
fn test_pushes_to_origin_main() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let remote_dir = temp.path().join("remote.git");
    let repo_dir = temp.path().join("journal");
    fs::create_dir_all(&remote_dir).unwrap();
    git(&remote_dir, &["init", "--bare"]);

    ensure_repository(&repo_dir, &identity(), "main").unwrap();
    git(
        &repo_dir,
        &["remote", "add", "origin", &remote_dir.to_string_lossy()],
    );

    let now = Local::now();
    let outcome = JournalBot::new(config_for(&repo_dir))
        .run_at(&mut ScriptedPrompter::new(["4", "done"]), now)
        .unwrap();
    assert_eq!(outcome.publish, PublishOutcome::Pushed);

    let today = EntryDate::new(now.date_naive()).date_str();
    assert_eq!(
        git(&remote_dir, &["log", "-1", "--format=%s", "main"]),
        format!("Add journal entry for {today}")
    );
}

#[test]
fn test_push_failure_is_reported_as_failure() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let repo_dir = temp.path().join("journal");
    ensure_repository(&repo_dir, &identity(), "main").unwrap();
    let missing_remote = temp.path().join("does-not-exist.git");
    git(
        &repo_dir,
        &["remote", "add", "origin", &missing_remote.to_string_lossy()],
    );

    let now = Local::now();
    let err = JournalBot::new(config_for(&repo_dir))
        .run_at(&mut ScriptedPrompter::new(["done"]), now)
        .unwrap_err();
    assert!(matches!(err, JournalError::Push(_)));

    // The commit is kept even though the push failed.
    let today = EntryDate::new(now.date_naive()).date_str();
    assert_eq!(
        git(&repo_dir, &["log", "-1", "--format=%s"]),
        format!("Add journal entry for {today}")
    );
}

#[test]
fn test_same_day_rerun_changes_nothing() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let bot = JournalBot::new(config_for(temp.path()));
    let now = Local::now();

    bot.run_at(&mut ScriptedPrompter::new(["2", "done"]), now)
        .unwrap();
    let commits = git(temp.path(), &["rev-list", "--count", "HEAD"]);
    let entry = temp
        .path()
        .join(EntryDate::new(now.date_naive()).relative_path());
    let content = fs::read_to_string(&entry).unwrap();
    let modified = fs::metadata(&entry).unwrap().modified().unwrap();

    let mut second = ScriptedPrompter::new(["7", "8", "9"]);
    let err = bot.run_at(&mut second, now).unwrap_err();

    assert!(err.is_no_changes());
    assert_eq!(second.calls(), 0);
    assert_eq!(git(temp.path(), &["rev-list", "--count", "HEAD"]), commits);
    assert_eq!(fs::read_to_string(&entry).unwrap(), content);
    assert_eq!(fs::metadata(&entry).unwrap().modified().unwrap(), modified);
}

#[test]
fn test_publish_unchanged_entry_is_no_changes() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let repo = ensure_repository(temp.path(), &identity(), "main").unwrap();
    let now = Local::now();
    let date = EntryDate::new(now.date_naive());

    let mut prompter = ScriptedPrompter::new(["done"]);
    let entry = EntryComposer::new(repo.workdir(), &mut prompter)
        .compose(now)
        .unwrap();

    let first = publish(repo.as_ref(), &entry, &PushTarget::default(), &date).unwrap();
    assert_eq!(first, PublishOutcome::Committed);
    let head = repo.current_commit_hash().unwrap();

    let second = publish(repo.as_ref(), &entry, &PushTarget::default(), &date);
    assert!(matches!(second, Err(JournalError::NoChanges)));
    assert_eq!(repo.current_commit_hash().unwrap(), head);
}

#[test]
fn test_existing_repository_history_is_preserved() {
    if !scm::git_available() {
        eprintln!("Skipping: git not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    git(temp.path(), &["init"]);
    git(temp.path(), &["config", "user.name", "Existing Owner"]);
    git(temp.path(), &["config", "user.email", "owner@example.com"]);
    git(temp.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    fs::write(temp.path().join("notes.txt"), "kept").unwrap();
    git(temp.path(), &["add", "notes.txt"]);
    git(temp.path(), &["commit", "-m", "Existing history"]);

    let outcome = JournalBot::new(config_for(temp.path()))
        .run(&mut ScriptedPrompter::new(["done"]))
        .unwrap();
    assert_eq!(outcome.publish, PublishOutcome::Committed);

    assert!(!temp.path().join("README.md").exists());
    assert_eq!(git(temp.path(), &["rev-list", "--count", "HEAD"]), "2");
    assert_eq!(git(temp.path(), &["config", "user.name"]), "Existing Owner");
}

use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::config::ConfigManager;

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Writes every log line to stdout and, when one is attached, to the log file.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Initialize the logging system
///
/// Every record is printed to stdout and appended to `journal-bot.log` in the
/// config directory, formatted as `YYYY-MM-DD HH:MM:SS [LEVEL] message`.
/// If the log file cannot be set up, the logger is still installed for
/// stdout and the file error is returned.
///
/// The level can be controlled via the `RUST_LOG` environment variable
/// (`error`, `warn`, `info`, `debug`, `trace`); the default is `info`.
///
/// ```bash
/// # Show git plumbing as well
/// RUST_LOG=debug journal-bot
/// ```
pub fn init_logger() -> Result<()> {
    let (file, file_error) = match open_config_log() {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let default_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(default_level)
        .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
        .try_init()
        .ok(); // Ignore error if logger is already initialized

    log::debug!("Logger initialized with level: {default_level:?}");

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn open_config_log() -> Result<File> {
    ConfigManager::ensure_config_dir()?;
    let log_path = ConfigManager::log_file_path()?;
    rotate_if_larger(&log_path, MAX_LOG_SIZE)?;
    open_log_file(&log_path)
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Move the log aside to `.log.old` once it grows past `max_size`
fn rotate_if_larger(log_path: &Path, max_size: u64) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let metadata = std::fs::metadata(log_path)?;
    if metadata.len() > max_size {
        let old_log_path = log_path.with_extension("log.old");

        if old_log_path.exists() {
            std::fs::remove_file(&old_log_path)?;
        }

        std::fs::rename(log_path, &old_log_path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tee_writer_appends_to_file() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("journal-bot.log");

        let mut tee = TeeWriter {
            file: Some(open_log_file(&path)?),
        };
        tee.write_all(b"2024-03-05 08:00:00 [INFO ] Running journal bot...\n")?;
        tee.flush()?;

        let contents = std::fs::read_to_string(&path)?;
        assert!(contents.contains("Running journal bot..."));

        Ok(())
    }

    #[test]
    fn test_tee_writer_without_file_still_writes() -> Result<()> {
        let mut tee = TeeWriter { file: None };
        let line = b"2024-03-05 08:00:00 [ERROR] Journal bot failed to complete.\n";

        assert_eq!(tee.write(line)?, line.len());
        tee.flush()?;

        Ok(())
    }

    #[test]
    fn test_unopenable_log_file_is_error() -> Result<()> {
        let temp = TempDir::new()?;
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way")?;

        let err = open_log_file(&blocker.join("journal-bot.log")).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));

        Ok(())
    }

    #[test]
    #[cfg(target_os = "linux")]
    #[serial_test::serial]
    fn test_init_logger_installs_without_log_file() -> Result<()> {
        let temp = TempDir::new()?;
        let blocker = temp.path().join("config-file");
        std::fs::write(&blocker, "file in the way")?;

        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", &blocker);
        let result = init_logger();
        match previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }

        assert!(result.is_err());
        assert!(log::log_enabled!(log::Level::Error));

        Ok(())
    }

    #[test]
    fn test_rotate_creates_backup() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("journal-bot.log");
        std::fs::write(&path, vec![b'a'; 2048])?;

        rotate_if_larger(&path, 1024)?;

        assert!(!path.exists());
        assert!(temp.path().join("journal-bot.log.old").exists());

        Ok(())
    }

    #[test]
    fn test_rotate_keeps_small_log() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("journal-bot.log");
        std::fs::write(&path, "short")?;

        rotate_if_larger(&path, 1024)?;

        assert!(path.exists());
        assert!(!temp.path().join("journal-bot.log.old").exists());

        Ok(())
    }

    #[test]
    fn test_rotate_missing_log_is_noop() -> Result<()> {
        let temp = TempDir::new()?;
        rotate_if_larger(&temp.path().join("absent.log"), 1024)
    }
}

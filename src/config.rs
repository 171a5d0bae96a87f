use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the access token
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding the commit author name
pub const ENV_USERNAME: &str = "GITHUB_USERNAME";
/// Environment variable holding the commit author email
pub const ENV_EMAIL: &str = "GITHUB_EMAIL";
/// Environment variable overriding the journal repository location
pub const ENV_REPO_PATH: &str = "JOURNAL_REPO_PATH";

/// Cross-platform configuration directory manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the main configuration directory path following platform conventions:
    /// - Linux: $XDG_CONFIG_HOME/journal-bot or ~/.config/journal-bot
    /// - macOS: ~/Library/Application Support/journal-bot
    /// - Windows: %APPDATA%\journal-bot
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
                Ok(PathBuf::from(xdg_config).join("journal-bot"))
            } else {
                let home = dirs::home_dir().context("Failed to get home directory")?;
                Ok(home.join(".config").join("journal-bot"))
            }
        }

        #[cfg(target_os = "macos")]
        {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home
                .join("Library")
                .join("Application Support")
                .join("journal-bot"))
        }

        #[cfg(target_os = "windows")]
        {
            Ok(dirs::config_dir()
                .context("Failed to get Windows config directory")?
                .join("journal-bot"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home.join(".journal-bot"))
        }
    }

    /// Get the config file path (config.toml)
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the log file path
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("journal-bot.log"))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
        Ok(config_dir)
    }
}

/// Author identity written into the repository's local git config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Default for Identity {
    fn default() -> Self {
        Identity {
            name: "Journal Bot".to_string(),
            email: "journal-bot@localhost".to_string(),
        }
    }
}

/// Runtime configuration, built once at startup and handed to each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Root of the journal repository
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,

    #[serde(default)]
    pub identity: Identity,

    /// Loaded for completeness; pushes use the locally configured git credentials.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Remote pushed to after a commit, when it exists
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch committed to and pushed
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_repo_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for JournalConfig {
    fn default() -> Self {
        JournalConfig {
            repo_path: default_repo_path(),
            identity: Identity::default(),
            access_token: None,
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

impl JournalConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Build the startup configuration.
    ///
    /// Layers, lowest precedence first: defaults, the TOML file (`explicit_file`
    /// or the default `config.toml` if it exists), then the process environment
    /// after a `.env` file in the working directory has been loaded.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match explicit_file {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = ConfigManager::config_file_path()?;
                if default_path.exists() {
                    log::debug!("Loading config from {}", default_path.display());
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(name) = get(ENV_USERNAME) {
            self.identity.name = name;
        }
        if let Some(email) = get(ENV_EMAIL) {
            self.identity.email = email;
        }
        if let Some(path) = get(ENV_REPO_PATH) {
            self.repo_path = PathBuf::from(path);
        }
    }
}

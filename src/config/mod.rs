pub mod session;

use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};

pub use session::Session;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration read from `~/.rekrut/rc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Directory holding the rc and session files
    pub fn data_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;
        Ok(home.join(".rekrut"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("rc"))
    }

    /// Load configuration from the rc file, or defaults when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse `key=value` lines; blank lines and `#` comments are skipped
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                anyhow::bail!("line {}: expected key=value, got '{}'", lineno + 1, line);
            };
            let value = value.trim();
            match key.trim() {
                "api.url" => {
                    if value.is_empty() {
                        anyhow::bail!("line {}: api.url cannot be empty", lineno + 1);
                    }
                    config.api_url = value.trim_end_matches('/').to_string();
                }
                "api.timeout" => {
                    let secs: u64 = value.parse()
                        .with_context(|| format!("line {}: api.timeout must be a number of seconds", lineno + 1))?;
                    if secs == 0 {
                        anyhow::bail!("line {}: api.timeout must be at least 1 second", lineno + 1);
                    }
                    config.timeout = Duration::from_secs(secs);
                }
                other => log::debug!("Ignoring unknown config key '{}'", other),
            }
        }
        Ok(config)
    }
}

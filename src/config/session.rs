use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use super::Config;

/// Authenticated identity, passed explicitly to the API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    pub fn path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("session"))
    }

    /// Load the saved session, if any
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        let session: Session = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt session file: {}. Run 'rekrut logout' and log in again.", path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;

        // The token is a credential: owner read/write only
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;
        // mode() only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict session file: {}", path.display()))?;
        }
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write session file: {}", path.display()))
    }

    /// Remove the saved session. Returns false when there was none.
    pub fn clear() -> Result<bool> {
        Self::clear_at(&Self::path()?)
    }

    pub fn clear_at(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
        Ok(true)
    }
}

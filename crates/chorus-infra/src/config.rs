//! Agents file persistence.
//!
//! The agents file (`agents.json` in the data directory) maps credential
//! names to channel + behavior configuration. Absence of the file is an
//! empty configuration, not an error. Validation happens when a run is
//! assembled, not here, so administrative commands keep working on files
//! with bad entries.

use std::path::{Path, PathBuf};

use chorus_types::agent::AgentsFile;
use chorus_types::error::ConfigError;

/// File name of the agents file inside the data directory.
pub const AGENTS_FILE: &str = "agents.json";

/// Load/save/remove operations over the agents file.
pub struct AgentsStore {
    path: PathBuf,
}

impl AgentsStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(AGENTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the agents file. Missing file -> empty configuration.
    pub async fn load(&self) -> Result<AgentsFile, ConfigError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no agents file, starting empty");
                return Ok(AgentsFile::new());
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Persist the whole agents map, pretty-printed for hand edits.
    pub async fn save(&self, agents: &AgentsFile) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(agents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Remove one entry. Returns whether it existed.
    pub async fn remove(&self, name: &str) -> Result<bool, ConfigError> {
        let mut agents = self.load().await?;
        if agents.remove(name).is_none() {
            return Ok(false);
        }
        self.save(&agents).await?;
        Ok(true)
    }

    /// Delete the whole agents file. Removing an absent file succeeds.
    pub async fn clear(&self) -> Result<(), ConfigError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ConfigError::Io(err.to_string())),
        }
    }
}

//! Shared state for CLI command handlers.

use std::path::PathBuf;

use anyhow::Context;

use chorus_infra::config::AgentsStore;

/// Resolved data directory plus the agents store inside it.
pub struct AppState {
    pub data_dir: PathBuf,
    pub store: AgentsStore,
}

impl AppState {
    /// Resolve the data directory (`--data-dir` override, else `~/.chorus`)
    /// and construct the agents store. The directory itself is created
    /// lazily on first save.
    pub fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .context("could not determine home directory; pass --data-dir")?
                .join(".chorus"),
        };

        let store = AgentsStore::new(&data_dir);
        Ok(Self { data_dir, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_is_used() {
        let state = AppState::init(Some(PathBuf::from("/tmp/chorus-test"))).unwrap();
        assert_eq!(state.data_dir, PathBuf::from("/tmp/chorus-test"));
        assert!(state.store.path().starts_with("/tmp/chorus-test"));
    }
}

//! Persisted layout mode preference
//!
//! The last mode chosen with `--mode` is remembered in a small TOML file so
//! that later runs without the flag keep using it:
//!
//! ```toml
//! mode = "compact"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use arrange::{ArrangeError, LayoutMode};

/// Errors reading or writing the state file
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to parse state file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize state: {0}")]
    Serialize(String),
}

impl From<StateError> for ArrangeError {
    fn from(err: StateError) -> Self {
        ArrangeError::Config(err.to_string())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<LayoutMode>,
}

/// Reads and writes the remembered [`LayoutMode`].
#[derive(Debug, Clone)]
pub struct ModeStore {
    path: Option<PathBuf>,
}

impl ModeStore {
    /// Creates a store at `explicit_path`, or in the platform data directory.
    ///
    /// Without an explicit path and without a platform data directory the
    /// store is inert: nothing is loaded and nothing is saved.
    pub fn new(explicit_path: Option<impl AsRef<Path>>) -> Self {
        let path = match explicit_path {
            Some(path) => Some(path.as_ref().to_path_buf()),
            None => ProjectDirs::from("com", "arrange", "arrange")
                .map(|dirs| dirs.data_dir().join("state.toml")),
        };
        Self { path }
    }

    /// Returns the state file location, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the remembered mode, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<LayoutMode>, ArrangeError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        if !path.exists() {
            debug!(path = path.display().to_string(); "No saved layout mode");
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let state: State = toml::from_str(&content).map_err(|e| StateError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(state.mode)
    }

    /// Remembers `mode` for later runs.
    ///
    /// # Errors
    ///
    /// Returns error if the state directory or file cannot be written.
    pub fn save(&self, mode: LayoutMode) -> Result<(), ArrangeError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string(&State { mode: Some(mode) })
            .map_err(|e| StateError::Serialize(e.to_string()))?;
        fs::write(path, content)?;

        debug!(mode:% = mode, path = path.display().to_string(); "Saved layout mode");
        Ok(())
    }
}

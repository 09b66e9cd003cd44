//! Unified path management for codepad files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/codepad/           # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── state.toml               # Persisted session projection
//! ```

use std::path::PathBuf;

use codepad_core::error::{CodepadError, Result};

const APP_DIR: &str = "codepad";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for CodepadError {
    fn from(err: PathError) -> Self {
        CodepadError::config(err.to_string())
    }
}

/// Resolves codepad file locations.
///
/// `root` overrides the platform config directory (tests, `--config-dir`).
#[derive(Debug, Clone, Default)]
pub struct CodepadPaths {
    root: Option<PathBuf>,
}

impl CodepadPaths {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Returns the codepad configuration directory (e.g. `~/.config/codepad/`).
    pub fn config_dir(&self) -> std::result::Result<PathBuf, PathError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// File holding the persisted session projection.
    pub fn state_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("state.toml"))
    }
}

//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/codepad/config.toml) and applies
//! environment overrides.

use codepad_core::config::ClientConfig;
use codepad_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::paths::CodepadPaths;
use crate::storage::AtomicTomlFile;

/// Overrides `api_base_url`.
pub const ENV_API_URL: &str = "CODEPAD_API_URL";
/// Overrides `worker_program`.
pub const ENV_WORKER_PROGRAM: &str = "CODEPAD_WORKER_PROGRAM";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &CodepadPaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file on first access.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn get_config(&self) -> Result<ClientConfig> {
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = AtomicTomlFile::<ClientConfig>::new(self.path.clone())
            .load()?
            .unwrap_or_default();
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        tracing::debug!(
            "[ConfigService] loaded {} (api: {})",
            self.path.display(),
            loaded.api_base_url
        );

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Writes `config` to the file and refreshes the cache.
    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        AtomicTomlFile::<ClientConfig>::new(self.path.clone()).save(config)?;
        self.invalidate_cache();
        Ok(())
    }
}

fn apply_env_overrides(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url;
    }
    if let Some(program) = lookup(ENV_WORKER_PROGRAM).filter(|v| !v.trim().is_empty()) {
        config.worker_program = program;
    }
}

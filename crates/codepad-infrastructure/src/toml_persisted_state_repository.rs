//! TOML-backed persisted state repository.
//!
//! The projection lives under the `[codepad]` table of `state.toml`. Other
//! tables in the file are preserved on write.

use std::path::PathBuf;

use codepad_core::error::Result;
use codepad_core::state::{PersistedState, PersistedStateRepository, STORAGE_KEY};
use toml::Table;

use crate::paths::CodepadPaths;
use crate::storage::AtomicTomlFile;

pub struct TomlPersistedStateRepository {
    file: AtomicTomlFile<Table>,
}

impl TomlPersistedStateRepository {
    /// Uses `state.toml` in the codepad config directory.
    pub fn new(paths: &CodepadPaths) -> Result<Self> {
        Ok(Self::with_path(paths.state_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

impl PersistedStateRepository for TomlPersistedStateRepository {
    fn load(&self) -> Result<Option<PersistedState>> {
        let Some(mut table) = self.file.load()? else {
            return Ok(None);
        };

        match table.remove(STORAGE_KEY) {
            Some(value) => Ok(Some(value.try_into::<PersistedState>()?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        let value = toml::Value::try_from(state)?;
        self.file.update(Table::new(), |table| {
            table.insert(STORAGE_KEY.to_string(), value);
            Ok(())
        })?;
        tracing::debug!(
            "[PersistedState] saved to {}",
            self.file.path().display()
        );
        Ok(())
    }
}

//! Wiring shared by the commands that touch the session.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use codepad_application::{EditorUseCase, attach_persistence};
use codepad_core::config::ClientConfig;
use codepad_core::language::{self, LanguageSpec};
use codepad_core::session::{SessionStore, Transition};
use codepad_infrastructure::{CodepadPaths, ConfigService, TomlPersistedStateRepository};
use codepad_interaction::{CommandScriptEngine, HttpCodeApi, ThreadScriptWorker};
use tokio::sync::Mutex;

pub struct AppContext {
    pub config: ClientConfig,
    pub usecase: Arc<EditorUseCase>,
}

impl AppContext {
    pub fn build(config_dir: Option<PathBuf>) -> Result<Self> {
        let paths = CodepadPaths::new(config_dir);
        let config = ConfigService::new(&paths)?
            .get_config()
            .context("Failed to load client configuration")?;
        tracing::debug!("[Bootstrap] API base URL: {}", config.api_base_url);

        let repository = Arc::new(TomlPersistedStateRepository::new(&paths)?);
        let mut store = SessionStore::new();
        let restored = attach_persistence(&mut store, repository)
            .context("Failed to restore saved preferences")?;
        tracing::debug!("[Bootstrap] preferences restored: {}", restored);

        let api = Arc::new(HttpCodeApi::from_config(&config)?);
        let worker = Arc::new(
            ThreadScriptWorker::new(CommandScriptEngine::from_config(&config))
                .with_timeout(config.worker_timeout_secs.map(Duration::from_secs)),
        );

        let usecase = EditorUseCase::new(Arc::new(Mutex::new(store)), api, worker);
        Ok(Self {
            config,
            usecase: Arc::new(usecase),
        })
    }

    /// Loads a source file into the session as the active document.
    pub async fn open_source(
        &self,
        file: &Path,
        language: Option<&str>,
        input: String,
    ) -> Result<&'static LanguageSpec> {
        let spec = resolve_language(file, language)?;
        let code = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| spec.default_file_name());

        let store = self.usecase.store();
        store.lock().await.commit_all([
            Transition::ChangeLanguage(spec.name.to_string()),
            Transition::upload_code(code),
            Transition::SetFileName(file_name),
            Transition::SetCustomInput(input),
        ])?;
        Ok(spec)
    }
}

/// Picks the language by explicit name, or by the file's extension.
pub fn resolve_language(file: &Path, name: Option<&str>) -> Result<&'static LanguageSpec> {
    if let Some(name) = name {
        return Ok(language::lookup(name)?);
    }

    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match language::from_extension(extension) {
        Some(spec) => Ok(spec),
        None => bail!(
            "Cannot detect language of {} (use --language)",
            file.display()
        ),
    }
}

//! Editor use case implementation.
//!
//! This module provides the `EditorUseCase` which runs the asynchronous
//! editor actions (run, load, save) against the remote API and the local
//! script worker, committing their results to the session store.

use std::sync::Arc;

use codepad_core::api::{CodeApi, CodeDocument, RunRequest, RunResponse};
use codepad_core::digest::content_digest;
use codepad_core::error::{CodepadError, Result};
use codepad_core::language;
use codepad_core::route::Route;
use codepad_core::session::{CodeId, SessionState, SessionStore, Transition};
use codepad_core::worker::{ScriptWorker, WorkerMessage};
use tokio::sync::Mutex;

/// Outcome of [`EditorUseCase::save_to_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Document id after the save.
    pub id: Option<CodeId>,
    /// `false` when the code was unchanged and nothing was sent.
    pub written: bool,
}

/// Use case for the editor's asynchronous actions.
///
/// The store lock is only held while reading inputs or committing results,
/// never across a network or worker await. Overlapping calls are not
/// de-duplicated; the last response to arrive wins.
pub struct EditorUseCase {
    store: Arc<Mutex<SessionStore>>,
    api: Arc<dyn CodeApi>,
    worker: Arc<dyn ScriptWorker>,
}

impl EditorUseCase {
    pub fn new(
        store: Arc<Mutex<SessionStore>>,
        api: Arc<dyn CodeApi>,
        worker: Arc<dyn ScriptWorker>,
    ) -> Self {
        Self { store, api, worker }
    }

    /// Shared handle to the session store.
    pub fn store(&self) -> Arc<Mutex<SessionStore>> {
        Arc::clone(&self.store)
    }

    /// Clone of the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.store.lock().await.state().clone()
    }

    /// Commits a single transition.
    pub async fn commit(&self, transition: Transition) -> Result<()> {
        self.store.lock().await.commit(transition)
    }

    /// Runs the active code.
    ///
    /// Languages flagged for local execution go to the script worker; all
    /// others are sent to the execution service. The decoded output (or the
    /// compile error text) is committed as the session output.
    pub async fn run_code(&self) -> Result<RunResponse> {
        let (spec, code, input) = {
            let store = self.store.lock().await;
            let state = store.state();
            (
                state.active_language()?,
                state.active_code().to_string(),
                state.custom_input.clone(),
            )
        };

        if spec.runs_in_browser() {
            return self.run_in_browser(code, input).await;
        }

        let request = RunRequest::new(spec.execution_code, &code, &input);
        tracing::info!(
            "[EditorUseCase] run_code: remote execution (lang: {})",
            request.lang
        );

        let response = self.api.run(&request).await?;
        let output = response.decoded_output()?;
        self.commit(Transition::UpdateOutput(output)).await?;

        tracing::debug!("[EditorUseCase] run_code finished: {}", response.result);
        Ok(response)
    }

    /// Runs `code` in a fresh isolated worker and waits for its single reply.
    ///
    /// The joined output lines are committed either way. A failed run
    /// returns [`CodepadError::Execution`] with the `compile_error` marker.
    pub async fn run_in_browser(&self, code: String, input: String) -> Result<RunResponse> {
        tracing::info!("[EditorUseCase] run_in_browser: spawning script worker");

        let message = WorkerMessage::new(code, &input)?;
        let reply = self.worker.run(message).await?;
        let output = reply.output();

        self.commit(Transition::UpdateOutput(output.clone())).await?;

        if reply.is_failure() {
            tracing::debug!("[EditorUseCase] run_in_browser: classified as failure");
            return Err(CodepadError::compile_error(output));
        }
        Ok(RunResponse::success())
    }

    /// Loads the document named by the current route.
    ///
    /// Returns `Ok(None)` without touching state when the route is not the
    /// saved-document view.
    pub async fn load_from_server(&self) -> Result<Option<CodeDocument>> {
        let id = {
            let store = self.store.lock().await;
            let route = &store.state().route;
            if !route.is_saved() {
                tracing::debug!(
                    "[EditorUseCase] load_from_server skipped: route is '{}'",
                    route.name
                );
                return Ok(None);
            }
            match route.param("id") {
                Some(id) => id.to_string(),
                None => {
                    tracing::warn!("[EditorUseCase] load_from_server skipped: route has no id");
                    return Ok(None);
                }
            }
        };

        tracing::info!("[EditorUseCase] load_from_server: fetching document {}", id);
        let document = self.api.fetch_code(&id).await?;
        // Reject before committing anything so a bad document leaves the
        // session (and its code id) untouched.
        language::lookup(&document.language)?;

        // Language first: code is stored under the active language.
        self.store.lock().await.commit_all([
            Transition::SetCodeId(document.id.clone()),
            Transition::ChangeLanguage(document.language.clone()),
            Transition::SetCode(document.code.clone()),
            Transition::SetCustomInput(document.custom_input.clone()),
            Transition::SetFileName(document.file_name.clone()),
            Transition::SetCheckData(document.code.clone()),
            Transition::SetCodeTitle(document.title.clone()),
        ])?;

        Ok(Some(document))
    }

    /// Navigates to a saved document and loads it.
    pub async fn open_document(&self, id: &CodeId) -> Result<Option<CodeDocument>> {
        self.commit(Transition::SetRoute(Route::saved(id.to_string())))
            .await?;
        self.load_from_server().await
    }

    /// Saves the active code unless it matches the last saved digest.
    pub async fn save_to_server(&self) -> Result<SaveReceipt> {
        let document = {
            let store = self.store.lock().await;
            let state = store.state();
            let code = state.active_code();

            if state.check_data == content_digest(code) {
                tracing::debug!("[EditorUseCase] save_to_server: unchanged, skipping write");
                return Ok(SaveReceipt {
                    id: state.code_id.clone(),
                    written: false,
                });
            }

            CodeDocument {
                id: state.code_id.clone(),
                language: state.language.clone(),
                code: code.to_string(),
                custom_input: state.custom_input.clone(),
                file_name: state.file_name.clone(),
                title: state.code_title.clone(),
            }
        };

        tracing::info!(
            "[EditorUseCase] save_to_server: writing document (id: {:?})",
            document.id
        );
        let saved = self.api.save_code(&document).await?;

        self.store.lock().await.commit_all([
            Transition::SetCodeId(Some(saved.id.clone())),
            Transition::SetCheckData(saved.code),
        ])?;

        Ok(SaveReceipt {
            id: Some(saved.id),
            written: true,
        })
    }

    /// Saves if auto-save is on and the session is attached to a document.
    ///
    /// Returns `Ok(None)` when the save was not attempted.
    pub async fn auto_save(&self) -> Result<Option<SaveReceipt>> {
        let eligible = {
            let store = self.store.lock().await;
            let state = store.state();
            state.auto_save && state.code_id.is_some()
        };
        if !eligible {
            return Ok(None);
        }
        self.save_to_server().await.map(Some)
    }
}

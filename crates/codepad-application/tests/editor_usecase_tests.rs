use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use codepad_application::{AutoSaver, EditorUseCase, SaveReceipt, attach_persistence};
use codepad_core::api::{
    CodeApi, CodeDocument, RunData, RunRequest, RunResponse, SavedCode, TestCaseResult,
    encode_payload,
};
use codepad_core::digest::content_digest;
use codepad_core::error::{CodepadError, Result};
use codepad_core::route::Route;
use codepad_core::session::{CodeId, SessionStore, Transition};
use codepad_core::state::PersistedStateRepository;
use codepad_core::worker::{ScriptWorker, WorkerMessage, WorkerReply, WorkerStatus};
use codepad_infrastructure::TomlPersistedStateRepository;
use tempfile::TempDir;
use tokio::sync::Mutex;

/// Records every request and answers from canned values.
#[derive(Default)]
struct FakeCodeApi {
    fetched: StdMutex<Vec<String>>,
    saved: StdMutex<Vec<CodeDocument>>,
    runs: StdMutex<Vec<RunRequest>>,
    document: StdMutex<Option<CodeDocument>>,
    run_response: StdMutex<Option<RunResponse>>,
    fail_transport: bool,
}

impl FakeCodeApi {
    fn with_document(document: CodeDocument) -> Self {
        let api = Self::default();
        *api.document.lock().unwrap() = Some(document);
        api
    }

    fn with_run_response(response: RunResponse) -> Self {
        let api = Self::default();
        *api.run_response.lock().unwrap() = Some(response);
        api
    }
}

#[async_trait]
impl CodeApi for FakeCodeApi {
    async fn fetch_code(&self, id: &str) -> Result<CodeDocument> {
        self.fetched.lock().unwrap().push(id.to_string());
        self.document
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CodepadError::not_found("Document", id))
    }

    async fn save_code(&self, document: &CodeDocument) -> Result<SavedCode> {
        if self.fail_transport {
            return Err(CodepadError::Transport("connection refused".into()));
        }
        let mut saved = self.saved.lock().unwrap();
        saved.push(document.clone());
        Ok(SavedCode {
            id: document.id.clone().unwrap_or(CodeId::Number(100 + saved.len() as u64)),
            code: document.code.clone(),
        })
    }

    async fn run(&self, request: &RunRequest) -> Result<RunResponse> {
        if self.fail_transport {
            return Err(CodepadError::Transport("connection refused".into()));
        }
        self.runs.lock().unwrap().push(request.clone());
        self.run_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CodepadError::internal("no canned run response"))
    }
}

/// Replies with fixed lines and records the posted messages.
struct FakeWorker {
    reply: WorkerReply,
    messages: StdMutex<Vec<WorkerMessage>>,
}

impl FakeWorker {
    fn replying(lines: &[&str], status: Option<WorkerStatus>) -> Self {
        Self {
            reply: WorkerReply {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                status,
            },
            messages: StdMutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ScriptWorker for FakeWorker {
    async fn run(&self, message: WorkerMessage) -> Result<WorkerReply> {
        self.messages.lock().unwrap().push(message);
        Ok(self.reply.clone())
    }
}

fn usecase(api: Arc<FakeCodeApi>, worker: Arc<FakeWorker>) -> EditorUseCase {
    EditorUseCase::new(Arc::new(Mutex::new(SessionStore::new())), api, worker)
}

fn idle_worker() -> Arc<FakeWorker> {
    Arc::new(FakeWorker::replying(&[], None))
}

fn success_response(output: &str) -> RunResponse {
    RunResponse {
        result: "success".into(),
        error: None,
        data: Some(RunData {
            testcases: vec![TestCaseResult {
                result: Some("success".into()),
                output: Some(encode_payload(output)),
            }],
        }),
    }
}

fn java_document() -> CodeDocument {
    CodeDocument {
        id: Some(CodeId::Number(7)),
        language: "Java".into(),
        code: "class X{}".into(),
        custom_input: String::new(),
        file_name: "Main.java".into(),
        title: "T".into(),
    }
}

// ============================================================================
// run-remote
// ============================================================================

#[tokio::test]
async fn test_run_remote_ruby_sends_encoded_source() {
    let api = Arc::new(FakeCodeApi::with_run_response(success_response("1\n")));
    let usecase = usecase(api.clone(), idle_worker());
    usecase.commit(Transition::ChangeLanguage("Ruby".into())).await.unwrap();
    usecase.commit(Transition::SetCode("puts 1".into())).await.unwrap();

    usecase.run_code().await.unwrap();

    let runs = api.runs.lock().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].lang, "ruby");
    assert_eq!(runs[0].source, "cHV0cyAx");
    assert_eq!(runs[0].input, vec![String::new()]);
    drop(runs);

    assert_eq!(usecase.snapshot().await.output, "1\n");
}

#[tokio::test]
async fn test_run_remote_uses_registry_execution_code() {
    let api = Arc::new(FakeCodeApi::with_run_response(success_response("")));
    let usecase = usecase(api.clone(), idle_worker());
    usecase.commit(Transition::ChangeLanguage("Python 3".into())).await.unwrap();
    usecase.commit(Transition::SetCustomInput("world".into())).await.unwrap();

    usecase.run_code().await.unwrap();

    let runs = api.runs.lock().unwrap();
    assert_eq!(runs[0].lang, "py3");
    assert_eq!(runs[0].input, vec![encode_payload("world")]);
}

#[tokio::test]
async fn test_run_remote_compile_error_becomes_output() {
    let api = Arc::new(FakeCodeApi::with_run_response(RunResponse {
        result: "compile_error".into(),
        error: Some(encode_payload("main.cpp:1: error")),
        data: None,
    }));
    let usecase = usecase(api, idle_worker());

    let response = usecase.run_code().await.unwrap();

    assert!(response.is_compile_error());
    assert_eq!(usecase.snapshot().await.output, "main.cpp:1: error");
}

#[tokio::test]
async fn test_run_remote_transport_failure_propagates() {
    let api = Arc::new(FakeCodeApi {
        fail_transport: true,
        ..FakeCodeApi::default()
    });
    let usecase = usecase(api, idle_worker());

    let err = usecase.run_code().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(usecase.snapshot().await.output, "");
}

// ============================================================================
// run-in-browser
// ============================================================================

#[tokio::test]
async fn test_javascript_runs_in_worker() {
    let api = Arc::new(FakeCodeApi::default());
    let worker = Arc::new(FakeWorker::replying(&["Hello", "world"], None));
    let usecase = usecase(api.clone(), worker.clone());
    usecase.commit(Transition::ChangeLanguage("JavaScript".into())).await.unwrap();
    usecase.commit(Transition::SetCode("console.log('Hello')".into())).await.unwrap();
    usecase.commit(Transition::SetCustomInput("x".into())).await.unwrap();

    let response = usecase.run_code().await.unwrap();

    assert_eq!(response, RunResponse::success());
    assert!(api.runs.lock().unwrap().is_empty());
    let messages = worker.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].code, "console.log('Hello')");
    assert_eq!(messages[0].input, "\"x\"");
    drop(messages);
    assert_eq!(usecase.snapshot().await.output, "Hello\nworld");
}

#[tokio::test]
async fn test_worker_error_output_rejects_with_marker() {
    let worker = Arc::new(FakeWorker::replying(&["Error: x is not defined"], None));
    let usecase = usecase(Arc::new(FakeCodeApi::default()), worker);

    let err = usecase
        .run_in_browser("x".into(), String::new())
        .await
        .unwrap_err();

    match err {
        CodepadError::Execution { result, output } => {
            assert_eq!(result, "compile_error");
            assert_eq!(output, "Error: x is not defined");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(usecase.snapshot().await.output, "Error: x is not defined");
}

#[tokio::test]
async fn test_worker_status_wins_over_output_text() {
    let worker = Arc::new(FakeWorker::replying(&["Error codes: none"], Some(WorkerStatus::Ok)));
    let usecase = usecase(Arc::new(FakeCodeApi::default()), worker);

    assert!(usecase.run_in_browser("x".into(), String::new()).await.is_ok());
}

// ============================================================================
// load-from-server
// ============================================================================

#[tokio::test]
async fn test_load_requires_saved_route() {
    let api = Arc::new(FakeCodeApi::with_document(java_document()));
    let usecase = usecase(api.clone(), idle_worker());
    let before = usecase.snapshot().await;

    let loaded = usecase.load_from_server().await.unwrap();

    assert!(loaded.is_none());
    assert!(api.fetched.lock().unwrap().is_empty());
    assert_eq!(usecase.snapshot().await, before);
}

#[tokio::test]
async fn test_load_document_updates_session() {
    let api = Arc::new(FakeCodeApi::with_document(java_document()));
    let usecase = usecase(api.clone(), idle_worker());
    usecase.commit(Transition::SetRoute(Route::saved("7"))).await.unwrap();

    let loaded = usecase.load_from_server().await.unwrap();

    assert_eq!(loaded, Some(java_document()));
    assert_eq!(*api.fetched.lock().unwrap(), vec!["7".to_string()]);

    let state = usecase.snapshot().await;
    assert_eq!(state.code_id, Some(CodeId::Number(7)));
    assert_eq!(state.language, "Java");
    assert_eq!(state.runtime_id, "java");
    assert_eq!(state.code["Java"], "class X{}");
    assert_eq!(state.file_name, "Main.java");
    assert_eq!(state.code_title, "T");
    assert_eq!(state.check_data, content_digest("class X{}"));
}

#[tokio::test]
async fn test_open_document_sets_route_and_loads() {
    let api = Arc::new(FakeCodeApi::with_document(java_document()));
    let usecase = usecase(api, idle_worker());

    let loaded = usecase.open_document(&CodeId::Number(7)).await.unwrap();

    assert!(loaded.is_some());
    assert!(usecase.snapshot().await.route.is_saved());
}

#[tokio::test]
async fn test_loaded_document_is_not_resaved() {
    let api = Arc::new(FakeCodeApi::with_document(java_document()));
    let usecase = usecase(api.clone(), idle_worker());
    usecase.open_document(&CodeId::Number(7)).await.unwrap();

    let receipt = usecase.save_to_server().await.unwrap();

    assert_eq!(
        receipt,
        SaveReceipt {
            id: Some(CodeId::Number(7)),
            written: false
        }
    );
    assert!(api.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_load_unknown_language_leaves_session_untouched() {
    let document = CodeDocument {
        language: "Kotlin".into(),
        code: "fun main() {}".into(),
        ..java_document()
    };
    let api = Arc::new(FakeCodeApi::with_document(document));
    let usecase = usecase(api.clone(), idle_worker());
    usecase.commit(Transition::SetRoute(Route::saved("7"))).await.unwrap();
    let before = usecase.snapshot().await;

    let err = usecase.load_from_server().await.unwrap_err();

    assert!(matches!(err, CodepadError::UnknownLanguage(ref name) if name == "Kotlin"));
    assert_eq!(usecase.snapshot().await, before);
    assert!(usecase.snapshot().await.code_id.is_none());

    // A later save must not overwrite document 7 with the old buffer.
    usecase.save_to_server().await.unwrap();
    let saved = api.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].id.is_none());
}

// ============================================================================
// save-to-server
// ============================================================================

#[tokio::test]
async fn test_save_is_idempotent_without_edits() {
    let api = Arc::new(FakeCodeApi::default());
    let usecase = usecase(api.clone(), idle_worker());
    usecase.commit(Transition::SetCodeTitle("hello".into())).await.unwrap();

    let first = usecase.save_to_server().await.unwrap();
    let second = usecase.save_to_server().await.unwrap();

    assert!(first.written);
    assert!(!second.written);
    assert_eq!(first.id, second.id);
    assert_eq!(api.saved.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_sends_full_document_and_records_id() {
    let api = Arc::new(FakeCodeApi::default());
    let usecase = usecase(api.clone(), idle_worker());
    usecase.commit(Transition::ChangeLanguage("Ruby".into())).await.unwrap();
    usecase.commit(Transition::SetCode("puts 2".into())).await.unwrap();
    usecase.commit(Transition::SetCustomInput("in".into())).await.unwrap();
    usecase.commit(Transition::SetCodeTitle("Two".into())).await.unwrap();

    let receipt = usecase.save_to_server().await.unwrap();

    let saved = api.saved.lock().unwrap();
    assert_eq!(saved[0].id, None);
    assert_eq!(saved[0].language, "Ruby");
    assert_eq!(saved[0].code, "puts 2");
    assert_eq!(saved[0].custom_input, "in");
    assert_eq!(saved[0].file_name, "download.rb");
    assert_eq!(saved[0].title, "Two");
    drop(saved);

    let state = usecase.snapshot().await;
    assert_eq!(state.code_id, receipt.id);
    assert_eq!(state.check_data, content_digest("puts 2"));
}

#[tokio::test]
async fn test_edit_after_save_writes_again_with_id() {
    let api = Arc::new(FakeCodeApi::default());
    let usecase = usecase(api.clone(), idle_worker());

    let first = usecase.save_to_server().await.unwrap();
    usecase.commit(Transition::update_code("int main(){}")).await.unwrap();
    let second = usecase.save_to_server().await.unwrap();

    assert!(second.written);
    let saved = api.saved.lock().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].id, first.id);
}

#[tokio::test]
async fn test_failed_save_keeps_state() {
    let api = Arc::new(FakeCodeApi {
        fail_transport: true,
        ..FakeCodeApi::default()
    });
    let usecase = usecase(api, idle_worker());

    assert!(usecase.save_to_server().await.is_err());
    let state = usecase.snapshot().await;
    assert!(state.code_id.is_none());
    assert_eq!(state.check_data, "");
}

// ============================================================================
// auto-save
// ============================================================================

#[tokio::test]
async fn test_auto_save_needs_document_and_flag() {
    let api = Arc::new(FakeCodeApi::default());
    let usecase = usecase(api.clone(), idle_worker());

    assert_eq!(usecase.auto_save().await.unwrap(), None);

    usecase.commit(Transition::SetCodeId(Some(CodeId::Number(9)))).await.unwrap();
    usecase.commit(Transition::SetAutoSave(false)).await.unwrap();
    assert_eq!(usecase.auto_save().await.unwrap(), None);

    usecase.commit(Transition::SetAutoSave(true)).await.unwrap();
    let receipt = usecase.auto_save().await.unwrap().unwrap();
    assert!(receipt.written);
    assert_eq!(api.saved.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_auto_saver_saves_on_interval_and_stops() {
    let api = Arc::new(FakeCodeApi::default());
    let usecase = Arc::new(usecase(api.clone(), idle_worker()));
    usecase.commit(Transition::SetCodeId(Some(CodeId::Number(9)))).await.unwrap();

    let saver = AutoSaver::start(usecase.clone(), Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(api.saved.lock().unwrap().len(), 1);

    // Unchanged code: later ticks do not write.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.saved.lock().unwrap().len(), 1);

    saver.stop().await;
    usecase.commit(Transition::update_code("changed")).await.unwrap();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.saved.lock().unwrap().len(), 1);
}

// ============================================================================
// durable projection
// ============================================================================

#[tokio::test]
async fn test_preferences_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.toml");

    {
        let repository = Arc::new(TomlPersistedStateRepository::with_path(path.clone()));
        let mut store = SessionStore::new();
        attach_persistence(&mut store, repository).unwrap();
        store.commit(Transition::SetFontSize(21)).unwrap();
        store.commit(Transition::ToggleInOutBox).unwrap();
        store.commit(Transition::SetTheme("light".into())).unwrap();
        store.commit(Transition::SetCode("lost on reload".into())).unwrap();
    }

    let repository = Arc::new(TomlPersistedStateRepository::with_path(path));
    assert!(repository.load().unwrap().is_some());

    let mut store = SessionStore::new();
    assert!(attach_persistence(&mut store, repository).unwrap());
    let state = store.state();
    assert_eq!(state.font_size, 21);
    assert!(state.show_in_out_box);
    assert_eq!(state.theme, "vs-dark");
    assert_ne!(state.active_code(), "lost on reload");
}

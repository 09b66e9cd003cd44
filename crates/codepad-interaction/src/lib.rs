//! Codepad interaction layer: HTTP API client and the local script worker.

pub mod http_code_api;
pub mod script_worker;

pub use http_code_api::HttpCodeApi;
pub use script_worker::{CommandScriptEngine, ScriptEngine, ThreadScriptWorker};

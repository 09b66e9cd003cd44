use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_WORKER_PROGRAM: &str = "node";

/// Client configuration (`config.toml`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the document and execution API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// `None` waits for the worker indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_timeout_secs: Option<u64>,
    /// Interpreter used by the local script worker.
    #[serde(default = "default_worker_program")]
    pub worker_program: String,
    #[serde(default)]
    pub worker_args: Vec<String>,
    #[serde(default)]
    pub auto_save: AutoSaveSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            worker_timeout_secs: None,
            worker_program: default_worker_program(),
            worker_args: Vec::new(),
            auto_save: AutoSaveSettings::default(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_worker_program() -> String {
    DEFAULT_WORKER_PROGRAM.to_string()
}

/// Periodic save of the open document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveSettings {
    #[serde(default = "default_auto_save_enabled")]
    pub enabled: bool,
    #[serde(default = "default_auto_save_interval_secs")]
    pub interval_secs: u64,
}

impl Default for AutoSaveSettings {
    fn default() -> Self {
        Self {
            enabled: default_auto_save_enabled(),
            interval_secs: default_auto_save_interval_secs(),
        }
    }
}

fn default_auto_save_enabled() -> bool {
    true
}

fn default_auto_save_interval_secs() -> u64 {
    30
}

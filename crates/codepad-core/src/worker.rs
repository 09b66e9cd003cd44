//! Contract of the isolated script worker.
//!
//! One worker runs one program: it receives a single [`WorkerMessage`] and
//! answers with a single [`WorkerReply`].

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Message posted to a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerMessage {
    pub code: String,
    /// Custom input as a JSON string literal.
    pub input: String,
}

impl WorkerMessage {
    pub fn new(code: impl Into<String>, input: &str) -> Result<Self> {
        Ok(Self {
            code: code.into(),
            input: serde_json::to_string(input)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Ok,
    Error,
}

/// The worker's only reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkerReply {
    /// Output lines in order.
    pub lines: Vec<String>,
    /// Outcome reported by the engine, if it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkerStatus>,
}

impl WorkerReply {
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether the run failed.
    ///
    /// A reported status wins. Without one, the output is a failure when it is
    /// a single line starting with `Error`.
    pub fn is_failure(&self) -> bool {
        match self.status {
            Some(status) => status == WorkerStatus::Error,
            None => looks_like_error(&self.output()),
        }
    }
}

static ERROR_OUTPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Error.*$").expect("static regex is valid")
});

/// Legacy classification for engines that report no status.
pub fn looks_like_error(output: &str) -> bool {
    ERROR_OUTPUT.is_match(output)
}

/// Spawns an isolated worker per call and awaits its single reply.
#[async_trait]
pub trait ScriptWorker: Send + Sync {
    async fn run(&self, message: WorkerMessage) -> Result<WorkerReply>;
}

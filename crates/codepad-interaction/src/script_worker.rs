//! Isolated script worker.
//!
//! Every run gets its own OS thread. The thread receives one
//! [`WorkerMessage`], evaluates it with a [`ScriptEngine`] and sends back one
//! [`WorkerReply`]. Threads are never reused.

use std::io::{ErrorKind, Write as IoWrite};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use codepad_core::config::ClientConfig;
use codepad_core::error::{CodepadError, Result};
use codepad_core::worker::{ScriptWorker, WorkerMessage, WorkerReply, WorkerStatus};
use tokio::sync::oneshot;

/// Environment variable carrying the JSON-encoded custom input.
pub const INPUT_ENV: &str = "CODEPAD_INPUT";

/// Evaluates one program. Runs on the worker thread and may block.
pub trait ScriptEngine: Send + Sync + 'static {
    fn evaluate(&self, message: &WorkerMessage) -> Result<WorkerReply>;
}

impl<F> ScriptEngine for F
where
    F: Fn(&WorkerMessage) -> Result<WorkerReply> + Send + Sync + 'static,
{
    fn evaluate(&self, message: &WorkerMessage) -> Result<WorkerReply> {
        self(message)
    }
}

/// [`ScriptWorker`] that spawns a dedicated thread per run.
pub struct ThreadScriptWorker<E> {
    engine: Arc<E>,
    timeout: Option<Duration>,
}

impl<E: ScriptEngine> ThreadScriptWorker<E> {
    /// Waits for replies without a time limit.
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl<E: ScriptEngine> ScriptWorker for ThreadScriptWorker<E> {
    async fn run(&self, message: WorkerMessage) -> Result<WorkerReply> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let engine = Arc::clone(&self.engine);

        std::thread::Builder::new()
            .name("codepad-script-worker".to_string())
            .spawn(move || {
                let reply = engine.evaluate(&message);
                // Receiver may have timed out; nothing left to notify.
                let _ = reply_tx.send(reply);
            })
            .map_err(|err| CodepadError::worker(format!("Failed to spawn worker: {err}")))?;

        let received = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, reply_rx).await.map_err(|_| {
                CodepadError::worker(format!("No reply within {}s", limit.as_secs()))
            })?,
            None => reply_rx.await,
        };

        received.map_err(|_| CodepadError::worker("Worker exited without replying"))?
    }
}

/// Runs programs through an external interpreter.
///
/// The code is written to the interpreter's stdin and the input is exposed in
/// [`INPUT_ENV`]. Stdout becomes the reply lines; on a non-zero exit the
/// stderr lines follow and the status is `Error`.
#[derive(Debug, Clone)]
pub struct CommandScriptEngine {
    program: String,
    args: Vec<String>,
}

impl CommandScriptEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.worker_program.clone(), config.worker_args.clone())
    }
}

impl ScriptEngine for CommandScriptEngine {
    fn evaluate(&self, message: &WorkerMessage) -> Result<WorkerReply> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(INPUT_ENV, &message.input)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                CodepadError::worker(format!("Failed to start '{}': {err}", self.program))
            })?;

        // Feed stdin from its own thread so a chatty program cannot block on a
        // full stdout pipe while we are still writing.
        let writer = child.stdin.take().map(|mut stdin| {
            let code = message.code.clone();
            std::thread::spawn(move || stdin.write_all(code.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The program exited without reading all of its input.
                Ok(Err(err)) if err.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("[CommandScriptEngine] stdin closed early: {}", err);
                }
                Ok(Err(err)) => return Err(err.into()),
                Err(_) => return Err(CodepadError::worker("stdin writer panicked")),
            }
        }
        let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();

        let status = if output.status.success() {
            WorkerStatus::Ok
        } else {
            lines.extend(
                String::from_utf8_lossy(&output.stderr)
                    .lines()
                    .map(str::to_string),
            );
            WorkerStatus::Error
        };

        Ok(WorkerReply {
            lines,
            status: Some(status),
        })
    }
}

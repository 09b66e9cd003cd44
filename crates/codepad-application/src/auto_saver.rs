//! Background auto-save scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::editor_usecase::EditorUseCase;

/// Periodically calls [`EditorUseCase::auto_save`] until stopped.
pub struct AutoSaver {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutoSaver {
    /// Spawns the scheduler; the first save happens one `period` from now.
    pub fn start(usecase: Arc<EditorUseCase>, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            tracing::info!(target: "codepad::auto_save", "Scheduler started ({}s interval)", period.as_secs());

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        match usecase.auto_save().await {
                            Ok(Some(receipt)) if receipt.written => {
                                tracing::info!(target: "codepad::auto_save", "Saved document {:?}", receipt.id);
                            }
                            Ok(_) => {}
                            Err(e) => tracing::warn!(target: "codepad::auto_save", "Auto-save failed: {}", e),
                        }
                    }
                }
            }

            tracing::debug!(target: "codepad::auto_save", "Scheduler stopped");
        });

        Self { cancel, handle }
    }

    /// Stops the scheduler and waits for an in-flight save to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use codepad_application::AutoSaver;
use codepad_core::session::Transition;
use tokio::time::{MissedTickBehavior, interval};

use super::context::AppContext;
use super::save;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub async fn watch(
    ctx: &AppContext,
    file: &Path,
    language: Option<String>,
    title: Option<String>,
    id: Option<String>,
) -> Result<()> {
    let settings = &ctx.config.auto_save;
    if !settings.enabled {
        bail!("Auto-save is disabled in the configuration");
    }

    ctx.open_source(file, language.as_deref(), String::new())
        .await?;
    let receipt = save::save_with(ctx, title, id).await?;
    save::report(&receipt);
    ctx.usecase.commit(Transition::SetAutoSave(true)).await?;

    let saver = AutoSaver::start(
        ctx.usecase.clone(),
        Duration::from_secs(settings.interval_secs.max(1)),
    );
    tracing::info!("Watching {} (Ctrl-C to stop)", file.display());

    let synced = sync_until(ctx, file, tokio::signal::ctrl_c()).await;
    saver.stop().await;
    synced?;
    sync_file(ctx, file).await?;
    let receipt = ctx.usecase.save_to_server().await.context("Final save failed")?;
    save::report(&receipt);
    Ok(())
}

/// Re-reads `file` every poll until `shutdown` resolves.
///
/// `shutdown` is polled across iterations, so a signal that arrives while a
/// sync is running still ends the loop.
async fn sync_until<F>(ctx: &AppContext, file: &Path, shutdown: F) -> Result<()>
where
    F: Future,
{
    tokio::pin!(shutdown);
    let mut poll = interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            _ = poll.tick() => sync_file(ctx, file).await?,
        }
    }
}

/// Commits the file's content when it differs from the active code.
async fn sync_file(ctx: &AppContext, file: &Path) -> Result<()> {
    let text = match tokio::fs::read_to_string(file).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", file.display(), e);
            return Ok(());
        }
    };

    let store = ctx.usecase.store();
    let mut store = store.lock().await;
    if store.state().active_code() != text {
        tracing::debug!("{} changed on disk", file.display());
        store.commit_all([Transition::update_code(text), Transition::SetIsChanged(true)])?;
    }
    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use codepad_application::SaveReceipt;
use codepad_core::session::{CodeId, Transition};

use super::context::AppContext;

pub async fn save(
    ctx: &AppContext,
    file: &Path,
    language: Option<String>,
    title: Option<String>,
    id: Option<String>,
    input: Option<String>,
) -> Result<()> {
    ctx.open_source(file, language.as_deref(), input.unwrap_or_default())
        .await?;
    let receipt = save_with(ctx, title, id).await?;
    report(&receipt);
    Ok(())
}

/// Applies the optional title and target id, then saves.
pub(super) async fn save_with(
    ctx: &AppContext,
    title: Option<String>,
    id: Option<String>,
) -> Result<SaveReceipt> {
    if let Some(title) = title {
        ctx.usecase.commit(Transition::SetCodeTitle(title)).await?;
    }
    if let Some(id) = id {
        ctx.usecase
            .commit(Transition::SetCodeId(Some(CodeId::from(id.as_str()))))
            .await?;
    }

    ctx.usecase.save_to_server().await.context("Save failed")
}

pub(super) fn report(receipt: &SaveReceipt) {
    match &receipt.id {
        Some(id) if receipt.written => println!("Saved as {}", id),
        Some(id) => println!("No changes to save ({})", id),
        None => println!("No changes to save"),
    }
}

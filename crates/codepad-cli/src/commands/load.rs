use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use codepad_core::session::CodeId;

use super::context::AppContext;

pub async fn load(ctx: &AppContext, id: &str, output: Option<PathBuf>) -> Result<()> {
    let Some(document) = ctx
        .usecase
        .open_document(&CodeId::from(id))
        .await
        .with_context(|| format!("Failed to load document {}", id))?
    else {
        bail!("Document {} could not be opened", id);
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &document.code)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} ({}) written to {}",
                document.title,
                document.language,
                path.display()
            );
        }
        None => {
            tracing::info!(
                "Loaded '{}' ({}, {})",
                document.title,
                document.language,
                document.file_name
            );
            print!("{}", document.code);
        }
    }
    Ok(())
}

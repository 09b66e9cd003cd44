use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use codepad_core::error::CodepadError;

use super::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    file: &Path,
    language: Option<String>,
    input: Option<String>,
    input_file: Option<PathBuf>,
) -> Result<()> {
    let input = match (input, input_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input {}", path.display()))?,
        (None, None) => String::new(),
    };

    let spec = ctx.open_source(file, language.as_deref(), input).await?;
    tracing::info!("Running {} as {}", file.display(), spec.name);

    match ctx.usecase.run_code().await {
        Ok(response) => {
            print_output(&ctx.usecase.snapshot().await.output);
            if response.is_compile_error() {
                bail!("Compilation failed");
            }
            Ok(())
        }
        Err(CodepadError::Execution { output, .. }) => {
            print_output(&output);
            bail!("Program reported an error");
        }
        Err(e) => Err(e).context("Run failed"),
    }
}

fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

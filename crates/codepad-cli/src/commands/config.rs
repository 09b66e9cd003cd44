use std::path::PathBuf;

use anyhow::{Context, Result};
use codepad_core::config::ClientConfig;
use codepad_infrastructure::{CodepadPaths, ConfigService};

pub fn show(config_dir: Option<PathBuf>, init: bool) -> Result<()> {
    let paths = CodepadPaths::new(config_dir);
    let path = paths.config_file()?;
    let service = ConfigService::with_path(path.clone());

    if init {
        if path.exists() {
            println!("{} already exists", path.display());
        } else {
            service.save_config(&ClientConfig::default())?;
            println!("Wrote {}", path.display());
        }
    }

    let config = service
        .get_config()
        .with_context(|| format!("Failed to load {}", path.display()))?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

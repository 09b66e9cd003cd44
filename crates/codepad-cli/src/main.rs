use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "codepad")]
#[command(about = "Codepad CLI - run, save and load code on a Codepad server", long_about = None)]
struct Cli {
    /// Directory holding config.toml and state.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported languages
    Languages,
    /// Run a source file
    Run {
        file: PathBuf,
        /// Language display name (defaults to detection by extension)
        #[arg(short, long)]
        language: Option<String>,
        /// Program input
        #[arg(short, long, conflicts_with = "input_file")]
        input: Option<String>,
        /// Read program input from a file
        #[arg(long)]
        input_file: Option<PathBuf>,
    },
    /// Save a source file as a document
    Save {
        file: PathBuf,
        #[arg(short, long)]
        language: Option<String>,
        #[arg(short, long)]
        title: Option<String>,
        /// Update an existing document instead of creating one
        #[arg(long)]
        id: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Keep a source file saved while it is being edited
    Watch {
        file: PathBuf,
        #[arg(short, long)]
        language: Option<String>,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Fetch a saved document
    Load {
        id: String,
        /// Write the code to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Write the defaults to config.toml if it does not exist
        #[arg(long)]
        init: bool,
    },
    /// Show or change editor preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "codepad=debug" } else { "codepad=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Languages => commands::languages::list(),
        Commands::Run {
            file,
            language,
            input,
            input_file,
        } => {
            let ctx = commands::context::AppContext::build(cli.config_dir)?;
            commands::run::run(&ctx, &file, language, input, input_file).await?
        }
        Commands::Save {
            file,
            language,
            title,
            id,
            input,
        } => {
            let ctx = commands::context::AppContext::build(cli.config_dir)?;
            commands::save::save(&ctx, &file, language, title, id, input).await?
        }
        Commands::Watch {
            file,
            language,
            title,
            id,
        } => {
            let ctx = commands::context::AppContext::build(cli.config_dir)?;
            commands::watch::watch(&ctx, &file, language, title, id).await?
        }
        Commands::Load { id, output } => {
            let ctx = commands::context::AppContext::build(cli.config_dir)?;
            commands::load::load(&ctx, &id, output).await?
        }
        Commands::Config { init } => commands::config::show(cli.config_dir, init)?,
        Commands::Prefs { action } => {
            let ctx = commands::context::AppContext::build(cli.config_dir)?;
            commands::prefs::apply(&ctx, action).await?
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use af_core::init::{generate_auditflow_structure, InitOptions};

#[derive(Parser)]
#[command(name = "auditflow", about = "Agent pipeline for audit report drafting")]
struct Cli {
    /// Project root containing the .auditflow directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Gemini API key. Falls back to the GEMINI_API_KEY environment variable.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scaffold a .auditflow directory with config and agent templates
    Init {
        /// Overwrite an existing .auditflow directory
        #[arg(long)]
        force: bool,

        /// Only generate the first agent of the chain
        #[arg(long)]
        minimal: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Honors RUST_LOG; silent by default so the TUI stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Init { force, minimal }) => {
            let options = InitOptions {
                target_dir: cli.root.clone(),
                force,
                minimal,
            };
            generate_auditflow_structure(options).await?;
            println!(
                "{} Initialized .auditflow in {}",
                "ok:".green().bold(),
                cli.root.display()
            );
            Ok(())
        }
        None => af_tui::run_app(&cli.root, cli.api_key)
            .await
            .map_err(|e| color_eyre::eyre::eyre!(e)),
    }
}

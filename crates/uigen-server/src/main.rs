//! UIGen command-line entry point.
//!
//! # Usage
//!
//! Run the MCP server via stdio transport:
//!
//! ```bash
//! uigen serve --output ./preview
//! ```
//!
//! Or configure it in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "uigen": {
//!       "command": "uigen",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```
//!
//! Replay a recorded session and write its final preview:
//!
//! ```bash
//! uigen replay session.jsonl --output ./preview
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uigen_server::config::Config;
use uigen_server::service::UigenService;
use uigen_server::session::ProjectSession;
use uigen_server::{replay, spawn_preview_writer, write_preview};

/// UIGen - AI-driven React component generation with a live preview.
#[derive(Parser, Debug)]
#[command(name = "uigen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: <config dir>/uigen/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for preview.html (overrides output.dir)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the project tools over MCP on stdio.
    ///
    /// The preview is rewritten to `<output>/preview.html` after every change.
    Serve,

    /// Apply a JSON Lines transcript of tool calls to a fresh project.
    ///
    /// Each line is `{"tool": ..., "input": {...}}`. Exits non-zero if any
    /// line cannot be parsed or routed.
    Replay {
        /// Transcript file
        transcript: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.general.log_level)?;

    let output = cli.output.unwrap_or_else(|| config.output.dir.clone());

    match cli.command {
        Commands::Serve => serve(config, output).await,
        Commands::Replay { transcript } => replay_transcript(config, output, transcript).await,
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// Initializes logging to stderr; stdout carries the MCP protocol.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
fn init_logging(verbose: bool, level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}

async fn serve(config: Config, output: PathBuf) -> Result<ExitCode> {
    info!("Starting uigen v{}", env!("CARGO_PKG_VERSION"));

    let mut session = ProjectSession::new(config.preview)?;
    let changes = session.subscribe();
    let session = Arc::new(Mutex::new(session));

    info!("Writing preview to {}", output.display());
    let writer = spawn_preview_writer(Arc::clone(&session), changes, output);

    let service = UigenService::new(session).serve(stdio()).await?;
    service.waiting().await?;

    writer.abort();
    info!("Server shutdown complete");
    Ok(ExitCode::SUCCESS)
}

async fn replay_transcript(
    config: Config,
    output: PathBuf,
    transcript: PathBuf,
) -> Result<ExitCode> {
    let content = tokio::fs::read_to_string(&transcript)
        .await
        .with_context(|| format!("failed to read transcript {}", transcript.display()))?;

    let mut session = ProjectSession::new(config.preview)?;
    let report = replay(&mut session, &content, &mut std::io::stdout().lock())?;

    let status = session.status();
    let path = write_preview(&output, &session.preview().html).await?;
    info!(
        "Replayed {} calls ({} tool errors); preview {} written to {}",
        report.applied,
        report.tool_errors,
        status.state,
        path.display()
    );

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("{} transcript lines could not be applied", report.failures.len());
        Ok(ExitCode::FAILURE)
    }
}

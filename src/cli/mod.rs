//! Command-line interface for serverless-config
//!
//! Provides `deploy` and `logs` subcommands that print the resolved
//! configuration as JSON.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ExternalCliOptions, ResolveContext};

mod deploy;
mod logs;
mod utils;

/// Resolve the effective configuration of serverless deploy and logs commands
#[derive(Parser)]
#[command(name = "serverless-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with the embedding caller's context (profile, credentials)
    #[arg(long, value_name = "FILE", global = true)]
    caller_context: Option<PathBuf>,

    /// Print the auth token unmasked
    #[arg(long, global = true)]
    show_secrets: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration of a deployment
    Deploy(deploy::DeployArgs),

    /// Resolve the configuration of a logs request
    Logs(logs::LogsArgs),
}

/// Options shared by every subcommand
pub(crate) struct GlobalOptions {
    pub external: Option<ExternalCliOptions>,
    pub show_secrets: bool,
    pub context: ResolveContext,
}

pub fn run() -> Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let working_dir = std::env::current_dir().context("Failed to read current directory")?;
    let global = GlobalOptions {
        external: cli.caller_context.as_deref().map(read_caller_context).transpose()?,
        show_secrets: cli.show_secrets,
        context: ResolveContext::new(working_dir)
            .with_command_line(utils::full_command(std::env::args())),
    };

    // Per-subcommand matches tell us which flags came from the command line
    let sub_matches = matches.subcommand().map(|(_, m)| m);
    match cli.command {
        Commands::Deploy(args) => deploy::run(args, sub_matches, &global),
        Commands::Logs(args) => logs::run(args, sub_matches, &global),
    }
}

fn read_caller_context(path: &Path) -> Result<ExternalCliOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading caller context: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid caller context JSON: {}", path.display()))
}

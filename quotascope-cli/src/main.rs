// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Quotascope CLI - project resource quota monitoring from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Show the usage panel for the default project
//! quotascope
//!
//! # Show usage for a specific project
//! quotascope --project acme-prod
//!
//! # JSON output
//! quotascope --format json --pretty
//!
//! # Watch mode
//! quotascope watch --interval 30
//!
//! # Manage configuration
//! quotascope config show
//! quotascope config set default-project acme-prod
//! ```

mod commands;
mod notify;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, usage, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// Quotascope CLI - project resource quota monitoring.
#[derive(Parser)]
#[command(name = "quotascope")]
#[command(about = "Project resource quota monitoring CLI")]
#[command(long_about = r#"
Quotascope renders a project's resource usage (database size, egress,
storage) as labeled progress bars, highlighting features that are
approaching or exceeding their plan limits.

Examples:
  quotascope                         # Usage panel for the default project
  quotascope --project acme-prod     # Specific project
  quotascope --format json           # JSON output for scripting
  quotascope watch --interval 30     # Live refresh
"#)]
#[command(version)]
#[command(author = "Quotascope Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'usage' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Project ref to query.
    #[arg(long, short, global = true)]
    pub project: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current usage and render the panel (default).
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Watch usage with periodic refresh.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Usage data could not be fetched.
    FetchFailed = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("quotascope=debug,info")
    } else {
        EnvFilter::new("quotascope=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Usage(args)) => usage::run(args, &cli).await,
        Some(Commands::Watch(args)) => watch::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
        None => {
            // Default to usage command
            usage::run(&usage::UsageArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}

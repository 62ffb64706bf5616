//! rostersync: keep a Nexus user directory in step with a GitHub organization.
//!
//! # Usage
//!
//! ```text
//! rostersync sync [--dry-run] [--disable-missing]
//! rostersync plan [--json] [--disable-missing]
//! rostersync [--env-file <path>] [--log-format text|json] <command>
//! ```
//!
//! Configuration comes from the environment (see `rostersync_core::config`).
//! Logs go to stderr; stdout carries only the run summary or plan.
//!
//! Exit status: `0` on a completed run, `2` on a configuration error (no
//! network call is made), `64` on a command-line usage error, `1` on any
//! other fatal error.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use commands::{plan::PlanArgs, sync::SyncArgs};
use rostersync_core::ConfigError;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "rostersync",
    version,
    about = "Reconcile Nexus local users against a GitHub organization",
    long_about = None,
)]
struct Cli {
    /// Load configuration variables from a dotenv file first. Variables
    /// already set in the environment take precedence.
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create and (optionally) disable directory users to match the roster.
    Sync(SyncArgs),

    /// Show what `sync` would change without touching the directory.
    Plan(PlanArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

const CONFIG_ERROR_EXIT: u8 = 2;
/// `EX_USAGE`; clap's own default of 2 would collide with configuration errors.
const USAGE_ERROR_EXIT: u8 = 64;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(USAGE_ERROR_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.log_format);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.downcast_ref::<ConfigError>().is_some() {
                ExitCode::from(CONFIG_ERROR_EXIT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let env_file = cli.env_file.as_deref();
    match cli.command {
        Commands::Sync(args) => args.run(env_file),
        Commands::Plan(args) => args.run(env_file),
    }
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

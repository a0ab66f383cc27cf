//! timetrack: command-line host for the activity time tracker.
//!
//! Stands in for IDE glue: feeds canonical events into the engine and
//! prints transitions and per-label totals.
//!
//! ## Subcommands
//!
//! - `replay`: Rebuild totals from a recorded JSON-lines message log
//! - `watch`: Apply messages from stdin as they arrive
//! - `events`: List canonical events and the condition each one sets

mod error;
mod events;
mod logging;
mod probe;
mod replay;
mod report;
mod watch;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timetrack")]
#[command(about = "Activity time tracker for IDE sessions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines message log and print per-label totals
    Replay {
        /// Path to the message log
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Take the snapshot at this instant instead of the last message
        #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,

        /// Config file (defaults to ~/.timetrack/config.toml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Read messages from stdin and report transitions as they happen
    Watch {
        /// Config file (defaults to ~/.timetrack/config.toml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// List canonical events and the condition each one sets
    Events,
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC3339 timestamp: {}", e))
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay {
            path,
            json,
            at,
            config,
        } => replay::run(&path, json, at, config),
        Commands::Watch { config } => watch::run(config),
        Commands::Events => {
            events::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "timetrack failed");
        std::process::exit(1);
    }
}

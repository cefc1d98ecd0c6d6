//! CLI command definitions.

pub mod health;
pub mod waitlist;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the Costly waitlist API.
#[derive(Debug, Parser)]
#[command(name = "costly-client")]
#[command(about = "CLI client for the Costly waitlist API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "COSTLY_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an email to the waitlist.
    Join(waitlist::JoinArgs),
    /// Show the public signup counter.
    Count,
    /// Inspect or reconcile stored emails.
    Cleanup(waitlist::CleanupCommand),
    /// Show how to realign the id sequence.
    Sequence,
    /// Server health checks.
    Health(health::HealthArgs),
}

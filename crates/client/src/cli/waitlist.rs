//! Waitlist CLI commands.

use clap::{Args, Parser, Subcommand};

/// Arguments for `join`.
#[derive(Debug, Args)]
pub struct JoinArgs {
    /// Email address to add. Normalized by the server.
    #[arg(long)]
    pub email: String,
}

/// Cleanup commands.
#[derive(Debug, Parser)]
pub struct CleanupCommand {
    #[command(subcommand)]
    pub action: CleanupAction,
}

/// Available cleanup actions.
#[derive(Debug, Subcommand)]
pub enum CleanupAction {
    /// Report duplicates and malformed emails without changing anything.
    Report,
    /// Delete duplicates and normalize the rows that are kept.
    Apply,
}

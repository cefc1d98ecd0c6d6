//! Health CLI commands.

use clap::Args;

/// Arguments for `health`.
#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Only check liveness instead of store readiness.
    #[arg(long)]
    pub live: bool,
}

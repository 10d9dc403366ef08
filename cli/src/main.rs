//! fleetctl — operator CLI for the fleet configuration-management master.
//!
//! # Usage
//!
//! ```text
//! fleetctl login --stack cluster-prod
//! fleetctl ping
//! fleetctl cmd "uptime" --target 'web*'
//! fleetctl pkg install vim curl --target 'os:Ubuntu'
//! fleetctl keys accept node-7
//! fleetctl --json service status nginx | jq
//! ```

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Initialize tracing with environment-based filtering.
///
/// - `quiet`: suppress all logging output (for scripting)
/// - `verbose`: enable debug-level logging
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.quiet, cli.global.verbose);
    cli.run().await
}

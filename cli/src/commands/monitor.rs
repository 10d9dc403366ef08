//! Load, I/O, and status monitoring.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum MonitorCommand {
    /// Show load averages.
    Load,
    /// Show disk I/O statistics.
    Iostat,
    /// Show network interface counters.
    Netstats,
    /// Show the full status snapshot.
    Info,
}

impl MonitorCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        let op = match self {
            Self::Load => "monitor.load",
            Self::Iostat => "monitor.iostat",
            Self::Netstats => "monitor.netstats",
            Self::Info => "monitor.info",
        };
        dispatch_op(ctx, op, vec![]).await
    }
}

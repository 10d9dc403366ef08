//! System power and resource queries.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum SystemCommand {
    /// Reboot the targeted minions.
    Reboot,
    /// Show uptime.
    Uptime,
    /// Show disk usage.
    Disk,
    /// Show memory statistics.
    Memory,
    /// Show CPU information.
    Cpu,
    /// Show system time.
    Time,
    /// Show the running kernel release.
    Kernel,
}

impl SystemCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        let op = match self {
            Self::Reboot => "system.reboot",
            Self::Uptime => "system.uptime",
            Self::Disk => "system.disk",
            Self::Memory => "system.memory",
            Self::Cpu => "system.cpu",
            Self::Time => "system.time",
            Self::Kernel => "system.kernel",
        };
        dispatch_op(ctx, op, vec![]).await
    }
}

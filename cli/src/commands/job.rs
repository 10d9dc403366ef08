//! Master-side job control.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum JobCommand {
    /// List running jobs on the targeted minions.
    List,
    /// Kill a running job by its identifier.
    Kill { jid: String },
    /// Sync modules, states, and grains from the master.
    Sync,
}

impl JobCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::List => dispatch_op(ctx, "job.list", vec![]).await,
            Self::Kill { jid } => dispatch_op(ctx, "job.kill", vec![jid]).await,
            Self::Sync => dispatch_op(ctx, "job.sync", vec![]).await,
        }
    }
}

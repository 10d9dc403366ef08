//! Process inspection and control.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum ProcessCommand {
    /// List processes matching a pattern.
    List {
        /// Pattern matched against process names.
        #[arg(default_value = ".*")]
        pattern: String,
    },
    /// Show the busiest processes.
    Top,
    /// Send a signal to a process by PID.
    Kill {
        pid: String,
        /// Signal number; defaults to SIGTERM on the minion.
        #[arg(long)]
        signal: Option<String>,
    },
    /// Show details for one process.
    Info { pid: String },
}

impl ProcessCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::List { pattern } => dispatch_op(ctx, "process.list", vec![pattern]).await,
            Self::Top => dispatch_op(ctx, "process.top", vec![]).await,
            Self::Kill { pid, signal } => {
                let mut args = vec![pid];
                if let Some(signal) = signal {
                    args.push(signal);
                }
                dispatch_op(ctx, "process.kill", args).await
            }
            Self::Info { pid } => dispatch_op(ctx, "process.info", vec![pid]).await,
        }
    }
}

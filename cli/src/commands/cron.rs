//! Cron job management.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum CronCommand {
    /// List cron entries for a user.
    List { user: String },
    /// Add a cron entry.
    Add {
        user: String,
        /// Minute field (0-59 or *).
        minute: String,
        /// Hour field (0-23 or *).
        hour: String,
        /// Day of month (1-31 or *).
        day: String,
        /// Month (1-12 or *).
        month: String,
        /// Day of week (0-6 or *).
        weekday: String,
        /// Command to schedule.
        command: String,
    },
    /// Remove a cron entry by its command.
    Remove { user: String, command: String },
}

impl CronCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::List { user } => dispatch_op(ctx, "cron.list", vec![user]).await,
            Self::Add {
                user,
                minute,
                hour,
                day,
                month,
                weekday,
                command,
            } => {
                dispatch_op(
                    ctx,
                    "cron.add",
                    vec![user, minute, hour, day, month, weekday, command],
                )
                .await
            }
            Self::Remove { user, command } => {
                dispatch_op(ctx, "cron.remove", vec![user, command]).await
            }
        }
    }
}

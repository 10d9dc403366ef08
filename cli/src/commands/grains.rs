//! Minion grain queries and mutation.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum GrainsCommand {
    /// Show all grains.
    Items,
    /// Get one grain value.
    Get { key: String },
    /// Set a grain value.
    Set { key: String, value: String },
    /// Delete a grain.
    Delete { key: String },
}

impl GrainsCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Items => dispatch_op(ctx, "grains.items", vec![]).await,
            Self::Get { key } => dispatch_op(ctx, "grains.get", vec![key]).await,
            Self::Set { key, value } => dispatch_op(ctx, "grains.set", vec![key, value]).await,
            Self::Delete { key } => dispatch_op(ctx, "grains.delete", vec![key]).await,
        }
    }
}

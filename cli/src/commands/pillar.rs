//! Pillar data queries.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum PillarCommand {
    /// Get one pillar value.
    Get { key: String },
    /// Show all pillar data.
    Items,
}

impl PillarCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Get { key } => dispatch_op(ctx, "pillar.get", vec![key]).await,
            Self::Items => dispatch_op(ctx, "pillar.items", vec![]).await,
        }
    }
}

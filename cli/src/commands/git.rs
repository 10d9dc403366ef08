//! Git operations on minions.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum GitCommand {
    /// Clone a repository onto the targeted minions.
    Clone {
        repo: String,
        destination: String,
    },
    /// Pull an existing checkout.
    Pull { path: String },
}

impl GitCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Clone { repo, destination } => {
                // The execution module takes the checkout directory first.
                dispatch_op(ctx, "git.clone", vec![destination, repo]).await
            }
            Self::Pull { path } => dispatch_op(ctx, "git.pull", vec![path]).await,
        }
    }
}

//! Declarative state application.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum StateCommand {
    /// Apply a named state to the targeted minions.
    Apply {
        /// State name, e.g. `nginx` or `webserver.install`.
        state: String,
    },
    /// Apply the full configured state tree.
    Highstate,
}

impl StateCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Apply { state } => dispatch_op(ctx, "state.apply", vec![state]).await,
            Self::Highstate => dispatch_op(ctx, "state.highstate", vec![]).await,
        }
    }
}

//! User account management.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user account.
    Add { username: String },
    /// Delete a user account.
    Delete { username: String },
    /// List user accounts.
    List,
    /// Show details for one user.
    Info { username: String },
}

impl UserCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Add { username } => dispatch_op(ctx, "user.add", vec![username]).await,
            Self::Delete { username } => dispatch_op(ctx, "user.delete", vec![username]).await,
            Self::List => dispatch_op(ctx, "user.list", vec![]).await,
            Self::Info { username } => dispatch_op(ctx, "user.info", vec![username]).await,
        }
    }
}

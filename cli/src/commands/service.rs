//! Service control.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum ServiceCommand {
    /// Start a service.
    Start { name: String },
    /// Stop a service.
    Stop { name: String },
    /// Restart a service.
    Restart { name: String },
    /// Show whether a service is running.
    Status { name: String },
    /// Enable a service at boot.
    Enable { name: String },
    /// Disable a service at boot.
    Disable { name: String },
    /// List all known services.
    List,
}

impl ServiceCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Start { name } => dispatch_op(ctx, "service.start", vec![name]).await,
            Self::Stop { name } => dispatch_op(ctx, "service.stop", vec![name]).await,
            Self::Restart { name } => dispatch_op(ctx, "service.restart", vec![name]).await,
            Self::Status { name } => dispatch_op(ctx, "service.status", vec![name]).await,
            Self::Enable { name } => dispatch_op(ctx, "service.enable", vec![name]).await,
            Self::Disable { name } => dispatch_op(ctx, "service.disable", vec![name]).await,
            Self::List => dispatch_op(ctx, "service.list", vec![]).await,
        }
    }
}

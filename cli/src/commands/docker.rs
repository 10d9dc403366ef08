//! Docker container control.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum DockerCommand {
    /// List containers.
    Ps,
    /// Start a container.
    Start { container: String },
    /// Stop a container.
    Stop { container: String },
    /// Restart a container.
    Restart { container: String },
}

impl DockerCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Ps => dispatch_op(ctx, "docker.ps", vec![]).await,
            Self::Start { container } => dispatch_op(ctx, "docker.start", vec![container]).await,
            Self::Stop { container } => dispatch_op(ctx, "docker.stop", vec![container]).await,
            Self::Restart { container } => {
                dispatch_op(ctx, "docker.restart", vec![container]).await
            }
        }
    }
}

//! Tar and zip archives.
//!
//! The tar operations shape compression flags into the wire arguments,
//! so they build their calls directly instead of using the registry.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_call, dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum ArchiveCommand {
    /// Create a gzipped tarball from a directory.
    Tar {
        source: String,
        destination: String,
    },
    /// Extract a gzipped tarball into a directory.
    Untar {
        source: String,
        destination: String,
    },
    /// Create a zip archive.
    Zip {
        source: String,
        destination: String,
    },
    /// Extract a zip archive.
    Unzip {
        source: String,
        destination: String,
    },
}

impl ArchiveCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Tar {
                source,
                destination,
            } => {
                dispatch_call(
                    ctx,
                    "archive.tar",
                    vec!["czf".into(), destination, source],
                )
                .await
            }
            Self::Untar {
                source,
                destination,
            } => {
                dispatch_call(
                    ctx,
                    "archive.tar",
                    vec!["xzf".into(), source, "-C".into(), destination],
                )
                .await
            }
            Self::Zip {
                source,
                destination,
            } => dispatch_op(ctx, "archive.zip", vec![destination, source]).await,
            Self::Unzip {
                source,
                destination,
            } => dispatch_op(ctx, "archive.unzip", vec![source, destination]).await,
        }
    }
}

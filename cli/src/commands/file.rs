//! Remote filesystem operations.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum FileCommand {
    /// Print the contents of a remote file.
    Read { path: String },
    /// Write content to a remote file, replacing it.
    Write { path: String, content: String },
    /// Remove a remote file.
    Remove { path: String },
    /// Check whether a remote file exists.
    Exists { path: String },
    /// Change file mode, e.g. 0644.
    Chmod { path: String, mode: String },
    /// Change file owner and group.
    Chown {
        path: String,
        user: String,
        group: String,
    },
    /// Copy a file on the minion.
    Copy { source: String, dest: String },
}

impl FileCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Read { path } => dispatch_op(ctx, "file.read", vec![path]).await,
            Self::Write { path, content } => {
                dispatch_op(ctx, "file.write", vec![path, content]).await
            }
            Self::Remove { path } => dispatch_op(ctx, "file.remove", vec![path]).await,
            Self::Exists { path } => dispatch_op(ctx, "file.exists", vec![path]).await,
            Self::Chmod { path, mode } => dispatch_op(ctx, "file.chmod", vec![path, mode]).await,
            Self::Chown { path, user, group } => {
                dispatch_op(ctx, "file.chown", vec![path, user, group]).await
            }
            Self::Copy { source, dest } => {
                dispatch_op(ctx, "file.copy", vec![source, dest]).await
            }
        }
    }
}

//! Mounted filesystem management.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum MountCommand {
    /// List active mounts.
    List,
    /// Mount a device.
    Mount {
        device: String,
        mountpoint: String,
        fstype: String,
    },
    /// Unmount a mountpoint.
    Umount { mountpoint: String },
}

impl MountCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::List => dispatch_op(ctx, "mount.list", vec![]).await,
            Self::Mount {
                device,
                mountpoint,
                fstype,
            } => {
                // The execution module takes the mountpoint first.
                dispatch_op(ctx, "mount.mount", vec![mountpoint, device, fstype]).await
            }
            Self::Umount { mountpoint } => {
                dispatch_op(ctx, "mount.umount", vec![mountpoint]).await
            }
        }
    }
}

//! Package management.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum PkgCommand {
    /// Install one or more packages.
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove one or more packages.
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Upgrade packages; all packages when none are named.
    Upgrade { packages: Vec<String> },
    /// List installed packages.
    List,
}

impl PkgCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Install { packages } => dispatch_op(ctx, "pkg.install", packages).await,
            Self::Remove { packages } => dispatch_op(ctx, "pkg.remove", packages).await,
            Self::Upgrade { packages } => dispatch_op(ctx, "pkg.upgrade", packages).await,
            Self::List => dispatch_op(ctx, "pkg.list", vec![]).await,
        }
    }
}

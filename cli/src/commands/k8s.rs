//! Kubernetes pass-through: kubectl on the targeted minions.
//!
//! There is no dedicated execution module; these shell out through
//! `cmd.run` and therefore build their calls directly.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_call, Ctx};

#[derive(Subcommand)]
pub enum K8sCommand {
    /// kubectl get <resource>.
    Get { resource: String },
    /// kubectl apply -f <manifest>.
    Apply { manifest: String },
    /// kubectl delete <resource> <name>.
    Delete { resource: String, name: String },
}

impl K8sCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        let command = match self {
            Self::Get { resource } => format!("kubectl get {resource}"),
            Self::Apply { manifest } => format!("kubectl apply -f {manifest}"),
            Self::Delete { resource, name } => format!("kubectl delete {resource} {name}"),
        };
        dispatch_call(ctx, "cmd.run", vec![command]).await
    }
}

//! Network diagnostics from the minions' vantage point.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum NetworkCommand {
    /// Ping a host from the targeted minions.
    Ping {
        host: String,
        /// Number of echo requests.
        #[arg(long)]
        count: Option<u32>,
    },
    /// Trace the route to a host.
    Traceroute { host: String },
    /// Show listening sockets.
    Netstat,
    /// Show active TCP connections.
    Connections,
    /// Show the routing table.
    Routes,
    /// Show the ARP table.
    Arp,
}

impl NetworkCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Ping { host, count } => {
                let mut args = vec![host];
                if let Some(count) = count {
                    args.push(count.to_string());
                }
                dispatch_op(ctx, "network.ping", args).await
            }
            Self::Traceroute { host } => dispatch_op(ctx, "network.traceroute", vec![host]).await,
            Self::Netstat => dispatch_op(ctx, "network.netstat", vec![]).await,
            Self::Connections => dispatch_op(ctx, "network.connections", vec![]).await,
            Self::Routes => dispatch_op(ctx, "network.routes", vec![]).await,
            Self::Arp => dispatch_op(ctx, "network.arp", vec![]).await,
        }
    }
}

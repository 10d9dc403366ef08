//! Command implementations, one module per operation family.
//!
//! Module-family commands are thin: each variant maps to a registry
//! operation and routes through the one generic dispatcher below, so
//! transport, auth, and error handling live in exactly one place.

pub mod archive;
pub mod cmd;
pub mod cron;
pub mod docker;
pub mod file;
pub mod git;
pub mod grains;
pub mod job;
pub mod k8s;
pub mod keys;
pub mod login;
pub mod monitor;
pub mod mount;
pub mod network;
pub mod ping;
pub mod pkg;
pub mod pillar;
pub mod process;
pub mod service;
pub mod ssh;
pub mod state;
pub mod system;
pub mod user;

use anyhow::{anyhow, Result};
use fleet_gateway::{
    registry, resolve_connection, Call, DispatchError, GatewayClient, GatewayConfig, Target,
};
use tracing::debug;

use crate::cli::GlobalOptions;
use crate::output::{connectivity_hint, print_response};

/// Shared per-invocation state: one client, one resolved target.
pub struct Ctx {
    pub client: GatewayClient,
    pub target: Target,
    pub json: bool,
}

impl Ctx {
    /// Resolve connection parameters (flag/env > saved file > defaults)
    /// and the target expression, then build the gateway client.
    pub fn build(global: &GlobalOptions) -> Result<Self> {
        let saved = GatewayConfig::load();
        let conn = resolve_connection(
            global.url.clone(),
            global.username.clone(),
            global.password.clone(),
            saved.as_ref(),
        )
        .ok_or_else(|| {
            anyhow!(
                "master API URL is required; run `fleetctl login`, set FLEET_API_URL, or pass --url"
            )
        })?;
        let target = Target::resolve(&global.target)?;
        debug!(
            "using master endpoint {} with target {}",
            conn.api_url,
            target.expression()
        );

        Ok(Self {
            client: GatewayClient::from_connection(&conn),
            target,
            json: global.json,
        })
    }
}

/// Dispatch a registry operation with positional arguments and print
/// the per-minion results.
pub async fn dispatch_op(ctx: &mut Ctx, op: &str, args: Vec<String>) -> Result<()> {
    let entry = registry::lookup(op).ok_or_else(|| anyhow!("unknown operation: {op}"))?;
    entry.check_arity(args.len()).map_err(|e| anyhow!(e))?;
    dispatch_call(ctx, entry.function, args).await
}

/// Dispatch one execution-module function directly (for operations
/// whose wire arguments need shaping before dispatch).
pub async fn dispatch_call(ctx: &mut Ctx, function: &str, args: Vec<String>) -> Result<()> {
    let call = Call::new(&ctx.target, function).args(args);
    let response = ctx
        .client
        .run(&call)
        .await
        .map_err(|e| decorate(e, ctx.json))?;
    print_response(&response, ctx.json);
    Ok(())
}

/// Attach the remediation checklist to connectivity failures; JSON mode
/// stays free of decorative text.
pub fn decorate(err: DispatchError, json: bool) -> anyhow::Error {
    let connectivity = matches!(
        err,
        DispatchError::Unreachable(_) | DispatchError::Auth(_)
    );
    if connectivity && !json {
        anyhow!("{err}\n\n{}", connectivity_hint())
    } else {
        anyhow!(err)
    }
}

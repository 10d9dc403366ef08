//! Bootstrap login flow: stack outputs to a verified, persisted gateway
//! configuration.
//!
//! Steps run once each, in order; a failure aborts the whole flow with
//! one exception: persistence failure is non-fatal, because losing the
//! saved-config convenience is better than losing a working gateway.

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::client::GatewayClient;
use crate::config::{GatewayConfig, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USERNAME};
use crate::error::LoginError;
use crate::stack::{extract_host_address, find_address_output, StackWorkspace};
use crate::target::Target;

/// Caller-supplied knobs for the flow.
#[derive(Debug, Clone, Default)]
pub struct LoginOptions {
    /// Named stack; `None` selects the engine's current/default stack.
    pub stack: Option<String>,
    /// Authenticate and probe minion reachability before persisting.
    pub verify: bool,
}

/// What the flow produced.
#[derive(Debug)]
pub struct LoginOutcome {
    pub config: GatewayConfig,
    /// Where the configuration landed; `None` when persistence failed
    /// and the caller should surface the raw values instead.
    pub persisted_to: Option<PathBuf>,
    /// Minions that answered the verification probe, when verify ran
    /// and the probe succeeded.
    pub minions_online: Option<usize>,
}

/// Run the whole flow against an already-constructed workspace.
pub async fn login(
    workspace: &mut dyn StackWorkspace,
    options: &LoginOptions,
) -> Result<LoginOutcome, LoginError> {
    let stack_name = workspace.select_stack(options.stack.as_deref())?;

    // Prefer fresh outputs; stale ones are still usable when the engine
    // cannot refresh right now.
    let outputs = match workspace.refresh_and_get_outputs() {
        Ok(outputs) => outputs,
        Err(e) => {
            warn!("could not refresh stack, using cached outputs: {e}");
            workspace.current_outputs()?
        }
    };

    let bastion_ip = extract_host_address(find_address_output(&outputs)?)?;
    info!("found bastion host {bastion_ip}");

    let api_url = format!("http://{bastion_ip}:{DEFAULT_PORT}");
    let username =
        env::var("FLEET_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string());
    let password =
        env::var("FLEET_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

    let mut minions_online = None;
    if options.verify {
        let mut client = GatewayClient::new(&api_url, &username, &password);

        // A failed authentication is fatal: nothing gets persisted, so
        // the operator never ends up with a config that looks usable
        // but is not.
        client
            .authenticate()
            .await
            .map_err(|e| LoginError::VerificationFailed(e.to_string()))?;
        info!("authenticated to master API at {api_url}");

        // A failed or empty reachability probe is only a warning; the
        // fleet may still be provisioning.
        match client.ping(&Target::all()).await {
            Ok(reachability) => {
                let online = reachability.values().filter(|up| **up).count();
                if online == 0 {
                    warn!("no minions responded; the fleet may still be provisioning");
                } else {
                    info!("{online} minion(s) online");
                }
                minions_online = Some(online);
            }
            Err(e) => warn!("minion probe failed ({e}); the fleet may still be provisioning"),
        }
    }

    let config = GatewayConfig {
        api_url,
        username,
        password,
        bastion_ip,
        stack_name,
    };

    let persisted_to = match config.save() {
        Ok(path) => {
            info!("configuration saved to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("could not persist configuration: {e}");
            None
        }
    };

    Ok(LoginOutcome {
        config,
        persisted_to,
        minions_online,
    })
}

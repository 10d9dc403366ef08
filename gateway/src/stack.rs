//! Infrastructure-state stack outputs and host-address discovery.
//!
//! The infrastructure-state engine is an external collaborator; the
//! gateway consumes exactly three operations: select a stack, read its
//! current outputs, refresh and read. Address extraction over the
//! heterogeneous output shapes is a pure function so it stays testable
//! without any engine installed.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::LoginError;

/// Reserved node name/role marking the host that fronts the master API.
pub const BASTION_ROLE: &str = "bastion";

/// Known address keys inside a mapping-shaped output, probed in order.
const ADDRESS_KEYS: &[&str] = &["public_ip", "ip", "ipv4", "address", "public_address"];

pub type StackOutputs = BTreeMap<String, Value>;

/// The two-operation contract (plus stack selection) the bootstrap flow
/// consumes from the infrastructure-state engine.
pub trait StackWorkspace {
    /// Select the named stack, or the engine's current/default stack
    /// when `name` is `None`. Returns the selected stack's name.
    fn select_stack(&mut self, name: Option<&str>) -> Result<String, LoginError>;

    fn current_outputs(&mut self) -> Result<StackOutputs, LoginError>;

    fn refresh_and_get_outputs(&mut self) -> Result<StackOutputs, LoginError>;
}

/// Adapter driving the `pulumi` binary. Thin by design; everything it
/// returns is opaque output data interpreted elsewhere.
pub struct PulumiWorkspace {
    cwd: PathBuf,
}

impl PulumiWorkspace {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn pulumi(&self, args: &[&str]) -> Result<String, LoginError> {
        debug!("running pulumi {}", args.join(" "));
        let output = Command::new("pulumi")
            .args(args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| LoginError::WorkspaceError(format!("cannot run pulumi: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LoginError::WorkspaceError(format!(
                "pulumi {} failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn outputs(&self) -> Result<StackOutputs, LoginError> {
        let raw = self.pulumi(&["stack", "output", "--json", "--show-secrets"])?;
        serde_json::from_str(&raw)
            .map_err(|e| LoginError::WorkspaceError(format!("unparseable stack outputs: {e}")))
    }
}

impl StackWorkspace for PulumiWorkspace {
    fn select_stack(&mut self, name: Option<&str>) -> Result<String, LoginError> {
        match name {
            Some(stack) => {
                self.pulumi(&["stack", "select", stack])?;
                info!("selected stack {stack}");
                Ok(stack.to_string())
            }
            None => {
                let current = self.pulumi(&["stack", "--show-name"])?;
                if current.is_empty() {
                    return Err(LoginError::WorkspaceError(
                        "no current stack; deploy a cluster first or pass --stack".into(),
                    ));
                }
                info!("using current stack {current}");
                Ok(current)
            }
        }
    }

    fn current_outputs(&mut self) -> Result<StackOutputs, LoginError> {
        self.outputs()
    }

    fn refresh_and_get_outputs(&mut self) -> Result<StackOutputs, LoginError> {
        self.pulumi(&["refresh", "--yes", "--skip-preview"])?;
        self.outputs()
    }
}

/// Pull a non-empty host address out of one stack-output value.
///
/// Accepted shapes, in order: a direct string; a mapping carrying one of
/// the known address keys; an array of node-like mappings where the
/// winner is the FIRST entry (explicit tie-break: array order decides
/// when several entries claim the role) named `bastion` or carrying the
/// `bastion` role. Empty-string addresses never match.
pub fn extract_host_address(value: &Value) -> Result<String, LoginError> {
    if let Value::String(s) = value {
        if !s.is_empty() {
            return Ok(s.clone());
        }
        return Err(LoginError::AddressNotFound(
            "output is an empty string".into(),
        ));
    }

    if let Value::Object(map) = value {
        for key in ADDRESS_KEYS {
            if let Some(addr) = map.get(*key).and_then(Value::as_str) {
                if !addr.is_empty() {
                    return Ok(addr.to_string());
                }
            }
        }
        return Err(LoginError::AddressNotFound(
            "mapping has no usable address field".into(),
        ));
    }

    if let Value::Array(entries) = value {
        for entry in entries {
            let Value::Object(node) = entry else { continue };

            let named_bastion = node.get("name").and_then(Value::as_str) == Some(BASTION_ROLE);
            let role_bastion = node
                .get("roles")
                .and_then(Value::as_array)
                .is_some_and(|roles| {
                    roles.iter().any(|r| r.as_str() == Some(BASTION_ROLE))
                });

            if named_bastion || role_bastion {
                if let Some(addr) = node.get("public_ip").and_then(Value::as_str) {
                    if !addr.is_empty() {
                        return Ok(addr.to_string());
                    }
                }
            }
        }
        return Err(LoginError::AddressNotFound(
            "no bastion-named or bastion-roled entry in node list".into(),
        ));
    }

    Err(LoginError::AddressNotFound(format!(
        "unsupported output shape: {value}"
    )))
}

/// Pick the output value that should carry the address: `bastion` when
/// present, the legacy `nodes` list otherwise.
pub fn find_address_output(outputs: &StackOutputs) -> Result<&Value, LoginError> {
    outputs
        .get(BASTION_ROLE)
        .or_else(|| outputs.get("nodes"))
        .ok_or_else(|| {
            LoginError::AddressNotFound(
                "stack outputs contain neither 'bastion' nor 'nodes'".into(),
            )
        })
}

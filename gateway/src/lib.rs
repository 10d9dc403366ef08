//! fleet-gateway — remote execution gateway for the fleet master API.
//!
//! Authenticates to the configuration-management master's HTTP API,
//! resolves target expressions, dispatches execution-module calls, and
//! aggregates the heterogeneous per-minion results into one structured
//! response. Also owns the bootstrap login flow that discovers the
//! bastion host from infrastructure-state stack outputs and persists
//! the resulting connection configuration.
//!
//! Each invocation is one synchronous request/response cycle: one call
//! descriptor, one dispatch, fan-out handled server-side by the master.

pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod login;
pub mod registry;
pub mod response;
pub mod stack;
pub mod target;

pub use client::{Call, GatewayClient};
pub use config::{resolve_connection, Connection, GatewayConfig};
pub use error::{AuthError, DispatchError, LoginError};
pub use keys::KeyInventory;
pub use login::{login, LoginOptions, LoginOutcome};
pub use response::CommandResponse;
pub use target::{Target, TargetKind};

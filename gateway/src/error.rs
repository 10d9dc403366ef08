//! Gateway error taxonomy.
//!
//! Three families: authentication, dispatch, and bootstrap login.
//! Dispatch errors carry enough context for the caller to decide whether
//! a retry is safe; the gateway itself never retries beyond the single
//! reactive re-authentication.

use thiserror::Error;

/// Bad credentials or an unreachable endpoint during login.
#[derive(Debug, Error)]
#[error("authentication failed: {0}")]
pub struct AuthError(pub String);

/// Failure of a single execution-module dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport-level failure (connection refused, timeout). Never
    /// retried here; some operations are not safe to retry blindly.
    #[error("master unreachable: {0}")]
    Unreachable(String),

    /// The master rejected the target expression or request shape.
    #[error("bad target: {0}")]
    BadTarget(String),

    /// Master-side execution error or an unparseable response.
    #[error("remote execution failed: {0}")]
    RemoteFailure(String),
}

/// Failure of the bootstrap login flow. No step is retried; a failure
/// at any step aborts the whole flow.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("no host address found in stack outputs: {0}")]
    AddressNotFound(String),

    #[error("verification failed: {0}")]
    VerificationFailed(String),

    #[error("workspace error: {0}")]
    WorkspaceError(String),
}

//! HTTP client for the configuration-management master.
//!
//! Owns the bearer-token session and performs execution-module dispatch.
//! Token refresh is reactive: the client authenticates lazily before the
//! first call and re-authenticates exactly once when the master answers
//! 401 on a real call. A second consecutive 401 is fatal.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::Connection;
use crate::error::{AuthError, DispatchError};
use crate::keys::KeyInventory;
use crate::response::CommandResponse;
use crate::target::Target;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable descriptor of one execution-module dispatch. One descriptor
/// means exactly one dispatch; fan-out across minions happens on the
/// master, never here.
#[derive(Debug, Clone, Serialize)]
pub struct Call {
    client: &'static str,
    tgt: String,
    fun: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    arg: Vec<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    kwarg: serde_json::Map<String, Value>,
    tgt_type: &'static str,
}

impl Call {
    pub fn new(target: &Target, function: &str) -> Self {
        Self {
            client: "local",
            tgt: target.expression().to_string(),
            fun: function.to_string(),
            arg: Vec::new(),
            kwarg: serde_json::Map::new(),
            tgt_type: target.kind().wire_tag(),
        }
    }

    /// Append one positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.arg.push(value.into());
        self
    }

    /// Append positional arguments, preserving order.
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg.extend(values.into_iter().map(Into::into));
        self
    }

    /// Set one keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.kwarg.insert(key.into(), value);
        self
    }

    pub fn function(&self) -> &str {
        &self.fun
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    eauth: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "return", default)]
    returns: Vec<LoginEntry>,
}

#[derive(Deserialize)]
struct LoginEntry {
    #[serde(default)]
    token: String,
}

/// Gateway-side session against the master's HTTP API: endpoint,
/// credentials, and the bearer token owned exclusively by this instance.
pub struct GatewayClient {
    base_url: String,
    username: String,
    password: String,
    token: Option<String>,
    token_acquired_at: Option<DateTime<Utc>>,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            token: None,
            token_acquired_at: None,
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn from_connection(conn: &Connection) -> Self {
        Self::new(&conn.api_url, &conn.username, &conn.password)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_acquired_at(&self) -> Option<DateTime<Utc>> {
        self.token_acquired_at
    }

    /// Obtain a bearer token from `{base}/login`. Called before the
    /// first dispatch and again when a dispatch observes a 401.
    pub async fn authenticate(&mut self) -> Result<(), AuthError> {
        let request = LoginRequest {
            username: &self.username,
            password: &self.password,
            eauth: "pam",
        };

        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthError(format!("endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError(format!("login rejected with status {status}: {body}")));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError(format!("malformed login response: {e}")))?;

        let entry = login
            .returns
            .into_iter()
            .next()
            .ok_or_else(|| AuthError("no token returned from login".into()))?;
        if entry.token.is_empty() {
            return Err(AuthError("empty token returned from login".into()));
        }

        info!("authenticated to master at {}", self.base_url);
        self.token = Some(entry.token);
        self.token_acquired_at = Some(Utc::now());
        Ok(())
    }

    /// Dispatch one call and return the raw per-minion result envelope.
    pub async fn run(&mut self, call: &Call) -> Result<CommandResponse, DispatchError> {
        debug!("dispatching {} to {} ({})", call.fun, call.tgt, call.tgt_type);
        let body = serde_json::to_value(call)
            .map_err(|e| DispatchError::RemoteFailure(format!("unserializable call: {e}")))?;
        let envelope = self.execute(&body).await?;
        serde_json::from_value(envelope)
            .map_err(|e| DispatchError::RemoteFailure(format!("malformed response envelope: {e}")))
    }

    /// Dispatch a wheel-client call (master-side administration, e.g.
    /// key management). Shares the transport, auth, and retry path of
    /// ordinary dispatch.
    pub async fn wheel(
        &mut self,
        function: &str,
        match_expr: Option<&str>,
    ) -> Result<Value, DispatchError> {
        let mut body = json!({"client": "wheel", "fun": function});
        if let Some(m) = match_expr {
            body["match"] = json!(m);
        }
        self.execute(&body).await
    }

    /// One outbound request with the current token, plus the single
    /// reactive re-authenticate-and-retry on 401.
    async fn execute(&mut self, body: &Value) -> Result<Value, DispatchError> {
        if self.token.is_none() {
            self.authenticate().await?;
        }

        let mut response = self.post_root(body).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("token rejected by master, re-authenticating once");
            self.authenticate().await?;
            response = self.post_root(body).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                return Err(AuthError("request rejected twice with 401".into()).into());
            }
        }

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let detail = response.text().await.unwrap_or_default();
            return Err(DispatchError::BadTarget(format!(
                "master rejected the request: {detail}"
            )));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DispatchError::RemoteFailure(format!(
                "status {status}: {detail}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DispatchError::RemoteFailure(format!("unparseable response: {e}")))
    }

    async fn post_root(&self, body: &Value) -> Result<reqwest::Response, DispatchError> {
        let token = self.token.as_deref().unwrap_or_default();
        self.http
            .post(format!("{}/", self.base_url))
            .header("Accept", "application/json")
            .header("X-Auth-Token", token)
            .json(body)
            .send()
            .await
            .map_err(|e| DispatchError::Unreachable(e.to_string()))
    }

    // Typed convenience wrappers used by flows. Everything else goes
    // through `run` with a registry-resolved function name.

    /// Ping the target and return the per-minion reachability view.
    pub async fn ping(
        &mut self,
        target: &Target,
    ) -> Result<std::collections::BTreeMap<String, bool>, DispatchError> {
        let resp = self.run(&Call::new(target, "test.ping")).await?;
        Ok(resp.reachability())
    }

    /// Identifiers of every minion that answers a ping-all.
    pub async fn minions(&mut self) -> Result<Vec<String>, DispatchError> {
        let resp = self.run(&Call::new(&Target::all(), "test.ping")).await?;
        Ok(resp.minions().into_iter().map(str::to_string).collect())
    }

    /// Run a shell command on the targeted minions.
    pub async fn run_shell(
        &mut self,
        target: &Target,
        command: &str,
    ) -> Result<CommandResponse, DispatchError> {
        self.run(&Call::new(target, "cmd.run").arg(command)).await
    }

    pub async fn grains_items(&mut self, target: &Target) -> Result<CommandResponse, DispatchError> {
        self.run(&Call::new(target, "grains.items")).await
    }

    pub async fn state_apply(
        &mut self,
        target: &Target,
        state: &str,
    ) -> Result<CommandResponse, DispatchError> {
        self.run(&Call::new(target, "state.apply").arg(state)).await
    }

    pub async fn highstate(&mut self, target: &Target) -> Result<CommandResponse, DispatchError> {
        self.run(&Call::new(target, "state.highstate")).await
    }

    /// Read the minion key inventory from the master.
    pub async fn key_list(&mut self) -> Result<KeyInventory, DispatchError> {
        let envelope = self.wheel("key.list_all", None).await?;
        Ok(KeyInventory::from_wheel(&envelope))
    }

    /// Trigger the pending -> accepted transition for one minion key.
    /// The state machine itself lives on the master.
    pub async fn key_accept(&mut self, minion_id: &str) -> Result<(), DispatchError> {
        self.wheel("key.accept", Some(minion_id)).await?;
        info!("accepted key for minion {minion_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_wire(call: &Call) -> Value {
        serde_json::to_value(call).unwrap()
    }

    #[test]
    fn test_call_wire_shape() {
        let target = Target::resolve("web*").unwrap();
        let call = Call::new(&target, "pkg.install").args(["vim", "curl"]);
        let wire = to_wire(&call);

        assert_eq!(wire["client"], "local");
        assert_eq!(wire["tgt"], "web*");
        assert_eq!(wire["fun"], "pkg.install");
        assert_eq!(wire["arg"], json!(["vim", "curl"]));
        assert_eq!(wire["tgt_type"], "glob");
        // No kwargs set: field omitted entirely.
        assert!(wire.get("kwarg").is_none());
    }

    #[test]
    fn test_call_omits_empty_args() {
        let call = Call::new(&Target::all(), "test.ping");
        let wire = to_wire(&call);
        assert!(wire.get("arg").is_none());
        assert!(wire.get("kwarg").is_none());
        assert_eq!(wire["tgt"], "*");
        assert_eq!(wire["tgt_type"], "glob");
    }

    #[test]
    fn test_call_kwargs_and_kinds() {
        let target = Target::resolve("os:Ubuntu").unwrap();
        let call = Call::new(&target, "pkg.upgrade").kwarg("refresh", json!(true));
        let wire = to_wire(&call);
        assert_eq!(wire["tgt_type"], "grain");
        assert_eq!(wire["kwarg"]["refresh"], json!(true));

        let target = Target::resolve("a,b").unwrap();
        let wire = to_wire(&Call::new(&target, "test.ping"));
        assert_eq!(wire["tgt_type"], "list");
    }

    #[test]
    fn test_call_preserves_arg_order() {
        let target = Target::all();
        let call = Call::new(&target, "cron.set_job")
            .args(["root", "0", "2", "*", "*", "*"])
            .arg("backup.sh");
        let wire = to_wire(&call);
        assert_eq!(
            wire["arg"],
            json!(["root", "0", "2", "*", "*", "*", "backup.sh"])
        );
    }

    #[test]
    fn test_new_client_has_no_token() {
        let client = GatewayClient::new("http://203.0.113.9:8000/", "op", "secret");
        assert!(client.token.is_none());
        assert!(client.token_acquired_at().is_none());
        // Trailing slash is normalized away so URL joins stay clean.
        assert_eq!(client.base_url(), "http://203.0.113.9:8000");
    }
}

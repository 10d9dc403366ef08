//! Saved gateway configuration and layered connection resolution.
//!
//! The bootstrap login flow persists connection values so every later
//! invocation can run without flags. Precedence when building a live
//! connection: explicit flag > environment variable (handled by the CLI
//! parser) > saved file > hard-coded default.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed master API port on the bastion host.
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_USERNAME: &str = "fleetapi";
pub const DEFAULT_PASSWORD: &str = "fleetapi123";

const CONFIG_DIR: &str = ".fleetctl";
const CONFIG_FILE: &str = "gateway.json";

/// Connection values persisted by `login` and read back as a fallback
/// by every subsequent invocation. Overwritten in place on re-login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub api_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub bastion_ip: String,
    #[serde(default)]
    pub stack_name: String,
}

/// Fully-resolved connection parameters for one gateway instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub api_url: String,
    pub username: String,
    pub password: String,
}

/// Per-user config file location. `FLEETCTL_CONFIG_DIR` overrides the
/// default `$HOME/.fleetctl`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("FLEETCTL_CONFIG_DIR") {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

impl GatewayConfig {
    /// Write to an explicit path with owner-only permissions, creating
    /// the parent directory on demand.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)?;
            file.write_all(&data)?;
            // A pre-existing file keeps its old mode; tighten it.
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        #[cfg(not(unix))]
        fs::write(path, &data)?;

        Ok(())
    }

    /// Persist to the per-user config location, returning where it went.
    pub fn save(&self) -> io::Result<PathBuf> {
        let path = config_path()
            .ok_or_else(|| io::Error::other("cannot determine config directory (HOME unset)"))?;
        self.save_to(&path)?;
        debug!("configuration saved to {}", path.display());
        Ok(path)
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        let data = fs::read(path)?;
        serde_json::from_slice(&data).map_err(io::Error::from)
    }

    /// Load the saved configuration if one exists and parses.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        Self::load_from(&path).ok()
    }
}

/// Resolve a live connection from explicit values (flags already merged
/// with environment variables by the CLI parser), the saved file, and
/// defaults. Returns `None` when no endpoint URL can be found anywhere;
/// there is no sensible default endpoint.
pub fn resolve_connection(
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    saved: Option<&GatewayConfig>,
) -> Option<Connection> {
    let non_empty = |s: Option<String>| s.filter(|v| !v.is_empty());

    let api_url = non_empty(url)
        .or_else(|| non_empty(saved.map(|c| c.api_url.clone())))?;
    let username = non_empty(username)
        .or_else(|| non_empty(saved.map(|c| c.username.clone())))
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
    let password = non_empty(password)
        .or_else(|| non_empty(saved.map(|c| c.password.clone())))
        .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    Some(Connection {
        api_url,
        username,
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn minimal() -> GatewayConfig {
        GatewayConfig {
            api_url: "http://203.0.113.10:8000".into(),
            username: "fleetapi".into(),
            password: "fleetapi123".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_minimal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gateway.json");

        let config = minimal();
        config.save_to(&path).unwrap();
        let loaded = GatewayConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_round_trip_special_characters_in_password() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gateway.json");

        let config = GatewayConfig {
            password: r#"p@ss"w0rd\with 'quotes' & unicode: ü€"#.into(),
            ..minimal()
        };
        config.save_to(&path).unwrap();
        let loaded = GatewayConfig::load_from(&path).unwrap();
        assert_eq!(loaded.password, config.password);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_persisted_fields_are_exactly_the_connection_set() {
        let raw = serde_json::to_value(minimal()).unwrap();
        let keys: Vec<&str> = raw.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["api_url", "bastion_ip", "password", "stack_name", "username"]
        );
    }

    #[test]
    fn test_second_save_overwrites_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gateway.json");

        let first = minimal();
        first.save_to(&path).unwrap();

        let second = GatewayConfig {
            api_url: "http://203.0.113.99:8000".into(),
            bastion_ip: "203.0.113.99".into(),
            stack_name: "prod".into(),
            ..minimal()
        };
        second.save_to(&path).unwrap();

        let loaded = GatewayConfig::load_from(&path).unwrap();
        assert_eq!(loaded, second);
        assert_ne!(loaded, first);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("gateway.json");
        minimal().save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("gateway.json");
        minimal().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        assert!(GatewayConfig::load_from(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_resolution_explicit_wins_over_saved() {
        let saved = minimal();
        let conn = resolve_connection(
            Some("http://203.0.113.50:8000".into()),
            Some("operator".into()),
            None,
            Some(&saved),
        )
        .unwrap();
        assert_eq!(conn.api_url, "http://203.0.113.50:8000");
        assert_eq!(conn.username, "operator");
        // Password falls through to the saved file.
        assert_eq!(conn.password, "fleetapi123");
    }

    #[test]
    fn test_resolution_saved_wins_over_default() {
        let saved = GatewayConfig {
            username: "stored-user".into(),
            password: "stored-pass".into(),
            ..minimal()
        };
        let conn = resolve_connection(None, None, None, Some(&saved)).unwrap();
        assert_eq!(conn.api_url, saved.api_url);
        assert_eq!(conn.username, "stored-user");
        assert_eq!(conn.password, "stored-pass");
    }

    #[test]
    fn test_resolution_defaults_fill_credentials() {
        let conn = resolve_connection(Some("http://203.0.113.1:8000".into()), None, None, None)
            .unwrap();
        assert_eq!(conn.username, DEFAULT_USERNAME);
        assert_eq!(conn.password, DEFAULT_PASSWORD);
    }

    #[test]
    fn test_resolution_requires_some_url() {
        assert!(resolve_connection(None, None, None, None).is_none());

        let saved = GatewayConfig {
            api_url: String::new(),
            ..minimal()
        };
        assert!(resolve_connection(None, None, None, Some(&saved)).is_none());

        // Empty flag values do not count as explicit.
        assert!(resolve_connection(Some(String::new()), None, None, None).is_none());
    }
}

//! Output rendering: raw JSON for scripting, plain text otherwise.
//!
//! Result values are opaque unions shaped by whichever execution module
//! ran; rendering pattern-matches on the value tag and never assumes
//! payload fields.

use std::collections::BTreeMap;

use fleet_gateway::{CommandResponse, KeyInventory};
use serde_json::Value;

/// Print per-minion results from one dispatch.
pub fn print_response(response: &CommandResponse, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(response).unwrap_or_else(|e| format!(
                "{{\"error\": \"failed to serialize: {e}\"}}"
            ))
        );
        return;
    }

    let Some(results) = response.first() else {
        println!("no results returned");
        return;
    };
    if results.is_empty() {
        println!("no minions responded");
        return;
    }

    for (minion, value) in results {
        println!("{minion}:");
        for line in render_value(value).lines() {
            println!("  {line}");
        }
    }
}

/// Render one opaque result value: strings pass through raw, everything
/// else as pretty JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Print the reachability view of a ping.
pub fn print_ping(reachability: &BTreeMap<String, bool>, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(reachability).unwrap_or_default()
        );
        return;
    }

    if reachability.is_empty() {
        println!("no minions responded");
        return;
    }

    let online = reachability.values().filter(|up| **up).count();
    for (minion, up) in reachability {
        println!("  {minion}: {}", if *up { "online" } else { "offline" });
    }
    println!("{online} of {} minion(s) online", reachability.len());
}

/// Print the key inventory grouped by state.
pub fn print_keys(inventory: &KeyInventory, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(inventory).unwrap_or_default()
        );
        return;
    }

    if inventory.is_empty() {
        println!("no minion keys known to the master");
        return;
    }

    let section = |label: &str, ids: &[String]| {
        if !ids.is_empty() {
            println!("{label} ({}):", ids.len());
            for id in ids {
                println!("  {id}");
            }
        }
    };
    section("accepted", &inventory.accepted);
    section("pending", &inventory.pending);
    section("rejected", &inventory.rejected);
    section("denied", &inventory.denied);
}

/// Remediation checklist for connectivity failures, human mode only.
pub fn connectivity_hint() -> &'static str {
    "Troubleshooting:\n  \
     - check that the bastion host is up and the master API is listening on port 8000\n  \
     - verify credentials (FLEET_USERNAME / FLEET_PASSWORD or --username/--password)\n  \
     - re-run `fleetctl login` to refresh the saved endpoint"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_string_passthrough() {
        assert_eq!(render_value(&json!("plain text")), "plain text");
    }

    #[test]
    fn test_render_structured_as_json() {
        let rendered = render_value(&json!({"cpus": 8}));
        assert!(rendered.contains("\"cpus\": 8"));

        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(42)), "42");
    }
}

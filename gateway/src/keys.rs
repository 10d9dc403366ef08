//! Minion key inventory.
//!
//! Keys live in four disjoint sets on the master. The gateway only reads
//! the inventory and triggers the accept transition; the master enforces
//! the lifecycle.

use serde::Serialize;
use serde_json::Value;

/// Snapshot of the master's key sets, keyed by minion identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyInventory {
    pub accepted: Vec<String>,
    pub pending: Vec<String>,
    pub rejected: Vec<String>,
    pub denied: Vec<String>,
}

impl KeyInventory {
    /// Parse the wheel `key.list_all` envelope. The sets normally live
    /// under `return[0].data.return`; older masters put them directly
    /// under `return[0].data`.
    pub fn from_wheel(envelope: &Value) -> Self {
        let data = envelope
            .get("return")
            .and_then(|r| r.get(0))
            .and_then(|entry| entry.get("data"));
        let sets = data
            .and_then(|d| d.get("return"))
            .filter(|r| r.is_object())
            .or(data);

        let pick = |key: &str| -> Vec<String> {
            sets.and_then(|s| s.get(key))
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        Self {
            accepted: pick("minions"),
            pending: pick("minions_pre"),
            rejected: pick("minions_rejected"),
            denied: pick("minions_denied"),
        }
    }

    pub fn total(&self) -> usize {
        self.accepted.len() + self.pending.len() + self.rejected.len() + self.denied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

//! Command response aggregation.
//!
//! The master answers every dispatch with the envelope
//! `{"return": [{minionId: resultValue, ...}]}`. Result values are
//! shaped by whichever execution module ran, so they stay opaque
//! `serde_json::Value`s here; presentation code pattern-matches on the
//! value itself, never on assumed fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-call result sets keyed by minion identifier. In practice exactly
/// one set per dispatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(rename = "return", default)]
    pub returns: Vec<BTreeMap<String, Value>>,
}

impl CommandResponse {
    /// First result set, if any.
    pub fn first(&self) -> Option<&BTreeMap<String, Value>> {
        self.returns.first()
    }

    /// Number of minions that responded. A present-but-empty result set
    /// counts as zero: a valid terminal state, not an error (the target
    /// expression may legitimately match no minion).
    pub fn minion_count(&self) -> usize {
        self.first().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.minion_count() == 0
    }

    /// Result value for one minion, if it responded.
    pub fn get(&self, minion: &str) -> Option<&Value> {
        self.first().and_then(|set| set.get(minion))
    }

    /// Responding minion identifiers, in stable order.
    pub fn minions(&self) -> Vec<&str> {
        self.first()
            .map(|set| set.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Boolean-reachability view for ping-style calls: a truthy result
    /// means online; `false`, null, or an absent entry means offline.
    pub fn reachability(&self) -> BTreeMap<String, bool> {
        self.first()
            .map(|set| {
                set.iter()
                    .map(|(minion, value)| (minion.clone(), is_truthy(value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// How many responding minions reported a truthy result.
    pub fn online_count(&self) -> usize {
        self.first()
            .map_or(0, |set| set.values().filter(|v| is_truthy(v)).count())
    }
}

/// Truthiness over the opaque result union: `true`, non-zero numbers,
/// and non-empty strings/sequences/mappings count as truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: Value) -> CommandResponse {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_empty_result_set_is_not_an_error() {
        let resp = parse(json!({"return": [{}]}));
        assert_eq!(resp.minion_count(), 0);
        assert!(resp.is_empty());
        assert!(resp.reachability().is_empty());
    }

    #[test]
    fn test_missing_return_array() {
        let resp = parse(json!({}));
        assert_eq!(resp.minion_count(), 0);
        assert!(resp.first().is_none());
    }

    #[test]
    fn test_reachability_classification() {
        let resp = parse(json!({
            "return": [{
                "node-1": true,
                "node-2": false,
                "node-3": true,
            }]
        }));
        assert_eq!(resp.minion_count(), 3);
        assert_eq!(resp.online_count(), 2);

        let reach = resp.reachability();
        assert_eq!(reach["node-1"], true);
        assert_eq!(reach["node-2"], false);
        assert_eq!(reach["node-3"], true);
        // Absent minion is offline.
        assert!(!reach.contains_key("node-4"));
    }

    #[test]
    fn test_heterogeneous_values_pass_through_raw() {
        let resp = parse(json!({
            "return": [{
                "node-1": "Linux 6.1",
                "node-2": {"os": "Ubuntu", "mem_total": 32110},
                "node-3": 42,
            }]
        }));
        assert_eq!(resp.get("node-1"), Some(&json!("Linux 6.1")));
        assert_eq!(
            resp.get("node-2").and_then(|v| v.get("os")),
            Some(&json!("Ubuntu"))
        );
        assert_eq!(resp.get("node-3"), Some(&json!(42)));
        assert!(resp.get("node-9").is_none());
    }

    #[test]
    fn test_minions_stable_order() {
        let resp = parse(json!({"return": [{"b": 1, "a": 2, "c": 3}]}));
        assert_eq!(resp.minions(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_truthy_variants() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("ok")));
        assert!(is_truthy(&json!([1])));
        assert!(is_truthy(&json!({"k": "v"})));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_round_trips_envelope_shape() {
        let resp = parse(json!({"return": [{"node-1": true}]}));
        let raw = serde_json::to_value(&resp).unwrap();
        assert_eq!(raw["return"][0]["node-1"], json!(true));
    }
}

//! Target expression resolution.
//!
//! Normalizes a user-supplied target expression into the wire form the
//! master expects. Matching semantics are delegated to the master; the
//! resolver only picks the tag so the expression is interpreted under
//! the intended matcher.

use crate::error::DispatchError;

/// How the master should interpret a target expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Glob over minion identifiers (the default, e.g. `web*`).
    Glob,
    /// Explicit comma-separated list of minion identifiers.
    List,
    /// Grain-equality query (e.g. `os:Ubuntu`).
    Grain,
    /// The sentinel `*`, matching every minion. Dispatched as a glob.
    All,
}

impl TargetKind {
    /// Wire tag for the master's `tgt_type` field.
    pub fn wire_tag(self) -> &'static str {
        match self {
            TargetKind::Glob | TargetKind::All => "glob",
            TargetKind::List => "list",
            TargetKind::Grain => "grain",
        }
    }
}

/// A resolved target expression plus its matcher kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    expression: String,
    kind: TargetKind,
}

impl Target {
    /// Classify an expression by convention. The expression itself is
    /// never rewritten; an empty expression is rejected before any
    /// network traffic happens.
    pub fn resolve(expression: &str) -> Result<Self, DispatchError> {
        if expression.is_empty() {
            return Err(DispatchError::BadTarget("empty target expression".into()));
        }

        let kind = if expression == "*" {
            TargetKind::All
        } else if expression.contains(',') {
            TargetKind::List
        } else if expression.contains(':') {
            TargetKind::Grain
        } else {
            TargetKind::Glob
        };

        Ok(Self {
            expression: expression.to_string(),
            kind,
        })
    }

    /// Match-all target, only built when the caller asks for it.
    pub fn all() -> Self {
        Self {
            expression: "*".to_string(),
            kind: TargetKind::All,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_is_default() {
        let t = Target::resolve("web*").unwrap();
        assert_eq!(t.kind(), TargetKind::Glob);
        assert_eq!(t.expression(), "web*");
        assert_eq!(t.kind().wire_tag(), "glob");
    }

    #[test]
    fn test_list_by_comma() {
        let t = Target::resolve("node-1,node-2,node-3").unwrap();
        assert_eq!(t.kind(), TargetKind::List);
        assert_eq!(t.expression(), "node-1,node-2,node-3");
        assert_eq!(t.kind().wire_tag(), "list");
    }

    #[test]
    fn test_grain_by_colon() {
        let t = Target::resolve("os:Ubuntu").unwrap();
        assert_eq!(t.kind(), TargetKind::Grain);
        assert_eq!(t.expression(), "os:Ubuntu");
        assert_eq!(t.kind().wire_tag(), "grain");
    }

    #[test]
    fn test_all_sentinel() {
        let t = Target::resolve("*").unwrap();
        assert_eq!(t.kind(), TargetKind::All);
        // The sentinel still travels as a glob on the wire.
        assert_eq!(t.kind().wire_tag(), "glob");
        assert_eq!(Target::all(), t);
    }

    #[test]
    fn test_empty_expression_rejected() {
        let err = Target::resolve("").unwrap_err();
        assert!(matches!(err, DispatchError::BadTarget(_)));
    }

    #[test]
    fn test_expression_never_mutated() {
        for expr in ["web*", "a,b", "role:db", "*", "exact-host"] {
            let t = Target::resolve(expr).unwrap();
            assert_eq!(t.expression(), expr);
        }
    }
}

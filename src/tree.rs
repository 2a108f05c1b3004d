//! Parsed form of a compatibility document.
//!
//! A document is a nested mapping of identifier keys; a node carrying the
//! reserved `__compat` key is a leaf for aggregation purposes but may still
//! have nested siblings (mixed leaf/branch is expected, not an error).

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::support::SupportEntry;

/// The reserved metadata key marking a node that carries support data.
pub const COMPAT_KEY: &str = "__compat";

/// The support metadata attached to a leaf node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatStatement {
    /// Per-platform support declarations. An explicit `null` entry is kept
    /// distinct from a missing key at parse time; both resolve to
    /// unsupported.
    #[serde(default)]
    pub support: BTreeMap<String, Option<SupportEntry>>,
    /// Human-readable display name, may contain inline markup.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit documentation path; overrides the computed doc URL.
    #[serde(default)]
    pub doc_path: Option<String>,
}

impl CompatStatement {
    /// Looks up the support entry for a platform. Missing keys and explicit
    /// nulls both come back as `None`.
    #[must_use]
    pub fn entry(&self, platform: &str) -> Option<&SupportEntry> {
        self.support.get(platform).and_then(Option::as_ref)
    }
}

/// One node of a compatibility tree: optional support metadata plus named
/// children, in key order.
#[derive(Debug, Clone, Default)]
pub struct CompatNode {
    pub compat: Option<CompatStatement>,
    pub children: BTreeMap<String, CompatNode>,
}

impl CompatNode {
    /// Builds a node from a JSON value. Non-object values are not nodes and
    /// yield `Ok(None)`; a malformed `__compat` block is a parse error.
    pub fn from_value(value: &Value) -> Result<Option<Self>, serde_json::Error> {
        let Some(map) = value.as_object() else {
            return Ok(None);
        };

        let mut node = Self::default();
        for (key, child) in map {
            if key == COMPAT_KEY {
                node.compat = Some(serde_json::from_value(child.clone())?);
            } else if let Some(sub) = Self::from_value(child)? {
                node.children.insert(key.clone(), sub);
            }
        }
        Ok(Some(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_with_nested_children() {
        let value = json!({
            "__compat": {
                "support": { "android": { "version_added": "1.0" } }
            },
            "name": {
                "__compat": {
                    "support": { "android": { "version_added": "2.0" } }
                }
            },
            "ignored": "scalar values are not nodes"
        });

        let node = CompatNode::from_value(&value).unwrap().unwrap();
        assert!(node.compat.is_some());
        assert_eq!(node.children.len(), 1);
        assert!(node.children["name"].compat.is_some());
    }

    #[test]
    fn test_scalar_is_not_a_node() {
        assert!(CompatNode::from_value(&json!("x")).unwrap().is_none());
        assert!(CompatNode::from_value(&json!(3)).unwrap().is_none());
    }

    #[test]
    fn test_explicit_null_support_entry() {
        let value = json!({
            "__compat": { "support": { "android": null } }
        });
        let node = CompatNode::from_value(&value).unwrap().unwrap();
        let compat = node.compat.unwrap();
        assert!(compat.support.contains_key("android"));
        assert!(compat.entry("android").is_none());
    }

    #[test]
    fn test_malformed_compat_block_is_an_error() {
        let value = json!({ "__compat": { "support": 5 } });
        assert!(CompatNode::from_value(&value).is_err());
    }
}

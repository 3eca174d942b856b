//! Topology payload: the backend's description of nodes and links.
//!
//! The payload is opaque beyond what the interaction core needs: the set of
//! node names (keys of `node_types`) and the edge list. Edge identity is the
//! unordered, whitespace-trimmed endpoint pair.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// An undirected connection between two node names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub left: String,
    pub right: String,
    /// Port label, e.g. `"Port 7"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poe: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireless: Option<bool>,
    /// Link speed in Mbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u64>,
    /// Wi-Fi channel number for wireless links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<u32>,
}

impl Edge {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            ..Self::default()
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.left, &self.right)
    }

    pub fn is_wireless(&self) -> bool {
        self.wireless.unwrap_or(false)
    }
}

/// Order-independent identity of an endpoint pair:
/// `sorted([left.trim(), right.trim()]).join(",")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(String);

impl EdgeKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (a, b) = (a.trim(), b.trim());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        EdgeKey(format!("{lo},{hi}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The backend payload consumed by the annotation passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyPayload {
    /// Node name → device type (`gateway`, `switch`, `ap`, `client`, ...).
    #[serde(default)]
    pub node_types: BTreeMap<String, String>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl TopologyPayload {
    /// Node names in sorted order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.node_types.keys().map(String::as_str)
    }

    pub fn edge_lookup(&self) -> EdgeLookup {
        EdgeLookup::new(&self.edges)
    }
}

/// Edges of the current payload indexed by unordered endpoint pair.
///
/// Duplicate pairs resolve to the last edge in payload order.
#[derive(Debug, Clone, Default)]
pub struct EdgeLookup {
    by_key: HashMap<EdgeKey, Edge>,
}

impl EdgeLookup {
    pub fn new(edges: &[Edge]) -> Self {
        let by_key = edges.iter().map(|e| (e.key(), e.clone())).collect();
        Self { by_key }
    }

    pub fn get(&self, left: &str, right: &str) -> Option<&Edge> {
        self.by_key.get(&EdgeKey::new(left, right))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

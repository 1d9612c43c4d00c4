//! Node-type and edge-type classification.
//!
//! A node's type is the first character of its label. An edge's type is the
//! two endpoint types sorted and concatenated, so `g1 p7` and `p7 g1` are both
//! `"gp"`. Neither is stored; both are derived on demand.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub fn node_type(label: &str) -> Option<char> {
    label.chars().next()
}

pub fn edge_type(node_a: &str, node_b: &str) -> String {
    let mut types: Vec<char> = [node_a, node_b].iter().filter_map(|l| node_type(l)).collect();
    types.sort_unstable();
    types.into_iter().collect()
}

/// Counter keyed by type name. Keys only come into existence through
/// [`TypeCounts::increment`]; reading a missing key yields zero without
/// inserting it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCounts {
    counts: BTreeMap<String, usize>,
}

impl TypeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment<K: Into<String>>(&mut self, key: K) {
        *self.counts.entry(key.into()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Snapshot of the type statistics gathered while building a graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub node_types: TypeCounts,
    pub edge_types: TypeCounts,
    /// Directed entries in the adjacency arrays.
    pub edge_count: usize,
}

impl fmt::Display for TypeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node_type, count) in self.node_types.iter() {
            writeln!(f, "node type {node_type} - count: {count}")?;
        }
        if self.edge_types.len() < 2 {
            writeln!(f, "edge count: {}", self.edge_count)?;
        } else {
            for (category, count) in self.edge_types.iter() {
                writeln!(f, "{category} - count: {count}")?;
            }
        }
        Ok(())
    }
}

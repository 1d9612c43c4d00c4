//! Dense node indexing.
//!
//! Labels are sorted lexicographically and numbered `0..n` in that order, so
//! the same node set always produces the same indices.

use ahash::AHashMap;

use crate::stats::{TypeCounts, node_type};

#[derive(Clone, Debug, Default)]
pub struct NodeIndex {
    labels: Vec<String>,
    positions: AHashMap<String, usize>,
    node_types: TypeCounts,
}

impl NodeIndex {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut labels: Vec<String> = labels.into_iter().collect();
        labels.sort_unstable();
        labels.dedup();

        let mut positions = AHashMap::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            positions.insert(label.clone(), idx);
        }

        let mut node_types = TypeCounts::new();
        for label in &labels {
            if let Some(kind) = node_type(label) {
                node_types.increment(kind);
            }
        }

        Self {
            labels,
            positions,
            node_types,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// Labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn positions(&self) -> &AHashMap<String, usize> {
        &self.positions
    }

    pub fn node_types(&self) -> &TypeCounts {
        &self.node_types
    }
}

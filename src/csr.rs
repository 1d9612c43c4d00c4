//! Compressed sparse row adjacency.
//!
//! Node `i` owns the block `offsets[i]..offsets[i + 1]` of `destinations` and
//! `weights`. The layout is built in three passes: count out-degrees, prefix
//! sum them into offsets, then fill each block through a per-source cursor.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedEdge {
    pub source: usize,
    pub dest: usize,
    pub weight: f64,
}

#[derive(Clone, Debug, Default)]
pub struct CsrAdjacency {
    offsets: Vec<usize>,
    destinations: Vec<usize>,
    weights: Vec<f64>,
}

impl CsrAdjacency {
    /// Lays out `edges` for `node_count` nodes.
    ///
    /// The edges are sorted by `(source, dest)` here, right before the fill
    /// pass, so each block ends up ordered by destination index. Every
    /// endpoint must be below `node_count` and no `(source, dest)` pair may
    /// appear twice.
    pub fn build(node_count: usize, edges: &mut [IndexedEdge]) -> Self {
        edges.sort_unstable_by_key(|e| (e.source, e.dest));
        debug_assert!(
            edges
                .windows(2)
                .all(|w| (w[0].source, w[0].dest) < (w[1].source, w[1].dest)),
            "duplicate directed edge in layout input"
        );

        let mut degrees = vec![0usize; node_count];
        for edge in edges.iter() {
            degrees[edge.source] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut running = 0usize;
        for degree in &degrees {
            running += degree;
            offsets.push(running);
        }

        let mut destinations = vec![0usize; edges.len()];
        let mut weights = vec![0f64; edges.len()];
        let mut cursor: Vec<usize> = offsets[..node_count].to_vec();
        for edge in edges.iter() {
            let slot = cursor[edge.source];
            destinations[slot] = edge.dest;
            weights[slot] = edge.weight;
            cursor[edge.source] += 1;
        }

        Self {
            offsets,
            destinations,
            weights,
        }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Number of directed entries.
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn block(&self, source: usize) -> Range<usize> {
        if source >= self.node_count() {
            return 0..0;
        }
        self.offsets[source]..self.offsets[source + 1]
    }

    pub fn degree(&self, source: usize) -> usize {
        self.block(source).len()
    }

    pub fn destinations(&self, source: usize) -> &[usize] {
        &self.destinations[self.block(source)]
    }

    pub fn weights(&self, source: usize) -> &[f64] {
        &self.weights[self.block(source)]
    }

    /// Position of `dest` within the flat arrays, if `source -> dest` exists.
    pub fn find(&self, source: usize, dest: usize) -> Option<usize> {
        let block = self.block(source);
        let start = block.start;
        self.destinations[block]
            .iter()
            .position(|&d| d == dest)
            .map(|pos| start + pos)
    }

    pub fn weight_at(&self, position: usize) -> Option<f64> {
        self.weights.get(position).copied()
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn all_destinations(&self) -> &[usize] {
        &self.destinations
    }

    pub fn all_weights(&self) -> &[f64] {
        &self.weights
    }
}

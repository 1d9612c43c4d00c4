//! Structural checks over a built [`CsfGraph`].
//!
//! The checks walk the raw adjacency arrays rather than the label-level query
//! surface, so they catch layout corruption that the queries would hide.

use std::{fmt, result};

use serde::Serialize;

use crate::graph::CsfGraph;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Offset table entries that decrease, overrun the arrays, or have the
    /// wrong length.
    pub offset_violations: usize,
    /// Destinations that do not name a node.
    pub dangling_edges: usize,
    /// Directed entries whose reverse is missing or carries another weight.
    pub asymmetric_edges: usize,
    pub duplicate_edges: usize,
}

impl LayoutReport {
    pub fn merge(&mut self, other: &LayoutReport) {
        self.total_nodes = self.total_nodes.max(other.total_nodes);
        self.total_edges = self.total_edges.max(other.total_edges);
        self.offset_violations += other.offset_violations;
        self.dangling_edges += other.dangling_edges;
        self.asymmetric_edges += other.asymmetric_edges;
        self.duplicate_edges += other.duplicate_edges;
    }

    pub fn has_issues(&self) -> bool {
        self.offset_violations > 0
            || self.dangling_edges > 0
            || self.asymmetric_edges > 0
            || self.duplicate_edges > 0
    }
}

#[derive(Debug)]
pub struct LayoutError {
    pub report: LayoutReport,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout violations detected")
    }
}

impl std::error::Error for LayoutError {}

pub fn validate_offsets(graph: &CsfGraph) -> LayoutReport {
    let mut report = base_report(graph);
    let offsets = graph.offsets();
    if offsets.len() != graph.node_count() + 1 {
        report.offset_violations += 1;
    }
    if offsets.first().copied().unwrap_or(0) != 0 {
        report.offset_violations += 1;
    }
    report.offset_violations += offsets.windows(2).filter(|w| w[1] < w[0]).count();
    if offsets.last().copied().unwrap_or(0) != graph.edge_count() {
        report.offset_violations += 1;
    }
    report
}

pub fn validate_symmetry(graph: &CsfGraph) -> LayoutReport {
    let mut report = base_report(graph);
    let adjacency = graph.adjacency();
    for source in 0..graph.node_count() {
        let dests = adjacency.destinations(source);
        let weights = adjacency.weights(source);
        for (&dest, &weight) in dests.iter().zip(weights) {
            if dest >= graph.node_count() {
                report.dangling_edges += 1;
                continue;
            }
            let reverse = adjacency
                .find(dest, source)
                .and_then(|pos| adjacency.weight_at(pos));
            // Bitwise so that NaN weights still pair up.
            if reverse.map(f64::to_bits) != Some(weight.to_bits()) {
                report.asymmetric_edges += 1;
            }
        }
    }
    report
}

pub fn validate_no_duplicate_edges(graph: &CsfGraph) -> LayoutReport {
    let mut report = base_report(graph);
    let adjacency = graph.adjacency();
    for source in 0..graph.node_count() {
        let mut dests = adjacency.destinations(source).to_vec();
        dests.sort_unstable();
        report.duplicate_edges += dests.windows(2).filter(|w| w[0] == w[1]).count();
    }
    report
}

pub fn validate_layout(graph: &CsfGraph) -> LayoutReport {
    let mut report = LayoutReport::default();
    report.merge(&validate_offsets(graph));
    report.merge(&validate_symmetry(graph));
    report.merge(&validate_no_duplicate_edges(graph));
    report
}

pub fn run_strict_layout_checks(graph: &CsfGraph) -> result::Result<(), LayoutError> {
    let report = validate_layout(graph);
    if report.has_issues() {
        Err(LayoutError { report })
    } else {
        Ok(())
    }
}

fn base_report(graph: &CsfGraph) -> LayoutReport {
    LayoutReport {
        total_nodes: graph.node_count(),
        total_edges: graph.edge_count(),
        ..LayoutReport::default()
    }
}

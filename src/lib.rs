//! Immutable compressed-storage graph for weighted, typed, undirected edge lists.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod client;
pub mod csr;
pub mod errors;
pub mod graph;
pub mod index;
pub mod ingest;
pub mod safety;
pub mod stats;

pub use crate::errors::CsfGraphError;
pub use crate::graph::{CsfGraph, CsfGraphBuilder};
pub use crate::index::NodeIndex;
pub use crate::ingest::{
    CollectingSink, Diagnostic, DiagnosticSink, IngestSummary, RecordError, TracingSink,
};
pub use crate::safety::{LayoutReport, validate_layout};
pub use crate::stats::{TypeCounts, TypeDistribution, edge_type, node_type};

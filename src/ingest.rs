//! Edge-list ingestion.
//!
//! Each input line carries `<source> <target> <weight>`. Accepted records are
//! stored in both directions; lines that do not validate are dropped and
//! reported to a [`DiagnosticSink`] without interrupting ingestion.

use std::fmt;

use ahash::{AHashSet, RandomState};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::stats::{TypeCounts, edge_type};

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
pub enum RecordError {
    #[error("expected 3 fields, found {found}")]
    FieldCount { found: usize },
    #[error("could not parse weight field: {value}")]
    Weight { value: String },
}

impl RecordError {
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::FieldCount { .. } => "field_count",
            RecordError::Weight { .. } => "weight",
        }
    }
}

/// A dropped input line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based position of the line in the input.
    pub line_number: usize,
    pub line: String,
    pub error: RecordError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_number, self.error, self.line)
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `tracing` subscriber as warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        warn!(
            line = diagnostic.line_number,
            kind = diagnostic.error.kind(),
            "skipping malformed line: {}",
            diagnostic
        );
    }
}

#[derive(Debug, Default)]
pub struct CollectingSink {
    inner: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.inner.lock().push(diagnostic.clone());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

pub fn parse_record(line: &str) -> Result<RawEdge, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    }
    let weight = parse_weight(fields[2]).ok_or_else(|| RecordError::Weight {
        value: fields[2].to_string(),
    })?;
    Ok(RawEdge {
        source: fields[0].to_string(),
        target: fields[1].to_string(),
        weight,
    })
}

/// Parses a weight, also accepting single `_` separators between digits
/// (`1_000.5`).
pub fn parse_weight(value: &str) -> Option<f64> {
    if !value.contains('_') {
        return value.parse::<f64>().ok();
    }
    let bytes = value.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !separators_ok {
        return None;
    }
    value.replace('_', "").parse::<f64>().ok()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub accepted: usize,
    pub skipped: usize,
}

/// Output of ingestion, handed to indexing and layout.
#[derive(Debug)]
pub struct IngestedEdges {
    /// Distinct labels, unordered.
    pub nodes: Vec<String>,
    /// Directed entries `(source, target, weight)`, unordered.
    pub edges: Vec<(String, String, f64)>,
    pub edge_types: TypeCounts,
    pub summary: IngestSummary,
}

/// Accumulates a deduplicated, symmetric edge set.
///
/// Edges are keyed by `(source, target)` only. When the same ordered pair is
/// seen again the first weight is kept and the later record is ignored.
#[derive(Debug, Default)]
pub struct EdgeIngest {
    edges: IndexMap<(String, String), f64, RandomState>,
    nodes: AHashSet<String>,
    edge_types: TypeCounts,
    summary: IngestSummary,
    line_number: usize,
}

impl EdgeIngest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and records one input line. Returns `false` when the line was
    /// dropped.
    pub fn ingest_line(&mut self, line: &str, sink: &dyn DiagnosticSink) -> bool {
        self.line_number += 1;
        match parse_record(line) {
            Ok(edge) => {
                self.accept(edge);
                true
            }
            Err(error) => {
                self.summary.skipped += 1;
                sink.report(&Diagnostic {
                    line_number: self.line_number,
                    line: line.to_string(),
                    error,
                });
                false
            }
        }
    }

    /// Records an edge. A self loop `(a, a)` collapses to one directed
    /// entry since both directions share the same key.
    pub fn insert_edge(&mut self, source: &str, target: &str, weight: f64) {
        self.accept(RawEdge {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        });
    }

    pub fn insert_node(&mut self, label: &str) {
        if !self.nodes.contains(label) {
            self.nodes.insert(label.to_string());
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Directed entries collected so far.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn summary(&self) -> IngestSummary {
        self.summary
    }

    pub fn finish(self) -> IngestedEdges {
        IngestedEdges {
            nodes: self.nodes.into_iter().collect(),
            edges: self
                .edges
                .into_iter()
                .map(|((source, target), weight)| (source, target, weight))
                .collect(),
            edge_types: self.edge_types,
            summary: self.summary,
        }
    }

    fn accept(&mut self, edge: RawEdge) {
        let RawEdge {
            source,
            target,
            weight,
        } = edge;
        self.edge_types.increment(edge_type(&source, &target));
        self.insert_node(&source);
        self.insert_node(&target);
        self.edges
            .entry((source.clone(), target.clone()))
            .or_insert(weight);
        self.edges.entry((target, source)).or_insert(weight);
        self.summary.accepted += 1;
    }
}

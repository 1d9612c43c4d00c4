//! The queryable graph and its builder.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use ahash::AHashMap;
use tracing::{debug, info};

use crate::{
    csr::{CsrAdjacency, IndexedEdge},
    errors::CsfGraphError,
    index::NodeIndex,
    ingest::{DiagnosticSink, EdgeIngest, IngestSummary, IngestedEdges, TracingSink},
    stats::{TypeCounts, TypeDistribution, node_type},
};

/// Immutable weighted, undirected graph in compressed storage format.
///
/// Every undirected edge is stored as two directed entries. Once built, the
/// graph has no mutating API and can be shared across threads freely.
#[derive(Clone, Debug)]
pub struct CsfGraph {
    index: NodeIndex,
    adjacency: CsrAdjacency,
    edge_types: TypeCounts,
    summary: IngestSummary,
}

impl CsfGraph {
    /// Builds a graph from a whitespace-separated edge list file, reporting
    /// dropped lines through `tracing`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CsfGraphError> {
        Self::from_path_with_sink(path, &TracingSink)
    }

    pub fn from_path_with_sink<P: AsRef<Path>>(
        path: P,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, CsfGraphError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CsfGraphError::invalid_input(
                "need to pass path of file with edges",
            ));
        }
        if !path.exists() {
            return Err(CsfGraphError::invalid_input(format!(
                "could not find graph file {}",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(CsfGraphError::invalid_input(format!(
                "graph path {} is not a file",
                path.display()
            )));
        }
        let file = File::open(path)
            .map_err(|e| CsfGraphError::invalid_input(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "reading edge list");
        Self::from_reader(BufReader::new(file), sink)
    }

    pub fn from_reader<R: BufRead>(
        reader: R,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, CsfGraphError> {
        let mut ingest = EdgeIngest::new();
        for line in reader.lines() {
            let line = line.map_err(|e| CsfGraphError::io(e.to_string()))?;
            ingest.ingest_line(&line, sink);
        }
        Ok(Self::from_ingest(ingest.finish()))
    }

    /// Builds a graph from in-memory lines, reporting dropped lines through
    /// `tracing`.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_lines_with_sink(lines, &TracingSink)
    }

    pub fn from_lines_with_sink<I, S>(lines: I, sink: &dyn DiagnosticSink) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ingest = EdgeIngest::new();
        for line in lines {
            ingest.ingest_line(line.as_ref(), sink);
        }
        Self::from_ingest(ingest.finish())
    }

    pub fn builder() -> CsfGraphBuilder {
        CsfGraphBuilder::new()
    }

    fn from_ingest(ingested: IngestedEdges) -> Self {
        let IngestedEdges {
            nodes,
            edges,
            edge_types,
            summary,
        } = ingested;
        debug!(
            accepted = summary.accepted,
            skipped = summary.skipped,
            directed_edges = edges.len(),
            "ingested edge list"
        );

        let index = NodeIndex::from_labels(nodes);
        debug!(nodes = index.len(), "indexed nodes");

        let mut indexed: Vec<IndexedEdge> = Vec::with_capacity(edges.len());
        for (source_label, target_label, weight) in edges {
            // Every endpoint was registered during ingestion.
            if let (Some(source), Some(dest)) =
                (index.index_of(&source_label), index.index_of(&target_label))
            {
                indexed.push(IndexedEdge {
                    source,
                    dest,
                    weight,
                });
            }
        }
        let adjacency = CsrAdjacency::build(index.len(), &mut indexed);

        info!(
            nodes = index.len(),
            edges = adjacency.len(),
            "built compressed graph"
        );
        Self {
            index,
            adjacency,
            edge_types,
            summary,
        }
    }
}

impl CsfGraph {
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Number of directed entries: two per undirected edge, one per self loop.
    pub fn edge_count(&self) -> usize {
        self.adjacency.len()
    }

    /// All labels in index order.
    pub fn nodes(&self) -> Vec<&str> {
        self.index.labels().iter().map(String::as_str).collect()
    }

    pub fn nodes_as_integers(&self) -> Vec<usize> {
        (0..self.node_count()).collect()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.index_of(label)
    }

    pub fn label_of(&self, idx: usize) -> Option<&str> {
        self.index.label(idx)
    }

    pub fn neighbors(&self, source: &str) -> Result<Vec<&str>, CsfGraphError> {
        let source_idx = self.require(source)?;
        Ok(self
            .adjacency
            .destinations(source_idx)
            .iter()
            .filter_map(|&dest| self.index.label(dest))
            .collect())
    }

    pub fn neighbor_indices(&self, source_idx: usize) -> &[usize] {
        self.adjacency.destinations(source_idx)
    }

    /// Weights aligned with [`CsfGraph::neighbors`] for the same source.
    pub fn neighbor_weights(&self, source: &str) -> Result<&[f64], CsfGraphError> {
        let source_idx = self.require(source)?;
        Ok(self.adjacency.weights(source_idx))
    }

    pub fn degree(&self, source: &str) -> Result<usize, CsfGraphError> {
        let source_idx = self.require(source)?;
        Ok(self.adjacency.degree(source_idx))
    }

    /// Weight of `source -> dest`. Callers are expected to have checked
    /// [`CsfGraph::has_edge`]; a missing edge is reported as `NotFound`.
    pub fn weight(&self, source: &str, dest: &str) -> Result<f64, CsfGraphError> {
        let source_idx = self.require(source)?;
        let dest_idx = self.require(dest)?;
        self.adjacency
            .find(source_idx, dest_idx)
            .and_then(|pos| self.adjacency.weight_at(pos))
            .ok_or_else(|| {
                CsfGraphError::not_found(format!("edge between {source} and {dest}"))
            })
    }

    pub fn has_edge(&self, source: &str, dest: &str) -> bool {
        match (self.index.index_of(source), self.index.index_of(dest)) {
            (Some(s), Some(d)) => self.adjacency.find(s, d).is_some(),
            _ => false,
        }
    }

    pub fn same_nodetype(&self, a: &str, b: &str) -> bool {
        match (node_type(a), node_type(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Every directed entry as `(source, dest)`, walking blocks in index
    /// order. Both directions of each undirected edge are included.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut result = Vec::with_capacity(self.edge_count());
        for (source_idx, source) in self.index.labels().iter().enumerate() {
            for &dest in self.adjacency.destinations(source_idx) {
                if let Some(dest) = self.index.label(dest) {
                    result.push((source.as_str(), dest));
                }
            }
        }
        result
    }

    pub fn node_to_index_map(&self) -> &AHashMap<String, usize> {
        self.index.positions()
    }

    /// Labels indexed by node index.
    pub fn index_to_node_map(&self) -> &[String] {
        self.index.labels()
    }

    pub fn offsets(&self) -> &[usize] {
        self.adjacency.offsets()
    }

    pub(crate) fn adjacency(&self) -> &CsrAdjacency {
        &self.adjacency
    }

    pub fn ingest_summary(&self) -> IngestSummary {
        self.summary
    }

    pub fn edge_type_distribution(&self) -> TypeDistribution {
        TypeDistribution {
            node_types: self.index.node_types().clone(),
            edge_types: self.edge_types.clone(),
            edge_count: self.edge_count(),
        }
    }

    pub fn write_edge_type_distribution<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.edge_type_distribution())
    }

    pub fn print_edge_type_distribution(&self) {
        print!("{}", self.edge_type_distribution());
    }

    fn require(&self, label: &str) -> Result<usize, CsfGraphError> {
        self.index
            .index_of(label)
            .ok_or_else(|| CsfGraphError::not_found(format!("node {label}")))
    }
}

impl fmt::Display for CsfGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CSFGraph(nodes: {}; edges: {})",
            self.node_count(),
            self.edge_count()
        )
    }
}

/// Programmatic input source for [`CsfGraph`].
///
/// ```
/// use csfgraph::CsfGraph;
///
/// let mut builder = CsfGraph::builder();
/// builder.add_edge("g1", "p1", 1.0)?;
/// builder.add_node("d9")?;
/// let graph = builder.build();
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), csfgraph::CsfGraphError>(())
/// ```
#[derive(Debug, Default)]
pub struct CsfGraphBuilder {
    ingest: EdgeIngest,
}

impl CsfGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw edge-list line; malformed lines go to `sink`.
    pub fn add_line(&mut self, line: &str, sink: &dyn DiagnosticSink) -> bool {
        self.ingest.ingest_line(line, sink)
    }

    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<&mut Self, CsfGraphError> {
        validate_label(source)?;
        validate_label(target)?;
        self.ingest.insert_edge(source, target, weight);
        Ok(self)
    }

    /// Registers a node that may have no incident edges.
    pub fn add_node(&mut self, label: &str) -> Result<&mut Self, CsfGraphError> {
        validate_label(label)?;
        self.ingest.insert_node(label);
        Ok(self)
    }

    pub fn build(self) -> CsfGraph {
        CsfGraph::from_ingest(self.ingest.finish())
    }
}

fn validate_label(label: &str) -> Result<(), CsfGraphError> {
    if label.is_empty() {
        return Err(CsfGraphError::invalid_input("node label must be set"));
    }
    if label.chars().any(char::is_whitespace) {
        return Err(CsfGraphError::invalid_input(format!(
            "node label {label:?} contains whitespace"
        )));
    }
    Ok(())
}

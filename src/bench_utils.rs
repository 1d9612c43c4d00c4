//! Deterministic synthetic edge lists for benchmarks and tests.

use std::io::{self, Write};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Node-type prefixes assigned round-robin to generated labels.
pub const NODE_TYPE_PREFIXES: [char; 3] = ['g', 'p', 'd'];

#[derive(Clone, Debug)]
pub struct EdgeListDataset {
    pub labels: Vec<String>,
    /// Undirected edges as `(from, to, weight)` over positions in `labels`.
    pub edges: Vec<(usize, usize, f64)>,
}

impl EdgeListDataset {
    pub fn nodes(&self) -> usize {
        self.labels.len()
    }

    pub fn edges(&self) -> usize {
        self.edges.len()
    }

    pub fn degrees(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.labels.len()];
        for &(from, to, _) in &self.edges {
            counts[from] += 1;
            counts[to] += 1;
        }
        counts
    }

    pub fn hub_index(&self) -> usize {
        let mut best = (0usize, 0usize);
        for (idx, deg) in self.degrees().into_iter().enumerate() {
            if deg > best.0 {
                best = (deg, idx);
            }
        }
        best.1
    }

    pub fn line(&self, edge: usize) -> String {
        let (from, to, weight) = self.edges[edge];
        format!("{} {} {}", self.labels[from], self.labels[to], weight)
    }

    pub fn to_lines(&self) -> Vec<String> {
        (0..self.edges.len()).map(|idx| self.line(idx)).collect()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for idx in 0..self.edges.len() {
            writeln!(out, "{}", self.line(idx))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Star,
    RandomErdosRenyi { edges: usize },
    ScaleFree { m: usize },
}

pub fn generate_edge_list(shape: GraphShape, node_count: usize, seed: u64) -> EdgeListDataset {
    assert!(node_count > 1, "node_count must exceed 1");
    let mut rng = StdRng::seed_from_u64(seed);
    let labels = build_labels(node_count);
    let pairs = match shape {
        GraphShape::Line => (0..node_count.saturating_sub(1))
            .map(|idx| (idx, idx + 1))
            .collect(),
        GraphShape::Star => (1..node_count).map(|leaf| (0, leaf)).collect(),
        GraphShape::RandomErdosRenyi { edges } => {
            generate_random_pairs(&mut rng, node_count, edges)
        }
        GraphShape::ScaleFree { m } => generate_scale_free_pairs(&mut rng, node_count, m),
    };
    let edges = pairs
        .into_iter()
        .map(|(from, to)| (from, to, rng.gen_range(1..=1000) as f64 / 100.0))
        .collect();
    EdgeListDataset { labels, edges }
}

fn build_labels(count: usize) -> Vec<String> {
    (0..count)
        .map(|idx| {
            let prefix = NODE_TYPE_PREFIXES[idx % NODE_TYPE_PREFIXES.len()];
            format!("{prefix}{idx}")
        })
        .collect()
}

fn generate_random_pairs(
    rng: &mut StdRng,
    node_count: usize,
    edge_count: usize,
) -> Vec<(usize, usize)> {
    let total_pairs = pair_count(node_count);
    assert!(
        edge_count as u128 <= total_pairs,
        "edge_count exceeds possible pairs"
    );
    let mut pairs = Vec::with_capacity(edge_count);
    let mut idx = 0u64;
    let mut remaining_edges = edge_count as u64;
    while remaining_edges > 0 && idx < total_pairs as u64 {
        let remaining_pairs = total_pairs as u64 - idx;
        let p = remaining_edges as f64 / remaining_pairs as f64;
        idx += sample_geometric(rng, p);
        if idx >= total_pairs as u64 {
            break;
        }
        let (from, to) = pair_from_index(idx, node_count as u64);
        pairs.push((from as usize, to as usize));
        idx += 1;
        remaining_edges -= 1;
    }
    pairs
}

fn generate_scale_free_pairs(rng: &mut StdRng, node_count: usize, m: usize) -> Vec<(usize, usize)> {
    assert!(m > 0, "m must be positive");
    assert!(node_count > m + 1, "node_count must exceed m + 1");
    let mut degrees = vec![0usize; node_count];
    let mut pairs = Vec::new();
    let seed_nodes = m + 1;
    for u in 0..seed_nodes {
        for v in (u + 1)..seed_nodes {
            pairs.push((u, v));
            degrees[u] += 1;
            degrees[v] += 1;
        }
    }
    let mut total_degree: usize = degrees.iter().sum();
    for new_node in seed_nodes..node_count {
        let mut targets: Vec<usize> = Vec::with_capacity(m);
        while targets.len() < m {
            let pick = rng.gen_range(0..total_degree);
            let mut cumulative = 0usize;
            for candidate in 0..new_node {
                cumulative += degrees[candidate];
                if pick < cumulative {
                    if !targets.contains(&candidate) {
                        targets.push(candidate);
                    }
                    break;
                }
            }
        }
        targets.sort_unstable();
        for target in targets {
            pairs.push((target, new_node));
            degrees[target] += 1;
            degrees[new_node] += 1;
            total_degree += 2;
        }
    }
    pairs
}

fn pair_count(nodes: usize) -> u128 {
    let n = nodes as u128;
    n * (n - 1) / 2
}

fn sample_geometric(rng: &mut StdRng, p: f64) -> u64 {
    if p >= 1.0 {
        return 0;
    }
    let u = rng.r#gen::<f64>().max(f64::MIN_POSITIVE);
    ((u.ln() / (1.0 - p).ln()).floor().max(0.0)) as u64
}

fn pair_from_index(idx: u64, nodes: u64) -> (u64, u64) {
    let mut left = 0;
    let mut start = 0u64;
    while left < nodes - 1 {
        let remaining = nodes - left - 1;
        if idx < start + remaining {
            return (left, left + 1 + (idx - start));
        }
        start += remaining;
        left += 1;
    }
    (nodes - 2, nodes - 1)
}

use csfgraph::{
    CsfGraph,
    bench_utils::{EdgeListDataset, GraphShape, generate_edge_list},
    safety::{
        run_strict_layout_checks, validate_layout, validate_no_duplicate_edges, validate_offsets,
        validate_symmetry,
    },
};

const SEED: u64 = 0x5EED;

fn datasets() -> Vec<(&'static str, EdgeListDataset)> {
    vec![
        ("line", generate_edge_list(GraphShape::Line, 64, SEED)),
        ("star", generate_edge_list(GraphShape::Star, 64, SEED)),
        (
            "er",
            generate_edge_list(GraphShape::RandomErdosRenyi { edges: 300 }, 80, SEED),
        ),
        (
            "scalefree",
            generate_edge_list(GraphShape::ScaleFree { m: 3 }, 80, SEED),
        ),
    ]
}

#[test]
fn test_generated_graphs_have_clean_layout() {
    for (name, dataset) in datasets() {
        let graph = CsfGraph::from_lines(dataset.to_lines());
        let report = validate_layout(&graph);
        assert!(!report.has_issues(), "{name}: {report:?}");
        assert_eq!(report.total_nodes, graph.node_count());
        assert_eq!(report.total_edges, graph.edge_count());
        assert!(run_strict_layout_checks(&graph).is_ok(), "{name}");
    }
}

#[test]
fn test_edge_count_is_twice_undirected_edges() {
    for (name, dataset) in datasets() {
        let graph = CsfGraph::from_lines(dataset.to_lines());
        assert_eq!(graph.edge_count(), 2 * dataset.edges(), "{name}");
        assert_eq!(graph.node_count(), dataset.nodes(), "{name}");
    }
}

#[test]
fn test_every_input_edge_is_queryable_both_ways() {
    for (name, dataset) in datasets() {
        let graph = CsfGraph::from_lines(dataset.to_lines());
        for &(from, to, weight) in &dataset.edges {
            let a = dataset.labels[from].as_str();
            let b = dataset.labels[to].as_str();
            assert!(graph.has_edge(a, b), "{name}: {a}-{b}");
            assert!(graph.has_edge(b, a), "{name}: {b}-{a}");
            assert_eq!(graph.weight(a, b).unwrap(), weight, "{name}");
            assert_eq!(graph.weight(b, a).unwrap(), weight, "{name}");
        }
    }
}

#[test]
fn test_degrees_match_dataset() {
    let dataset = generate_edge_list(GraphShape::ScaleFree { m: 2 }, 50, SEED);
    let graph = CsfGraph::from_lines(dataset.to_lines());
    for (idx, expected) in dataset.degrees().into_iter().enumerate() {
        assert_eq!(graph.degree(&dataset.labels[idx]).unwrap(), expected);
    }
    let hub = &dataset.labels[dataset.hub_index()];
    let max_degree = dataset.degrees().into_iter().max().unwrap();
    assert_eq!(graph.degree(hub).unwrap(), max_degree);
}

#[test]
fn test_neighbor_blocks_sorted_and_unique() {
    let dataset = generate_edge_list(GraphShape::RandomErdosRenyi { edges: 200 }, 40, SEED);
    let graph = CsfGraph::from_lines(dataset.to_lines());
    for idx in graph.nodes_as_integers() {
        let block = graph.neighbor_indices(idx);
        assert!(block.windows(2).all(|w| w[0] < w[1]));
    }
    assert_eq!(validate_no_duplicate_edges(&graph).duplicate_edges, 0);
}

#[test]
fn test_duplicated_input_does_not_duplicate_entries() {
    let dataset = generate_edge_list(GraphShape::Line, 20, SEED);
    let mut lines = dataset.to_lines();
    let reversed: Vec<String> = dataset
        .edges
        .iter()
        .map(|&(from, to, _)| format!("{} {} 99", dataset.labels[to], dataset.labels[from]))
        .collect();
    lines.extend(reversed);
    let graph = CsfGraph::from_lines(&lines);
    assert_eq!(graph.edge_count(), 2 * dataset.edges());
    assert_eq!(validate_symmetry(&graph).asymmetric_edges, 0);
    let (from, to, weight) = dataset.edges[0];
    assert_eq!(
        graph
            .weight(&dataset.labels[to], &dataset.labels[from])
            .unwrap(),
        weight
    );
}

#[test]
fn test_offsets_report_for_empty_graph() {
    let graph = CsfGraph::from_lines(Vec::<String>::new());
    let report = validate_offsets(&graph);
    assert_eq!(report.offset_violations, 0);
    assert_eq!(report.total_nodes, 0);
}

#[test]
fn test_type_distribution_of_generated_graph() {
    let dataset = generate_edge_list(GraphShape::Star, 30, SEED);
    let graph = CsfGraph::from_lines(dataset.to_lines());
    let distribution = graph.edge_type_distribution();
    assert_eq!(distribution.node_types.total(), 30);
    assert_eq!(distribution.node_types.get("g"), 10);
    assert_eq!(distribution.edge_types.total(), 29);
    assert_eq!(distribution.edge_count, 58);
}

#[test]
fn test_smallest_line_has_one_edge() {
    let dataset = generate_edge_list(GraphShape::Line, 2, SEED);
    assert_eq!(dataset.edges(), 1);
    assert_eq!(dataset.edges[0].0, 0);
    assert_eq!(dataset.edges[0].1, 1);
}

use csfgraph::{
    CollectingSink, DiagnosticSink, RecordError, TracingSink,
    ingest::{EdgeIngest, RawEdge, parse_record},
};

fn sorted_edges(ingest: EdgeIngest) -> Vec<(String, String, f64)> {
    let mut edges = ingest.finish().edges;
    edges.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    edges
}

#[test]
fn test_parse_record_accepts_three_fields() {
    let edge = parse_record("g1 p1 1.5").unwrap();
    assert_eq!(
        edge,
        RawEdge {
            source: "g1".into(),
            target: "p1".into(),
            weight: 1.5,
        }
    );
}

#[test]
fn test_parse_record_splits_on_any_whitespace() {
    let edge = parse_record("  g1\tp1    2 \r").unwrap();
    assert_eq!(edge.source, "g1");
    assert_eq!(edge.target, "p1");
    assert_eq!(edge.weight, 2.0);
}

#[test]
fn test_parse_record_rejects_wrong_field_count() {
    assert_eq!(
        parse_record("onlytwo fields"),
        Err(RecordError::FieldCount { found: 2 })
    );
    assert_eq!(
        parse_record("a b 1.0 extra"),
        Err(RecordError::FieldCount { found: 4 })
    );
    assert_eq!(parse_record(""), Err(RecordError::FieldCount { found: 0 }));
}

#[test]
fn test_parse_record_rejects_bad_weight() {
    assert_eq!(
        parse_record("g2 p1 bad"),
        Err(RecordError::Weight {
            value: "bad".into()
        })
    );
}

#[test]
fn test_parse_record_accepts_self_loop() {
    let edge = parse_record("a a 1.0").unwrap();
    assert_eq!(edge.source, "a");
    assert_eq!(edge.target, "a");
}

#[test]
fn test_ingest_self_loop_is_one_directed_entry() {
    let mut ingest = EdgeIngest::new();
    assert!(ingest.ingest_line("a a 3.0", &TracingSink));
    assert_eq!(ingest.node_count(), 1);
    assert_eq!(ingest.edge_count(), 1);
    assert_eq!(sorted_edges(ingest), vec![("a".into(), "a".into(), 3.0)]);
}

#[test]
fn test_parse_record_accepts_digit_separators_in_weight() {
    assert_eq!(parse_record("a b 1_0").unwrap().weight, 10.0);
    assert_eq!(parse_record("a b 1_000.2_5").unwrap().weight, 1000.25);
}

#[test]
fn test_parse_record_rejects_misplaced_separators() {
    for weight in ["_1", "1_", "1__0", "1_.5", "1._5"] {
        let line = format!("a b {weight}");
        assert_eq!(
            parse_record(&line),
            Err(RecordError::Weight {
                value: weight.into()
            }),
            "weight {weight}"
        );
    }
}

#[test]
fn test_ingest_stores_both_directions() {
    let mut ingest = EdgeIngest::new();
    assert!(ingest.ingest_line("g1 p1 0.25", &TracingSink));
    assert_eq!(ingest.edge_count(), 2);
    assert_eq!(ingest.node_count(), 2);
    assert_eq!(
        sorted_edges(ingest),
        vec![
            ("g1".to_string(), "p1".to_string(), 0.25),
            ("p1".to_string(), "g1".to_string(), 0.25),
        ]
    );
}

#[test]
fn test_ingest_keeps_first_weight_for_duplicates() {
    let sink = CollectingSink::new();
    let mut ingest = EdgeIngest::new();
    assert!(ingest.ingest_line("a b 1.0", &sink));
    assert!(ingest.ingest_line("a b 5.0", &sink));
    assert!(ingest.ingest_line("b a 7.0", &sink));
    assert_eq!(ingest.edge_count(), 2);
    assert!(sink.is_empty());
    assert_eq!(
        sorted_edges(ingest),
        vec![
            ("a".to_string(), "b".to_string(), 1.0),
            ("b".to_string(), "a".to_string(), 1.0),
        ]
    );
}

#[test]
fn test_edge_type_counts_every_accepted_line() {
    let mut ingest = EdgeIngest::new();
    for line in ["p1 g1 1", "g1 g2 1", "g2 p1 1", "g2 p1 3"] {
        ingest.ingest_line(line, &TracingSink);
    }
    let done = ingest.finish();
    assert_eq!(done.edge_types.get("gp"), 3);
    assert_eq!(done.edge_types.get("gg"), 1);
    assert_eq!(done.edge_types.get("pg"), 0);
    assert_eq!(done.summary.accepted, 4);
    assert_eq!(done.edges.len(), 6);
}

#[test]
fn test_malformed_lines_reported_with_line_numbers() {
    let sink = CollectingSink::new();
    let mut ingest = EdgeIngest::new();
    for line in ["g1 p1 1.0", "g1 g2 2.0", "g2 p1 bad", "onlytwo fields"] {
        ingest.ingest_line(line, &sink);
    }
    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].line_number, 3);
    assert_eq!(diagnostics[0].line, "g2 p1 bad");
    assert_eq!(
        diagnostics[0].error,
        RecordError::Weight {
            value: "bad".into()
        }
    );
    assert_eq!(diagnostics[1].line_number, 4);
    assert_eq!(diagnostics[1].error, RecordError::FieldCount { found: 2 });

    let summary = ingest.summary();
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(ingest.node_count(), 3);
}

#[test]
fn test_custom_sink_receives_diagnostics() {
    use std::cell::Cell;

    struct CountingSink(Cell<usize>);
    impl DiagnosticSink for CountingSink {
        fn report(&self, _diagnostic: &csfgraph::Diagnostic) {
            self.0.set(self.0.get() + 1);
        }
    }

    let sink = CountingSink(Cell::new(0));
    let mut ingest = EdgeIngest::new();
    ingest.ingest_line("x", &sink);
    ingest.ingest_line("x y z", &sink);
    ingest.ingest_line("x y 1", &sink);
    assert_eq!(sink.0.get(), 2);
}

#[test]
fn test_insert_node_without_edges() {
    let mut ingest = EdgeIngest::new();
    ingest.insert_node("lonely");
    ingest.insert_node("lonely");
    assert_eq!(ingest.node_count(), 1);
    assert_eq!(ingest.edge_count(), 0);
}

#[test]
fn test_diagnostic_display_mentions_line() {
    let sink = CollectingSink::new();
    let mut ingest = EdgeIngest::new();
    ingest.ingest_line("a b c d", &sink);
    let rendered = sink.diagnostics()[0].to_string();
    assert!(rendered.starts_with("line 1:"));
    assert!(rendered.contains("found 4"));
}

use std::{env, process};

use csfgraph::{CsfGraph, CsfGraphError, client::CommandLineConfig, safety::validate_layout};
use serde_json::json;
use tracing::Level;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let graph = match open_graph(&config) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&graph, &config) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn open_graph(config: &CommandLineConfig) -> Result<CsfGraph, CsfGraphError> {
    let input = config
        .input
        .as_deref()
        .ok_or_else(|| CsfGraphError::invalid_input("--input is required"))?;
    CsfGraph::from_path(input)
}

fn run_command(graph: &CsfGraph, config: &CommandLineConfig) -> Result<(), CsfGraphError> {
    let payload = match config.command.as_str() {
        "summary" => summary(graph),
        "stats" => {
            let distribution = graph.edge_type_distribution();
            json!({
                "command": "stats",
                "node_types": distribution.node_types,
                "edge_types": distribution.edge_types,
                "edge_count": distribution.edge_count,
            })
        }
        "nodes" => json!({
            "command": "nodes",
            "nodes": graph.nodes(),
        }),
        "edges" => json!({
            "command": "edges",
            "edges": graph.edges(),
        }),
        "neighbors" => {
            let node = required_flag(config, "--node")?;
            json!({
                "command": "neighbors",
                "node": node,
                "neighbors": graph.neighbors(node)?,
                "weights": graph.neighbor_weights(node)?,
            })
        }
        "weight" => {
            let source = required_flag(config, "--source")?;
            let dest = required_flag(config, "--dest")?;
            json!({
                "command": "weight",
                "source": source,
                "dest": dest,
                "weight": graph.weight(source, dest)?,
            })
        }
        "has-edge" => {
            let source = required_flag(config, "--source")?;
            let dest = required_flag(config, "--dest")?;
            json!({
                "command": "has-edge",
                "source": source,
                "dest": dest,
                "exists": graph.has_edge(source, dest),
            })
        }
        "validate" => {
            let report = validate_layout(graph);
            if report.has_issues() {
                return Err(CsfGraphError::invalid_input(format!(
                    "layout violations: {}",
                    json!(report)
                )));
            }
            json!({
                "command": "validate",
                "report": report,
            })
        }
        other => {
            eprintln!("unknown command {other}, defaulting to summary");
            summary(graph)
        }
    };
    println!("{payload}");
    Ok(())
}

fn summary(graph: &CsfGraph) -> serde_json::Value {
    let ingest = graph.ingest_summary();
    json!({
        "command": "summary",
        "graph": graph.to_string(),
        "nodes": graph.node_count(),
        "edges": graph.edge_count(),
        "accepted_lines": ingest.accepted,
        "skipped_lines": ingest.skipped,
    })
}

fn required_flag<'a>(config: &'a CommandLineConfig, flag: &str) -> Result<&'a str, CsfGraphError> {
    config
        .command_flag(flag)
        .ok_or_else(|| CsfGraphError::invalid_input(format!("{flag} is required")))
}

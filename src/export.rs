//! Export the category graph as JSON.
//!
//! Produces a document with the source fingerprint, every node with its
//! statistics and member posts, and every edge with its payload, suitable for
//! feeding other visualization tools.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::graph::{CategoryEdge, CategoryNode};
use crate::pipeline::{run_pipeline, PipelineOutput};

#[derive(Serialize)]
struct ExportData<'a> {
    source: ExportSource<'a>,
    connected: bool,
    nodes: Vec<&'a CategoryNode>,
    edges: &'a [CategoryEdge],
}

#[derive(Serialize)]
struct ExportSource<'a> {
    path: String,
    sha256: &'a str,
    rows_read: usize,
    rows_accepted: usize,
    rows_skipped: usize,
}

/// Serialize a pipeline result as pretty JSON.
pub fn export_json(csv_path: &Path, output: &PipelineOutput) -> Result<String> {
    let ingested = &output.ingested;
    let data = ExportData {
        source: ExportSource {
            path: csv_path.display().to_string(),
            sha256: &ingested.source_sha256,
            rows_read: ingested.rows_read,
            rows_accepted: ingested.rows_accepted,
            rows_skipped: ingested.rows_skipped(),
        },
        connected: output.graph.is_connected(),
        nodes: output.graph.nodes().collect(),
        edges: output.graph.edges(),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Export the graph built from `csv_path` as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn run_export(config: &Config, csv_path: &Path, output: Option<&Path>) -> Result<()> {
    let result = run_pipeline(csv_path, config)?;
    let json = export_json(csv_path, &result)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            eprintln!(
                "Exported {} nodes, {} edges to {}",
                result.graph.node_count(),
                result.graph.edge_count(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

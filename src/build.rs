//! The `build` command: the whole pipeline plus rendering.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::pipeline::run_pipeline;
use crate::render::{write_outputs, RenderTargets};
use crate::stats::format_graph_statistics;

pub fn run_build(config: &Config, csv_path: &Path, targets: RenderTargets) -> Result<()> {
    let output = run_pipeline(csv_path, config)?;
    let ingested = &output.ingested;
    let graph = &output.graph;

    println!("build {}", csv_path.display());
    println!("  rows read: {}", ingested.rows_read);
    println!("  rows skipped: {}", ingested.rows_skipped());
    println!("  nodes: {}", graph.node_count());
    println!("  edges: {}", graph.edge_count());
    println!("  connected: {}", graph.is_connected());

    let files = write_outputs(graph, config, targets)?;
    if graph.is_empty() {
        println!("No valid clusters found. Check your data format.");
        return Ok(());
    }

    println!();
    print!("{}", format_graph_statistics(graph));
    if let Some(path) = &files.html {
        println!("  html: {}", path.display());
    }
    if let Some(path) = &files.svg {
        println!("  svg: {}", path.display());
    }
    println!("ok");
    Ok(())
}

//! One-pass pipeline: ingest → aggregate → build.

use indexmap::IndexMap;
use std::path::Path;

use crate::aggregate::{aggregate, CategorySummary};
use crate::config::Config;
use crate::error::IngestError;
use crate::graph::{build_graph, CategoryGraph};
use crate::ingest::{ingest_file, Ingested};
use crate::models::CategoryId;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub ingested: Ingested,
    pub summaries: IndexMap<CategoryId, CategorySummary>,
    pub graph: CategoryGraph,
}

/// Run the full pipeline over a CSV file. File-level errors abort before any
/// graph is built.
pub fn run_pipeline(csv_path: &Path, config: &Config) -> Result<PipelineOutput, IngestError> {
    let ingested = ingest_file(csv_path, config.input.taxonomy_source)?;
    let summaries = aggregate(&ingested.accumulators);
    let graph = build_graph(
        &ingested.taxonomy,
        &ingested.accumulators,
        &summaries,
        &config.graph,
    );
    Ok(PipelineOutput {
        ingested,
        summaries,
        graph,
    })
}

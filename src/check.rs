//! Input validation without building or rendering.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::error::DiagnosticKind;
use crate::ingest::ingest_file;

/// Ingest `csv_path` and print counts plus every recorded diagnostic.
pub fn run_check(config: &Config, csv_path: &Path) -> Result<()> {
    let ingested = ingest_file(csv_path, config.input.taxonomy_source)?;

    let orphans = ingested
        .accumulators
        .keys()
        .filter(|id| !ingested.taxonomy.contains(**id))
        .count();
    let taxonomy_warnings = ingested
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::TaxonomyLine)
        .count();

    println!("check {}", csv_path.display());
    println!("  rows read: {}", ingested.rows_read);
    println!("  rows accepted: {}", ingested.rows_accepted);
    println!("  rows skipped: {}", ingested.rows_skipped());
    println!("  posts: {}", ingested.posts.len());
    println!("  taxonomy categories: {}", ingested.taxonomy.len());
    println!("  taxonomy warnings: {}", taxonomy_warnings);
    println!("  categories with posts: {}", ingested.accumulators.len());
    println!("  categories missing from taxonomy: {}", orphans);
    println!("  sha256: {}", ingested.source_sha256);

    if !ingested.diagnostics.is_empty() {
        println!("  diagnostics:");
        for d in &ingested.diagnostics {
            println!("    {}", d);
        }
    }
    println!("ok");
    Ok(())
}

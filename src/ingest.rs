//! CSV ingestion.
//!
//! Reads the annotated posts CSV into per-post records and per-category
//! accumulators. Each row is parsed into a [`PostRow`] or rejected with a
//! [`RowError`]; the driver folds accepted rows into an [`IngestBuilder`] and
//! records every rejection as a [`Diagnostic`]. Only file-level problems
//! (missing file, unreadable file, missing columns) abort the run.

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::config::TaxonomySource;
use crate::error::{Diagnostic, DiagnosticKind, IngestError, RowError};
use crate::models::{
    columns, CategoryAccumulator, CategoryId, PostId, PostRecord, PostRow, RawRow,
};
use crate::taxonomy::Taxonomy;

/// Everything the ingestor produced, frozen for aggregation.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub taxonomy: Taxonomy,
    pub posts: IndexMap<PostId, PostRecord>,
    pub accumulators: IndexMap<CategoryId, CategoryAccumulator>,
    pub diagnostics: Vec<Diagnostic>,
    pub rows_read: usize,
    pub rows_accepted: usize,
    /// Hex SHA-256 of the raw input bytes.
    pub source_sha256: String,
}

impl Ingested {
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows_accepted
    }
}

/// Read and ingest a CSV file.
pub fn ingest_file(path: &Path, policy: TaxonomySource) -> Result<Ingested, IngestError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IngestError::NotFound(path.to_path_buf()),
        _ => IngestError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    info!(path = %path.display(), bytes = data.len(), "Read input CSV");
    ingest_bytes(path, &data, policy)
}

/// Ingest CSV content already in memory. `path` is used for error messages.
pub fn ingest_bytes(
    path: &Path,
    data: &[u8],
    policy: TaxonomySource,
) -> Result<Ingested, IngestError> {
    let text = std::str::from_utf8(data).map_err(|source| IngestError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| IngestError::Header {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    debug!("CSV columns found: {:?}", headers.iter().collect::<Vec<_>>());

    let missing: Vec<String> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut builder = IngestBuilder::new(policy);
    for (idx, record) in reader.deserialize::<RawRow>().enumerate() {
        let row_index = idx + 1;
        let parsed = record
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(parse_row);
        match parsed {
            Ok(row) => builder.accept(row_index, row),
            Err(err) => builder.reject(row_index, err),
        }
    }

    Ok(builder.finish(sha256_hex(data)))
}

/// Validate one raw record field by field.
pub fn parse_row(raw: RawRow) -> Result<PostRow, RowError> {
    let post_number: PostId = parse_int(columns::POST_NUMBER, &raw.post_number)?;
    let likes: u64 = parse_int(columns::LIKES, &raw.likes)?;
    let hashtags: u64 = parse_int(columns::HASHTAGS, &raw.hashtags)?;
    let (categories, rejected_tokens) = parse_categories(&raw.patterns)?;

    Ok(PostRow {
        post_number,
        caption: raw.caption,
        url: raw.url,
        likes,
        hashtags,
        categories,
        rejected_tokens,
        taxonomy: raw.taxonomy,
    })
}

/// Parse the `types of patterns` field.
///
/// A comma-separated list keeps whatever tokens parse and returns the rest as
/// rejected. A single value must parse or the whole row is rejected.
pub fn parse_categories(text: &str) -> Result<(Vec<CategoryId>, Vec<String>), RowError> {
    let text = text.trim();

    if !text.contains(',') {
        return text
            .parse::<CategoryId>()
            .map(|id| (vec![id], Vec::new()))
            .map_err(|_| RowError::InvalidCategory {
                value: text.to_string(),
            });
    }

    let mut ids = Vec::new();
    let mut rejected = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        match token.parse::<CategoryId>() {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(_) => rejected.push(token.to_string()),
        }
    }
    Ok((ids, rejected))
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, RowError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| RowError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Mutable state of one ingestion pass. Consumed by [`IngestBuilder::finish`].
#[derive(Debug)]
pub struct IngestBuilder {
    policy: TaxonomySource,
    taxonomy: Option<Taxonomy>,
    posts: IndexMap<PostId, PostRecord>,
    accumulators: IndexMap<CategoryId, CategoryAccumulator>,
    diagnostics: Vec<Diagnostic>,
    rows_read: usize,
    rows_accepted: usize,
}

impl IngestBuilder {
    pub fn new(policy: TaxonomySource) -> Self {
        Self {
            policy,
            taxonomy: None,
            posts: IndexMap::new(),
            accumulators: IndexMap::new(),
            diagnostics: Vec::new(),
            rows_read: 0,
            rows_accepted: 0,
        }
    }

    /// Fold an accepted row into the builder.
    pub fn accept(&mut self, row_index: usize, row: PostRow) {
        self.rows_read += 1;
        self.rows_accepted += 1;
        let post = row.post_number;
        debug!(
            row = row_index,
            post,
            likes = row.likes,
            "Processing post {}: clusters={:?}",
            post,
            row.categories
        );

        for token in &row.rejected_tokens {
            warn!(row = row_index, "Could not parse cluster '{}' for post {}", token, post);
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::CategoryToken,
                row_index,
                format!("could not parse cluster '{}' for post {}", token, post),
            ));
        }

        if self.taxonomy.is_none() && self.wants_taxonomy(&row) {
            let (taxonomy, warnings) = Taxonomy::parse(&row.taxonomy);
            info!(row = row_index, categories = taxonomy.len(), "Taxonomy parsed");
            self.diagnostics.extend(warnings);
            self.taxonomy = Some(taxonomy);
        }

        for &category in &row.categories {
            self.accumulators
                .entry(category)
                .or_default()
                .push(post, row.likes, row.hashtags);
        }

        let record = PostRecord {
            caption: row.caption,
            url: row.url,
            likes: row.likes,
            hashtags: row.hashtags,
            categories: row.categories,
        };
        if self.posts.insert(post, record).is_some() {
            warn!(row = row_index, "Post {} appears more than once; keeping the latest", post);
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::DuplicatePost,
                row_index,
                format!("post {} overwrote an earlier row", post),
            ));
        }
    }

    /// Record a rejected row.
    pub fn reject(&mut self, row_index: usize, err: RowError) {
        self.rows_read += 1;
        warn!(row = row_index, "Skipping row {}: {}", row_index, err);
        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::SkippedRow,
            row_index,
            err.to_string(),
        ));
    }

    fn wants_taxonomy(&self, row: &PostRow) -> bool {
        match self.policy {
            TaxonomySource::FirstRow => !row.taxonomy.trim().is_empty(),
            TaxonomySource::PostOne => row.post_number == 1,
        }
    }

    pub fn finish(self, source_sha256: String) -> Ingested {
        let taxonomy = match self.taxonomy {
            Some(t) => t,
            None => {
                warn!(
                    policy = ?self.policy,
                    "No row supplied a taxonomy; every category will be dropped"
                );
                Taxonomy::default()
            }
        };

        info!(
            rows = self.rows_read,
            accepted = self.rows_accepted,
            skipped = self.rows_read - self.rows_accepted,
            "Total rows processed: {}",
            self.rows_read
        );
        let mut clusters: Vec<_> = self.accumulators.keys().copied().collect();
        clusters.sort_unstable();
        info!("Clusters found: {:?}", clusters);
        debug!(
            "Posts per cluster: {:?}",
            self.accumulators
                .iter()
                .map(|(id, acc)| (*id, acc.len()))
                .collect::<Vec<_>>()
        );

        Ingested {
            taxonomy,
            posts: self.posts,
            accumulators: self.accumulators,
            diagnostics: self.diagnostics,
            rows_read: self.rows_read,
            rows_accepted: self.rows_accepted,
            source_sha256,
        }
    }
}

//! Error types for the ingestion pipeline.
//!
//! Two tiers: [`IngestError`] aborts a run (the input cannot be read at all),
//! while [`RowError`] describes why a single CSV row was skipped. Row errors
//! never escape the ingestor; they are recorded as [`Diagnostic`]s.

use std::path::PathBuf;
use thiserror::Error;

/// File-level failure. No partial graph is produced when one of these occurs.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read input file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Failed to read CSV header of {}: {source}", path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Input file {} is missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("field '{field}' is not a valid integer: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("could not parse category '{value}'")]
    InvalidCategory { value: String },

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// What kind of input a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A taxonomy line was skipped.
    TaxonomyLine,
    /// A whole row was skipped.
    SkippedRow,
    /// One token of a multi-category list was dropped; the row was kept.
    CategoryToken,
    /// A row was accepted but overwrote an earlier post with the same number.
    DuplicatePost,
}

/// A recovered, logged problem found while ingesting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based data row (header excluded) or taxonomy line number.
    pub location: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let place = match self.kind {
            DiagnosticKind::TaxonomyLine => "taxonomy line",
            _ => "row",
        };
        write!(f, "{} {}: {}", place, self.location, self.message)
    }
}

//! Taxonomy block parser.
//!
//! The taxonomy column holds a text block such as:
//!
//! ```text
//! 1. - Floral prints
//! 2. - Geometric shapes
//! 3. - Animal motifs
//! ```
//!
//! Each line starts with a single-digit category id, followed by a fixed
//! four-character prefix; everything from the fifth character on is the name.

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::models::CategoryId;

/// Characters before the category name: the id digit plus the separator.
const NAME_OFFSET: usize = 4;

/// Ordered category id → name mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    entries: IndexMap<CategoryId, String>,
}

impl Taxonomy {
    /// Parse a taxonomy block. Malformed lines are skipped and reported.
    pub fn parse(text: &str) -> (Taxonomy, Vec<Diagnostic>) {
        let mut entries = IndexMap::new();
        let mut warnings = Vec::new();

        for (idx, raw) in text.trim().lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((id, name)) => {
                    entries.insert(id, name);
                }
                None => {
                    warn!(line = idx + 1, "Could not parse taxonomy line: {}", line);
                    warnings.push(Diagnostic::new(
                        DiagnosticKind::TaxonomyLine,
                        idx + 1,
                        format!("could not parse line: {}", line),
                    ));
                }
            }
        }

        (Taxonomy { entries }, warnings)
    }

    pub fn get(&self, id: CategoryId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.entries.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(CategoryId, String)> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = (CategoryId, String)>>(iter: I) -> Self {
        Taxonomy {
            entries: iter.into_iter().collect(),
        }
    }
}

fn parse_line(line: &str) -> Option<(CategoryId, String)> {
    if line.chars().count() <= NAME_OFFSET {
        return None;
    }
    let id = line.chars().next()?.to_digit(10)?;
    let name: String = line.chars().skip(NAME_OFFSET).collect();
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((id, name.to_string()))
}

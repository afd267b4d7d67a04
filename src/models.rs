//! Core data models used throughout the pattern network pipeline.
//!
//! These types represent the rows, posts, and per-category accumulators that
//! flow from the CSV reader into the aggregator and graph builder.

use serde::Deserialize;

/// Category (pattern cluster) identifier from the taxonomy.
pub type CategoryId = u32;

/// Post number from the `post number` column.
pub type PostId = u64;

/// Column names of the input CSV.
pub mod columns {
    pub const POST_NUMBER: &str = "post number";
    pub const CAPTION: &str = "caption";
    pub const URL: &str = "url";
    pub const LIKES: &str = "likes";
    pub const HASHTAGS: &str = "number of hashtags";
    pub const PATTERNS: &str = "types of patterns";
    pub const TAXONOMY: &str = "taxonomy";

    pub const REQUIRED: [&str; 7] = [
        POST_NUMBER,
        CAPTION,
        URL,
        LIKES,
        HASHTAGS,
        PATTERNS,
        TAXONOMY,
    ];
}

/// A CSV record as text, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "post number")]
    pub post_number: String,
    pub caption: String,
    pub url: String,
    pub likes: String,
    #[serde(rename = "number of hashtags")]
    pub hashtags: String,
    #[serde(rename = "types of patterns")]
    pub patterns: String,
    pub taxonomy: String,
}

/// A validated row, ready to be folded into the ingest builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub post_number: PostId,
    pub caption: String,
    pub url: String,
    pub likes: u64,
    pub hashtags: u64,
    /// Resolved category ids, duplicates removed, first-seen order.
    pub categories: Vec<CategoryId>,
    /// Category tokens that failed to parse in a multi-category list.
    pub rejected_tokens: Vec<String>,
    pub taxonomy: String,
}

/// A stored post. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub caption: String,
    pub url: String,
    pub likes: u64,
    pub hashtags: u64,
    pub categories: Vec<CategoryId>,
}

/// Per-category raw metrics collected during ingestion.
///
/// `posts`, `likes`, and `hashtags` are parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAccumulator {
    pub posts: Vec<PostId>,
    pub likes: Vec<u64>,
    pub hashtags: Vec<u64>,
}

impl CategoryAccumulator {
    pub fn push(&mut self, post: PostId, likes: u64, hashtags: u64) {
        self.posts.push(post);
        self.likes.push(likes);
        self.hashtags.push(hashtags);
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

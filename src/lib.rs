//! # Pattern Network
//!
//! Builds a co-occurrence network of pattern categories from a CSV export of
//! social-media posts.
//!
//! Every post row carries a likes count, a hashtag count and a list of
//! category ids. The category taxonomy itself rides along inside the CSV in a
//! multi-line `taxonomy` cell. The pipeline aggregates engagement per
//! category, links categories that share posts, and, if the result falls apart
//! into several components, adds similarity edges between categories with
//! comparable average likes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  CSV ingest  │──▶│  Aggregate   │──▶│ Graph build  │
//! │ rows+taxonomy│   │ per category │   │ shared+repair│
//! └─────────────┘   └─────────────┘   └──────┬───────┘
//!                                           │
//!                     ┌───────────┬─────────┼──────────┐
//!                     ▼           ▼         ▼          ▼
//!                ┌────────┐  ┌────────┐ ┌───────┐ ┌────────┐
//!                │  HTML  │  │  SVG   │ │ stats │ │  JSON  │
//!                └────────┘  └────────┘ └───────┘ └────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pnet check posts.csv               # validate input, list diagnostics
//! pnet build posts.csv               # write HTML + SVG into ./out
//! pnet stats posts.csv               # print graph statistics
//! pnet export posts.csv -o g.json    # dump the graph as JSON
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | File-level errors and row diagnostics |
//! | [`models`] | Row and accumulator types |
//! | [`taxonomy`] | Category taxonomy parsing |
//! | [`ingest`] | CSV reading and row validation |
//! | [`aggregate`] | Per-category statistics |
//! | [`graph`] | Category graph and connectivity repair |
//! | [`components`] | Union-find connected components |
//! | [`layout`] | Node positions and colors |
//! | [`render`] | HTML and SVG output |
//! | [`pipeline`] | Ingest → aggregate → build in one call |
//! | [`build`], [`check`], [`stats`], [`export`] | CLI commands |
//! | [`logging`] | Tracing subscriber setup |

pub mod aggregate;
pub mod build;
pub mod check;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod layout;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod stats;
pub mod taxonomy;

//! Graph renderers.
//!
//! Both renderers draw an already-built [`CategoryGraph`]: [`html`] produces a
//! self-contained page with hover details, [`svg`] a static figure with a
//! legend. An empty graph has nothing to display and produces no files.

pub mod html;
pub mod svg;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::graph::CategoryGraph;

/// Paths written by [`write_outputs`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderedFiles {
    pub html: Option<PathBuf>,
    pub svg: Option<PathBuf>,
}

/// Which renderers to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargets {
    pub html: bool,
    pub svg: bool,
}

impl Default for RenderTargets {
    fn default() -> Self {
        Self {
            html: true,
            svg: true,
        }
    }
}

/// Render the requested outputs into the configured output directory.
pub fn write_outputs(
    graph: &CategoryGraph,
    config: &Config,
    targets: RenderTargets,
) -> Result<RenderedFiles> {
    let mut files = RenderedFiles::default();
    if graph.is_empty() {
        warn!("No nodes to display; skipping visualizations");
        return Ok(files);
    }

    if targets.html {
        let path = config.html_path();
        write_file(&path, &html::render_html(graph, &config.output.title)?)?;
        info!("Network visualization saved to {}", path.display());
        files.html = Some(path);
    }
    if targets.svg {
        let path = config.svg_path();
        write_file(&path, &svg::render_svg(graph, &config.output.title)?)?;
        info!("Static visualization saved to {}", path.display());
        files.svg = Some(path);
    }
    Ok(files)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// Escape text for XML/HTML bodies and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First `max` characters followed by `...`.
pub(crate) fn ellipsize(text: &str, max: usize) -> String {
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}

/// Group digits in threes: `1234567` → `1,234,567`.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn escape_xml_specials() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn ellipsize_counts_chars() {
        assert_eq!(ellipsize("Geometric shapes", 3), "Geo...");
        assert_eq!(ellipsize("é motif", 1), "é...");
        assert_eq!(ellipsize("ab", 20), "ab...");
    }

    #[test]
    fn empty_graph_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::minimal();
        config.output.dir = tmp.path().join("out");
        let files = write_outputs(&CategoryGraph::new(), &config, RenderTargets::default()).unwrap();
        assert_eq!(files, RenderedFiles::default());
        assert!(!config.output.dir.exists());
    }
}

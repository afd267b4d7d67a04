//! Self-contained interactive HTML view.
//!
//! The page embeds an SVG drawing of the graph; every node and edge carries a
//! `<title>` so browsers show the statistics on hover, and hovered elements are
//! highlighted with CSS. The graph itself is embedded as JSON for tooling.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use super::{ellipsize, escape_xml, format_number};
use crate::graph::{CategoryEdge, CategoryGraph, CategoryNode, EdgeKind};
use crate::layout::{circular_pull_layout, palette};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 800.0;
const LABEL_CHARS: usize = 20;

#[derive(Serialize)]
struct EmbeddedGraph<'a> {
    nodes: Vec<&'a CategoryNode>,
    edges: &'a [CategoryEdge],
}

/// Node radius from total likes, clamped to `[10, 50]`.
pub fn node_radius(total_likes: u64) -> f64 {
    (total_likes as f64 / 100.0).clamp(10.0, 50.0)
}

/// Stroke width, color, and hover text for an edge.
pub fn edge_style(edge: &CategoryEdge) -> (f64, &'static str, String) {
    let width = (edge.weight * 2.0).clamp(1.0, 10.0);
    match &edge.kind {
        EdgeKind::Shared { posts } => {
            let list: Vec<String> = posts.iter().map(|p| p.to_string()).collect();
            (
                width,
                "darkblue",
                format!("Shared posts: {} (Posts: {})", posts.len(), list.join(", ")),
            )
        }
        EdgeKind::Similarity { score } => (
            (width * 0.5).max(1.0),
            "lightgray",
            format!(
                "Similarity connection (engagement pattern similarity: {:.2})",
                score
            ),
        ),
    }
}

/// Hover text for a node.
pub fn node_tooltip(node: &CategoryNode) -> String {
    let s = &node.summary;
    format!(
        "{}\nPosts: {}\nTotal Likes: {}\nAvg Likes: {:.1}\nTotal Hashtags: {}\nAvg Hashtags: {:.1}",
        node.label,
        s.post_count,
        format_number(s.total_likes),
        s.avg_likes,
        s.total_hashtags,
        s.avg_hashtags
    )
}

fn to_canvas((x, y): (f64, f64)) -> (f64, f64) {
    (WIDTH / 2.0 + x * WIDTH * 0.38, HEIGHT / 2.0 + y * HEIGHT * 0.4)
}

pub fn render_html(graph: &CategoryGraph, title: &str) -> Result<String> {
    let layout = circular_pull_layout(graph);
    let colors = palette(graph.node_count());
    let title = escape_xml(title);

    let mut body = String::new();
    writeln!(body, "<g class=\"edges\">")?;
    for edge in graph.edges() {
        let (x1, y1) = to_canvas(layout[&edge.source]);
        let (x2, y2) = to_canvas(layout[&edge.target]);
        let (width, color, hover) = edge_style(edge);
        let class = if edge.is_shared() { "shared" } else { "similarity" };
        writeln!(
            body,
            "  <line class=\"edge {class}\" x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" \
             stroke=\"{color}\" stroke-width=\"{width:.1}\"><title>{}</title></line>",
            escape_xml(&hover)
        )?;
    }
    writeln!(body, "</g>")?;

    writeln!(body, "<g class=\"nodes\">")?;
    for (i, node) in graph.nodes().enumerate() {
        let (cx, cy) = to_canvas(layout[&node.id]);
        let r = node_radius(node.summary.total_likes);
        let label = format!("{}: {}", node.id, ellipsize(&node.label, LABEL_CHARS));
        writeln!(
            body,
            "  <g class=\"node\" data-id=\"{}\"><title>{}</title>\
             <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{r:.1}\" fill=\"{}\"/>\
             <text x=\"{cx:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text></g>",
            node.id,
            escape_xml(&node_tooltip(node)),
            colors[i % colors.len()],
            cy + r + 14.0,
            escape_xml(&label)
        )?;
    }
    writeln!(body, "</g>")?;

    let data = serde_json::to_string(&EmbeddedGraph {
        nodes: graph.nodes().collect(),
        edges: graph.edges(),
    })?
    .replace('<', "\\u003c");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ margin: 0; font-family: sans-serif; background: #ffffff; color: black; }}
  h1 {{ font-size: 18px; margin: 12px 16px; }}
  #network {{ width: 100%; height: 800px; }}
  .node circle {{ stroke: #333333; stroke-width: 1; opacity: 0.9; cursor: pointer; }}
  .node:hover circle {{ stroke: #000000; stroke-width: 3; opacity: 1; }}
  .node text {{ font-size: 12px; pointer-events: none; }}
  .edge {{ stroke-linecap: round; opacity: 0.7; }}
  .edge:hover {{ opacity: 1; }}
</style>
</head>
<body>
<h1>{title}</h1>
<svg id="network" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}">
{body}</svg>
<script type="application/json" id="graph-data">{data}</script>
</body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CategorySummary;

    fn node(id: u32, label: &str, total_likes: u64) -> CategoryNode {
        CategoryNode {
            id,
            label: label.to_string(),
            summary: CategorySummary {
                post_count: 2,
                total_likes,
                avg_likes: total_likes as f64 / 2.0,
                total_hashtags: 8,
                avg_hashtags: 4.0,
            },
            posts: vec![1, 2],
        }
    }

    fn sample() -> CategoryGraph {
        let mut g = CategoryGraph::new();
        g.add_node(node(1, "Floral <prints>", 150));
        g.add_node(node(2, "A very long geometric pattern name", 12_000));
        g.add_node(node(3, "Checks", 140));
        g.add_edge(CategoryEdge {
            source: 1,
            target: 2,
            weight: 2.0,
            kind: EdgeKind::Shared { posts: vec![1, 2] },
        });
        g.add_edge(CategoryEdge {
            source: 1,
            target: 3,
            weight: 0.5,
            kind: EdgeKind::Similarity { score: 0.9333 },
        });
        g
    }

    #[test]
    fn radius_is_clamped() {
        assert_eq!(node_radius(0), 10.0);
        assert_eq!(node_radius(2_500), 25.0);
        assert_eq!(node_radius(1_000_000), 50.0);
    }

    #[test]
    fn edge_styles_by_kind() {
        let g = sample();
        let (w, color, hover) = edge_style(&g.edges()[0]);
        assert_eq!((w, color), (4.0, "darkblue"));
        assert_eq!(hover, "Shared posts: 2 (Posts: 1, 2)");

        let (w, color, hover) = edge_style(&g.edges()[1]);
        assert_eq!((w, color), (1.0, "lightgray"));
        assert!(hover.ends_with("similarity: 0.93)"));
    }

    #[test]
    fn tooltip_formats_statistics() {
        let text = node_tooltip(&node(2, "Geo", 12_000));
        assert_eq!(
            text,
            "Geo\nPosts: 2\nTotal Likes: 12,000\nAvg Likes: 6000.0\nTotal Hashtags: 8\nAvg Hashtags: 4.0"
        );
    }

    #[test]
    fn page_is_self_contained_and_escaped() {
        let html = render_html(&sample(), "Spring & Summer").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Spring &amp; Summer</title>"));
        assert!(html.contains("1: Floral &lt;prints&gt;..."));
        assert!(html.contains("2: A very long geometri..."));
        assert!(html.contains("class=\"edge shared\""));
        assert!(html.contains("class=\"edge similarity\""));
        assert!(html.contains("id=\"graph-data\""));
        assert!(!html.contains("<script src"));
        assert!(!html.contains("<prints>"));
    }
}

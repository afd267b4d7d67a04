//! Static SVG figure with an on-image legend.

use anyhow::Result;
use std::fmt::Write;

use super::{ellipsize, escape_xml};
use crate::graph::{CategoryGraph, CategoryNode};
use crate::layout::{blue_ramp, circular_pull_layout};

const WIDTH: f64 = 1400.0;
const HEIGHT: f64 = 1000.0;
/// Height of the plot area; the legend sits below it.
const PLOT_HEIGHT: f64 = 750.0;
const LEGEND_LINE: f64 = 14.0;
const LABEL_CHARS: usize = 12;

/// Marker area from total likes, clamped to `[300, 2000]`.
pub fn marker_area(total_likes: u64) -> f64 {
    (total_likes as f64 / 5.0).clamp(300.0, 2000.0)
}

/// Fill color: darker blue for categories with more posts, saturating at 20.
pub fn node_fill(post_count: usize) -> String {
    let intensity = (post_count as f64 / 20.0).min(1.0);
    blue_ramp(0.3 + 0.7 * intensity)
}

pub fn legend_line(node: &CategoryNode) -> String {
    format!(
        "Cluster {}: {} ({} posts, {} likes)",
        node.id, node.label, node.summary.post_count, node.summary.total_likes
    )
}

fn to_canvas((x, y): (f64, f64)) -> (f64, f64) {
    (
        WIDTH / 2.0 + x * WIDTH * 0.36,
        90.0 + (PLOT_HEIGHT - 90.0) / 2.0 + y * (PLOT_HEIGHT - 140.0) / 2.0,
    )
}

pub fn render_svg(graph: &CategoryGraph, title: &str) -> Result<String> {
    let layout = circular_pull_layout(graph);
    let mut out = String::new();

    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">"
    )?;
    writeln!(out, "<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>")?;
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"40\" font-size=\"20\" text-anchor=\"middle\">{}</text>",
        WIDTH / 2.0,
        escape_xml(title)
    )?;
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"64\" font-size=\"14\" text-anchor=\"middle\">\
         (Node size = total likes, Color intensity = post count)</text>",
        WIDTH / 2.0
    )?;

    for edge in graph.edges() {
        let (x1, y1) = to_canvas(layout[&edge.source]);
        let (x2, y2) = to_canvas(layout[&edge.target]);
        let width = (edge.weight * 2.0).clamp(1.0, 8.0);
        let color = if edge.is_shared() { "darkblue" } else { "lightgray" };
        writeln!(
            out,
            "<line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" \
             stroke=\"{color}\" stroke-width=\"{width:.1}\" stroke-opacity=\"0.6\"/>"
        )?;
    }

    for node in graph.nodes() {
        let (cx, cy) = to_canvas(layout[&node.id]);
        let r = marker_area(node.summary.total_likes).sqrt() / 2.0;
        writeln!(
            out,
            "<circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{r:.1}\" fill=\"{}\" fill-opacity=\"0.8\" \
             stroke=\"#08306b\" stroke-width=\"2\"/>",
            node_fill(node.summary.post_count)
        )?;
        let lines = [
            node.id.to_string(),
            ellipsize(&node.label, LABEL_CHARS),
            format!("({} posts)", node.summary.post_count),
        ];
        write!(
            out,
            "<text x=\"{cx:.1}\" y=\"{:.1}\" font-size=\"9\" font-weight=\"bold\" text-anchor=\"middle\">",
            cy - 11.0
        )?;
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { 11.0 };
            write!(
                out,
                "<tspan x=\"{cx:.1}\" dy=\"{dy}\">{}</tspan>",
                escape_xml(line)
            )?;
        }
        writeln!(out, "</text>")?;
    }

    let mut legend: Vec<&CategoryNode> = graph.nodes().collect();
    legend.sort_by_key(|n| n.id);
    let top = HEIGHT - 20.0 - LEGEND_LINE * legend.len().saturating_sub(1) as f64;
    writeln!(out, "<g class=\"legend\" font-size=\"8\">")?;
    for (i, node) in legend.iter().enumerate() {
        writeln!(
            out,
            "<text x=\"28\" y=\"{:.1}\">{}</text>",
            top + LEGEND_LINE * i as f64,
            escape_xml(&legend_line(node))
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CategorySummary;

    fn node(id: u32, label: &str, posts: usize, total_likes: u64) -> CategoryNode {
        CategoryNode {
            id,
            label: label.to_string(),
            summary: CategorySummary {
                post_count: posts,
                total_likes,
                avg_likes: total_likes as f64 / posts as f64,
                total_hashtags: 0,
                avg_hashtags: 0.0,
            },
            posts: (1..=posts as u64).collect(),
        }
    }

    #[test]
    fn marker_area_clamps() {
        assert_eq!(marker_area(0), 300.0);
        assert_eq!(marker_area(5_000), 1000.0);
        assert_eq!(marker_area(50_000), 2000.0);
    }

    #[test]
    fn fill_saturates_at_twenty_posts() {
        assert_eq!(node_fill(20), node_fill(200));
        assert_ne!(node_fill(1), node_fill(20));
    }

    #[test]
    fn legend_lists_every_category_by_id() {
        let mut g = CategoryGraph::new();
        g.add_node(node(3, "Checks", 1, 10));
        g.add_node(node(1, "Floral & lace", 2, 150));
        let svg = render_svg(&g, "Network").unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        let first = svg.find("Cluster 1: Floral &amp; lace (2 posts, 150 likes)").unwrap();
        let second = svg.find("Cluster 3: Checks (1 posts, 10 likes)").unwrap();
        assert!(first < second);
        assert!(svg.contains("Floral &amp; lac..."));
        assert_eq!(svg.matches("<circle").count(), 2);
    }
}

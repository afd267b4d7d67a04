//! Graph statistics report.
//!
//! Gives a quick summary of what the pipeline built: node and edge counts,
//! connectivity, and a per-category breakdown. Used by `pnet stats` and at the
//! end of `pnet build`.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::graph::CategoryGraph;
use crate::pipeline::run_pipeline;
use crate::render::format_number;

/// Run the stats command: build the graph and print the report.
pub fn run_stats(config: &Config, csv_path: &Path) -> Result<()> {
    let output = run_pipeline(csv_path, config)?;
    print!("{}", format_graph_statistics(&output.graph));
    Ok(())
}

/// Render the statistics report as text.
pub fn format_graph_statistics(graph: &CategoryGraph) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line("Pattern Network — Graph Statistics".to_string());
    line("==================================".to_string());
    line(String::new());
    line(format!("  Nodes (clusters):  {}", graph.node_count()));
    line(format!(
        "  Edges:             {} ({} shared, {} similarity)",
        graph.edge_count(),
        graph.shared_edge_count(),
        graph.similarity_edge_count()
    ));
    line(format!("  Connected:         {}", graph.is_connected()));
    line(format!("  Components:        {}", graph.components().len()));
    if graph.node_count() > 0 {
        line(format!("  Average degree:    {:.2}", graph.average_degree()));
    }

    if graph.node_count() > 0 {
        line(String::new());
        line("  Cluster details:".to_string());
        line(format!(
            "  {:<4} {:<32} {:>6} {:>12} {:>10} {:>7}",
            "ID", "LABEL", "POSTS", "TOTAL LIKES", "AVG LIKES", "DEGREE"
        ));
        line(format!("  {}", "-".repeat(76)));

        let mut nodes: Vec<_> = graph.nodes().collect();
        nodes.sort_by_key(|n| n.id);
        for node in nodes {
            line(format!(
                "  {:<4} {:<32} {:>6} {:>12} {:>10.1} {:>7}",
                node.id,
                truncate(&node.label, 32),
                node.summary.post_count,
                format_number(node.summary.total_likes),
                node.summary.avg_likes,
                graph.degree(node.id)
            ));
        }
    }
    line(String::new());
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CategorySummary;
    use crate::graph::{CategoryEdge, CategoryNode, EdgeKind};

    fn node(id: u32, label: &str, total_likes: u64) -> CategoryNode {
        CategoryNode {
            id,
            label: label.to_string(),
            summary: CategorySummary {
                post_count: 1,
                total_likes,
                avg_likes: total_likes as f64,
                total_hashtags: 0,
                avg_hashtags: 0.0,
            },
            posts: vec![id as u64],
        }
    }

    #[test]
    fn report_counts_and_details() {
        let mut g = CategoryGraph::new();
        g.add_node(node(2, "Geometric", 1500));
        g.add_node(node(1, "Floral", 100));
        g.add_node(node(3, "Solo", 5));
        g.add_edge(CategoryEdge {
            source: 2,
            target: 1,
            weight: 0.5,
            kind: EdgeKind::Similarity { score: 0.8 },
        });

        let report = format_graph_statistics(&g);
        assert!(report.contains("Nodes (clusters):  3"));
        assert!(report.contains("Edges:             1 (0 shared, 1 similarity)"));
        assert!(report.contains("Connected:         false"));
        assert!(report.contains("Components:        2"));
        assert!(report.contains("Average degree:    0.67"));
        assert!(report.contains("1,500"));
        let floral = report.find("Floral").unwrap();
        let geometric = report.find("Geometric").unwrap();
        assert!(floral < geometric, "details are sorted by id");
    }

    #[test]
    fn empty_graph_report_has_no_details() {
        let report = format_graph_statistics(&CategoryGraph::new());
        assert!(report.contains("Nodes (clusters):  0"));
        assert!(report.contains("Connected:         true"));
        assert!(!report.contains("Cluster details"));
    }

    #[test]
    fn truncate_long_labels() {
        assert_eq!(truncate("short", 32), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}

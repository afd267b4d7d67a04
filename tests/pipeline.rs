use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use pattern_network::config::Config;
use pattern_network::graph::{engagement_similarity, EdgeKind};
use pattern_network::pipeline::{run_pipeline, PipelineOutput};

const HEADER: &str = "post number,caption,url,likes,number of hashtags,types of patterns,taxonomy\n";

fn write_csv(dir: &TempDir, rows: &str) -> PathBuf {
    let path = dir.path().join("posts.csv");
    fs::write(&path, format!("{}{}", HEADER, rows)).unwrap();
    path
}

fn run(rows: &str) -> PipelineOutput {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, rows);
    run_pipeline(&path, &Config::minimal()).unwrap()
}

#[test]
fn three_post_scenario() {
    let out = run("1,a,u1,100,5,\"1,2\",\"1. - Floral\n2. - Geometric\n3. - Stripes\"\n\
                   2,b,u2,50,3,2,\n\
                   3,c,u3,10,1,3,\n");
    let graph = &out.graph;

    let ids: Vec<u32> = graph.nodes().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let edge = graph.edge_between(1, 2).unwrap();
    assert_eq!(edge.weight, 1.0);
    assert_eq!(edge.kind, EdgeKind::Shared { posts: vec![1] });

    // Averages 100, 75 and 10: (1,3) = 0.1 and (2,3) ≈ 0.133, both under 0.7.
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.is_connected());
    assert_eq!(graph.components().len(), 2);

    assert_eq!(out.summaries[&2].avg_likes, 75.0);
    assert_eq!(out.summaries[&1].total_hashtags, 5);
}

#[test]
fn repair_links_similar_components() {
    let out = run("1,a,u,100,1,1,\"1. - A\n2. - B\n3. - C\"\n\
                   2,b,u,90,1,2,\n\
                   3,c,u,5,1,3,\n");
    let graph = &out.graph;

    let edge = graph.edge_between(1, 2).unwrap();
    assert!(!edge.is_shared());
    assert_eq!(edge.weight, 0.5);
    match edge.kind {
        EdgeKind::Similarity { score } => assert!((score - 0.9).abs() < 1e-9),
        _ => panic!("expected a similarity edge"),
    }
    assert!(!graph.has_edge(1, 3));
    assert!(!graph.has_edge(2, 3));
}

#[test]
fn malformed_likes_row_is_skipped() {
    let out = run("1,a,u,100,5,1,\"1. - A\n2. - B\"\n\
                   2,b,u,n/a,3,2,\n\
                   3,c,u,40,2,\"1,2\",\n");
    assert_eq!(out.ingested.rows_skipped(), 1);
    assert_eq!(out.summaries[&1].post_count, 2);
    assert_eq!(out.summaries[&2].post_count, 1);
    assert!(out.graph.is_connected());
}

#[test]
fn two_runs_produce_identical_graphs() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(
        &tmp,
        "1,a,u,100,5,\"1,2,3\",\"1. - A\n2. - B\n3. - C\n4. - D\"\n\
         2,b,u,80,3,\"2,4\",\n\
         3,c,u,10,1,3,\n",
    );
    let config = Config::minimal();

    let first = run_pipeline(&path, &config).unwrap();
    let second = run_pipeline(&path, &config).unwrap();
    assert_eq!(first.graph, second.graph);
    assert_eq!(first.summaries, second.summaries);
    assert_eq!(first.ingested.source_sha256, second.ingested.source_sha256);
}

#[test]
fn graph_properties_hold() {
    let out = run("1,a,u,300,5,\"1,2\",\"1. - A\n2. - B\n3. - C\n4. - D\n5. - E\"\n\
                   2,b,u,120,3,\"2,3\",\n\
                   3,c,u,40,1,\"1,3\",\n\
                   4,d,u,10,2,4,\n\
                   5,e,u,15,2,9,\n");
    let graph = &out.graph;
    let taxonomy = &out.ingested.taxonomy;

    for node in graph.nodes() {
        assert!(taxonomy.contains(node.id));
        assert!(node.summary.post_count >= 1);
    }
    assert!(graph.node(9).is_none(), "category 9 has no taxonomy entry");

    let nodes: Vec<_> = graph.nodes().collect();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let shared: Vec<u64> = a
                .posts
                .iter()
                .filter(|p| b.posts.contains(p))
                .copied()
                .collect();
            if shared.is_empty() {
                continue;
            }
            let edge = graph
                .edge_between(a.id, b.id)
                .unwrap_or_else(|| panic!("missing edge {}-{}", a.id, b.id));
            assert_eq!(edge.weight, shared.len() as f64);
            assert_eq!(edge.kind, EdgeKind::Shared { posts: shared });
        }
    }

    for edge in graph.edges() {
        assert_ne!(edge.source, edge.target);
        if let EdgeKind::Similarity { score } = edge.kind {
            assert!(score >= 0.7);
        }
    }
}

#[test]
fn similarity_boundaries() {
    assert_eq!(engagement_similarity(0.0, 0.0), 1.0);
    assert!((engagement_similarity(100.0, 1000.0) - 0.1).abs() < 1e-9);
    assert_eq!(engagement_similarity(42.0, 42.0), 1.0);
}

#[test]
fn huge_like_counts_do_not_overflow() {
    let max = u64::MAX;
    let out = run(&format!(
        "1,a,u,{max},1,1,\"1. - A\"\n\
         2,b,u,{max},1,1,\n"
    ));
    let summary = &out.summaries[&1];
    assert_eq!(summary.post_count, 2);
    assert_eq!(summary.total_likes, u64::MAX);
    assert_eq!(out.graph.node_count(), 1);
}

#[test]
fn missing_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = run_pipeline(&tmp.path().join("absent.csv"), &Config::minimal()).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

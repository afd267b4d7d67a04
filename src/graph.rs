//! Category co-occurrence graph.
//!
//! Nodes are taxonomy categories with at least one post. Two categories are
//! joined by a *shared* edge when some post belongs to both, weighted by the
//! number of such posts. When those edges leave the graph in more than one
//! piece, a single repair pass joins categories whose average likes are close
//! with fixed-weight *similarity* edges.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

use crate::aggregate::CategorySummary;
use crate::components;
use crate::config::GraphConfig;
use crate::models::{CategoryAccumulator, CategoryId, PostId};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub label: String,
    #[serde(flatten)]
    pub summary: CategorySummary,
    pub posts: Vec<PostId>,
}

/// Edge payload. An edge is either shared or similarity, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeKind {
    /// Posts belonging to both categories, ascending.
    Shared { posts: Vec<PostId> },
    /// Engagement similarity score in `(threshold, 1]`.
    Similarity { score: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEdge {
    pub source: CategoryId,
    pub target: CategoryId,
    pub weight: f64,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

impl CategoryEdge {
    pub fn is_shared(&self) -> bool {
        matches!(self.kind, EdgeKind::Shared { .. })
    }
}

/// Undirected graph with at most one edge per node pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGraph {
    nodes: IndexMap<CategoryId, CategoryNode>,
    edges: Vec<CategoryEdge>,
    pairs: HashSet<(CategoryId, CategoryId)>,
}

fn pair_key(a: CategoryId, b: CategoryId) -> (CategoryId, CategoryId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// `1 - |a - b| / max(a, b, 1)`.
pub fn engagement_similarity(avg_a: f64, avg_b: f64) -> f64 {
    let max_avg = avg_a.max(avg_b).max(1.0);
    1.0 - (avg_a - avg_b).abs() / max_avg
}

impl CategoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. An existing node with the same id is replaced.
    pub fn add_node(&mut self, node: CategoryNode) {
        self.nodes.insert(node.id, node);
    }

    /// Add an edge unless it is a self-loop, an endpoint is missing, or the
    /// pair is already joined. Returns whether the edge was added.
    pub fn add_edge(&mut self, edge: CategoryEdge) -> bool {
        if edge.source == edge.target
            || !self.nodes.contains_key(&edge.source)
            || !self.nodes.contains_key(&edge.target)
        {
            return false;
        }
        if !self.pairs.insert(pair_key(edge.source, edge.target)) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn node(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    /// Nodes in creation (taxonomy) order.
    pub fn nodes(&self) -> impl Iterator<Item = &CategoryNode> {
        self.nodes.values()
    }

    /// Edges in insertion order: shared edges first, then similarity edges.
    pub fn edges(&self) -> &[CategoryEdge] {
        &self.edges
    }

    pub fn edge_between(&self, a: CategoryId, b: CategoryId) -> Option<&CategoryEdge> {
        if !self.has_edge(a, b) {
            return None;
        }
        self.edges
            .iter()
            .find(|e| pair_key(e.source, e.target) == pair_key(a, b))
    }

    pub fn has_edge(&self, a: CategoryId, b: CategoryId) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn shared_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_shared()).count()
    }

    pub fn similarity_edge_count(&self) -> usize {
        self.edge_count() - self.shared_edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn degree(&self, id: CategoryId) -> usize {
        self.edges
            .iter()
            .filter(|e| e.source == id || e.target == id)
            .count()
    }

    /// Mean node degree, `2 * edges / nodes`.
    pub fn average_degree(&self) -> f64 {
        if self.nodes.is_empty() {
            0.0
        } else {
            2.0 * self.edges.len() as f64 / self.nodes.len() as f64
        }
    }

    fn index_edges(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter_map(|e| {
                Some((
                    self.nodes.get_index_of(&e.source)?,
                    self.nodes.get_index_of(&e.target)?,
                ))
            })
            .collect()
    }

    /// Connected components as category ids, in node order.
    pub fn components(&self) -> Vec<Vec<CategoryId>> {
        let ids: Vec<CategoryId> = self.nodes.keys().copied().collect();
        components::connected_components(ids.len(), self.index_edges())
            .into_iter()
            .map(|comp| comp.into_iter().map(|i| ids[i]).collect())
            .collect()
    }

    /// Single-component test; an empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        components::is_connected(self.nodes.len(), self.index_edges())
    }

    /// Join engagement-similar categories when the graph is disconnected.
    ///
    /// Does nothing for graphs with fewer than two nodes or a single
    /// component. Otherwise visits every unjoined pair once and adds a
    /// similarity edge of `weight` where the similarity exceeds `threshold`.
    /// Connectivity is not re-checked afterwards. Returns the edges added.
    pub fn repair_connectivity(&mut self, threshold: f64, weight: f64) -> usize {
        if self.nodes.len() <= 1 || self.is_connected() {
            return 0;
        }
        info!("Graph is disconnected. Adding similarity edges based on engagement patterns...");

        let ids: Vec<CategoryId> = self.nodes.keys().copied().collect();
        let mut added = 0;
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if self.has_edge(a, b) {
                    continue;
                }
                let similarity = engagement_similarity(
                    self.nodes[&a].summary.avg_likes,
                    self.nodes[&b].summary.avg_likes,
                );
                if similarity > threshold {
                    self.add_edge(CategoryEdge {
                        source: a,
                        target: b,
                        weight,
                        kind: EdgeKind::Similarity { score: similarity },
                    });
                    added += 1;
                    debug!("Added similarity edge {}-{}: similarity={:.2}", a, b, similarity);
                }
            }
        }
        added
    }
}

/// Build the category graph from ingested data.
pub fn build_graph(
    taxonomy: &Taxonomy,
    accumulators: &IndexMap<CategoryId, CategoryAccumulator>,
    summaries: &IndexMap<CategoryId, CategorySummary>,
    config: &GraphConfig,
) -> CategoryGraph {
    let mut graph = CategoryGraph::new();
    info!(
        "Building graph with {} taxonomy categories...",
        taxonomy.len()
    );

    for (id, name) in taxonomy.iter() {
        match (accumulators.get(&id), summaries.get(&id)) {
            (Some(acc), Some(summary)) if !acc.is_empty() => {
                debug!("Added node {}: {} ({} posts)", id, name, acc.len());
                graph.add_node(CategoryNode {
                    id,
                    label: name.to_string(),
                    summary: summary.clone(),
                    posts: acc.posts.clone(),
                });
            }
            _ => debug!("Skipping cluster {}: {} (no posts)", id, name),
        }
    }
    for id in accumulators.keys().filter(|id| !taxonomy.contains(**id)) {
        warn!("Cluster {} has posts but no taxonomy entry; skipping", id);
    }
    info!("Total nodes added: {}", graph.node_count());

    add_shared_edges(&mut graph);

    if config.repair_disconnected {
        graph.repair_connectivity(config.similarity_threshold, config.similarity_weight);
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        similarity_edges = graph.similarity_edge_count(),
        connected = graph.is_connected(),
        "Graph built"
    );
    graph
}

fn add_shared_edges(graph: &mut CategoryGraph) {
    let members: Vec<(CategoryId, BTreeSet<PostId>)> = graph
        .nodes()
        .map(|n| (n.id, n.posts.iter().copied().collect()))
        .collect();

    for (i, (a, posts_a)) in members.iter().enumerate() {
        for (b, posts_b) in &members[i + 1..] {
            let shared: Vec<PostId> = posts_a.intersection(posts_b).copied().collect();
            if shared.is_empty() {
                continue;
            }
            let weight = shared.len() as f64;
            debug!("Added edge {}-{}: {} shared posts", a, b, shared.len());
            graph.add_edge(CategoryEdge {
                source: *a,
                target: *b,
                weight,
                kind: EdgeKind::Shared { posts: shared },
            });
        }
    }
}

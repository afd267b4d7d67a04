//! Connected components over the undirected category graph.

/// Union-Find with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]);
        }
        self.parent[i]
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Group node indices `0..node_count` into components.
///
/// Components are ordered by their lowest member index, and members are
/// ascending, so the result is deterministic.
pub fn connected_components(
    node_count: usize,
    edges: impl IntoIterator<Item = (usize, usize)>,
) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(node_count);
    for (a, b) in edges {
        uf.union(a, b);
    }

    let mut root_slot: Vec<Option<usize>> = vec![None; node_count];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for i in 0..node_count {
        let root = uf.find(i);
        match root_slot[root] {
            Some(slot) => components[slot].push(i),
            None => {
                root_slot[root] = Some(components.len());
                components.push(vec![i]);
            }
        }
    }
    components
}

/// True when the graph forms a single component. Empty graphs count as connected.
pub fn is_connected(node_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> bool {
    connected_components(node_count, edges).len() <= 1
}

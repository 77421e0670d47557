//! Same-day clustering of active districts.
//!
//! The topology never changes during a run, only which districts are active
//! on a given day. Components are recomputed over the induced subgraph for
//! every day of every evaluation.

/// Union-find with path halving and union by size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut root_a, mut root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }
}

/// Active districts of one day, split into connected components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayClusters {
    /// Each component lists district indices in ascending order.
    pub components: Vec<Vec<usize>>,
    /// Edges of the induced subgraph.
    pub edge_count: usize,
}

/// Partitions the districts flagged in `active` into connected components of
/// the subgraph induced by `adjacency`.
///
/// `adjacency[i]` holds the neighbor indices of district `i` and must be
/// symmetric.
pub fn cluster_active(active: &[bool], adjacency: &[Vec<usize>]) -> DayClusters {
    let mut sets = DisjointSet::new(active.len());
    let mut edge_count = 0;

    for (node, neighbors) in adjacency.iter().enumerate() {
        if !active[node] {
            continue;
        }
        for &neighbor in neighbors {
            // Each undirected edge appears twice; count it from the lower end.
            if neighbor > node && active[neighbor] {
                edge_count += 1;
                sets.union(node, neighbor);
            }
        }
    }

    let mut slot_of_root = vec![usize::MAX; active.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for node in (0..active.len()).filter(|&node| active[node]) {
        let root = sets.find(node);
        if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = components.len();
            components.push(Vec::new());
        }
        components[slot_of_root[root]].push(node);
    }

    DayClusters {
        components,
        edge_count,
    }
}

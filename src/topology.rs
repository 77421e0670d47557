//! Static adjacency between districts.
//!
//! Loaded once per run and shared read-only by every evaluation.

use std::collections::HashMap;

use crate::error::InputError;
use crate::traits::{AdjacencyProvider, Id};

/// Undirected neighbor relation, stored as a symmetric adjacency list.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology<I: Id> {
    adjacency: HashMap<I, Vec<I>>,
}

impl<I: Id> Default for Topology<I> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<I: Id> Topology<I> {
    /// Builds a topology from an adjacency map, rejecting self-loops and
    /// entries that are not mirrored by the neighbor.
    pub fn from_adjacency(adjacency: HashMap<I, Vec<I>>) -> Result<Self, InputError> {
        for (node, neighbors) in &adjacency {
            for neighbor in neighbors {
                if neighbor == node {
                    return Err(InputError::SelfLoop(node.to_string()));
                }
                let mirrored = adjacency
                    .get(neighbor)
                    .is_some_and(|back| back.contains(node));
                if !mirrored {
                    return Err(InputError::AsymmetricAdjacency {
                        from: node.to_string(),
                        to: neighbor.to_string(),
                    });
                }
            }
        }

        let adjacency = adjacency
            .into_iter()
            .map(|(node, mut neighbors)| {
                dedupe(&mut neighbors);
                (node, neighbors)
            })
            .collect();

        Ok(Self { adjacency })
    }

    /// Builds a symmetric topology from undirected pairs.
    pub fn from_edges<E>(edges: E) -> Result<Self, InputError>
    where
        E: IntoIterator<Item = (I, I)>,
    {
        let mut topology = Self::default();
        for (a, b) in edges {
            topology.add_edge(a, b)?;
        }
        Ok(topology)
    }

    /// Adds an undirected edge. Duplicate edges are ignored.
    pub fn add_edge(&mut self, a: I, b: I) -> Result<(), InputError> {
        if a == b {
            return Err(InputError::SelfLoop(a.to_string()));
        }
        self.insert_edge(a, b);
        Ok(())
    }

    fn insert_edge(&mut self, a: I, b: I) {
        let forward = self.adjacency.entry(a.clone()).or_default();
        if !forward.contains(&b) {
            forward.push(b.clone());
        }
        let backward = self.adjacency.entry(b).or_default();
        if !backward.contains(&a) {
            backward.push(a);
        }
    }

    pub fn are_adjacent(&self, a: &I, b: &I) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    pub fn contains(&self, id: &I) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }
}

impl Topology<String> {
    /// The twelve Manhattan sanitation districts, MN01 through MN12.
    pub fn manhattan() -> Self {
        const EDGES: &[(&str, &str)] = &[
            ("MN01", "MN02"),
            ("MN01", "MN03"),
            ("MN02", "MN03"),
            ("MN02", "MN04"),
            ("MN03", "MN06"),
            ("MN04", "MN05"),
            ("MN04", "MN07"),
            ("MN05", "MN06"),
            ("MN05", "MN07"),
            ("MN06", "MN08"),
            ("MN07", "MN08"),
            ("MN07", "MN09"),
            ("MN08", "MN11"),
            ("MN09", "MN10"),
            ("MN09", "MN12"),
            ("MN10", "MN11"),
            ("MN10", "MN12"),
            ("MN11", "MN12"),
        ];

        let mut topology = Self::default();
        for (a, b) in EDGES {
            topology.insert_edge(a.to_string(), b.to_string());
        }
        topology
    }
}

impl<I: Id> AdjacencyProvider for Topology<I> {
    type Id = I;

    fn neighbors(&self, id: &I) -> &[I] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn dedupe<I: Id>(items: &mut Vec<I>) {
    let mut unique = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    *items = unique;
}

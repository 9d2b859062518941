use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Bound shared by every vertex type the solver accepts.
///
/// Ordering pins the DFS restart policy: new trees always start from the
/// lowest unvisited vertex.
pub trait Vertex: Ord + Clone + fmt::Debug {}

impl<T: Ord + Clone + fmt::Debug> Vertex for T {}

/// Vertex ids used by the text formats and the interactive shell.
pub type VertexId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<V: fmt::Debug> {
    #[error("vertex {0:?} does not exist in this graph")]
    UnknownVertex(V),
}

/// Directed, unweighted graph stored as vertex -> set of out-neighbours.
///
/// Every vertex that was ever added, either directly or as the target of an
/// edge, has an entry. Self-loops and repeated edges collapse under set
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V> {
    adjacency: BTreeMap<V, BTreeSet<V>>,
}

pub(crate) type Successors<'g, V> =
    std::iter::Flatten<std::option::IntoIter<&'g BTreeSet<V>>>;

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, v: V) {
        self.adjacency.entry(v).or_default();
    }

    pub fn add_edges<I>(&mut self, v: V, destinations: I)
    where
        I: IntoIterator<Item = V>,
    {
        let mut targets = BTreeSet::new();
        for to in destinations {
            self.adjacency.entry(to.clone()).or_default();
            targets.insert(to);
        }
        self.adjacency.entry(v).or_default().extend(targets);
    }

    pub fn adjacent(&self, v: &V) -> Result<&BTreeSet<V>, GraphError<V>> {
        self.adjacency
            .get(v)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }

    pub fn contains(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    /// Returns the graph's own copy of `v`, if present.
    pub fn vertex(&self, v: &V) -> Option<&V> {
        self.adjacency.get_key_value(v).map(|(k, _)| k)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, V, BTreeSet<V>> {
        self.adjacency.iter()
    }

    pub fn vertices(&self) -> btree_map::Keys<'_, V, BTreeSet<V>> {
        self.adjacency.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|outs| outs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Reverses every edge. Vertices without edges are kept.
    pub fn transpose(&self) -> Self {
        let mut rev = Self::new();
        for (u, outs) in self.adjacency.iter() {
            rev.add_vertex(u.clone());
            for v in outs {
                rev.adjacency
                    .entry(v.clone())
                    .or_default()
                    .insert(u.clone());
            }
        }
        rev
    }

    /// Out-neighbours of `v`; empty when `v` is unknown.
    pub(crate) fn successors(&self, v: &V) -> Successors<'_, V> {
        self.adjacency.get(v).into_iter().flatten()
    }
}

impl<'g, V> IntoIterator for &'g Graph<V> {
    type Item = (&'g V, &'g BTreeSet<V>);
    type IntoIter = btree_map::Iter<'g, V, BTreeSet<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.adjacency.iter()
    }
}

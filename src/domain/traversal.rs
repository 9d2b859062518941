//! Three-color depth-first search shared by the topological sort and
//! Kosaraju's algorithm.
//!
//! The search runs on an explicit stack of `(vertex, successors)` frames, so
//! depth is bounded by heap memory rather than the call stack. Visitation and
//! finish order match the plain recursive formulation.

use crate::domain::graph::{Graph, Successors, Vertex};
use std::collections::BTreeMap;
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Unvisited,
    InProgress,
    Finished,
}

/// Per-run color bookkeeping. Vertices without an entry are unvisited.
#[derive(Debug, Clone)]
pub struct ColorMap<'g, V> {
    colors: BTreeMap<&'g V, Color>,
}

impl<'g, V: Vertex> ColorMap<'g, V> {
    pub fn new() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    pub fn get(&self, v: &V) -> Color {
        self.colors.get(v).copied().unwrap_or(Color::Unvisited)
    }

    pub fn set(&mut self, v: &'g V, color: Color) {
        self.colors.insert(v, color);
    }

    pub fn is_unvisited(&self, v: &V) -> bool {
        self.get(v) == Color::Unvisited
    }
}

impl<V: Vertex> Default for ColorMap<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Explores everything reachable from `start` that is still unvisited.
///
/// `on_back_edge(from, to)` fires for every edge into an in-progress vertex
/// and may break the whole search. `on_finish` receives vertices in finish
/// order. A broken search leaves the colors of the abandoned path as
/// `InProgress`.
pub fn visit<'g, V, B, F>(
    graph: &'g Graph<V>,
    start: &'g V,
    colors: &mut ColorMap<'g, V>,
    on_back_edge: &mut B,
    on_finish: &mut F,
) -> ControlFlow<()>
where
    V: Vertex,
    B: FnMut(&'g V, &'g V) -> ControlFlow<()>,
    F: FnMut(&'g V),
{
    if !colors.is_unvisited(start) {
        return ControlFlow::Continue(());
    }

    let mut stack: Vec<(&'g V, Successors<'g, V>)> = Vec::new();
    colors.set(start, Color::InProgress);
    stack.push((start, graph.successors(start)));

    while let Some(frame) = stack.last_mut() {
        let vertex = frame.0;
        let Some(next) = frame.1.next() else {
            stack.pop();
            colors.set(vertex, Color::Finished);
            on_finish(vertex);
            continue;
        };

        match colors.get(next) {
            Color::Unvisited => {
                colors.set(next, Color::InProgress);
                stack.push((next, graph.successors(next)));
            }
            Color::InProgress => on_back_edge(vertex, next)?,
            Color::Finished => {}
        }
    }

    ControlFlow::Continue(())
}

/// Runs [`visit`] from every vertex in ascending order, so each new DFS tree
/// starts at the lowest vertex not yet reached.
pub fn visit_all<'g, V, B, F>(
    graph: &'g Graph<V>,
    colors: &mut ColorMap<'g, V>,
    mut on_back_edge: B,
    mut on_finish: F,
) -> ControlFlow<()>
where
    V: Vertex,
    B: FnMut(&'g V, &'g V) -> ControlFlow<()>,
    F: FnMut(&'g V),
{
    for root in graph.vertices() {
        if colors.is_unvisited(root) {
            visit(graph, root, colors, &mut on_back_edge, &mut on_finish)?;
        }
    }
    ControlFlow::Continue(())
}

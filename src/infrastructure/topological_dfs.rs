use crate::domain::graph::{Graph, Vertex};
use crate::domain::model::TopologicalOutcome;
use crate::domain::traits::TopologicalSorter;
use crate::domain::traversal::{visit_all, ColorMap};
use std::ops::ControlFlow;

pub struct DfsTopologicalSorter;

impl<V: Vertex> TopologicalSorter<V> for DfsTopologicalSorter {
    fn sort(&self, graph: &Graph<V>) -> TopologicalOutcome<V> {
        topological_sort(graph)
    }
}

/// Linear-time three-color sort. Any back-edge anywhere aborts the whole
/// computation.
pub fn topological_sort<V: Vertex>(graph: &Graph<V>) -> TopologicalOutcome<V> {
    let mut colors = ColorMap::new();
    let mut finished: Vec<V> = Vec::with_capacity(graph.vertex_count());

    let flow = visit_all(
        graph,
        &mut colors,
        |_, _| ControlFlow::Break(()),
        |v| finished.push(v.clone()),
    );

    if flow.is_break() {
        return TopologicalOutcome::CycleDetected;
    }

    finished.reverse();
    TopologicalOutcome::Ordered(finished)
}

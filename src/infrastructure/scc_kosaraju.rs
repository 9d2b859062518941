use crate::domain::graph::{Graph, Vertex};
use crate::domain::model::SccResult;
use crate::domain::traits::SccDetector;
use crate::domain::traversal::{visit, visit_all, ColorMap};
use std::ops::ControlFlow;

pub struct KosarajuSccDetector;

impl<V: Vertex> SccDetector<V> for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph<V>) -> SccResult<V> {
        kosaraju_scc(graph)
    }
}

fn kosaraju_scc<V: Vertex>(graph: &Graph<V>) -> SccResult<V> {
    let order = finish_order(graph);
    let rev = graph.transpose();

    let mut colors = ColorMap::new();
    let mut components: Vec<Vec<V>> = Vec::new();

    for v in order.iter().rev() {
        let Some(start) = rev.vertex(v) else {
            continue;
        };
        if !colors.is_unvisited(start) {
            continue;
        }

        let mut comp: Vec<V> = Vec::new();
        let flow = visit(
            &rev,
            start,
            &mut colors,
            &mut |_, _| ControlFlow::Continue(()),
            &mut |x: &V| comp.push(x.clone()),
        );
        debug_assert!(flow.is_continue());

        comp.sort_unstable();
        components.push(comp);
    }

    let cyclic_component = components
        .iter()
        .map(|comp| match comp.as_slice() {
            [only] => graph
                .adjacent(only)
                .map(|outs| outs.contains(only))
                .unwrap_or(false),
            _ => true,
        })
        .collect();

    SccResult {
        components,
        cyclic_component,
    }
}

/// First pass: every vertex in DFS finish order.
fn finish_order<V: Vertex>(graph: &Graph<V>) -> Vec<&V> {
    let mut colors = ColorMap::new();
    let mut order: Vec<&V> = Vec::with_capacity(graph.vertex_count());
    let flow = visit_all(
        graph,
        &mut colors,
        |_, _| ControlFlow::Continue(()),
        |v| order.push(v),
    );
    debug_assert!(flow.is_continue());
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_order_covers_every_vertex_once() {
        let mut g = Graph::new();
        g.add_edges(1, vec![2]);
        g.add_edges(2, vec![1, 3]);
        g.add_vertex(4);

        let order: Vec<i64> = finish_order(&g).into_iter().copied().collect();
        assert_eq!(order, vec![3, 2, 1, 4]);
    }

    #[test]
    fn components_are_discovered_in_reverse_finish_order() {
        // 1 <-> 2 -> 3 <-> 4
        let mut g = Graph::new();
        g.add_edges(1, vec![2]);
        g.add_edges(2, vec![1, 3]);
        g.add_edges(3, vec![4]);
        g.add_edges(4, vec![3]);

        let scc = kosaraju_scc(&g);
        assert_eq!(scc.components, vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(scc.cyclic_component, vec![true, true]);
    }

    #[test]
    fn isolated_vertex_is_not_cyclic_but_self_loop_is() {
        let mut g = Graph::new();
        g.add_vertex(1);
        g.add_edges(2, vec![2]);

        let scc = kosaraju_scc(&g);
        assert_eq!(scc.components, vec![vec![2], vec![1]]);
        assert_eq!(scc.cyclic_component, vec![true, false]);
    }
}

use crate::domain::graph::{Graph, Vertex};
use crate::domain::model::{ResultEntry, TopologicalOutcome};
use crate::domain::traits::{SccDetector, TopologicalSorter};
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::infrastructure::topological_dfs::DfsTopologicalSorter;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solved<V> {
    pub entries: Vec<ResultEntry<V>>,
    /// False when the topological pass hit a back-edge, self-loops included.
    pub acyclic: bool,
    /// Components of two or more vertices plus self-looped singletons.
    pub cyclic_components: usize,
}

/// Topological order if `graph` is acyclic, otherwise its strongly connected
/// components.
pub fn solve<V: Vertex>(graph: &Graph<V>) -> Vec<ResultEntry<V>> {
    solve_classified(graph).entries
}

pub fn solve_classified<V: Vertex>(graph: &Graph<V>) -> Solved<V> {
    solve_with(graph, &DfsTopologicalSorter, &KosarajuSccDetector)
}

/// Tries `sorter` first and, on a cycle, retraverses the whole graph with
/// `scc`. The cycle signal never reaches the caller.
pub fn solve_with<V: Vertex>(
    graph: &Graph<V>,
    sorter: &dyn TopologicalSorter<V>,
    scc: &dyn SccDetector<V>,
) -> Solved<V> {
    match sorter.sort(graph) {
        TopologicalOutcome::Ordered(order) => Solved {
            entries: order.into_iter().map(ResultEntry::Vertex).collect(),
            acyclic: true,
            cyclic_components: 0,
        },
        TopologicalOutcome::CycleDetected => {
            let scc = scc.compute_scc(graph);
            Solved {
                cyclic_components: scc.cyclic_count(),
                entries: scc.into_entries(),
                acyclic: false,
            }
        }
    }
}

pub fn timed_solve<V: Vertex>(graph: &Graph<V>) -> (Vec<ResultEntry<V>>, Duration) {
    let started = Instant::now();
    let entries = solve(graph);
    (entries, started.elapsed())
}

pub(crate) fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

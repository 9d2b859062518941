use crate::domain::graph::Graph;
use crate::domain::model::{SccResult, TopologicalOutcome};

pub trait TopologicalSorter<V> {
    fn sort(&self, graph: &Graph<V>) -> TopologicalOutcome<V>;
}

pub trait SccDetector<V> {
    fn compute_scc(&self, graph: &Graph<V>) -> SccResult<V>;
}

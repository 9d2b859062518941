use digraph_solver::domain::graph::Graph;
use digraph_solver::domain::traits::SccDetector;
use digraph_solver::infrastructure::scc_kosaraju::KosarajuSccDetector;

#[test]
fn kosaraju_detects_self_loop_as_cyclic() {
    // 0 -> 0
    let mut g = Graph::new();
    g.add_edges(0, vec![0]);

    let det = KosarajuSccDetector;
    let scc = det.compute_scc(&g);

    assert_eq!(scc.components.len(), 1);
    assert_eq!(scc.components[0], vec![0]);
    assert_eq!(scc.cyclic_component, vec![true]);
}

#[test]
fn kosaraju_detects_two_node_cycle() {
    // 0 <-> 1
    let mut g = Graph::new();
    g.add_edges(0, vec![1]);
    g.add_edges(1, vec![0]);

    let det = KosarajuSccDetector;
    let scc = det.compute_scc(&g);

    assert_eq!(scc.components.len(), 1);
    assert_eq!(scc.components[0], vec![0, 1]);
    assert_eq!(scc.cyclic_component, vec![true]);
}

#[test]
fn kosaraju_produces_stable_partition_for_dag() {
    // 0 -> 1 -> 2
    let mut g = Graph::new();
    g.add_edges(0, vec![1]);
    g.add_edges(1, vec![2]);

    let det = KosarajuSccDetector;
    let scc = det.compute_scc(&g);

    assert_eq!(scc.components.len(), 3);
    // Each node should be its own SCC.
    for comp in scc.components.iter() {
        assert_eq!(comp.len(), 1);
    }
    assert!(scc.cyclic_component.iter().all(|&b| !b));
}

#[test]
fn kosaraju_works_on_non_integer_vertices() {
    // a -> b -> c -> a, c -> d
    let mut g = Graph::new();
    g.add_edges("a", vec!["b"]);
    g.add_edges("b", vec!["c"]);
    g.add_edges("c", vec!["a", "d"]);

    let scc = KosarajuSccDetector.compute_scc(&g);
    assert_eq!(scc.components, vec![vec!["a", "b", "c"], vec!["d"]]);
    assert_eq!(scc.cyclic_component, vec![true, false]);
    assert_eq!(scc.cyclic_count(), 1);
}

#[test]
fn kosaraju_handles_a_long_cycle_without_recursion() {
    let n = 100_000i64;
    let mut g = Graph::new();
    for v in 0..n {
        g.add_edges(v, vec![(v + 1) % n]);
    }

    let scc = KosarajuSccDetector.compute_scc(&g);
    assert_eq!(scc.components.len(), 1);
    assert_eq!(scc.components[0].len(), n as usize);
}

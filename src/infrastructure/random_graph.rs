use crate::domain::graph::{Graph, VertexId};
use crate::infrastructure::test_file::write_test_file;
use anyhow::Result;
use rand::seq::index;
use rand::Rng;
use std::path::Path;

/// Random graphs over the ids `1..=nodes`, without self-loops.
///
/// Out-degree stays around `log2(nodes)`, so both acyclic and cyclic graphs
/// come up for small sizes.
#[derive(Debug, Clone, Copy)]
pub struct RandomGraphGenerator {
    nodes: usize,
}

impl RandomGraphGenerator {
    pub fn new(nodes: usize) -> Self {
        Self { nodes }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph<VertexId> {
        let mut graph = Graph::new();

        let others = self.nodes.saturating_sub(1);

        for v in 1..=self.nodes as VertexId {
            let quantity = self.random_quantity(rng).min(others);
            // Indices range over the other n - 1 ids; skipping `v` keeps it loop-free.
            let successors = index::sample(rng, others, quantity)
                .into_iter()
                .map(|i| {
                    let id = i as VertexId + 1;
                    if id < v {
                        id
                    } else {
                        id + 1
                    }
                });
            graph.add_edges(v, successors);
        }
        graph
    }

    fn random_quantity<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.nodes <= 1 {
            return 0;
        }
        let log2 = (self.nodes as f64).log2();
        let mut max_quantity = (log2 as usize).max(1);
        if max_quantity == 1 {
            max_quantity = 2;
        }
        let prob = 2.0 / log2;
        let divisor = if rng.gen::<f64>() < prob { 1 } else { 2 };
        rng.gen_range(0..max_quantity) / divisor
    }
}

/// Vertex counts 1..9, 10..90, 100..900 and 1000..9000.
pub fn scaling_node_counts() -> Vec<usize> {
    let mut counts = Vec::new();
    let mut n = 1;
    while n < 10_000 {
        for i in 1..10 {
            counts.push(n * i);
        }
        n *= 10;
    }
    counts
}

pub async fn create_test_file<R: Rng + ?Sized>(
    path: &Path,
    cases: usize,
    nodes: usize,
    rng: &mut R,
) -> Result<()> {
    let generator = RandomGraphGenerator::new(nodes);
    let graphs: Vec<Graph<VertexId>> = (0..cases).map(|_| generator.generate(rng)).collect();
    write_test_file(path, &graphs).await
}

/// One random graph per entry of [`scaling_node_counts`]. Returns the number
/// of cases written.
pub async fn create_scaling_test_file<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<usize> {
    let graphs: Vec<Graph<VertexId>> = scaling_node_counts()
        .into_iter()
        .map(|n| RandomGraphGenerator::new(n).generate(rng))
        .collect();
    write_test_file(path, &graphs).await?;
    Ok(graphs.len())
}

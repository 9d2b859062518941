//! Binary entrypoint.
//!
//! This crate is split into layers:
//! - domain: graph, traversal bookkeeping, result model, algorithm ports
//! - infrastructure: DFS topological sort, Kosaraju, text formats, eventing
//! - usecase: solve orchestration, batch runs + progress events
//! - interface: CLI wiring and the interactive shell

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    digraph_solver::interface::cli::run().await
}

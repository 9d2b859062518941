//! Domain layer: graph types, traversal bookkeeping and algorithm ports.

pub mod graph;
pub mod model;
pub mod traits;
pub mod traversal;

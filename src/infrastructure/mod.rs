// Infrastructure layer: algorithm adapters, file I/O, random generation, eventing
pub mod event_ndjson;
pub mod random_graph;
pub mod results_writer;
pub mod scc_kosaraju;
pub mod test_file;
pub mod topological_dfs;

//! Plain-text test case files.
//!
//! ```text
//! graph:
//! 1
//! 2 3
//! 2
//!
//! graph:
//! ...
//! ```
//!
//! Each case starts at a `graph:` line and is a sequence of line pairs: a
//! vertex id, then its space-separated successors (possibly empty).

use crate::domain::graph::{Graph, VertexId};
use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

pub const START_OF_CASE: &str = "graph:";

pub async fn read_test_file(path: impl AsRef<Path>) -> Result<Vec<Graph<VertexId>>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading test file: {}", path.display()))?;
    parse_test_cases(&raw).with_context(|| format!("parsing test file: {}", path.display()))
}

pub async fn write_test_file(path: impl AsRef<Path>, graphs: &[Graph<VertexId>]) -> Result<()> {
    let path = path.as_ref();
    let mut text = String::new();
    for graph in graphs {
        text.push_str(&graph_to_case_text(graph));
    }
    fs::write(path, text)
        .await
        .with_context(|| format!("writing test file: {}", path.display()))
}

pub fn parse_test_cases(raw: &str) -> Result<Vec<Graph<VertexId>>> {
    // (1-based line number, trimmed text) per case; lines before the first
    // marker belong to no case.
    let mut cases: Vec<Vec<(usize, &str)>> = Vec::new();

    for (i, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line == START_OF_CASE {
            cases.push(Vec::new());
        } else if let Some(current) = cases.last_mut() {
            current.push((i + 1, line));
        }
    }

    cases
        .iter()
        .enumerate()
        .map(|(idx, lines)| parse_case(lines).with_context(|| format!("case {}", idx + 1)))
        .collect()
}

fn parse_case(lines: &[(usize, &str)]) -> Result<Graph<VertexId>> {
    let mut graph = Graph::new();
    let mut it = lines.iter();

    while let Some(&(line_no, vertex_line)) = it.next() {
        if vertex_line.is_empty() {
            continue;
        }
        let vertex = parse_id(vertex_line, line_no)?;

        let Some(&(adj_line_no, adj_line)) = it.next() else {
            return Err(anyhow!(
                "line {line_no}: vertex {vertex} has no adjacency line"
            ));
        };

        let adjacent = adj_line
            .split_whitespace()
            .map(|tok| parse_id(tok, adj_line_no))
            .collect::<Result<Vec<_>>>()?;

        graph.add_edges(vertex, adjacent);
    }

    Ok(graph)
}

fn parse_id(raw: &str, line_no: usize) -> Result<VertexId> {
    raw.parse::<VertexId>()
        .map_err(|_| anyhow!("line {line_no}: invalid vertex id {raw:?}"))
}

/// Serializes `graph` as one case, marker included.
pub fn graph_to_case_text(graph: &Graph<VertexId>) -> String {
    let mut text = String::new();
    text.push_str(START_OF_CASE);
    text.push('\n');

    for (v, outs) in graph {
        let _ = writeln!(text, "{v}");
        let adjacent: Vec<String> = outs.iter().map(|n| n.to_string()).collect();
        text.push_str(&adjacent.join(" "));
        text.push('\n');
    }
    text
}

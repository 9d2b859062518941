use crate::domain::graph::{Graph, VertexId};
use crate::domain::model::render_entries;
use crate::infrastructure::results_writer::{write_results, WrittenResults};
use crate::infrastructure::test_file::read_test_file;
use crate::usecase::event::AppEvent;
use crate::usecase::solve::{duration_ms, solve_classified, Solved};
use crate::usecase::stats::{CaseResult, TestCaseResults};
use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How many times each case is solved before its mean time is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkPolicy {
    pub min_runs: usize,
    /// Used instead of `min_runs` when the first run beats `fast_threshold`.
    pub fast_runs: usize,
    pub fast_threshold: Duration,
}

impl Default for BenchmarkPolicy {
    fn default() -> Self {
        Self {
            min_runs: 3,
            fast_runs: 100,
            fast_threshold: Duration::from_millis(10),
        }
    }
}

impl BenchmarkPolicy {
    pub fn single_run() -> Self {
        Self {
            min_runs: 1,
            fast_runs: 1,
            fast_threshold: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub policy: BenchmarkPolicy,
    /// Skip writing the results files.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct TestRun {
    pub results: TestCaseResults,
    pub written: Option<WrittenResults>,
}

pub async fn run_test_file(
    path: &Path,
    options: RunOptions,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<TestRun> {
    emit(&sink, AppEvent::PhaseStarted { name: "parse".into() }).await;
    let graphs = read_test_file(path).await?;
    emit(&sink, AppEvent::CasesParsed { cases: graphs.len() }).await;
    emit(&sink, AppEvent::PhaseFinished { name: "parse".into() }).await;

    let results = run_test_cases(&graphs, options.policy, &sink).await;

    let written = if options.dry_run {
        None
    } else {
        emit(&sink, AppEvent::PhaseStarted { name: "write_results".into() }).await;
        let written = write_results(&results, path).await?;
        for p in [&written.solutions, &written.times] {
            emit(
                &sink,
                AppEvent::ResultsWritten {
                    path: p.display().to_string(),
                },
            )
            .await;
        }
        emit(&sink, AppEvent::PhaseFinished { name: "write_results".into() }).await;
        Some(written)
    };

    emit(
        &sink,
        AppEvent::Finished {
            results: results.clone(),
        },
    )
    .await;

    Ok(TestRun { results, written })
}

pub async fn run_test_cases(
    graphs: &[Graph<VertexId>],
    policy: BenchmarkPolicy,
    sink: &Option<mpsc::Sender<AppEvent>>,
) -> TestCaseResults {
    emit(sink, AppEvent::PhaseStarted { name: "solve".into() }).await;

    let mut cases = Vec::with_capacity(graphs.len());
    for (index, graph) in graphs.iter().enumerate() {
        let (case, runs, entries) = run_case(graph, policy);
        emit(
            sink,
            AppEvent::CaseSolved {
                index,
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
                acyclic: case.acyclic,
                cyclic_components: case.cyclic_components,
                entries,
                runs,
                mean_ms: case.elapsed_ms,
            },
        )
        .await;
        cases.push(case);
    }

    emit(sink, AppEvent::PhaseFinished { name: "solve".into() }).await;
    TestCaseResults::from_cases(cases)
}

/// Returns the case result, the number of runs and the entry count.
fn run_case(graph: &Graph<VertexId>, policy: BenchmarkPolicy) -> (CaseResult, usize, usize) {
    let mut runs = 0usize;
    let mut limit = policy.min_runs.max(1);
    let mut total = Duration::ZERO;
    let mut solved = Solved {
        entries: Vec::new(),
        acyclic: true,
        cyclic_components: 0,
    };

    while runs < limit {
        let started = Instant::now();
        solved = solve_classified(graph);
        let elapsed = started.elapsed();
        total += elapsed;

        if runs == 0 && elapsed < policy.fast_threshold {
            limit = policy.fast_runs.max(1);
        }
        runs += 1;
    }

    let mean = total / runs as u32;
    let case = CaseResult {
        result: render_entries(&solved.entries),
        elapsed_ms: duration_ms(mean),
        vertices: graph.vertex_count(),
        acyclic: solved.acyclic,
        cyclic_components: solved.cyclic_components,
    };
    (case, runs, solved.entries.len())
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cycle() -> Graph<VertexId> {
        let mut g = Graph::new();
        g.add_edges(1, vec![2]);
        g.add_edges(2, vec![1]);
        g
    }

    #[test]
    fn fast_first_run_switches_to_fast_run_count() {
        let policy = BenchmarkPolicy {
            min_runs: 3,
            fast_runs: 7,
            fast_threshold: Duration::from_secs(60),
        };
        let (case, runs, entries) = run_case(&two_cycle(), policy);
        assert_eq!(runs, 7);
        assert_eq!(entries, 1);
        assert_eq!(case.result, "[[1, 2]]");
        assert!(!case.acyclic);
        assert_eq!(case.cyclic_components, 1);
    }

    #[test]
    fn slow_first_run_keeps_min_runs() {
        let policy = BenchmarkPolicy {
            min_runs: 3,
            fast_runs: 100,
            fast_threshold: Duration::ZERO,
        };
        let (_, runs, _) = run_case(&two_cycle(), policy);
        assert_eq!(runs, 3);
    }

    #[tokio::test]
    async fn run_test_cases_emits_one_event_per_case() {
        let (tx, mut rx) = mpsc::channel::<AppEvent>(64);
        let mut dag = Graph::new();
        dag.add_edges(1, vec![2]);

        let results =
            run_test_cases(&[dag, two_cycle()], BenchmarkPolicy::single_run(), &Some(tx)).await;

        assert_eq!(results.case_count, 2);
        assert_eq!(results.cases[0].result, "[1, 2]");
        assert!(results.cases[0].acyclic);
        assert_eq!(results.cases[1].result, "[[1, 2]]");

        let mut solved = 0;
        while let Ok(ev) = rx.try_recv() {
            if let AppEvent::CaseSolved { runs, .. } = ev {
                assert_eq!(runs, 1);
                solved += 1;
            }
        }
        assert_eq!(solved, 2);
    }
}

use crate::usecase::stats::TestCaseResults;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    CasesParsed {
        cases: usize,
    },

    CaseSolved {
        index: usize,
        vertices: usize,
        edges: usize,
        acyclic: bool,
        cyclic_components: usize,
        entries: usize,
        runs: usize,
        mean_ms: f64,
    },

    ResultsWritten {
        path: String,
    },

    Finished {
        results: TestCaseResults,
    },
}

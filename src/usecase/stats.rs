use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    /// Rendered solve result, e.g. `[1, [2, 3]]`.
    pub result: String,
    pub elapsed_ms: f64,
    pub vertices: usize,
    pub acyclic: bool,
    pub cyclic_components: usize,
}

/// Aggregate timing report for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestCaseResults {
    pub total_elapsed_ms: f64,
    pub case_count: usize,
    pub cases: Vec<CaseResult>,
}

impl TestCaseResults {
    pub fn from_cases(cases: Vec<CaseResult>) -> Self {
        Self {
            total_elapsed_ms: cases.iter().map(|c| c.elapsed_ms).sum(),
            case_count: cases.len(),
            cases,
        }
    }

    pub fn mean_elapsed_per_case_ms(&self) -> f64 {
        if self.case_count == 0 {
            return 0.0;
        }
        self.total_elapsed_ms / self.case_count as f64
    }
}

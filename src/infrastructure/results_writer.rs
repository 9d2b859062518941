use crate::usecase::stats::TestCaseResults;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenResults {
    pub solutions: PathBuf,
    pub times: PathBuf,
}

/// Writes `<stem>-result.txt` and `<stem>-times.txt` next to `input`.
pub async fn write_results(results: &TestCaseResults, input: &Path) -> Result<WrittenResults> {
    let solutions = sibling_with_suffix(input, "-result.txt");
    let times = sibling_with_suffix(input, "-times.txt");

    fs::write(&solutions, render_solutions(results))
        .await
        .with_context(|| format!("cannot write results to {}", solutions.display()))?;
    fs::write(&times, render_times(results))
        .await
        .with_context(|| format!("cannot write results to {}", times.display()))?;

    Ok(WrittenResults { solutions, times })
}

pub fn render_solutions(results: &TestCaseResults) -> String {
    let mut out = prelude(results);
    for case in results.cases.iter() {
        let _ = writeln!(out, "Time: {} ms", case.elapsed_ms);
        let _ = writeln!(out, "Result: {}\n", case.result);
    }
    out
}

/// Two columns, vertex count and mean time, readable by gnuplot.
pub fn render_times(results: &TestCaseResults) -> String {
    let mut out = String::from("# Nodes\t Time\n");
    for case in results.cases.iter() {
        let _ = writeln!(out, "{}\t {:.6}", case.vertices, case.elapsed_ms);
    }
    out
}

fn prelude(results: &TestCaseResults) -> String {
    format!(
        "# Total elapsed time: {:.6} ms\n# Total number of cases: {}\n# Medium elapsed time per case: {:.6} ms\n",
        results.total_elapsed_ms,
        results.case_count,
        results.mean_elapsed_per_case_ms()
    )
}

/// `dir/cases.txt` -> `dir/cases<suffix>`. Only a real extension is dropped,
/// so `.hidden` keeps its name.
fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = match input.file_name().and_then(|s| s.to_str()) {
        Some(name) => match name.rfind('.') {
            Some(pos) if pos > 0 && pos < name.len() - 1 => name[..pos].to_string(),
            _ => name.to_string(),
        },
        None => "results".to_string(),
    };
    input.with_file_name(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::stats::CaseResult;
    use tempfile::tempdir;

    fn sample() -> TestCaseResults {
        TestCaseResults::from_cases(vec![
            CaseResult {
                result: "[1, 2]".to_string(),
                elapsed_ms: 0.5,
                vertices: 2,
                acyclic: true,
                cyclic_components: 0,
            },
            CaseResult {
                result: "[[1, 2]]".to_string(),
                elapsed_ms: 1.5,
                vertices: 2,
                acyclic: false,
                cyclic_components: 1,
            },
        ])
    }

    #[test]
    fn solutions_start_with_prelude_and_list_every_case() {
        let text = render_solutions(&sample());
        assert!(text.starts_with(
            "# Total elapsed time: 2.000000 ms\n# Total number of cases: 2\n# Medium elapsed time per case: 1.000000 ms\n"
        ));
        assert!(text.contains("Time: 0.5 ms\nResult: [1, 2]\n\n"));
        assert!(text.ends_with("Time: 1.5 ms\nResult: [[1, 2]]\n\n"));
    }

    #[test]
    fn times_file_has_header_and_one_row_per_case() {
        let text = render_times(&sample());
        assert_eq!(text, "# Nodes\t Time\n2\t 0.500000\n2\t 1.500000\n");
    }

    #[test]
    fn sibling_names_drop_only_real_extensions() {
        let p = Path::new("/tmp/x/cases.txt");
        assert_eq!(
            sibling_with_suffix(p, "-result.txt"),
            PathBuf::from("/tmp/x/cases-result.txt")
        );
        assert_eq!(
            sibling_with_suffix(Path::new("cases"), "-times.txt"),
            PathBuf::from("cases-times.txt")
        );
        assert_eq!(
            sibling_with_suffix(Path::new(".hidden"), "-times.txt"),
            PathBuf::from(".hidden-times.txt")
        );
    }

    #[tokio::test]
    async fn write_results_creates_both_files() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("cases.txt");

        let written = write_results(&sample(), &input).await.expect("write");
        assert_eq!(written.solutions, dir.path().join("cases-result.txt"));
        assert_eq!(written.times, dir.path().join("cases-times.txt"));

        let raw = std::fs::read_to_string(&written.solutions).expect("read");
        assert!(raw.contains("# Total number of cases: 2"));
        assert!(written.times.exists());
    }
}

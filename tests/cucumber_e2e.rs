use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use cucumber::{World as _, given, then, when};
use tempfile::TempDir;

#[derive(Debug, Default, cucumber::World)]
struct TestWorld {
    dir: Option<TempDir>,
    input_path: Option<PathBuf>,
    input_path_2: Option<PathBuf>,
    last_cmd: Option<Output>,
}

fn exe() -> &'static str {
    env!("CARGO_BIN_EXE_digraph-solver")
}

fn run_cmd(args: Vec<String>) -> Output {
    Command::new(exe())
        .args(args)
        .output()
        .expect("failed to run digraph-solver binary")
}

fn stderr_string(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn create_test_args(out: &Path, cases: usize, nodes: usize, seed: u64) -> Vec<String> {
    vec![
        "create-test".to_string(),
        "--out".to_string(),
        path_arg(out),
        "--cases".to_string(),
        cases.to_string(),
        "--nodes".to_string(),
        nodes.to_string(),
        "--seed".to_string(),
        seed.to_string(),
    ]
}

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .expect("utf-8 file stem");
    input.with_file_name(format!("{stem}{suffix}"))
}

#[given("a temp test workspace")]
fn a_temp_test_workspace(world: &mut TestWorld) {
    world.dir = Some(tempfile::tempdir().expect("tempdir"));
}

#[given(expr = "an input test file containing {string}")]
fn an_input_test_file_containing(world: &mut TestWorld, body: String) {
    let dir = world.dir.as_ref().expect("temp dir");
    let input_path = dir.path().join("cases.txt");
    // Feature files cannot hold raw newlines inside a string.
    fs::write(&input_path, body.replace("\\n", "\n")).expect("write fixture");
    world.input_path = Some(input_path);
}

#[when(expr = "I create a test file with {int} cases of {int} nodes and seed {int}")]
fn i_create_a_test_file(world: &mut TestWorld, cases: usize, nodes: usize, seed: u64) {
    let dir = world.dir.as_ref().expect("temp dir");
    let input_path = dir.path().join("random.txt");

    let out = run_cmd(create_test_args(&input_path, cases, nodes, seed));

    world.input_path = Some(input_path);
    world.last_cmd = Some(out);
}

#[when(expr = "I create two test files with seed {int}")]
fn i_create_two_test_files(world: &mut TestWorld, seed: u64) {
    let dir = world.dir.as_ref().expect("temp dir");
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    let r1 = run_cmd(create_test_args(&a, 4, 20, seed));
    assert!(r1.status.success(), "first create-test failed: {}", stderr_string(&r1));

    let r2 = run_cmd(create_test_args(&b, 4, 20, seed));
    world.input_path = Some(a);
    world.input_path_2 = Some(b);
    world.last_cmd = Some(r2);
}

#[when("I run test on the input file")]
fn i_run_test_on_the_input_file(world: &mut TestWorld) {
    let input_path = world.input_path.as_ref().expect("input");

    let out = run_cmd(vec![
        "test".to_string(),
        "--in".to_string(),
        path_arg(input_path),
    ]);
    world.last_cmd = Some(out);
}

#[when("I run a dry test with events on the input file")]
fn i_run_a_dry_test_with_events(world: &mut TestWorld) {
    let input_path = world.input_path.as_ref().expect("input");

    let out = run_cmd(vec![
        "test".to_string(),
        "--in".to_string(),
        path_arg(input_path),
        "--dry-run".to_string(),
        "--emit-events".to_string(),
    ]);
    world.last_cmd = Some(out);
}

#[when(expr = "I run the binary with {string}")]
fn i_run_the_binary_with(world: &mut TestWorld, raw: String) {
    let args = raw.split_whitespace().map(String::from).collect();
    world.last_cmd = Some(run_cmd(args));
}

#[then("the command succeeds")]
fn the_command_succeeds(world: &mut TestWorld) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    assert!(
        out.status.success(),
        "command failed (status={:?})\nstderr:\n{}\nstdout:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stderr),
        String::from_utf8_lossy(&out.stdout)
    );
}

#[then("the command fails")]
fn the_command_fails(world: &mut TestWorld) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    assert!(
        !out.status.success(),
        "expected failure but succeeded; stderr: {}",
        stderr_string(out)
    );
}

#[then(expr = "stderr mentions {string}")]
fn stderr_mentions(world: &mut TestWorld, needle: String) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    let stderr = stderr_string(out);
    assert!(
        stderr.contains(&needle),
        "stderr did not contain {needle:?}. stderr was:\n{stderr}"
    );
}

#[then(expr = "stdout has {int} {string} events")]
fn stdout_has_events(world: &mut TestWorld, count: usize, kind: String) {
    let out = world.last_cmd.as_ref().expect("last cmd");
    let stdout = String::from_utf8_lossy(&out.stdout);

    let mut seen = 0usize;
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let v: serde_json::Value = serde_json::from_str(line).expect("ndjson line");
        if v["type"] == kind.as_str() {
            seen += 1;
        }
    }
    assert_eq!(seen, count, "stdout was:\n{stdout}");
}

#[then(expr = "the results file reports {int} cases")]
fn the_results_file_reports(world: &mut TestWorld, cases: usize) {
    let input_path = world.input_path.as_ref().expect("input");
    let raw = fs::read_to_string(sibling(input_path, "-result.txt")).expect("read results");

    assert!(
        raw.contains(&format!("# Total number of cases: {cases}")),
        "unexpected results file:\n{raw}"
    );
    assert_eq!(raw.matches("Result: ").count(), cases);
}

#[then(expr = "the results file contains {string}")]
fn the_results_file_contains(world: &mut TestWorld, needle: String) {
    let input_path = world.input_path.as_ref().expect("input");
    let raw = fs::read_to_string(sibling(input_path, "-result.txt")).expect("read results");
    assert!(raw.contains(&needle), "results file did not contain {needle:?}:\n{raw}");
}

#[then(expr = "the times file has {int} rows")]
fn the_times_file_has_rows(world: &mut TestWorld, rows: usize) {
    let input_path = world.input_path.as_ref().expect("input");
    let raw = fs::read_to_string(sibling(input_path, "-times.txt")).expect("read times");

    let mut lines = raw.lines();
    assert_eq!(lines.next(), Some("# Nodes\t Time"));
    assert_eq!(lines.filter(|l| !l.is_empty()).count(), rows);
}

#[then("no results file is written")]
fn no_results_file_is_written(world: &mut TestWorld) {
    let input_path = world.input_path.as_ref().expect("input");
    assert!(!sibling(input_path, "-result.txt").exists());
    assert!(!sibling(input_path, "-times.txt").exists());
}

#[then("the two test files are identical")]
fn the_two_test_files_are_identical(world: &mut TestWorld) {
    let a = world.input_path.as_ref().expect("file a");
    let b = world.input_path_2.as_ref().expect("file b");

    let a_raw = fs::read_to_string(a).expect("read a");
    let b_raw = fs::read_to_string(b).expect("read b");

    assert_eq!(a_raw, b_raw, "seeded test files differed");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    TestWorld::cucumber()
        .max_concurrent_scenarios(Some(1))
        .fail_on_skipped()
        .run_and_exit("tests/features")
        .await;
}

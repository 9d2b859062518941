use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::random_graph::{create_scaling_test_file, create_test_file};
use crate::interface::shell::Shell;
use crate::usecase::batch::{run_test_file, RunOptions};
use crate::usecase::event::AppEvent;
use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::Path;
use tokio::io::BufReader;
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::Shell => {
            let mut shell = Shell::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
            shell.run().await
        }

        Cli::Test {
            input,
            emit_events,
            dry_run,
        } => {
            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let options = RunOptions {
                dry_run,
                ..RunOptions::default()
            };
            let run = run_test_file(Path::new(&input), options, Some(tx))
                .await
                .with_context(|| format!("running test file: {input}"))?;

            if let Some(handle) = printer {
                handle.await.ok();
            }

            let results = &run.results;
            eprintln!(
                "summary: cases={} total_ms={:.6} mean_ms_per_case={:.6}",
                results.case_count,
                results.total_elapsed_ms,
                results.mean_elapsed_per_case_ms()
            );
            if let Some(written) = run.written.as_ref() {
                eprintln!("solutions saved to {}", written.solutions.display());
                eprintln!("execution times saved to {}", written.times.display());
            }
            Ok(())
        }

        Cli::CreateTest {
            output,
            shape,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let path = Path::new(&output);

            let cases = match shape {
                TestShape::Uniform { cases, nodes } => {
                    create_test_file(path, cases, nodes, &mut rng).await?;
                    cases
                }
                TestShape::Scaling => create_scaling_test_file(path, &mut rng).await?,
            };

            eprintln!("Test created in file {output} ({cases} cases).");
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TestShape {
    Uniform { cases: usize, nodes: usize },
    Scaling,
}

#[derive(Debug)]
enum Cli {
    Shell,
    Test {
        input: String,
        emit_events: bool,
        dry_run: bool,
    },
    CreateTest {
        output: String,
        shape: TestShape,
        seed: Option<u64>,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> shell
        // <bin> test --in/--input <cases.txt> [--emit-events] [--dry-run]
        // <bin> create-test --out/--output <cases.txt> (--cases <n> --nodes <n> | --scaling) [--seed <n>]
        if args.len() < 2 {
            return Err(anyhow!(usage()));
        }

        match args[1].as_str() {
            "shell" => Self::parse_shell(args),
            "test" => Self::parse_test(args),
            "create-test" => Self::parse_create_test(args),
            "-h" | "--help" => Err(anyhow!(usage())),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_shell(args: &[String]) -> Result<Self> {
        match args.get(2).map(String::as_str) {
            None => Ok(Cli::Shell),
            Some("-h" | "--help") => Err(anyhow!(usage())),
            Some(other) => Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
        }
    }

    fn parse_test(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut emit_events = false;
        let mut dry_run = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "--dry-run" => {
                    dry_run = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::Test {
            input,
            emit_events,
            dry_run,
        })
    }

    fn parse_create_test(args: &[String]) -> Result<Self> {
        let mut output: Option<String> = None;
        let mut cases: Option<usize> = None;
        let mut nodes: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut scaling = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--out" | "--output" => {
                    i += 1;
                    output = args.get(i).cloned();
                }
                "--cases" => {
                    i += 1;
                    cases = Some(parse_number(args.get(i), "--cases")?);
                }
                "--nodes" => {
                    i += 1;
                    nodes = Some(parse_number(args.get(i), "--nodes")?);
                }
                "--seed" => {
                    i += 1;
                    seed = Some(parse_number(args.get(i), "--seed")?);
                }
                "--scaling" => {
                    scaling = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let output =
            output.ok_or_else(|| anyhow!(format!("missing --out/--output\n\n{}", usage())))?;

        let shape = match (scaling, cases, nodes) {
            (true, None, None) => TestShape::Scaling,
            (true, _, _) => {
                return Err(anyhow!(format!(
                    "--scaling cannot be combined with --cases/--nodes\n\n{}",
                    usage()
                )))
            }
            (false, Some(cases), Some(nodes)) => TestShape::Uniform { cases, nodes },
            (false, _, _) => {
                return Err(anyhow!(format!(
                    "missing --cases and --nodes (or --scaling)\n\n{}",
                    usage()
                )))
            }
        };

        Ok(Cli::CreateTest {
            output,
            shape,
            seed,
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<&String>, flag: &str) -> Result<T> {
    let raw = raw.ok_or_else(|| anyhow!(format!("missing value for {flag}\n\n{}", usage())))?;
    raw.parse::<T>()
        .map_err(|_| anyhow!(format!("invalid value for {flag}: {raw}\n\n{}", usage())))
}

fn usage() -> &'static str {
    "Usage:\n  shell\n  test --in/--input <cases.txt> [--emit-events] [--dry-run]\n  create-test --out/--output <cases.txt> (--cases <n> --nodes <n> | --scaling) [--seed <n>]\n\nShell:\n  Interactive prompt over one in-memory graph. Write \"help\" inside it for the commands.\n\nTest files:\n  Each case starts with a \"graph:\" line followed by line pairs: a vertex id, then its space-separated successors.\n  Results go to <name>-result.txt and <name>-times.txt next to the input unless --dry-run is set.\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr."
}

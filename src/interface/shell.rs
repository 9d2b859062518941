//! Interactive command loop over a single in-memory graph.

use crate::domain::graph::{Graph, VertexId};
use crate::domain::model::render_entries;
use crate::infrastructure::random_graph::create_test_file;
use crate::usecase::batch::{run_test_file, RunOptions};
use crate::usecase::solve::{duration_ms, timed_solve};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddNode,
    AddEdges,
    Reset,
    Help,
    Show,
    Solve,
    Test,
    CreateTest,
    Exit,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::AddNode,
        Command::AddEdges,
        Command::Reset,
        Command::Help,
        Command::Show,
        Command::Solve,
        Command::Test,
        Command::CreateTest,
        Command::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::AddNode => "add node",
            Command::AddEdges => "add edges",
            Command::Reset => "reset",
            Command::Help => "help",
            Command::Show => "show",
            Command::Solve => "solve",
            Command::Test => "test",
            Command::CreateTest => "create test",
            Command::Exit => "exit",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Command::AddNode => "Adds a node to the graph without any adjacent nodes.",
            Command::AddEdges => {
                "Creates directed edges that go from a source node to other nodes. Neither the source nor the destination nodes have to exist already in the graph. The destination nodes must be separated by spaces."
            }
            Command::Reset => "Resets the graph. It will have no nodes.",
            Command::Help => "Shows this message.",
            Command::Show => "Shows the nodes and their adjacent nodes in the graph.",
            Command::Solve => {
                "If the graph is acyclic, lists its nodes in topological order. Otherwise lists its strongly connected components (Kosaraju)."
            }
            Command::Test => {
                "Reads a file with the data for several graphs and uses 'solve' with all of them."
            }
            Command::CreateTest => {
                "Creates a random test file. The user has to specify the number of cases, the number of nodes per graph and the name of the file."
            }
            Command::Exit => "Leaves the program.",
        }
    }

    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        Self::ALL.into_iter().find(|c| c.name() == line)
    }
}

enum Flow {
    Continue,
    Stop,
}

pub struct Shell<R, W> {
    graph: Graph<VertexId>,
    lines: Lines<R>,
    out: W,
    rng: StdRng,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, out: W) -> Self {
        Self::with_rng(reader, out, StdRng::from_entropy())
    }

    pub fn with_rng(reader: R, out: W, rng: StdRng) -> Self {
        Self {
            graph: Graph::new(),
            lines: reader.lines(),
            out,
            rng,
        }
    }

    pub fn graph(&self) -> &Graph<VertexId> {
        &self.graph
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Runs until `exit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        self.say(&format!(
            "This program allows you to create a graph manually, read test cases from a file, and even create random test files.\nWrite \"{}\" for help.\n\n",
            Command::Help.name()
        ))
        .await?;

        loop {
            self.say(">>> ").await?;
            let Some(line) = self.read_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some(cmd) = Command::parse(&line) else {
                self.say(&format!(
                    "Error: this command doesn't exist.\nWrite {} to see the commands available.\n",
                    Command::Help.name()
                ))
                .await?;
                continue;
            };
            if let Flow::Stop = self.execute(cmd).await? {
                break;
            }
        }
        self.out.flush().await?;
        Ok(())
    }

    async fn execute(&mut self, cmd: Command) -> Result<Flow> {
        match cmd {
            Command::AddNode => {
                self.say("Node: ").await?;
                let Some(node) = self.read_number().await? else {
                    return Ok(Flow::Stop);
                };
                self.graph.add_vertex(node);
            }
            Command::AddEdges => {
                self.say("Node: ").await?;
                let Some(node) = self.read_number().await? else {
                    return Ok(Flow::Stop);
                };
                self.say("Adjacent nodes: ").await?;
                let Some(adjacent) = self.read_nodes_list().await? else {
                    return Ok(Flow::Stop);
                };
                self.graph.add_edges(node, adjacent);
            }
            Command::Reset => self.graph = Graph::new(),
            Command::Help => {
                let mut text = String::new();
                for c in Command::ALL {
                    text.push_str(&format!("> {}\n{}\n\n", c.name(), c.help()));
                }
                self.say(&text).await?;
            }
            Command::Show => {
                let text = show_graph(&self.graph);
                self.say(&text).await?;
            }
            Command::Solve => {
                let (entries, elapsed) = timed_solve(&self.graph);
                self.say(&format!(
                    "{}\nElapsed time: {} ms\n",
                    render_entries(&entries),
                    duration_ms(elapsed)
                ))
                .await?;
            }
            Command::Test => {
                self.say("Name of file: ").await?;
                let Some(name) = self.read_file_name().await? else {
                    return Ok(Flow::Stop);
                };
                self.run_test(&name).await?;
            }
            Command::CreateTest => {
                self.say("Number of random tests: ").await?;
                let Some(cases) = self.read_count().await? else {
                    return Ok(Flow::Stop);
                };
                self.say("Number of nodes per graph: ").await?;
                let Some(nodes) = self.read_count().await? else {
                    return Ok(Flow::Stop);
                };
                self.say("Name of file: ").await?;
                let Some(name) = self.read_file_name().await? else {
                    return Ok(Flow::Stop);
                };
                let created = create_test_file(Path::new(&name), cases, nodes, &mut self.rng).await;
                match created {
                    Ok(()) => self.say(&format!("Test created in file {name}.\n")).await?,
                    Err(err) => self.say(&format!("Error: {err:#}\n")).await?,
                }
            }
            Command::Exit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    async fn run_test(&mut self, name: &str) -> Result<()> {
        let path = Path::new(name);
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            let cwd = std::env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            return self.say(&format!("File does not exist in {cwd}\n")).await;
        }

        self.say("Executing test...\n").await?;
        let started = Instant::now();
        let run = match run_test_file(path, RunOptions::default(), None).await {
            Ok(run) => run,
            Err(err) => return self.say(&format!("Error: {err:#}\n")).await,
        };
        let actual_ms = duration_ms(started.elapsed());

        let results = &run.results;
        let mut text = format!(
            "Total number of cases: {}\nMedium elapsed time per graph: {} ms\nTotal medium elapsed time: {} ms\nActual elapsed time: {} ms\n",
            results.case_count,
            results.mean_elapsed_per_case_ms(),
            results.total_elapsed_ms,
            actual_ms
        );
        if let Some(written) = run.written.as_ref() {
            text.push_str(&format!(
                "Solutions saved to {}\nExecution times saved to {}\n",
                written.solutions.display(),
                written.times.display()
            ));
        }
        self.say(&text).await
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    async fn read_number(&mut self) -> Result<Option<VertexId>> {
        while let Some(line) = self.read_line().await? {
            match line.trim().parse::<VertexId>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => self.say("Invalid input: write a number.\n").await?,
            }
        }
        Ok(None)
    }

    async fn read_count(&mut self) -> Result<Option<usize>> {
        while let Some(line) = self.read_line().await? {
            match line.trim().parse::<usize>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => self.say("Invalid input: write a non-negative number.\n").await?,
            }
        }
        Ok(None)
    }

    async fn read_nodes_list(&mut self) -> Result<Option<Vec<VertexId>>> {
        while let Some(line) = self.read_line().await? {
            let parsed: Result<Vec<VertexId>, _> = line
                .split_whitespace()
                .map(|tok| tok.parse::<VertexId>())
                .collect();
            match parsed {
                Ok(nodes) => return Ok(Some(nodes)),
                Err(_) => self.say("Invalid input: write a list of numbers.\n").await?,
            }
        }
        Ok(None)
    }

    /// The file need not exist; blank names and names with spaces are refused.
    async fn read_file_name(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.read_line().await? {
            let name = line.trim();
            if !name.is_empty() && !name.contains(' ') {
                return Ok(Some(name.to_string()));
            }
            self.say("Invalid input: file name shouldn't be blank nor have whitespaces.\n")
                .await?;
        }
        Ok(None)
    }
}

fn show_graph(graph: &Graph<VertexId>) -> String {
    if graph.is_empty() {
        return "Graph is empty\n".to_string();
    }
    let mut text = String::new();
    for (v, outs) in graph {
        let adjacent: Vec<String> = outs.iter().map(|n| n.to_string()).collect();
        text.push_str(&format!("Node: {v}\t -> [{}]\n", adjacent.join(", ")));
    }
    text
}

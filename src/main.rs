use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rbseq::monoid::Sum;
use rbseq::{CopyPolicy, Ephemeral, Persistent, RedBlackTree, Root, StronglyConnectedComponents, TreeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rbseq", about = "Leveled red-black sequence trees and SCC decomposition")]
struct Cli {
    /// Log library events at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decompose a directed graph into strongly connected components.
    Scc {
        /// Edge list: `n m` header followed by `m` lines of `u v`.
        graph: PathBuf,
    },
    /// Run a sequence command script over i64 values with sum aggregates.
    Run {
        /// Script file, one command per line (`#` starts a comment).
        script: PathBuf,
        /// Keep every version and print the history at the end.
        #[arg(long)]
        persistent: bool,
        /// Node pool capacity (default: sized from the script).
        #[arg(long)]
        capacity: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scc { graph } => run_scc(graph)?,
        Commands::Run {
            script,
            persistent,
            capacity,
        } => run_script(script, persistent, capacity)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rbseq=debug" } else { "rbseq=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_scc(graph_path: PathBuf) -> Result<()> {
    let adjacency = read_edge_list(&graph_path)
        .with_context(|| format!("failed to read graph from {}", graph_path.display()))?;
    let scc = StronglyConnectedComponents::new(&adjacency).context("invalid graph")?;

    println!("{}", scc.num_components());
    for group in scc.groups() {
        let vertices: Vec<String> = group.iter().map(|v| v.to_string()).collect();
        println!("{} {}", group.len(), vertices.join(" "));
    }

    Ok(())
}

fn read_edge_list(path: &PathBuf) -> Result<Vec<Vec<usize>>> {
    let contents = std::fs::read_to_string(path)?;
    let mut numbers = contents.split_whitespace().map(|token| {
        token
            .parse::<usize>()
            .with_context(|| format!("invalid integer '{token}'"))
    });
    let mut next = |what: &str| -> Result<usize> {
        numbers
            .next()
            .ok_or_else(|| anyhow::anyhow!("unexpected end of input reading {what}"))?
    };

    let n = next("vertex count")?;
    let m = next("edge count")?;
    let mut adjacency = vec![Vec::new(); n];
    for edge in 0..m {
        let u = next("edge source")?;
        let v = next("edge target")?;
        if u >= n {
            bail!("edge {} starts at vertex {u}, but the graph has {n} vertices", edge + 1);
        }
        adjacency[u].push(v);
    }

    Ok(adjacency)
}

/// One script command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    PushBack(i64),
    PushFront(i64),
    PopBack,
    PopFront,
    Insert(usize, i64),
    Erase(usize),
    Get(usize),
    Set(usize, i64),
    Sum(usize, usize),
    Split(usize),
    Bisect(i64),
    Dump,
}

impl Command {
    fn mutates(&self) -> bool {
        !matches!(
            self,
            Command::Get(_) | Command::Sum(..) | Command::Split(_) | Command::Bisect(_) | Command::Dump
        )
    }

    fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut fields = line.split_whitespace();
        let name = fields.next().unwrap_or_default();
        let args: Vec<&str> = fields.collect();
        let int = |i: usize| -> Result<i64> {
            let raw = args
                .get(i)
                .ok_or_else(|| anyhow::anyhow!("'{name}' expects more arguments"))?;
            raw.parse()
                .with_context(|| format!("invalid integer '{raw}' for '{name}'"))
        };
        let pos = |i: usize| -> Result<usize> {
            let raw = args
                .get(i)
                .ok_or_else(|| anyhow::anyhow!("'{name}' expects more arguments"))?;
            raw.parse()
                .with_context(|| format!("invalid position '{raw}' for '{name}'"))
        };

        let command = match name {
            "push_back" => Command::PushBack(int(0)?),
            "push_front" => Command::PushFront(int(0)?),
            "pop_back" => Command::PopBack,
            "pop_front" => Command::PopFront,
            "insert" => Command::Insert(pos(0)?, int(1)?),
            "erase" => Command::Erase(pos(0)?),
            "get" => Command::Get(pos(0)?),
            "set" => Command::Set(pos(0)?, int(1)?),
            "sum" => Command::Sum(pos(0)?, pos(1)?),
            "split" => Command::Split(pos(0)?),
            "bisect" => Command::Bisect(int(0)?),
            "dump" => Command::Dump,
            other => bail!("unknown command '{other}'"),
        };
        Ok(Some(command))
    }
}

fn run_script(script_path: PathBuf, persistent: bool, capacity: Option<usize>) -> Result<()> {
    let reader = BufReader::new(File::open(&script_path).with_context(|| {
        format!("failed to open script {}", script_path.display())
    })?);

    let mut commands = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        if let Some(command) = Command::parse(&line?)
            .with_context(|| format!("line {}", line_no + 1))?
        {
            commands.push(command);
        }
    }

    let elements = commands.len().max(1);
    if persistent {
        let config = capacity
            .map(|capacity| TreeConfig { capacity })
            .unwrap_or_else(|| TreeConfig::persistent_for(elements, commands.len()));
        execute(RedBlackTree::<Sum, Persistent>::with_config(config), &commands)
    } else {
        let config = capacity
            .map(|capacity| TreeConfig { capacity })
            .unwrap_or_else(|| TreeConfig::for_elements(elements));
        execute(RedBlackTree::<Sum, Ephemeral>::with_config(config), &commands)
    }
}

fn execute<P: CopyPolicy>(mut tree: RedBlackTree<Sum, P>, commands: &[Command]) -> Result<()> {
    let mut root: Root = None;
    let mut history = vec![root];

    for (step, command) in commands.iter().enumerate() {
        let context = || format!("command {} ({command:?})", step + 1);
        match *command {
            Command::PushBack(v) => tree.push_back(&mut root, v).with_context(context)?,
            Command::PushFront(v) => tree.push_front(&mut root, v).with_context(context)?,
            Command::PopBack => println!("{}", tree.pop_back(&mut root).with_context(context)?),
            Command::PopFront => println!("{}", tree.pop_front(&mut root).with_context(context)?),
            Command::Insert(k, v) => tree.insert(&mut root, k, v).with_context(context)?,
            Command::Erase(k) => println!("{}", tree.erase(&mut root, k).with_context(context)?),
            Command::Get(k) => println!("{}", tree.get(root, k).with_context(context)?),
            Command::Set(k, v) => tree.set(&mut root, k, v).with_context(context)?,
            Command::Sum(a, b) => println!("{}", tree.range_reduce(root, a, b).with_context(context)?),
            Command::Split(k) => {
                let (left, right) = tree.split(root, k).with_context(context)?;
                println!(
                    "[{}] | [{}]",
                    tree.render(left, i64::to_string)?,
                    tree.render(right, i64::to_string)?
                );
                root = tree.merge(left, right)?;
            }
            Command::Bisect(threshold) => {
                let position = tree
                    .search_right(root, |&sum| sum >= threshold)
                    .with_context(context)?;
                println!("{position}");
            }
            Command::Dump => println!("[{}]", tree.render(root, i64::to_string)?),
        }

        if tree.is_persistent() && command.mutates() {
            history.push(root);
        }
    }

    if tree.is_persistent() {
        for (version, &snapshot) in history.iter().enumerate() {
            println!("v{version}: [{}]", tree.render(snapshot, i64::to_string)?);
        }
    }
    tracing::debug!(stats = ?tree.pool_stats(), "script finished");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("insert 2 -7").unwrap(), Some(Command::Insert(2, -7)));
        assert_eq!(Command::parse("  # only a comment").unwrap(), None);
        assert_eq!(Command::parse("dump # trailing").unwrap(), Some(Command::Dump));
        assert!(Command::parse("set 1").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn test_mutating_commands() {
        assert!(Command::Erase(0).mutates());
        assert!(!Command::Split(1).mutates());
    }
}

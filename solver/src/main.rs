use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lemin::parse_farm;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lemin")]
#[command(about = "Move every ant from ##start to ##end in as few turns as possible")]
struct Cli {
    /// Farm description to solve
    file: PathBuf,

    /// Do not echo the farm description before the moves
    #[arg(short, long)]
    quiet: bool,

    /// Print the paths used and the ants sent down each to stderr
    #[arg(long)]
    paths: bool,

    /// Print only the number of turns taken
    #[arg(long, conflicts_with = "paths")]
    turns: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let input = fs::read_to_string(&cli.file)
        .with_context(|| format!("ERROR: could not read {}", cli.file.display()))?;
    let farm = parse_farm(&input)?;
    let solution = farm.solve()?;
    info!(turns = solution.turns().len(), paths = solution.paths().len(), "solved");

    if cli.turns {
        println!("{}", solution.turns().len());
        return Ok(());
    }

    if cli.paths {
        for path in solution.paths() {
            eprintln!("{} ant(s): {}", path.capacity(), farm.describe_path(path));
        }
    }

    if !cli.quiet {
        for line in input.lines() {
            println!("{line}");
        }
        println!();
    }
    for line in solution.lines() {
        println!("{line}");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

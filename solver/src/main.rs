mod scenarios;

use std::process::ExitCode;

use clap::Parser;
use strum::VariantArray;
use tracing_subscriber::EnvFilter;

use crate::scenarios::Scenario;

/// Solve one of the built-in pillar puzzles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Level to solve
    #[arg(default_value_t = Scenario::Level100)]
    scenario: Scenario,

    /// Move budget; defaults to what the level allows
    #[arg(short, long)]
    moves: Option<usize>,

    /// Find the shortest solution within the budget instead of the first one
    #[arg(long)]
    minimal: bool,

    /// Print every candidate move before solving
    #[arg(long)]
    dump: bool,

    /// List the built-in levels and exit
    #[arg(long)]
    list: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pillarshift=debug" } else { "pillarshift=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list {
        for scenario in Scenario::VARIANTS {
            println!("{} ({} moves)", scenario, scenario.moves());
        }
        return ExitCode::SUCCESS;
    }

    let maze = match cli.scenario.maze() {
        Ok(maze) => maze,
        Err(reasons) => {
            eprintln!("error: level {} is invalid: {:?}", cli.scenario, reasons);
            return ExitCode::FAILURE;
        }
    };
    let moves = cli.moves.unwrap_or(cli.scenario.moves());

    if cli.dump {
        match maze.candidates() {
            Ok(table) => print!("{}", table),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    tracing::info!(scenario = %cli.scenario, moves, minimal = cli.minimal, "solving");
    let result = if cli.minimal {
        maze.solve_minimal(moves)
    } else {
        maze.solve(moves)
    };

    match result {
        Ok(Some(solution)) => {
            tracing::debug!(expanded = solution.stats().expanded, pruned = solution.stats().pruned, "search stats");
            print!("{}", solution);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No solution in {} moves", moves);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! CLI entry point for the CFOP solver.
//!
//! Usage:
//!   cfop-solver solve <state.json> [options]
//!   cfop-solver solve --stdin [options]
//!   cfop-solver solve --scramble "R U R' U'" [options]
//!
//! Options:
//!   --cross-depth <n>      Search depth for the cross (default: 6)
//!   --f2l-depth <n>        Search depth per F2L pair (default: 8)
//!   --oll-cross-depth <n>  Search depth for top-cross orientation (default: 6)
//!   --oll-depth <n>        Search depth for the OLL fallback (default: 8)
//!   --pll-depth <n>        Search depth for the PLL fallback (default: 14)

mod algs;
mod cube;
mod search;
mod solver;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use cube::{format_moves, parse_moves, CubeState};
use solver::{solve, Solution, SolverConfig};

#[derive(Parser)]
#[command(name = "cfop-solver")]
#[command(about = "Staged CFOP solver for 3x3x3 cube states")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube state stage by stage
    Solve {
        /// Path to cube state JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read cube state from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Scramble to apply to a solved cube instead of reading a state
        #[arg(long, value_name = "MOVES")]
        scramble: Option<String>,

        /// Search depth for the cross
        #[arg(long, default_value = "6")]
        cross_depth: usize,

        /// Search depth per F2L pair
        #[arg(long, default_value = "8")]
        f2l_depth: usize,

        /// Search depth for top-cross orientation
        #[arg(long, default_value = "6")]
        oll_cross_depth: usize,

        /// Search depth for the OLL fallback search
        #[arg(long, default_value = "8")]
        oll_depth: usize,

        /// Search depth for the PLL fallback search
        #[arg(long, default_value = "14")]
        pll_depth: usize,
    },
}

/// Output format for a solve run
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    steps: Vec<StepOutput>,
    total_moves: usize,
    solution: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepOutput {
    name: String,
    moves: String,
}

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            scramble,
            cross_depth,
            f2l_depth,
            oll_cross_depth,
            oll_depth,
            pll_depth,
        } => {
            // Build the starting state
            let state = if let Some(moves) = scramble {
                let moves = match parse_moves(&moves) {
                    Ok(m) => m,
                    Err(e) => {
                        eprintln!("Error parsing scramble: {}", e);
                        std::process::exit(1);
                    }
                };
                CubeState::solved().apply_moves(&moves)
            } else {
                let json_content = if stdin {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .expect("Failed to read from stdin");
                    buffer
                } else if let Some(path) = file {
                    fs::read_to_string(&path)
                        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
                } else {
                    eprintln!("Error: Must provide a file path, --stdin, or --scramble");
                    std::process::exit(1);
                };

                match serde_json::from_str(&json_content) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Error parsing cube state JSON: {}", e);
                        std::process::exit(1);
                    }
                }
            };

            // Build solver config
            let config = SolverConfig {
                cross_depth,
                f2l_depth,
                oll_cross_depth,
                oll_depth,
                pll_depth,
                ..SolverConfig::default()
            };

            // Run solver
            let solution = solve(&state, &config);

            // Format output
            let output = format_solution(&solution);

            // Print JSON output
            println!("{}", serde_json::to_string_pretty(&output).unwrap());

            // Exit with appropriate code
            if solution.solved {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn format_solution(solution: &Solution) -> SolveOutput {
    let all_moves = solution.all_moves();
    SolveOutput {
        solved: solution.solved,
        steps: solution
            .steps
            .iter()
            .map(|step| StepOutput {
                name: step.name.clone(),
                moves: step.outcome.to_string(),
            })
            .collect(),
        total_moves: all_moves.len(),
        solution: format_moves(&all_moves),
    }
}

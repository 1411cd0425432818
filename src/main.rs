//! Pews CLI
//!
//! Usage:
//!   pews [OPTIONS] <COMMAND>
//!
//! Commands:
//!   vectors       List every valid occupancy vector
//!   check         Validate a vector or matrix
//!   arrangements  List the arrangements realizing a vector
//!   moves         List the legal moves from a matrix
//!   transition    Plan a move sequence between two matrices

use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use pew_arrangements::planner::{valid_moves, SearchContext};
use pew_arrangements::{
    find_all_arrangements, generate_all_valid_vectors, parse, parse_matrix, parse_vector,
    position_name, Matrix, Occupancy, OccupancyVector, ParseError, Planner, PlannerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "pews", version)]
#[command(about = "Validate and plan pew arrangements in a hexagonal church")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Planner configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every valid occupancy vector
    Vectors,

    /// Validate a vector `(r0, r1, r2, d0, d1, d2)` or a matrix `[r0 / r1 / r2]`
    Check { input: String },

    /// List the arrangements realizing a vector
    Arrangements { vector: String },

    /// List the legal moves from a matrix
    Moves { matrix: String },

    /// Plan a move sequence between two matrices
    Transition { from: String, to: String },
}

#[derive(Serialize)]
struct VectorSummary {
    vector: OccupancyVector,
    arrangements: usize,
}

#[derive(Serialize)]
struct CheckReport {
    input: Occupancy,
    vector: OccupancyVector,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => match PlannerConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                exit(1);
            }
        },
        None => PlannerConfig::default(),
    };

    match &cli.command {
        Commands::Vectors => {
            let summaries: Vec<VectorSummary> = generate_all_valid_vectors()
                .into_iter()
                .map(|vector| VectorSummary {
                    arrangements: find_all_arrangements(&vector).len(),
                    vector,
                })
                .collect();
            if cli.json {
                print_json(&summaries);
            } else {
                for s in &summaries {
                    println!("{}  {} arrangement(s)", s.vector, s.arrangements);
                }
            }
        }

        Commands::Check { input } => {
            let occupancy = or_report(parse(input), input);
            let result = occupancy.check();
            if cli.json {
                print_json(&CheckReport {
                    input: occupancy,
                    vector: occupancy.to_vector(),
                    valid: result.is_ok(),
                    reason: result.as_ref().err().map(|e| e.reason().to_string()),
                });
            } else {
                match &result {
                    Ok(()) => println!("valid: {}", occupancy),
                    Err(e) => println!("invalid: {} ({})", occupancy, e),
                }
            }
            if result.is_err() {
                exit(1);
            }
        }

        Commands::Arrangements { vector } => {
            let vector = or_report(parse_vector(vector), vector);
            if let Err(e) = vector.check() {
                eprintln!("Error: {}", e);
                exit(1);
            }
            let arrangements = find_all_arrangements(&vector);
            if cli.json {
                print_json(&arrangements);
            } else {
                for (i, arrangement) in arrangements.iter().enumerate() {
                    println!("#{} {}", i + 1, arrangement.to_matrix());
                    for pair in arrangement.placements().chunks(2) {
                        let p = pair[0];
                        println!(
                            "    {} ({}° / {}°)",
                            position_name(usize::from(p.ring), usize::from(p.diagonal))
                                .unwrap_or_default(),
                            p.angle_degrees(),
                            p.angle_degrees() + 180
                        );
                    }
                }
            }
        }

        Commands::Moves { matrix } => {
            let matrix = valid_matrix(matrix);
            let moves = valid_moves(&matrix, &mut SearchContext::new());
            if cli.json {
                print_json(&moves);
            } else {
                for mv in &moves {
                    println!("{}  ->  {}", mv.description, mv.matrix);
                }
            }
        }

        Commands::Transition { from, to } => {
            // Rule violations are reported by the planner as a single step
            let start = or_report(parse_matrix(from), from);
            let end = or_report(parse_matrix(to), to);
            let transition = Planner::new(config).plan(&start, &end);
            if cli.json {
                print_json(&transition);
            } else {
                for (i, step) in transition.steps.iter().enumerate() {
                    println!("{:>2}. {}  {}", i, step.matrix, step.description);
                }
            }
            if !transition.is_success() {
                exit(1);
            }
        }
    }
}

/// Unwrap a parse result, printing ariadne reports and exiting on failure
fn or_report<T>(result: Result<T, Vec<ParseError>>, source: &str) -> T {
    match result {
        Ok(value) => value,
        Err(errors) => {
            for error in &errors {
                eprint!("{}", error.format(source, "<input>"));
            }
            exit(1);
        }
    }
}

fn valid_matrix(source: &str) -> Matrix {
    let matrix = or_report(parse_matrix(source), source);
    if let Err(e) = matrix.check() {
        eprintln!("Error: {} is {}", matrix, e);
        exit(1);
    }
    matrix
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

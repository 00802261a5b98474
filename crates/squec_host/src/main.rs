mod decode;
mod generator;
mod stats;
mod throughput;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use squec_core::Coord;
use squec_io::parser::parse_coord_arg;
use std::path::PathBuf;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Chain selection strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SolverKind {
    /// Exact covering set, enumerated up to `--max-cover-edges`
    Cover,
    /// Pairwise matching with boundary sinks
    Matching,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulates random data-qubit errors and writes their X syndromes
    Gen {
        #[arg(long, default_value = "23,23", value_parser = parse_coord_arg)]
        size: Coord,
        #[arg(long, value_parser = parse_coord_arg)]
        origin: Option<Coord>,
        #[arg(long, default_value = "bench.b8")]
        b8: PathBuf,
        #[arg(long, default_value_t = 10_000)]
        shots: usize,
        #[arg(long, default_value_t = 0.01)]
        p: f64,
        #[arg(long, default_value_t = 12345)]
        seed: u64,
    },
    /// Decodes every shot of a .b8 file in parallel
    Run {
        #[arg(long, default_value = "23,23", value_parser = parse_coord_arg)]
        size: Coord,
        #[arg(long, value_parser = parse_coord_arg)]
        origin: Option<Coord>,
        #[arg(short, long)]
        b8: PathBuf,
        #[arg(long, value_enum, default_value_t = SolverKind::Cover)]
        solver: SolverKind,
        #[arg(long, default_value_t = squec_core::ExhaustiveCover::DEFAULT_MAX_EDGES)]
        max_cover_edges: usize,
    },
    /// Decodes one syndrome and prints the data qubits to flip
    Decode {
        #[arg(long, default_value = "23,23", value_parser = parse_coord_arg)]
        size: Coord,
        #[arg(long, value_parser = parse_coord_arg)]
        origin: Option<Coord>,
        /// Flagged ancillae, e.g. "8,12 10,10"
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        flags: Option<String>,
        /// Syndrome file with one or more coordinates per line
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = SolverKind::Cover)]
        solver: SolverKind,
        /// Also print the chain endpoints
        #[arg(long)]
        pairing: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Gen {
            size,
            origin,
            b8,
            shots,
            p,
            seed,
        } => {
            generator::generate_shots(size, origin, &b8, shots, p, seed)?;
        }
        Commands::Run {
            size,
            origin,
            b8,
            solver,
            max_cover_edges,
        } => {
            throughput::run_benchmark(size, origin, &b8, solver, max_cover_edges)?;
        }
        Commands::Decode {
            size,
            origin,
            flags,
            file,
            solver,
            pairing,
        } => {
            let input = match (flags, file) {
                (Some(text), _) => decode::Input::Inline(text),
                (None, Some(path)) => decode::Input::File(path),
                (None, None) => anyhow::bail!("either --flags or --file is required"),
            };
            decode::run_decode(size, origin, input, solver, pairing)?;
        }
    }
    Ok(())
}

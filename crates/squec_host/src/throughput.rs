use crate::SolverKind;
use crate::stats::LatencyStats;
use anyhow::Result;
use log::{info, warn};
use rayon::prelude::*;
use squec_core::{BoundaryMatching, Coord, CoverSolver, Decoder, ExhaustiveCover, Polarity, Surface};
use squec_io::loader;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

// First latency bucket, in nanoseconds.
const LATENCY_BASE_NS: u64 = 1_000;

enum Outcome {
    /// Decoded; true if the flips reproduce the syndrome exactly.
    Decoded(bool),
    Failed,
}

pub fn run_benchmark(
    size: Coord,
    origin: Option<Coord>,
    b8_path: &Path,
    solver: SolverKind,
    max_cover_edges: usize,
) -> Result<()> {
    println!("Building {}x{} surface...", size.i, size.j);
    let start_load = Instant::now();
    let surface = Surface::new(size, origin);
    let x_ancillae = surface.ancillae(Some(Polarity::X));
    println!(
        "Surface built in {:?}. Nodes: {}, Edges: {}, X ancillae: {}",
        start_load.elapsed(),
        surface.graph().num_nodes(),
        surface.graph().num_edges(),
        x_ancillae.len()
    );

    println!("Loading Shots from {}...", b8_path.display());
    let raw_bits = loader::load_b8_file(b8_path)?;
    let shots = loader::slice_shots(&raw_bits, x_ancillae.len());
    let syndromes = loader::shots_to_syndromes(&shots, &x_ancillae);
    println!("Loaded {} shots.", syndromes.len());

    println!("Starting Benchmark (Parallel - Rayon, solver {:?})...", solver);
    let start_bench = Instant::now();
    let results = match solver {
        SolverKind::Cover => {
            let decoder = Decoder::with_solver(ExhaustiveCover::new(max_cover_edges));
            decode_all(&decoder, &surface, &syndromes)
        }
        SolverKind::Matching => {
            let decoder = Decoder::with_solver(BoundaryMatching::default());
            decode_all(&decoder, &surface, &syndromes)
        }
    };
    let duration = start_bench.elapsed();

    let mut stats = LatencyStats::new(LATENCY_BASE_NS);
    let mut decoded = 0usize;
    let mut cleared = 0usize;
    for (nanos, outcome) in &results {
        stats.update(*nanos);
        if let Outcome::Decoded(clean) = outcome {
            decoded += 1;
            if *clean {
                cleared += 1;
            }
        }
    }

    let seconds = duration.as_secs_f64();
    let throughput = syndromes.len() as f64 / seconds;

    println!("Results");
    println!("Time: {:.4} s", seconds);
    println!("Throughput: {:.2} shots/s", throughput);
    println!("Decoded: {}/{}", decoded, syndromes.len());
    println!("Residual cleared: {}/{}", cleared, syndromes.len());
    stats.print_report();
    info!("benchmark finished in {:?}", duration);

    Ok(())
}

fn decode_all<S: CoverSolver + Sync>(
    decoder: &Decoder<S>,
    surface: &Surface,
    syndromes: &[BTreeSet<Coord>],
) -> Vec<(u64, Outcome)> {
    syndromes
        .par_iter()
        .enumerate()
        .map(|(shot, syndrome)| {
            let start = Instant::now();
            let result = decoder.decode(surface, Some(syndrome));
            let nanos = start.elapsed().as_nanos() as u64;
            let outcome = match result {
                Ok(flips) => {
                    Outcome::Decoded(surface.syndrome_of(&flips, Polarity::X) == *syndrome)
                }
                Err(e) => {
                    warn!("shot {}: {}", shot, e);
                    Outcome::Failed
                }
            };
            (nanos, outcome)
        })
        .collect()
}

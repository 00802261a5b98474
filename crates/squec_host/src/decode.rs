use crate::SolverKind;
use anyhow::{Context, Result};
use log::info;
use squec_core::{BoundaryMatching, Coord, CoverSolver, Decoder, ExhaustiveCover, Surface};
use squec_io::parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub enum Input {
    Inline(String),
    File(PathBuf),
}

/// Decodes a single syndrome and prints the flip set.
pub fn run_decode(
    size: Coord,
    origin: Option<Coord>,
    input: Input,
    solver: SolverKind,
    pairing: bool,
) -> Result<()> {
    let flagged = match input {
        Input::Inline(text) => parser::parse_syndrome(&text).context("Failed to parse --flags")?,
        Input::File(path) => parser::load_syndrome_file(&path)?,
    };
    let surface = Surface::new(size, origin);
    info!(
        "decoding {} flagged ancillae on a {}x{} surface",
        flagged.len(),
        size.i,
        size.j
    );

    match solver {
        SolverKind::Cover => {
            let decoder = Decoder::with_solver(ExhaustiveCover::default());
            report(&decoder, &surface, &flagged, pairing)
        }
        SolverKind::Matching => {
            let decoder = Decoder::with_solver(BoundaryMatching::default());
            report(&decoder, &surface, &flagged, pairing)
        }
    }
}

fn report<S: CoverSolver>(
    decoder: &Decoder<S>,
    surface: &Surface,
    flagged: &BTreeSet<Coord>,
    pairing: bool,
) -> Result<()> {
    let flips = decoder.decode(surface, Some(flagged))?;
    println!("Flips ({}):", flips.len());
    for dq in &flips {
        println!("  {}", dq);
    }

    if pairing {
        let pairs = decoder.optimal_pairing(surface, Some(flagged))?;
        println!("Pairing ({}):", pairs.len());
        for (source, target) in pairs {
            println!("  {} -> {}", source, target);
        }
    }
    Ok(())
}

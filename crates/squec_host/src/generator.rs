//! Test data generator for decoder benchmarks.
//!
//! Builds a surface, applies independent random flips to its data qubits, and
//! records the X syndrome each error pattern produces. Shots are written as a
//! .b8 file laid out over the surface's sorted X-ancilla list so the `run`
//! command can decode them back on the same lattice.

use anyhow::{Result, ensure};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use squec_core::{Coord, Polarity, QubitKind, Surface};
use squec_io::loader;
use std::collections::BTreeSet;
use std::path::Path;

/// Generates random syndrome shots.
///
/// # Arguments
///
/// * `size` - Surface size
/// * `origin` - Surface origin, `(0, 0)` when absent
/// * `b8_path` - Output path for the packed shots
/// * `num_shots` - Number of shots to generate
/// * `p` - Flip probability of every data qubit in every shot
/// * `seed` - Seed of the error sampler
///
/// # Returns
///
/// Ok(()) on success, or an error for an invalid probability or a failed
/// write.
pub fn generate_shots(
    size: Coord,
    origin: Option<Coord>,
    b8_path: &Path,
    num_shots: usize,
    p: f64,
    seed: u64,
) -> Result<()> {
    ensure!((0.0..=1.0).contains(&p), "error rate {} is not a probability", p);
    println!("Generating {}x{} surface (p={})...", size.i, size.j, p);

    let surface = Surface::new(size, origin);
    let data: Vec<Coord> = surface
        .graph()
        .nodes()
        .filter(|(_, q)| q.kind() == QubitKind::Data)
        .map(|(c, _)| c)
        .collect();
    let x_ancillae = surface.ancillae(Some(Polarity::X));
    println!(
        "{} data qubits, {} X ancillae per shot",
        data.len(),
        x_ancillae.len()
    );

    println!("Simulating {} shots...", num_shots);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut flagged_total = 0usize;
    let syndromes: Vec<BTreeSet<Coord>> = (0..num_shots)
        .map(|_| {
            let errors = sample_errors(&mut rng, &data, p);
            let syndrome = surface.syndrome_of(&errors, Polarity::X);
            flagged_total += syndrome.len();
            syndrome
        })
        .collect();
    debug!("{} flagged ancillae across all shots", flagged_total);

    loader::write_b8_file(b8_path, &syndromes, &x_ancillae)?;
    println!(
        "Wrote {} (avg {:.2} flags/shot)",
        b8_path.display(),
        flagged_total as f64 / num_shots.max(1) as f64
    );
    Ok(())
}

/// Flips each data qubit independently with probability `p`.
pub fn sample_errors<R: Rng>(rng: &mut R, data: &[Coord], p: f64) -> BTreeSet<Coord> {
    data.iter().copied().filter(|_| rng.gen_bool(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_is_reproducible() {
        let data: Vec<Coord> = (0..50).map(|k| Coord::new(1, 2 * k + 1)).collect();
        let a = sample_errors(&mut StdRng::seed_from_u64(7), &data, 0.3);
        let b = sample_errors(&mut StdRng::seed_from_u64(7), &data, 0.3);
        assert_eq!(a, b);
        assert!(sample_errors(&mut StdRng::seed_from_u64(7), &data, 0.0).is_empty());
        assert_eq!(sample_errors(&mut StdRng::seed_from_u64(7), &data, 1.0).len(), 50);
    }
}

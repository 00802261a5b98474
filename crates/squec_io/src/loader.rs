use anyhow::{Context, Result, ensure};
use bitvec::prelude::*;
use log::debug;
use squec_core::Coord;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Loads a .b8 file (packed shot data).
pub fn load_b8_file<P: AsRef<Path>>(path: P) -> Result<BitVec<u8, Lsb0>> {
    let mut file = File::open(path).context("Failed to open .b8 file")?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    // Bit 0 of each byte is the first ancilla of that byte.
    let bits = BitVec::<u8, Lsb0>::from_vec(buffer);
    Ok(bits)
}

/// Splits packed data into shots of `bits_per_shot` bits.
///
/// Each shot occupies a whole number of bytes; padding bits are dropped, as
/// is any partial shot at the end.
pub fn slice_shots(raw_bits: &BitVec<u8, Lsb0>, bits_per_shot: usize) -> Vec<Vec<bool>> {
    let bytes_per_shot = bits_per_shot.div_ceil(8);
    let stride_bits = bytes_per_shot * 8;
    if stride_bits == 0 {
        return Vec::new();
    }

    let num_shots = raw_bits.len() / stride_bits;
    let mut shots = Vec::with_capacity(num_shots);

    for i in 0..num_shots {
        let start = i * stride_bits;
        let end = start + bits_per_shot;

        let slice = &raw_bits[start..end];
        let shot_bools: Vec<bool> = slice.iter().map(|b| *b).collect();
        shots.push(shot_bools);
    }

    shots
}

/// Maps shot bits onto ancilla coordinates.
///
/// Bit `k` of a shot flags `ancillae[k]`. Bits past the end of `ancillae`
/// are ignored.
pub fn shots_to_syndromes(shots: &[Vec<bool>], ancillae: &[Coord]) -> Vec<BTreeSet<Coord>> {
    shots
        .iter()
        .map(|shot| {
            shot.iter()
                .zip(ancillae)
                .filter(|&(&bit, _)| bit)
                .map(|(_, &c)| c)
                .collect()
        })
        .collect()
}

/// Packs one syndrome into shot bits over `ancillae`.
///
/// # Returns
///
/// The bits padded to a whole byte, or an error if the syndrome flags an
/// ancilla missing from the list.
pub fn pack_shot(syndrome: &BTreeSet<Coord>, ancillae: &[Coord]) -> Result<BitVec<u8, Lsb0>> {
    let mut bits = bitvec![u8, Lsb0; 0; ancillae.len().div_ceil(8) * 8];
    let mut placed = 0;
    for (k, c) in ancillae.iter().enumerate() {
        if syndrome.contains(c) {
            bits.set(k, true);
            placed += 1;
        }
    }
    ensure!(
        placed == syndrome.len(),
        "syndrome flags {} ancillae outside the shot layout",
        syndrome.len() - placed
    );
    Ok(bits)
}

/// Writes syndromes as a .b8 file laid out over `ancillae`.
pub fn write_b8_file<P: AsRef<Path>>(
    path: P,
    syndromes: &[BTreeSet<Coord>],
    ancillae: &[Coord],
) -> Result<()> {
    let path = path.as_ref();
    let mut bytes = Vec::with_capacity(syndromes.len() * ancillae.len().div_ceil(8));
    for syndrome in syndromes {
        bytes.extend_from_slice(pack_shot(syndrome, ancillae)?.as_raw_slice());
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create .b8 file {}", path.display()))?;
    file.write_all(&bytes)?;
    debug!(
        "wrote {} shots ({} bytes) to {}",
        syndromes.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

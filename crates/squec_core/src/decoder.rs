use crate::DecodeError;
use crate::cover::{CoverSolver, ExhaustiveCover};
use crate::metagraph::{Metagraph, build_metagraph};
use crate::surface::Surface;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use log::debug;
use squec_common::{Coord, Polarity, Qubit};

/// Turns flagged ancillae into the data qubits to flip.
///
/// Generic over the solver that picks correction chains from the metagraph.
/// The default [`ExhaustiveCover`] finds a minimum-weight cover, while
/// [`crate::matching::BoundaryMatching`] gives every flag exactly one chain.
#[derive(Clone, Debug, Default)]
pub struct Decoder<S: CoverSolver = ExhaustiveCover> {
    solver: S,
}

impl Decoder<ExhaustiveCover> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: CoverSolver> Decoder<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Decodes the syndrome into a flip set.
    ///
    /// An isolated flag on a boundary ancilla with two data neighbors is
    /// resolved locally to a single data qubit. Everything else goes through
    /// the metagraph, and the data qubits along the selected chains are
    /// toggled so that a qubit covered by two chains is left alone.
    ///
    /// # Arguments
    ///
    /// * `surface` - Lattice to decode on
    /// * `flagged` - Ancillae to decode, or `None` for the surface's syndrome
    ///
    /// # Returns
    ///
    /// The data qubits to flip, or the first validation, topology or solver
    /// error encountered.
    pub fn decode(
        &self,
        surface: &Surface,
        flagged: Option<&BTreeSet<Coord>>,
    ) -> Result<BTreeSet<Coord>, DecodeError> {
        let flagged = validated(surface, flagged)?;
        if flagged.is_empty() {
            return Ok(BTreeSet::new());
        }

        if let &[ancilla] = flagged.as_slice() {
            if let Some(dq) = isolated_flip(surface, ancilla)? {
                debug!("isolated flag at {} resolved to {}", ancilla, dq);
                return Ok(BTreeSet::from([dq]));
            }
        }

        let (metagraph, selection) = self.select(surface, &flagged)?;
        let graph = surface.graph();
        let mut flips = BTreeSet::new();
        for &idx in &selection {
            for &c in &metagraph.edges[idx].path {
                if graph.qubit(c) == Some(Qubit::Data) && !flips.remove(&c) {
                    flips.insert(c);
                }
            }
        }
        Ok(flips)
    }

    /// Endpoints of the chains the solver selects, in selection order.
    ///
    /// Never takes the isolated-flag shortcut, so a single flag reports its
    /// boundary chain.
    pub fn optimal_pairing(
        &self,
        surface: &Surface,
        flagged: Option<&BTreeSet<Coord>>,
    ) -> Result<Vec<(Coord, Coord)>, DecodeError> {
        let flagged = validated(surface, flagged)?;
        if flagged.is_empty() {
            return Ok(Vec::new());
        }
        let (metagraph, selection) = self.select(surface, &flagged)?;
        Ok(selection
            .iter()
            .map(|&idx| {
                let e = &metagraph.edges[idx];
                (e.source, e.target)
            })
            .collect())
    }

    fn select(
        &self,
        surface: &Surface,
        flagged: &[Coord],
    ) -> Result<(Metagraph, Vec<usize>), DecodeError> {
        let metagraph = build_metagraph(surface, flagged)?;
        let selection = self.solver.select(&metagraph, &metagraph.vertices)?;
        debug!(
            "{} flags, {} metagraph edges, {} selected",
            flagged.len(),
            metagraph.num_edges(),
            selection.len()
        );
        Ok((metagraph, selection))
    }
}

/// Decodes with the default exhaustive solver.
pub fn decode(
    surface: &Surface,
    flagged: Option<&BTreeSet<Coord>>,
) -> Result<BTreeSet<Coord>, DecodeError> {
    Decoder::new().decode(surface, flagged)
}

/// Chain endpoints chosen by the default exhaustive solver.
pub fn optimal_pairing(
    surface: &Surface,
    flagged: Option<&BTreeSet<Coord>>,
) -> Result<Vec<(Coord, Coord)>, DecodeError> {
    Decoder::new().optimal_pairing(surface, flagged)
}

/// Flagged ancillae in coordinate order, each checked to be a supported
/// ancilla of the surface.
fn validated(
    surface: &Surface,
    flagged: Option<&BTreeSet<Coord>>,
) -> Result<Vec<Coord>, DecodeError> {
    let flagged = flagged.unwrap_or(surface.flagged_set());
    for &coord in flagged {
        match surface.polarity(coord)? {
            Polarity::X | Polarity::Z => {}
            polarity => return Err(DecodeError::UnsupportedPolarity { coord, polarity }),
        }
    }
    Ok(flagged.iter().copied().collect())
}

/// Local answer for an isolated flag on a boundary ancilla.
///
/// Applies only to an ancilla of degree 2 on the lattice border. Its data
/// neighbors are the candidates, and a candidate qualifies when the flagged
/// ancilla is its only neighbor of that polarity.
///
/// # Returns
///
/// `Some(qubit)` for a single qualifying candidate, `None` when the shortcut
/// does not apply, or `AmbiguousTopology` when zero or several qualify.
pub fn isolated_flip(surface: &Surface, ancilla: Coord) -> Result<Option<Coord>, DecodeError> {
    let graph = surface.graph();
    let polarity = graph.polarity(ancilla)?;
    if graph.degree(ancilla) != 2 || !surface.on_boundary(ancilla) {
        return Ok(None);
    }

    let candidates: Vec<Coord> = graph
        .edges(ancilla)
        .iter()
        .map(|e| e.target)
        .filter(|&c| graph.qubit(c) == Some(Qubit::Data))
        .collect();
    let same_polarity = |dq: Coord| {
        graph
            .edges(dq)
            .iter()
            .filter(|e| graph.qubit(e.target) == Some(Qubit::Ancilla(polarity)))
            .count()
    };
    let mut qualifying = candidates.iter().copied().filter(|&dq| same_polarity(dq) == 1);

    match (qualifying.next(), qualifying.next()) {
        (Some(dq), None) => Ok(Some(dq)),
        _ => Err(DecodeError::AmbiguousTopology {
            ancilla,
            candidates,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::BoundaryMatching;

    fn c(i: i32, j: i32) -> Coord {
        Coord::new(i, j)
    }

    fn set(coords: &[(i32, i32)]) -> BTreeSet<Coord> {
        coords.iter().map(|&p| Coord::from(p)).collect()
    }

    #[test]
    fn empty_syndrome_needs_no_flips() {
        let s = Surface::new((23, 23), None);
        assert_eq!(decode(&s, None), Ok(BTreeSet::new()));
        assert_eq!(optimal_pairing(&s, Some(&BTreeSet::new())), Ok(vec![]));
    }

    #[test]
    fn uses_surface_syndrome_by_default() {
        let mut s = Surface::new((23, 23), None);
        for p in [(8, 12), (10, 10), (12, 12), (14, 14)] {
            s.flag(p.into()).unwrap();
        }
        assert_eq!(decode(&s, None), Ok(set(&[(9, 11), (13, 13)])));
    }

    #[test]
    fn explicit_set_overrides_surface_syndrome() {
        let mut s = Surface::new((23, 23), None);
        s.flag(c(2, 2)).unwrap();
        let flags = set(&[(10, 10), (10, 14)]);
        assert_eq!(decode(&s, Some(&flags)), Ok(set(&[(11, 11), (11, 13)])));
    }

    #[test]
    fn corner_flags_resolve_locally() {
        let s = Surface::new((23, 23), None);
        assert_eq!(isolated_flip(&s, c(0, 20)), Ok(Some(c(1, 21))));
        assert_eq!(isolated_flip(&s, c(22, 2)), Ok(Some(c(21, 1))));
        assert_eq!(isolated_flip(&s, c(2, 0)), Ok(Some(c(1, 1))));
        assert_eq!(isolated_flip(&s, c(20, 22)), Ok(Some(c(21, 21))));
        assert_eq!(decode(&s, Some(&set(&[(0, 20)]))), Ok(set(&[(1, 21)])));
    }

    #[test]
    fn interior_flags_skip_the_shortcut() {
        let s = Surface::new((23, 23), None);
        assert_eq!(isolated_flip(&s, c(10, 10)), Ok(None));
        // Degree 4 on the far column.
        assert_eq!(isolated_flip(&s, c(12, 20)), Ok(None));
    }

    #[test]
    fn edge_midpoint_is_ambiguous() {
        let s = Surface::new((23, 23), None);
        assert_eq!(
            decode(&s, Some(&set(&[(0, 4)]))),
            Err(DecodeError::AmbiguousTopology {
                ancilla: c(0, 4),
                candidates: vec![c(1, 3), c(1, 5)],
            })
        );
    }

    #[test]
    fn pairing_always_uses_chains() {
        let s = Surface::new((23, 23), None);
        assert_eq!(
            optimal_pairing(&s, Some(&set(&[(0, 20)]))),
            Ok(vec![(c(0, 20), c(1, 21))])
        );
    }

    #[test]
    fn solvers_agree_on_small_syndrome() {
        let s = Surface::new((23, 23), None);
        let flags = set(&[(8, 12), (10, 10), (12, 12), (14, 14)]);
        let matching = Decoder::with_solver(BoundaryMatching::default());
        assert_eq!(matching.decode(&s, Some(&flags)), decode(&s, Some(&flags)));
    }

    #[test]
    fn rejects_bad_flags() {
        let s = Surface::new((23, 23), None);
        assert_eq!(
            decode(&s, Some(&set(&[(9, 9)]))),
            Err(DecodeError::NotAnAncilla(c(9, 9)))
        );
        assert_eq!(
            decode(&s, Some(&set(&[(10, 10), (-2, 0)]))),
            Err(DecodeError::UnknownCoordinate(c(-2, 0)))
        );
        assert_eq!(
            decode(&s, Some(&set(&[(10, 12)]))),
            Err(DecodeError::Uncoverable(c(10, 12)))
        );
    }
}

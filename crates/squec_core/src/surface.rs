use crate::DecodeError;
use crate::graph::LatticeGraph;
use crate::lattice::build_surface_graph;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use log::debug;
use squec_common::{Coord, Polarity, Qubit, QubitKind};

/// A constructed lattice together with its current syndrome.
///
/// The syndrome is the set of flagged ancillae. Every coordinate in it names
/// an ancilla node of the owned graph; the mutators reject anything else.
#[derive(Clone, Debug)]
pub struct Surface {
    size: Coord,
    origin: Coord,
    graph: LatticeGraph,
    flagged: BTreeSet<Coord>,
}

impl Surface {
    /// Builds the lattice for `size` at `origin` (default `(0, 0)`) with an
    /// empty syndrome.
    pub fn new(size: impl Into<Coord>, origin: Option<Coord>) -> Self {
        let size = size.into();
        let origin = origin.unwrap_or_default();
        let graph = build_surface_graph(size, origin);
        debug!(
            "built {}x{} surface at {}: {} nodes, {} edges",
            size.i,
            size.j,
            origin,
            graph.num_nodes(),
            graph.num_edges()
        );
        Self::from_graph(size, origin, graph)
    }

    /// Wraps a hand-built graph.
    ///
    /// `size` and `origin` still drive the boundary rules used by the
    /// decoder, so they should describe the region the graph occupies.
    pub fn from_graph(size: Coord, origin: Coord, graph: LatticeGraph) -> Self {
        Self {
            size,
            origin,
            graph,
            flagged: BTreeSet::new(),
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn graph(&self) -> &LatticeGraph {
        &self.graph
    }

    /// Smallest data-qubit coordinate per axis.
    ///
    /// Data qubits sit at odd offsets from the origin, so this is the origin
    /// component when it is odd and one past it when it is even.
    pub fn minimum_data_coord(&self) -> Coord {
        let min = |o: i32| if o.rem_euclid(2) == 1 { o } else { o + 1 };
        Coord::new(min(self.origin.i), min(self.origin.j))
    }

    /// Largest data-qubit coordinate per axis.
    pub fn maximum_data_coord(&self) -> Coord {
        let max = |o: i32, s: i32| {
            let end = o + s;
            if end.rem_euclid(2) == 1 { end - 2 } else { end - 1 }
        };
        Coord::new(
            max(self.origin.i, self.size.i),
            max(self.origin.j, self.size.j),
        )
    }

    /// Largest even coordinate not past the far edge, per axis.
    pub fn max_ancilla_coord(&self) -> Coord {
        let max = |o: i32, s: i32| {
            let end = o + s;
            if end.rem_euclid(2) == 0 { end } else { end - 1 }
        };
        Coord::new(
            max(self.origin.i, self.size.i),
            max(self.origin.j, self.size.j),
        )
    }

    /// True if `coord` lies on the origin row or column, or on the last
    /// ancilla row or column.
    pub fn on_boundary(&self, coord: Coord) -> bool {
        let far = self.max_ancilla_coord();
        coord.i == self.origin.i || coord.j == self.origin.j || coord.i == far.i || coord.j == far.j
    }

    pub fn polarity(&self, coord: Coord) -> Result<Polarity, DecodeError> {
        self.graph.polarity(coord)
    }

    /// Adds an ancilla to the syndrome.
    ///
    /// # Returns
    ///
    /// Ok(()) on success (flagging twice is not an error), `NotAnAncilla` for
    /// a data qubit, or `UnknownCoordinate` for a coordinate off the lattice.
    pub fn flag(&mut self, coord: Coord) -> Result<(), DecodeError> {
        self.graph.polarity(coord)?;
        self.flagged.insert(coord);
        Ok(())
    }

    /// Removes an ancilla from the syndrome, returning whether it was flagged.
    pub fn unflag(&mut self, coord: Coord) -> bool {
        self.flagged.remove(&coord)
    }

    /// Flips the flag of an ancilla and returns its new state.
    pub fn toggle_flag(&mut self, coord: Coord) -> Result<bool, DecodeError> {
        if self.unflag(coord) {
            return Ok(false);
        }
        self.flag(coord)?;
        Ok(true)
    }

    pub fn set_flagged(&mut self, coord: Coord, flagged: bool) -> Result<(), DecodeError> {
        if flagged {
            self.flag(coord)
        } else {
            self.unflag(coord);
            Ok(())
        }
    }

    pub fn is_flagged(&self, coord: Coord) -> bool {
        self.flagged.contains(&coord)
    }

    pub fn clear_flags(&mut self) {
        self.flagged.clear();
    }

    /// Flagged ancillae in coordinate order.
    pub fn flagged_set(&self) -> &BTreeSet<Coord> {
        &self.flagged
    }

    /// Ancillae of the lattice in coordinate order, optionally restricted to
    /// one polarity.
    pub fn ancillae(&self, polarity: Option<Polarity>) -> Vec<Coord> {
        self.graph
            .nodes()
            .filter(|(_, q)| match q {
                Qubit::Ancilla(p) => polarity.is_none_or(|want| *p == want),
                Qubit::Data => false,
            })
            .map(|(c, _)| c)
            .collect()
    }

    /// Syndrome produced by flipping the given data qubits.
    ///
    /// An ancilla of `polarity` is flagged when an odd number of its data
    /// neighbors are flipped. Coordinates that do not hold a data qubit are
    /// ignored.
    pub fn syndrome_of(&self, data_flips: &BTreeSet<Coord>, polarity: Polarity) -> BTreeSet<Coord> {
        let mut syndrome = BTreeSet::new();
        for &dq in data_flips {
            if self.graph.qubit(dq).map(Qubit::kind) != Some(QubitKind::Data) {
                continue;
            }
            for edge in self.graph.edges(dq) {
                if self.graph.qubit(edge.target) == Some(Qubit::Ancilla(polarity))
                    && !syndrome.remove(&edge.target)
                {
                    syndrome.insert(edge.target);
                }
            }
        }
        syndrome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: i32, j: i32) -> Coord {
        Coord::new(i, j)
    }

    #[test]
    fn keeps_requested_size_and_origin() {
        let s = Surface::new((10, 20), None);
        assert_eq!(s.size(), c(10, 20));
        assert_eq!(s.origin(), c(0, 0));
        let s = Surface::new([9, 9], Some(c(2, 2)));
        assert_eq!(s.origin(), c(2, 2));
    }

    #[test]
    fn data_coordinate_bounds() {
        let s = Surface::new((23, 23), None);
        assert_eq!(s.minimum_data_coord(), c(1, 1));
        assert_eq!(s.maximum_data_coord(), c(21, 21));
        assert_eq!(s.max_ancilla_coord(), c(22, 22));

        let s = Surface::new((10, 20), None);
        assert_eq!(s.minimum_data_coord(), c(1, 1));
        assert_eq!(s.maximum_data_coord(), c(9, 19));
        assert_eq!(s.max_ancilla_coord(), c(10, 20));

        let s = Surface::new((9, 9), Some(c(-4, -4)));
        assert_eq!(s.minimum_data_coord(), c(-3, -3));
        assert_eq!(s.maximum_data_coord(), c(3, 3));

        let s = Surface::new((9, 9), Some(c(3, 3)));
        assert_eq!(s.minimum_data_coord(), c(3, 3));
    }

    #[test]
    fn flag_rejects_non_ancillae() {
        let mut s = Surface::new((23, 23), None);
        assert_eq!(s.flag(c(9, 11)), Err(DecodeError::NotAnAncilla(c(9, 11))));
        assert_eq!(s.flag(c(40, 40)), Err(DecodeError::UnknownCoordinate(c(40, 40))));
        assert!(s.flagged_set().is_empty());

        s.flag(c(10, 10)).unwrap();
        s.flag(c(10, 10)).unwrap();
        assert_eq!(s.flagged_set().len(), 1);
        assert!(s.is_flagged(c(10, 10)));
        assert!(s.unflag(c(10, 10)));
        assert!(!s.unflag(c(10, 10)));
    }

    #[test]
    fn toggle_and_set_flagged() {
        let mut s = Surface::new((23, 23), None);
        assert_eq!(s.toggle_flag(c(12, 12)), Ok(true));
        assert_eq!(s.toggle_flag(c(12, 12)), Ok(false));
        assert!(s.toggle_flag(c(11, 11)).is_err());

        s.set_flagged(c(8, 12), true).unwrap();
        s.set_flagged(c(10, 12), true).unwrap();
        s.set_flagged(c(8, 12), false).unwrap();
        assert_eq!(s.flagged_set().iter().copied().collect::<Vec<_>>(), vec![c(10, 12)]);
        s.clear_flags();
        assert!(s.flagged_set().is_empty());
    }

    #[test]
    fn ancillae_by_polarity() {
        let s = Surface::new((5, 5), None);
        assert_eq!(s.ancillae(None), vec![c(2, 0), c(2, 2), c(2, 4)]);
        assert_eq!(s.ancillae(Some(Polarity::X)), vec![c(2, 2)]);
        assert_eq!(s.ancillae(Some(Polarity::Z)), vec![c(2, 0), c(2, 4)]);
        assert!(s.ancillae(Some(Polarity::Y)).is_empty());
    }

    #[test]
    fn syndrome_of_flipped_data() {
        let s = Surface::new((23, 23), None);
        let one: BTreeSet<Coord> = [c(11, 11)].into_iter().collect();
        let x: Vec<Coord> = s.syndrome_of(&one, Polarity::X).into_iter().collect();
        assert_eq!(x, vec![c(10, 10), c(12, 12)]);
        let z: Vec<Coord> = s.syndrome_of(&one, Polarity::Z).into_iter().collect();
        assert_eq!(z, vec![c(10, 12), c(12, 10)]);

        // Two flips sharing an ancilla cancel there.
        let chain: BTreeSet<Coord> = [c(9, 11), c(11, 11)].into_iter().collect();
        let x: Vec<Coord> = s.syndrome_of(&chain, Polarity::X).into_iter().collect();
        assert_eq!(x, vec![c(8, 12), c(12, 12)]);

        let junk: BTreeSet<Coord> = [c(10, 10), c(50, 50)].into_iter().collect();
        assert!(s.syndrome_of(&junk, Polarity::X).is_empty());
    }
}

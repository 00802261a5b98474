//! Common definitions shared across the SQuEC decoder workspace.
//!
//! This crate provides the lattice coordinate type, the qubit and ancilla
//! classification used to tag lattice nodes, and the edge-weight constants
//! that define distances on the surface. It is shared by the decoder core,
//! the I/O utilities, and the host tools.

#![cfg_attr(not(test), no_std)]

use core::fmt;
use core::ops::{Add, Sub};

/// Edge weights of the surface connectivity graph.
///
/// Shortest-path searches run over these weights, so the ratio between the
/// two constants decides whether a correction chain prefers stepping along
/// data qubits or hopping diagonally through ancillae.
pub mod weights {
    /// Weight of an edge between two data qubits two steps apart on one axis.
    pub const DATA_DATA: u32 = 2;

    /// Weight of a diagonal edge between an ancilla and an adjacent data qubit.
    pub const ANCILLA_DATA: u32 = 1;
}

/// Integer lattice coordinate `(i, j)`.
///
/// Data qubits sit on odd/odd coordinates and ancillae on even/even
/// coordinates (for an even origin). Ordering is lexicographic on `(i, j)`,
/// which is the order flagged ancillae are handed to the decoder in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub i: i32,
    pub j: i32,
}

impl Coord {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Component-wise difference `self - other`.
    pub fn separation_from(self, other: Coord) -> Coord {
        self - other
    }

    /// True when the first component is odd, i.e. the row holds data qubits.
    #[inline(always)]
    pub fn on_data_row(self) -> bool {
        self.i.rem_euclid(2) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((i, j): (i32, i32)) -> Self {
        Self { i, j }
    }
}

impl From<[i32; 2]> for Coord {
    fn from([i, j]: [i32; 2]) -> Self {
        Self { i, j }
    }
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.i + rhs.i, self.j + rhs.j)
    }
}

impl Add<(i32, i32)> for Coord {
    type Output = Coord;
    fn add(self, rhs: (i32, i32)) -> Coord {
        self + Coord::from(rhs)
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.i - rhs.i, self.j - rhs.j)
    }
}

impl Sub<(i32, i32)> for Coord {
    type Output = Coord;
    fn sub(self, rhs: (i32, i32)) -> Coord {
        self - Coord::from(rhs)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Stabilizer type measured by an ancilla qubit.
///
/// Lattice construction only ever produces `X` and `Z`. `Y` can be placed on
/// hand-built lattices but no decoding rule exists for it, and the decoder
/// rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    X,
    Z,
    Y,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Polarity::X => "X",
            Polarity::Z => "Z",
            Polarity::Y => "Y",
        };
        f.write_str(name)
    }
}

/// Broad classification of a lattice node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QubitKind {
    Data,
    Ancilla,
}

/// The qubit occupying a lattice node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qubit {
    /// Information-carrying qubit; the target of corrective flips.
    Data,
    /// Parity-check qubit of the given polarity.
    Ancilla(Polarity),
}

impl Qubit {
    pub fn kind(self) -> QubitKind {
        match self {
            Qubit::Data => QubitKind::Data,
            Qubit::Ancilla(_) => QubitKind::Ancilla,
        }
    }

    pub fn polarity(self) -> Option<Polarity> {
        match self {
            Qubit::Data => None,
            Qubit::Ancilla(p) => Some(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_compare_by_value() {
        assert_eq!(Coord::new(3, 5), Coord::from((3, 5)));
        assert_eq!(Coord::from([3, 5]), Coord::from((3, 5)));
        assert_ne!(Coord::new(3, 5), Coord::new(5, 3));
        assert!(Coord::new(2, 9) < Coord::new(3, 0));
    }

    #[test]
    fn separation_is_component_wise() {
        let a = Coord::new(10, 4);
        let b = Coord::new(7, 9);
        assert_eq!(a.separation_from(b), Coord::new(3, -5));
        assert_eq!(b.separation_from(a), Coord::new(-3, 5));
        assert_eq!(a.separation_from(a), Coord::default());
    }

    #[test]
    fn arithmetic_with_coords_and_pairs() {
        let a = Coord::new(4, -2);
        assert_eq!(a + Coord::new(1, 1), Coord::new(5, -1));
        assert_eq!(a + (-1, 3), Coord::new(3, 1));
        assert_eq!(a - Coord::new(4, -2), Coord::new(0, 0));
        assert_eq!(a - (1, 1), Coord::new(3, -3));
    }

    #[test]
    fn data_rows_are_odd() {
        assert!(Coord::new(1, 0).on_data_row());
        assert!(Coord::new(-3, 2).on_data_row());
        assert!(!Coord::new(-2, 1).on_data_row());
    }

    #[test]
    fn qubit_tags() {
        assert_eq!(Qubit::Data.kind(), QubitKind::Data);
        assert_eq!(Qubit::Data.polarity(), None);
        assert_eq!(Qubit::Ancilla(Polarity::Z).kind(), QubitKind::Ancilla);
        assert_eq!(Qubit::Ancilla(Polarity::Z).polarity(), Some(Polarity::Z));
    }
}

//! Core surface-code decoding algorithms and data structures.
//!
//! This crate provides the lattice connectivity model, the syndrome-owning
//! surface, weighted shortest paths, metagraph construction, the covering-set
//! and boundary-matching solvers, and the decoder that turns a set of flagged
//! ancillae into a set of data-qubit flips. Everything here is synchronous and
//! allocation-only (no_std + alloc), so the same code serves host tools and
//! embedded callers.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

/// Minimum-weight covering-set solver over a metagraph.
///
/// Enumerates edge subsets and keeps the cheapest one touching every required
/// vertex. Metagraphs too large to enumerate are solved exactly by a dynamic
/// program over subsets of the required vertices instead.
pub mod cover;

/// Decoder orchestration.
///
/// Validates the flagged set, resolves isolated boundary flips locally, and
/// otherwise runs the metagraph and solver pipeline before XOR-walking the
/// selected paths into a flip set.
pub mod decoder;

/// Lattice connectivity graph.
///
/// Coordinate-keyed adjacency structure holding the qubit at each node and
/// its weighted, insertion-ordered edges. Used by lattice construction, the
/// shortest-path search, and the decoder heuristics.
pub mod graph;

/// Surface-code lattice construction rules.
///
/// Places data qubits and ancilla candidates for a given size and origin,
/// wires the weighted edges, and prunes the nodes that encode the code's
/// boundary conditions.
pub mod lattice;

/// Exact minimum-weight matching with boundary sinks.
///
/// Dynamic program over subsets of the required vertices that pairs each
/// vertex with another one or with its boundary node. Shares the solver trait
/// with the covering-set search and is checked against it.
pub mod matching;

/// Metagraph construction over flagged ancillae.
///
/// Records the shortest lattice path between every pair of flagged ancillae
/// and from each X ancilla to its nearest vertical boundary.
pub mod metagraph;

/// Weighted shortest paths on the lattice graph.
pub mod path;

/// Surface ownership of the lattice and its syndrome.
///
/// Binds a constructed lattice to its size, origin, derived data-qubit
/// bounds, and the set of currently flagged ancillae.
pub mod surface;

pub use cover::{CoverSolver, ExhaustiveCover};
pub use decoder::{Decoder, decode, optimal_pairing};
pub use graph::LatticeGraph;
pub use matching::BoundaryMatching;
pub use metagraph::{MetaEdge, Metagraph, build_metagraph};
pub use path::shortest_path;
pub use surface::Surface;
pub use squec_common::{Coord, Polarity, Qubit, QubitKind};

/// Error types returned by lattice and decoding operations.
///
/// Decoding is a pure computation, so none of these are transient: each one
/// signals either an unimplemented feature, malformed input, or a syndrome the
/// configured solver cannot resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// An ancilla with a polarity that has no decoding rule was encountered.
    UnsupportedPolarity { coord: Coord, polarity: Polarity },

    /// The single-flip heuristic found zero or several qualifying data qubits.
    ///
    /// Indicates a lattice whose boundary does not single out one data qubit
    /// for an isolated flag. Carries the flagged ancilla and every data-qubit
    /// candidate that was inspected.
    AmbiguousTopology { ancilla: Coord, candidates: Vec<Coord> },

    /// An ancilla-only query was made on a data-qubit coordinate.
    NotAnAncilla(Coord),

    /// The coordinate does not name a node of the lattice.
    UnknownCoordinate(Coord),

    /// The two nodes lie in disconnected parts of the lattice.
    NoPath { from: Coord, to: Coord },

    /// No metagraph edge touches this required vertex.
    ///
    /// Happens for a Z ancilla flagged without any partner, since Z ancillae
    /// are given no boundary edge.
    Uncoverable(Coord),

    /// The required vertices admit no perfect matching with boundaries.
    NoMatching { vertices: usize },

    /// More required vertices than a subset-table solver allows.
    TooManyVertices { vertices: usize, limit: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnsupportedPolarity { coord, polarity } => {
                write!(f, "{} ancillae are not supported (found at {})", polarity, coord)
            }
            DecodeError::AmbiguousTopology { ancilla, candidates } => {
                write!(
                    f,
                    "ambiguous single flip at ancilla {}: candidate data qubits",
                    ancilla
                )?;
                for c in candidates {
                    write!(f, " {}", c)?;
                }
                Ok(())
            }
            DecodeError::NotAnAncilla(c) => write!(f, "{} is not an ancilla", c),
            DecodeError::UnknownCoordinate(c) => write!(f, "{} is not on the lattice", c),
            DecodeError::NoPath { from, to } => {
                write!(f, "no lattice path from {} to {}", from, to)
            }
            DecodeError::Uncoverable(c) => write!(f, "no pairing edge touches {}", c),
            DecodeError::NoMatching { vertices } => {
                write!(f, "no perfect matching over {} flagged ancillae", vertices)
            }
            DecodeError::TooManyVertices { vertices, limit } => {
                write!(f, "{} flagged ancillae, solver limit is {}", vertices, limit)
            }
        }
    }
}

impl core::error::Error for DecodeError {}

//! Surface-code lattice construction.
//!
//! Builds the connectivity graph of a planar surface with the given size and
//! origin. Data qubits occupy the coordinates offset by one from the origin
//! on both axes, ancilla candidates the coordinates at even offsets. Nodes
//! left dangling by the grid edge and the ancillae excluded by the
//! rough/smooth boundary convention are pruned before the graph is returned.

use crate::graph::LatticeGraph;
use alloc::vec::Vec;
use log::trace;
use squec_common::weights::{ANCILLA_DATA, DATA_DATA};
use squec_common::{Coord, Polarity, Qubit};

/// Polarity assigned to the ancilla at `coord`.
///
/// X when `(i + j)` is a multiple of four, Z otherwise.
pub fn ancilla_polarity(coord: Coord) -> Polarity {
    if (coord.i + coord.j).rem_euclid(4) == 0 {
        Polarity::X
    } else {
        Polarity::Z
    }
}

/// Whether the ancilla candidate at `coord` is left out of the lattice.
///
/// The origin itself is skipped, as are the candidates on the origin row with
/// `j mod 4 == 2` and on the origin column with `i mod 4 == 0`.
fn skips_ancilla(coord: Coord, origin: Coord) -> bool {
    let on_row = coord.i == origin.i;
    let on_col = coord.j == origin.j;
    (on_row && on_col)
        || (on_row && coord.j.rem_euclid(4) == 2)
        || (on_col && coord.i.rem_euclid(4) == 0)
}

/// Builds the surface connectivity graph.
///
/// Construction proceeds in three passes. Data qubits are placed first, each
/// linked with weight 2 to the data qubits two steps away along either axis
/// (an edge may reach past the grid, leaving an empty node behind). Ancilla
/// candidates follow, each linked with weight 1 to the up to four diagonal
/// nodes that already exist. Finally empty nodes are dropped, nodes with a
/// single connection are removed in creation order, and Z ancillae on the
/// maximum row and X ancillae on the maximum column are removed.
///
/// # Arguments
///
/// * `size` - Extent of the lattice along each axis
/// * `origin` - Coordinate of the lattice's lower corner
///
/// # Returns
///
/// The pruned lattice graph. Sizes too small to hold a qubit give an empty
/// graph.
pub fn build_surface_graph(size: Coord, origin: Coord) -> LatticeGraph {
    let mut graph = LatticeGraph::new();
    let end_i = origin.i + size.i;
    let end_j = origin.j + size.j;

    for i in (origin.i + 1..end_i).step_by(2) {
        for j in (origin.j + 1..end_j).step_by(2) {
            let here = Coord::new(i, j);
            graph.add_qubit(here, Qubit::Data);
            if i > origin.i + 1 {
                graph.link(here, here - (2, 0), DATA_DATA);
            }
            if i < end_i - 1 {
                graph.link(here, here + (2, 0), DATA_DATA);
            }
            if j > origin.j + 1 {
                graph.link(here, here - (0, 2), DATA_DATA);
            }
            if j < end_j - 1 {
                graph.link(here, here + (0, 2), DATA_DATA);
            }
        }
    }

    for i in (origin.i..end_i).step_by(2) {
        for j in (origin.j..end_j).step_by(2) {
            let here = Coord::new(i, j);
            if skips_ancilla(here, origin) {
                continue;
            }
            graph.add_qubit(here, Qubit::Ancilla(ancilla_polarity(here)));

            let low_i = i > origin.i;
            let high_i = i < end_i - 1;
            let low_j = j > origin.j;
            let high_j = j < end_j - 1;
            let diagonals = [
                (low_i && low_j, (-1, -1)),
                (low_i && high_j, (-1, 1)),
                (high_i && low_j, (1, -1)),
                (high_i && high_j, (1, 1)),
            ];
            for (in_bounds, offset) in diagonals {
                let target = here + offset;
                if in_bounds && graph.contains(target) {
                    graph.link(here, target, ANCILLA_DATA);
                }
            }
        }
    }

    graph.remove_empty_nodes();
    prune_dangling(&mut graph);
    prune_boundary_ancillae(&mut graph);
    graph
}

/// Removes nodes with exactly one connection, visiting nodes in creation
/// order and reading each degree as the pass goes.
fn prune_dangling(graph: &mut LatticeGraph) {
    let order = graph.creation_order().to_vec();
    for coord in order {
        if graph.degree(coord) == 1 {
            trace!("pruning dangling node {}", coord);
            graph.remove(coord);
        }
    }
}

fn prune_boundary_ancillae(graph: &mut LatticeGraph) {
    let (Some(max_i), Some(max_j)) = (
        graph.nodes().map(|(c, _)| c.i).max(),
        graph.nodes().map(|(c, _)| c.j).max(),
    ) else {
        return;
    };
    let doomed: Vec<Coord> = graph
        .nodes()
        .filter(|&(c, q)| match q {
            Qubit::Ancilla(Polarity::Z) => c.i == max_i,
            Qubit::Ancilla(Polarity::X) => c.j == max_j,
            _ => false,
        })
        .map(|(c, _)| c)
        .collect();
    for coord in doomed {
        graph.remove(coord);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squec_common::QubitKind;

    fn census(graph: &LatticeGraph) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for (_, q) in graph.nodes() {
            match q {
                Qubit::Data => counts.0 += 1,
                Qubit::Ancilla(Polarity::X) => counts.1 += 1,
                Qubit::Ancilla(_) => counts.2 += 1,
            }
        }
        counts
    }

    #[test]
    fn standard_lattice_shape() {
        let g = build_surface_graph(Coord::new(23, 23), Coord::new(0, 0));
        assert_eq!(g.num_nodes(), 241);
        assert_eq!(g.num_edges(), 660);
        assert_eq!(census(&g), (121, 60, 60));
    }

    #[test]
    fn small_lattice_adjacency() {
        let g = build_surface_graph(Coord::new(5, 5), Coord::new(0, 0));
        assert_eq!(g.num_nodes(), 7);
        assert_eq!(g.num_edges(), 12);
        assert_eq!(g.qubit(Coord::new(2, 0)), Some(Qubit::Ancilla(Polarity::Z)));
        assert_eq!(g.qubit(Coord::new(2, 2)), Some(Qubit::Ancilla(Polarity::X)));
        assert_eq!(g.qubit(Coord::new(2, 4)), Some(Qubit::Ancilla(Polarity::Z)));
        // (0, 4) and (4, 4) only ever touch one data qubit.
        assert!(!g.contains(Coord::new(0, 4)));
        assert!(!g.contains(Coord::new(4, 4)));
        // Z on the maximum row.
        assert!(!g.contains(Coord::new(4, 2)));

        let neighbors: Vec<(Coord, u32)> = g
            .edges(Coord::new(1, 1))
            .iter()
            .map(|e| (e.target, e.weight))
            .collect();
        assert_eq!(
            neighbors,
            vec![
                (Coord::new(3, 1), 2),
                (Coord::new(1, 3), 2),
                (Coord::new(2, 0), 1),
                (Coord::new(2, 2), 1),
            ]
        );
    }

    #[test]
    fn rectangular_and_offset_lattices() {
        let g = build_surface_graph(Coord::new(10, 20), Coord::new(0, 0));
        assert_eq!((g.num_nodes(), g.num_edges()), (92, 241));
        assert_eq!(census(&g), (50, 22, 20));

        let g = build_surface_graph(Coord::new(9, 9), Coord::new(2, 2));
        assert_eq!((g.num_nodes(), g.num_edges()), (31, 72));
        assert_eq!(census(&g), (16, 7, 8));

        let g = build_surface_graph(Coord::new(9, 9), Coord::new(-4, -4));
        assert_eq!((g.num_nodes(), g.num_edges()), (31, 72));

        let g = build_surface_graph(Coord::new(4, 3), Coord::new(20, 20));
        assert_eq!((g.num_nodes(), g.num_edges()), (3, 3));
    }

    #[test]
    fn qubits_follow_coordinate_parity() {
        for origin in [Coord::new(0, 0), Coord::new(2, 2), Coord::new(-4, -4)] {
            let g = build_surface_graph(Coord::new(13, 11), origin);
            for (c, q) in g.nodes() {
                let rel = c - origin;
                match q.kind() {
                    QubitKind::Data => {
                        assert_eq!((rel.i.rem_euclid(2), rel.j.rem_euclid(2)), (1, 1), "{}", c)
                    }
                    QubitKind::Ancilla => {
                        assert_eq!((rel.i.rem_euclid(2), rel.j.rem_euclid(2)), (0, 0), "{}", c)
                    }
                }
            }
        }
    }

    #[test]
    fn edge_weights_match_qubit_kinds() {
        let g = build_surface_graph(Coord::new(11, 11), Coord::new(0, 0));
        for (c, q) in g.nodes() {
            for e in g.edges(c) {
                let other = g.qubit(e.target).map(Qubit::kind);
                match (q.kind(), other) {
                    (QubitKind::Data, Some(QubitKind::Data)) => assert_eq!(e.weight, DATA_DATA),
                    (_, Some(_)) => assert_eq!(e.weight, ANCILLA_DATA),
                    (_, None) => panic!("edge from {} to missing node {}", c, e.target),
                }
            }
        }
    }

    #[test]
    fn tiny_sizes_give_empty_graphs() {
        let g = build_surface_graph(Coord::new(1, 1), Coord::new(0, 0));
        assert_eq!(g.num_nodes(), 0);
        let g = build_surface_graph(Coord::new(0, 7), Coord::new(0, 0));
        assert_eq!(g.num_nodes(), 0);
    }
}

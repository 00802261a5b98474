use crate::DecodeError;
use crate::path::shortest_path;
use crate::surface::Surface;
use alloc::vec::Vec;
use log::trace;
use squec_common::{Coord, Polarity};

/// Candidate correction chain between two metagraph vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaEdge {
    pub source: Coord,

    /// Another flagged ancilla, or the ground node for a boundary edge.
    pub target: Coord,

    /// Number of lattice nodes on the path, endpoints included.
    pub length: usize,

    /// Number of data qubits on the path; the edge's cost.
    pub data_qubits: u32,

    pub to_boundary: bool,

    /// Lattice nodes from `source` to `target`.
    pub path: Vec<Coord>,
}

impl MetaEdge {
    fn along(source: Coord, target: Coord, path: Vec<Coord>, to_boundary: bool) -> Self {
        let data_qubits = path.iter().filter(|c| c.on_data_row()).count() as u32;
        Self {
            source,
            target,
            length: path.len(),
            data_qubits,
            to_boundary,
            path,
        }
    }

    /// True if `v` is one of the edge's endpoints.
    pub fn touches(&self, v: Coord) -> bool {
        self.source == v || self.target == v
    }
}

/// Flagged ancillae and the candidate chains between them.
#[derive(Clone, Debug, Default)]
pub struct Metagraph {
    /// Flagged ancillae, in the order the metagraph was built from.
    pub vertices: Vec<Coord>,

    /// Edges in insertion order.
    pub edges: Vec<MetaEdge>,
}

impl Metagraph {
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Indices of the edges with `v` as an endpoint.
    pub fn touching(&self, v: Coord) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.touches(v))
            .map(|(idx, _)| idx)
    }
}

/// Ground node closing the boundary chain of the X ancilla at `u`.
///
/// Picks the nearer of the minimum and maximum data columns (the maximum on a
/// tie) and the data row just above `u` when it exists, else the one below.
pub fn ground_node(surface: &Surface, u: Coord) -> Coord {
    let min = surface.minimum_data_coord();
    let max = surface.maximum_data_coord();
    let col = if u.j - min.j < max.j - u.j { min.j } else { max.j };
    let above = Coord::new(u.i - 1, col);
    if surface.graph().contains(above) {
        above
    } else {
        Coord::new(u.i + 1, col)
    }
}

/// Builds the metagraph over the flagged ancillae `flagged`.
///
/// For each vertex, in order, an edge to every later vertex is added, then
/// the vertex's boundary edge if it is an X ancilla. Z ancillae get no
/// boundary edge.
///
/// # Returns
///
/// The metagraph, `UnsupportedPolarity` for a Y ancilla, or the lookup and
/// path errors for a coordinate that is not a connected ancilla.
pub fn build_metagraph(surface: &Surface, flagged: &[Coord]) -> Result<Metagraph, DecodeError> {
    let graph = surface.graph();
    let mut edges = Vec::new();

    for (a, &u) in flagged.iter().enumerate() {
        for &v in &flagged[a + 1..] {
            let path = shortest_path(graph, u, v)?;
            edges.push(MetaEdge::along(u, v, path, false));
        }
        match graph.polarity(u)? {
            Polarity::X => {
                let ground = ground_node(surface, u);
                let path = shortest_path(graph, u, ground)?;
                trace!("boundary edge {} -> {} over {} nodes", u, ground, path.len());
                edges.push(MetaEdge::along(u, ground, path, true));
            }
            Polarity::Z => {}
            polarity => return Err(DecodeError::UnsupportedPolarity { coord: u, polarity }),
        }
    }

    Ok(Metagraph {
        vertices: flagged.to_vec(),
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: i32, j: i32) -> Coord {
        Coord::new(i, j)
    }

    #[test]
    fn edge_layout_follows_vertex_order() {
        let s = Surface::new((23, 23), None);
        let v = [c(8, 12), c(10, 10), c(10, 12)];
        let m = build_metagraph(&s, &v).unwrap();
        let ends: Vec<(Coord, Coord, bool)> = m
            .edges
            .iter()
            .map(|e| (e.source, e.target, e.to_boundary))
            .collect();
        assert_eq!(
            ends,
            vec![
                (c(8, 12), c(10, 10), false),
                (c(8, 12), c(10, 12), false),
                (c(8, 12), c(7, 21), true),
                (c(10, 10), c(10, 12), false),
                (c(10, 10), c(9, 1), true),
            ]
        );
        assert_eq!(m.touching(c(10, 12)).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn edge_costs_count_data_qubits() {
        let s = Surface::new((23, 23), None);
        let m = build_metagraph(&s, &[c(6, 14), c(14, 10)]).unwrap();
        let pair = &m.edges[0];
        assert_eq!(pair.length, pair.path.len());
        assert_eq!(pair.length, 7);
        assert_eq!(pair.data_qubits, 4);
        assert_eq!(pair.path.first(), Some(&c(6, 14)));
        assert_eq!(pair.path.last(), Some(&c(14, 10)));
    }

    #[test]
    fn ground_prefers_row_above_and_nearer_column() {
        let s = Surface::new((23, 23), None);
        assert_eq!(ground_node(&s, c(10, 10)), c(9, 1));
        assert_eq!(ground_node(&s, c(12, 12)), c(11, 21));
        // Equidistant columns take the maximum.
        assert_eq!(ground_node(&s, c(10, 11)), c(9, 21));
        assert_eq!(ground_node(&s, c(0, 4)), c(1, 1));
    }

    #[test]
    fn single_z_vertex_has_no_edges() {
        let s = Surface::new((23, 23), None);
        let m = build_metagraph(&s, &[c(10, 12)]).unwrap();
        assert_eq!(m.num_edges(), 0);
        assert_eq!(m.vertices, vec![c(10, 12)]);
    }

    #[test]
    fn rejects_data_qubits() {
        let s = Surface::new((23, 23), None);
        assert_eq!(
            build_metagraph(&s, &[c(11, 11)]).unwrap_err(),
            DecodeError::NotAnAncilla(c(11, 11))
        );
    }
}

//! Lattice connectivity graph for surface-code decoding.
//!
//! Implements the graph structure that encodes the qubit layout of a surface:
//! nodes are lattice coordinates holding a data or ancilla qubit, and edges
//! are weighted connections along which correction chains travel. Neighbor
//! lists keep insertion order so that path searches are reproducible.

use crate::DecodeError;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use squec_common::{Coord, Polarity, Qubit};

/// Graph edge representation with target node and weight.
///
/// Stored once in the adjacency list of each endpoint. The graph is
/// undirected, so the edge from `a` to `b` always has a twin from `b` to `a`
/// with the same weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Node at the far end of this edge.
    pub target: Coord,

    /// Path-length contribution of traversing this edge.
    ///
    /// See [`squec_common::weights`] for the values produced by lattice
    /// construction.
    pub weight: u32,
}

#[derive(Clone, Debug, Default)]
struct Node {
    // `None` only while a lattice is being built: an edge may name a
    // coordinate before its qubit is placed.
    qubit: Option<Qubit>,
    edges: Vec<Edge>,
}

/// Lattice graph keyed by coordinate.
///
/// Stores the qubit at each coordinate together with its weighted edges.
/// Iteration through [`LatticeGraph::nodes`] is in coordinate order; the
/// insertion order of nodes is tracked separately because lattice pruning
/// walks nodes in the order they were created.
#[derive(Clone, Debug, Default)]
pub struct LatticeGraph {
    nodes: BTreeMap<Coord, Node>,

    /// Coordinates in the order their nodes were first created.
    order: Vec<Coord>,
}

impl LatticeGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a qubit at the given coordinate.
    ///
    /// Creates the node if needed, otherwise replaces the qubit stored there
    /// while keeping the node's edges and creation position.
    ///
    /// # Arguments
    ///
    /// * `coord` - Lattice coordinate of the node
    /// * `qubit` - Qubit occupying the node
    pub fn add_qubit(&mut self, coord: Coord, qubit: Qubit) {
        self.node_entry(coord).qubit = Some(qubit);
    }

    /// Connects two existing qubits with an undirected weighted edge.
    ///
    /// Re-connecting an already connected pair only updates the weight, so
    /// neighbor order is unaffected.
    ///
    /// # Returns
    ///
    /// Ok(()) on success, or `UnknownCoordinate` if either endpoint holds no
    /// qubit.
    pub fn connect(&mut self, a: Coord, b: Coord, weight: u32) -> Result<(), DecodeError> {
        for c in [a, b] {
            if self.qubit(c).is_none() {
                return Err(DecodeError::UnknownCoordinate(c));
            }
        }
        self.link(a, b, weight);
        Ok(())
    }

    /// Adds or reweights the edge `a`-`b`, creating empty nodes as needed.
    pub(crate) fn link(&mut self, a: Coord, b: Coord, weight: u32) {
        if a == b {
            return;
        }
        self.upsert_half_edge(a, b, weight);
        self.upsert_half_edge(b, a, weight);
    }

    fn upsert_half_edge(&mut self, from: Coord, to: Coord, weight: u32) {
        let node = self.node_entry(from);
        match node.edges.iter_mut().find(|e| e.target == to) {
            Some(edge) => edge.weight = weight,
            None => node.edges.push(Edge { target: to, weight }),
        }
    }

    fn node_entry(&mut self, coord: Coord) -> &mut Node {
        let order = &mut self.order;
        self.nodes.entry(coord).or_insert_with(|| {
            order.push(coord);
            Node::default()
        })
    }

    /// Removes a node and every edge incident to it.
    ///
    /// # Returns
    ///
    /// True if the node existed.
    pub fn remove(&mut self, coord: Coord) -> bool {
        let Some(node) = self.nodes.remove(&coord) else {
            return false;
        };
        for edge in &node.edges {
            if let Some(neighbor) = self.nodes.get_mut(&edge.target) {
                neighbor.edges.retain(|e| e.target != coord);
            }
        }
        self.order.retain(|&c| c != coord);
        true
    }

    /// Drops every node that was created by an edge but never given a qubit.
    pub(crate) fn remove_empty_nodes(&mut self) {
        let empty: Vec<Coord> = self
            .order
            .iter()
            .copied()
            .filter(|c| self.nodes.get(c).is_some_and(|n| n.qubit.is_none()))
            .collect();
        for c in empty {
            self.remove(c);
        }
    }

    /// Node coordinates in creation order.
    pub(crate) fn creation_order(&self) -> &[Coord] {
        &self.order
    }

    /// True if a node exists at the coordinate.
    pub fn contains(&self, coord: Coord) -> bool {
        self.nodes.contains_key(&coord)
    }

    /// Qubit stored at the coordinate, if any.
    pub fn qubit(&self, coord: Coord) -> Option<Qubit> {
        self.nodes.get(&coord).and_then(|n| n.qubit)
    }

    /// Polarity of the ancilla at the coordinate.
    ///
    /// # Returns
    ///
    /// The polarity, `NotAnAncilla` for a data qubit, or `UnknownCoordinate`
    /// for a coordinate without a qubit.
    pub fn polarity(&self, coord: Coord) -> Result<Polarity, DecodeError> {
        match self.qubit(coord) {
            Some(Qubit::Ancilla(p)) => Ok(p),
            Some(Qubit::Data) => Err(DecodeError::NotAnAncilla(coord)),
            None => Err(DecodeError::UnknownCoordinate(coord)),
        }
    }

    /// Edges leaving the coordinate, in insertion order.
    ///
    /// Empty for coordinates that are not in the graph.
    pub fn edges(&self, coord: Coord) -> &[Edge] {
        self.nodes
            .get(&coord)
            .map(|n| n.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Number of edges incident to the coordinate.
    pub fn degree(&self, coord: Coord) -> usize {
        self.edges(coord).len()
    }

    /// Iterates qubit-holding nodes in coordinate order.
    pub fn nodes(&self) -> impl Iterator<Item = (Coord, Qubit)> + '_ {
        self.nodes
            .iter()
            .filter_map(|(&c, n)| n.qubit.map(|q| (c, q)))
    }

    /// Number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges in the graph.
    pub fn num_edges(&self) -> usize {
        self.nodes.values().map(|n| n.edges.len()).sum::<usize>() / 2
    }
}

use crate::DecodeError;
use crate::graph::LatticeGraph;
use alloc::collections::{BTreeMap, BinaryHeap};
use alloc::vec::Vec;
use core::cmp::Ordering;
use squec_common::Coord;

#[derive(Clone, Copy, PartialEq, Eq)]
struct State {
    cost: u32,
    coord: Coord,
}

// Min-heap on cost. Among equal costs the larger coordinate pops first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.coord.cmp(&other.coord))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum-weight path between two nodes, endpoints included.
///
/// Dijkstra over the edge weights. Neighbors are relaxed in insertion order
/// and only on a strict improvement, so ties always resolve the same way for
/// a given graph.
///
/// # Returns
///
/// The node sequence from `from` to `to`, `UnknownCoordinate` if either end
/// is not in the graph, or `NoPath` if they are disconnected.
pub fn shortest_path(
    graph: &LatticeGraph,
    from: Coord,
    to: Coord,
) -> Result<Vec<Coord>, DecodeError> {
    for c in [from, to] {
        if !graph.contains(c) {
            return Err(DecodeError::UnknownCoordinate(c));
        }
    }

    let mut dist: BTreeMap<Coord, u32> = BTreeMap::new();
    let mut prev: BTreeMap<Coord, Coord> = BTreeMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(from, 0);
    heap.push(State { cost: 0, coord: from });

    while let Some(State { cost, coord }) = heap.pop() {
        if coord == to {
            return Ok(unwind(&prev, from, to));
        }
        if dist.get(&coord).is_some_and(|&d| cost > d) {
            continue;
        }
        for edge in graph.edges(coord) {
            let next = State {
                cost: cost + edge.weight,
                coord: edge.target,
            };
            if dist.get(&next.coord).is_none_or(|&d| next.cost < d) {
                dist.insert(next.coord, next.cost);
                prev.insert(next.coord, coord);
                heap.push(next);
            }
        }
    }

    Err(DecodeError::NoPath { from, to })
}

fn unwind(prev: &BTreeMap<Coord, Coord>, from: Coord, to: Coord) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut at = to;
    path.push(at);
    while at != from {
        match prev.get(&at) {
            Some(&p) => at = p,
            None => break,
        }
        path.push(at);
    }
    path.reverse();
    path
}

/// Total edge weight along a path.
pub fn path_weight(graph: &LatticeGraph, path: &[Coord]) -> u32 {
    path.windows(2)
        .filter_map(|w| graph.edges(w[0]).iter().find(|e| e.target == w[1]))
        .map(|e| e.weight)
        .sum()
}

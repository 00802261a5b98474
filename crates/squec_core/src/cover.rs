use crate::DecodeError;
use crate::metagraph::Metagraph;
use alloc::vec;
use alloc::vec::Vec;
use log::debug;
use squec_common::Coord;

/// Chooses which metagraph edges become corrections.
///
/// Implementations return indices into `metagraph.edges`, ascending, such
/// that every required vertex is an endpoint of some selected edge.
pub trait CoverSolver {
    fn select(&self, metagraph: &Metagraph, required: &[Coord]) -> Result<Vec<usize>, DecodeError>;
}

/// Total data-qubit count of the selected edges.
pub fn selection_cost(metagraph: &Metagraph, selection: &[usize]) -> u32 {
    selection
        .iter()
        .filter_map(|&idx| metagraph.edges.get(idx))
        .map(|e| e.data_qubits)
        .sum()
}

/// Required vertices without repeats, first occurrence kept.
pub(crate) fn distinct(required: &[Coord]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(required.len());
    for &v in required {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Fails with `Uncoverable` on the first vertex no edge touches.
pub(crate) fn check_coverable(
    metagraph: &Metagraph,
    required: &[Coord],
) -> Result<(), DecodeError> {
    match required.iter().find(|&&v| metagraph.touching(v).next().is_none()) {
        Some(&v) => Err(DecodeError::Uncoverable(v)),
        None => Ok(()),
    }
}

/// Exact minimum-weight covering set.
///
/// Edge subsets are visited as bitmasks in increasing numeric order. Every
/// subset of a mask is numerically smaller, so a covering mask that contains
/// an already kept cover is skipped without being costed. Among the kept
/// covers the cheapest wins, ties going to the earliest mask.
///
/// Metagraphs with more than `max_edges` edges are solved by a dynamic
/// program over subsets of the required vertices, which finds a cover of the
/// same minimum cost in `O(2^n * E)` for `n` vertices.
#[derive(Clone, Copy, Debug)]
pub struct ExhaustiveCover {
    /// Largest metagraph the solver will enumerate. Capped at 63.
    pub max_edges: usize,
}

impl ExhaustiveCover {
    pub const DEFAULT_MAX_EDGES: usize = 24;
    /// Largest number of required vertices the subset table accepts.
    pub const MAX_TABLE_VERTICES: usize = 20;
    const HARD_LIMIT: usize = 63;

    pub fn new(max_edges: usize) -> Self {
        Self { max_edges }
    }

    fn limit(&self) -> usize {
        self.max_edges.min(Self::HARD_LIMIT)
    }
}

impl Default for ExhaustiveCover {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_EDGES)
    }
}

impl CoverSolver for ExhaustiveCover {
    fn select(&self, metagraph: &Metagraph, required: &[Coord]) -> Result<Vec<usize>, DecodeError> {
        let required = distinct(required);
        if required.is_empty() {
            return Ok(Vec::new());
        }
        check_coverable(metagraph, &required)?;

        let num_edges = metagraph.num_edges();
        let tabled = num_edges > self.limit();
        if tabled && required.len() > Self::MAX_TABLE_VERTICES {
            return Err(DecodeError::TooManyVertices {
                vertices: required.len(),
                limit: Self::MAX_TABLE_VERTICES,
            });
        }

        // Enumerated metagraphs have at most 63 edges, each with two ends, so
        // either way the vertex count fits in the 128-bit masks.
        let coverage: Vec<u128> = metagraph
            .edges
            .iter()
            .map(|e| {
                required
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| e.touches(**v))
                    .fold(0u128, |acc, (r, _)| acc | (1u128 << r))
            })
            .collect();

        if tabled {
            return cover_by_table(metagraph, &coverage, required.len());
        }

        let full = if required.len() == 128 {
            u128::MAX
        } else {
            (1u128 << required.len()) - 1
        };
        let mut kept: Vec<u64> = Vec::new();
        let mut best: Option<(u32, u64)> = None;
        for mask in 1u64..(1u64 << num_edges) {
            let covered = bits(mask).fold(0u128, |acc, e| acc | coverage[e]);
            if covered != full {
                continue;
            }
            if kept.iter().any(|&k| mask & k == k) {
                continue;
            }
            kept.push(mask);
            let cost: u32 = bits(mask).map(|e| metagraph.edges[e].data_qubits).sum();
            if best.is_none_or(|(c, _)| cost < c) {
                best = Some((cost, mask));
            }
        }
        debug!(
            "exhaustive cover: {} edges, {} minimal covers, best cost {:?}",
            num_edges,
            kept.len(),
            best.map(|(c, _)| c)
        );

        // Unreachable once every vertex is coverable: the full mask covers.
        let (_, mask) = best.ok_or(DecodeError::NoMatching {
            vertices: required.len(),
        })?;
        Ok(bits(mask).collect())
    }
}

#[derive(Clone, Copy)]
struct Link {
    from: usize,
    edge: usize,
}

/// Minimum-weight cover over subsets of the `n` required vertices, at most
/// [`ExhaustiveCover::MAX_TABLE_VERTICES`] of them.
///
/// `table[mask]` holds the cheapest edge set found whose coverage is exactly
/// `mask`. Masks are extended in increasing order through the lowest vertex
/// they leave uncovered, since some edge of every cover must touch it.
fn cover_by_table(
    metagraph: &Metagraph,
    coverage: &[u128],
    n: usize,
) -> Result<Vec<usize>, DecodeError> {
    let full = (1usize << n) - 1;
    let mut table: Vec<Option<(u32, Option<Link>)>> = vec![None; full + 1];
    table[0] = Some((0, None));
    for mask in 0..full {
        let Some((base, _)) = table[mask] else {
            continue;
        };
        let lowest = (!mask).trailing_zeros();
        for (edge, &covers) in coverage.iter().enumerate() {
            if (covers >> lowest) & 1 == 0 {
                continue;
            }
            let next = mask | covers as usize;
            let cost = base + metagraph.edges[edge].data_qubits;
            if table[next].is_none_or(|(c, _)| cost < c) {
                table[next] = Some((cost, Some(Link { from: mask, edge })));
            }
        }
    }

    let Some((cost, _)) = table[full] else {
        return Err(DecodeError::NoMatching { vertices: n });
    };
    debug!("table cover: {} vertices, {} edges, best cost {}", n, coverage.len(), cost);

    let mut selection = Vec::new();
    let mut mask = full;
    while let Some((_, Some(link))) = table[mask] {
        selection.push(link.edge);
        mask = link.from;
    }
    selection.sort_unstable();
    Ok(selection)
}

/// Set bit positions of `mask`, ascending.
fn bits(mask: u64) -> impl Iterator<Item = usize> {
    let mut rest = mask;
    core::iter::from_fn(move || {
        if rest == 0 {
            return None;
        }
        let idx = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        Some(idx)
    })
}

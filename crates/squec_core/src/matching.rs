use crate::DecodeError;
use crate::cover::{CoverSolver, check_coverable, distinct};
use crate::metagraph::Metagraph;
use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use log::debug;
use squec_common::Coord;

/// Minimum-weight matching where each required vertex either pairs with
/// another required vertex or takes its boundary edge.
///
/// Solved exactly by dynamic programming over subsets of the required
/// vertices: the first unresolved vertex of a subset is either sent to its
/// boundary or paired with a later one. Only the cheapest edge per pair and
/// per boundary is considered. Table size is `2^n` for `n` vertices.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryMatching {
    /// Largest number of distinct required vertices accepted. Capped at 24.
    pub max_vertices: usize,
}

impl BoundaryMatching {
    pub const DEFAULT_MAX_VERTICES: usize = 20;
    const HARD_LIMIT: usize = 24;

    pub fn new(max_vertices: usize) -> Self {
        Self { max_vertices }
    }

    fn limit(&self) -> usize {
        self.max_vertices.min(Self::HARD_LIMIT)
    }
}

impl Default for BoundaryMatching {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_VERTICES)
    }
}

#[derive(Clone, Copy)]
struct Step {
    cost: u32,
    edge: usize,
    // Vertices resolved by this step, as a mask over the required list.
    resolved: u32,
}

impl CoverSolver for BoundaryMatching {
    fn select(&self, metagraph: &Metagraph, required: &[Coord]) -> Result<Vec<usize>, DecodeError> {
        let required = distinct(required);
        let n = required.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        check_coverable(metagraph, &required)?;
        let limit = self.limit();
        if n > limit {
            return Err(DecodeError::TooManyVertices { vertices: n, limit });
        }

        let index_of = |v: Coord| required.iter().position(|&r| r == v);
        let mut pairs: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        let mut boundary: Vec<Option<usize>> = vec![None; n];
        let cheaper = |current: Option<usize>, idx: usize| {
            current.is_none_or(|c| {
                metagraph.edges[idx].data_qubits < metagraph.edges[c].data_qubits
            })
        };

        for (idx, e) in metagraph.edges.iter().enumerate() {
            match (index_of(e.source), index_of(e.target)) {
                (Some(a), _) if e.to_boundary => {
                    if cheaper(boundary[a], idx) {
                        boundary[a] = Some(idx);
                    }
                }
                (Some(a), Some(b)) if a != b => {
                    let key = (a.min(b), a.max(b));
                    if cheaper(pairs.get(&key).copied(), idx) {
                        pairs.insert(key, idx);
                    }
                }
                _ => {}
            }
        }

        // table[mask]: cheapest way to resolve exactly the vertices in mask,
        // with the step that resolves its lowest vertex.
        let full = (1u32 << n) - 1;
        let mut table: Vec<Option<(u32, Option<Step>)>> = vec![None; 1usize << n];
        table[0] = Some((0, None));
        for mask in 1..=full {
            let a = mask.trailing_zeros() as usize;
            let mut best: Option<(u32, Option<Step>)> = None;
            let mut consider = |step: Step, rest: u32| {
                if let Some((base, _)) = table[rest as usize] {
                    let total = base + step.cost;
                    if best.is_none_or(|(c, _)| total < c) {
                        best = Some((total, Some(step)));
                    }
                }
            };

            if let Some(edge) = boundary[a] {
                let step = Step {
                    cost: metagraph.edges[edge].data_qubits,
                    edge,
                    resolved: 1 << a,
                };
                consider(step, mask & !step.resolved);
            }
            for b in a + 1..n {
                if mask & (1 << b) == 0 {
                    continue;
                }
                if let Some(&edge) = pairs.get(&(a, b)) {
                    let step = Step {
                        cost: metagraph.edges[edge].data_qubits,
                        edge,
                        resolved: (1 << a) | (1 << b),
                    };
                    consider(step, mask & !step.resolved);
                }
            }
            table[mask as usize] = best;
        }

        let Some((cost, _)) = table[full as usize] else {
            return Err(DecodeError::NoMatching { vertices: n });
        };
        debug!("boundary matching: {} vertices, cost {}", n, cost);

        let mut selection = Vec::new();
        let mut mask = full;
        while let Some((_, Some(step))) = table[mask as usize] {
            selection.push(step.edge);
            mask &= !step.resolved;
        }
        selection.sort_unstable();
        selection.dedup();
        Ok(selection)
    }
}

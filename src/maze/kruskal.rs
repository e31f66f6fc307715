use rand::{Rng, SeedableRng, rngs::StdRng};

use super::cell::{Cell, CellId};
use super::edge::Edge;
use super::union_find::UnionFind;

/// Candidate wall weights are drawn uniformly from `[0, WEIGHT_RANGE)`.
pub(crate) const WEIGHT_RANGE: u8 = 50;

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Randomized Kruskal: weight every candidate wall, sort ascending, and keep
/// each edge that joins two components until a single spanning tree remains.
///
/// Candidate edges are enumerated row-major, right neighbor before bottom
/// neighbor, so no pair appears twice. The sort is stable, so equal weights
/// keep enumeration order and one random sequence reproduces one maze.
pub(crate) fn spanning_tree(cells: &[Cell], rng: &mut StdRng) -> Vec<Edge> {
    if cells.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<Edge> = Vec::with_capacity(cells.len() * 2);
    for (index, cell) in cells.iter().enumerate() {
        let id = CellId(index as u16);
        if let Some(right) = cell.right {
            candidates.push(Edge::new(id, right, rng.random_range(0..WEIGHT_RANGE)));
        }
        if let Some(bottom) = cell.bottom {
            candidates.push(Edge::new(id, bottom, rng.random_range(0..WEIGHT_RANGE)));
        }
    }
    candidates.sort_by_key(|edge| edge.weight);

    let mut components = UnionFind::new(cells.len() as u16);
    let mut tree = Vec::with_capacity(cells.len() - 1);
    for edge in candidates {
        if components.unite(edge.a, edge.b) {
            tree.push(edge);
        }
        if tree.len() == cells.len() - 1 {
            break;
        }
    }

    tracing::debug!(
        "[kruskal] selected {} tree edges for {} cells",
        tree.len(),
        cells.len()
    );
    tree
}

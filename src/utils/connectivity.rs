//! # Connectivity Checks
//!
//! Flood-fill helpers over cell sets, built on the `pathfinding` crate's
//! breadth-first reachability.

use crate::grid::{CellSet, Position};
use pathfinding::prelude::bfs_reach;

/// Returns every cell of `cells` 4-connected to `start`.
///
/// Empty if `start` is not itself in the set.
pub fn reachable_from(cells: &CellSet, start: Position) -> CellSet {
    if !cells.contains(&start) {
        return CellSet::new();
    }
    bfs_reach(start, |pos| {
        pos.cardinal_neighbors()
            .into_iter()
            .filter(|next| cells.contains(next))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Checks whether the set forms a single 4-connected component.
///
/// The empty set counts as connected.
///
/// # Examples
///
/// ```
/// use delve::{CellSet, Position};
/// use delve::utils::is_connected;
///
/// let line: CellSet = (0..4).map(|x| Position::new(x, 0)).collect();
/// assert!(is_connected(&line));
/// ```
pub fn is_connected(cells: &CellSet) -> bool {
    match cells.first() {
        Some(&start) => reachable_from(cells, start).len() == cells.len(),
        None => true,
    }
}

/// Counts the 4-connected components of a cell set.
pub fn component_count(cells: &CellSet) -> usize {
    let mut remaining = cells.clone();
    let mut count = 0;
    while let Some(&start) = remaining.first() {
        for pos in reachable_from(&remaining, start) {
            remaining.remove(&pos);
        }
        count += 1;
    }
    count
}

//! # Random Walk Carving
//!
//! Organic floor shapes from repeated 4-directional random walks.

use crate::grid::{CellSet, Direction, Position};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// Carves a connected floor region starting from a cell.
pub trait CarveStrategy {
    /// Produces a non-empty, 4-connected set that contains `start`.
    fn carve(&self, start: Position, rng: &mut StdRng) -> CellSet;
}

/// Where each walk after the first begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkRestart {
    /// A uniformly chosen cell among those already carved
    Random,
    /// The cell where the previous walk ended
    Continuous,
}

/// Tuning for [`RandomWalkCarver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    /// Number of walks
    pub iterations: u32,
    /// Steps per walk
    pub walk_length: u32,
    /// How the next walk picks its start
    pub restart: WalkRestart,
}

impl WalkParams {
    /// Creates walk parameters.
    pub fn new(iterations: u32, walk_length: u32, restart: WalkRestart) -> Self {
        Self {
            iterations,
            walk_length,
            restart,
        }
    }
}

impl Default for WalkParams {
    fn default() -> Self {
        Self::new(10, 10, WalkRestart::Random)
    }
}

/// Walks `walk_length` random cardinal steps from `start`.
///
/// The returned path starts with `start` and every element is adjacent to
/// the one before it. One random draw per step.
pub fn random_walk(start: Position, walk_length: u32, rng: &mut StdRng) -> Vec<Position> {
    let mut path = Vec::with_capacity(walk_length as usize + 1);
    path.push(start);

    let mut current = start;
    for _ in 0..walk_length {
        let direction = Direction::CARDINAL[rng.gen_range(0..Direction::CARDINAL.len())];
        current = current.step(direction);
        path.push(current);
    }
    path
}

/// Unions several random walks into one connected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomWalkCarver {
    pub params: WalkParams,
}

impl RandomWalkCarver {
    /// Creates a carver with the given walk parameters.
    pub fn new(params: WalkParams) -> Self {
        Self { params }
    }
}

impl CarveStrategy for RandomWalkCarver {
    fn carve(&self, start: Position, rng: &mut StdRng) -> CellSet {
        let mut floors = CellSet::from([start]);
        let mut current = start;

        for _ in 0..self.params.iterations {
            let path = random_walk(current, self.params.walk_length, rng);
            let end = path.last().copied().unwrap_or(current);
            floors.extend(path);

            current = match self.params.restart {
                WalkRestart::Random => {
                    let index = rng.gen_range(0..floors.len());
                    floors.iter().nth(index).copied().unwrap_or(end)
                }
                WalkRestart::Continuous => end,
            };
        }

        floors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_connected;
    use rand::SeedableRng;

    #[test]
    fn test_walk_steps_are_adjacent() {
        let mut rng = StdRng::seed_from_u64(7);
        let path = random_walk(Position::new(3, 3), 50, &mut rng);

        assert_eq!(path.len(), 51);
        assert_eq!(path[0], Position::new(3, 3));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
        }
    }

    #[test]
    fn test_carve_contains_start_and_is_connected() {
        for restart in [WalkRestart::Random, WalkRestart::Continuous] {
            let carver = RandomWalkCarver::new(WalkParams::new(20, 15, restart));
            let mut rng = StdRng::seed_from_u64(99);
            let floors = carver.carve(Position::new(-4, 8), &mut rng);

            assert!(floors.contains(&Position::new(-4, 8)));
            assert!(floors.len() > 1);
            assert!(is_connected(&floors));
        }
    }

    #[test]
    fn test_zero_iterations_keeps_start() {
        let carver = RandomWalkCarver::new(WalkParams::new(0, 10, WalkRestart::Random));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(carver.carve(Position::origin(), &mut rng), CellSet::from([Position::origin()]));
    }

    #[test]
    fn test_carve_is_deterministic() {
        let carver = RandomWalkCarver::default();
        let a = carver.carve(Position::origin(), &mut StdRng::seed_from_u64(5));
        let b = carver.carve(Position::origin(), &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}

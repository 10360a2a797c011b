//! # Room Connection
//!
//! Greedy nearest-neighbour chaining of room centres with L-shaped,
//! 3×3-brushed corridors.

use crate::grid::{CellSet, Position};
use log::debug;
use rand::{rngs::StdRng, Rng};

/// Joins room centres into a single reachable network.
pub trait ConnectStrategy {
    /// Connects every centre, drawing any needed randomness from `rng`.
    fn connect(&self, centers: &[Position], rng: &mut StdRng) -> Connection;
}

/// Result of connecting room centres.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Connection {
    /// Indices into the centre list, in visiting order
    pub order: Vec<usize>,
    /// Brushed corridor cells
    pub corridors: CellSet,
}

/// Chains centres by always walking to the closest unvisited one.
///
/// This is a greedy spanning path rather than a minimum spanning tree.
/// Distances are Euclidean; ties go to the centre listed first. The only
/// random draw is the starting centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NearestNeighborConnector;

impl NearestNeighborConnector {
    pub fn new() -> Self {
        Self
    }

    /// Connects centres starting from `centers[start]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{NearestNeighborConnector, Position};
    ///
    /// let centers = [Position::new(0, 0), Position::new(10, 0), Position::new(5, 10)];
    /// let connection = NearestNeighborConnector::new().connect_from(&centers, 0);
    /// assert_eq!(connection.order, vec![0, 1, 2]);
    /// ```
    pub fn connect_from(&self, centers: &[Position], start: usize) -> Connection {
        let mut connection = Connection::default();
        if start >= centers.len() {
            return connection;
        }

        let mut remaining: Vec<usize> = (0..centers.len()).filter(|&i| i != start).collect();
        let mut current = start;
        connection.order.push(start);

        while let Some((slot, next)) = closest(centers, centers[current], &remaining) {
            remaining.remove(slot);

            let path = corridor_path(centers[current], centers[next]);
            connection.corridors.extend(brush_3x3(&path));
            connection.order.push(next);
            current = next;
        }

        debug!(
            "Connected {} rooms with {} corridor cells",
            centers.len(),
            connection.corridors.len()
        );
        connection
    }
}

impl ConnectStrategy for NearestNeighborConnector {
    fn connect(&self, centers: &[Position], rng: &mut StdRng) -> Connection {
        if centers.is_empty() {
            return Connection::default();
        }
        let start = rng.gen_range(0..centers.len());
        self.connect_from(centers, start)
    }
}

/// Finds the remaining centre closest to `from`, returning its slot in
/// `remaining` and its centre index. The first of equal candidates wins.
fn closest(centers: &[Position], from: Position, remaining: &[usize]) -> Option<(usize, usize)> {
    remaining
        .iter()
        .copied()
        .enumerate()
        .min_by(|&(_, a), &(_, b)| {
            from.euclidean_distance(centers[a])
                .total_cmp(&from.euclidean_distance(centers[b]))
        })
}

/// Builds a one-cell-wide L-shaped path: vertical leg first, then horizontal.
///
/// Both endpoints are included and consecutive cells are 4-adjacent.
pub fn corridor_path(from: Position, to: Position) -> Vec<Position> {
    let mut path = vec![from];
    let mut pos = from;

    while pos.y != to.y {
        pos.y += (to.y - pos.y).signum();
        path.push(pos);
    }
    while pos.x != to.x {
        pos.x += (to.x - pos.x).signum();
        path.push(pos);
    }
    path
}

/// Widens a path by stamping each cell's full 3×3 neighbourhood.
pub fn brush_3x3(path: &[Position]) -> CellSet {
    path.iter()
        .flat_map(|&cell| {
            (-1..=1).flat_map(move |dx| (-1..=1).map(move |dy| cell + Position::new(dx, dy)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_connected;
    use rand::SeedableRng;

    #[test]
    fn test_visit_order_follows_nearest() {
        let centers = [Position::new(0, 0), Position::new(10, 0), Position::new(5, 10)];
        let connector = NearestNeighborConnector::new();

        assert_eq!(connector.connect_from(&centers, 0).order, vec![0, 1, 2]);
        // From (5, 10) both others are ~11.18 away; the first listed wins.
        assert_eq!(connector.connect_from(&centers, 2).order, vec![2, 0, 1]);
    }

    #[test]
    fn test_tie_break_prefers_first_listed() {
        let centers = [Position::new(0, 0), Position::new(0, 5), Position::new(5, 0)];
        let order = NearestNeighborConnector::new().connect_from(&centers, 0).order;
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_corridor_path_vertical_then_horizontal() {
        let path = corridor_path(Position::new(0, 0), Position::new(2, -2));
        assert_eq!(
            path,
            vec![
                Position::new(0, 0),
                Position::new(0, -1),
                Position::new(0, -2),
                Position::new(1, -2),
                Position::new(2, -2),
            ]
        );
        assert_eq!(corridor_path(Position::new(4, 4), Position::new(4, 4)).len(), 1);
    }

    #[test]
    fn test_brush_widens_to_three() {
        let path = corridor_path(Position::new(0, 0), Position::new(4, 0));
        let brushed = brush_3x3(&path);
        assert_eq!(brushed.len(), 7 * 3);
        for x in 0..=4 {
            for y in -1..=1 {
                assert!(brushed.contains(&Position::new(x, y)));
            }
        }
    }

    #[test]
    fn test_corridors_are_connected_and_touch_every_center() {
        let centers = [
            Position::new(3, 40),
            Position::new(30, 2),
            Position::new(17, 17),
            Position::new(-8, -3),
            Position::new(25, 33),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let connection = NearestNeighborConnector::new().connect(&centers, &mut rng);

        assert_eq!(connection.order.len(), centers.len());
        assert!(is_connected(&connection.corridors));
        for center in centers {
            assert!(connection.corridors.contains(&center));
        }
    }

    #[test]
    fn test_single_and_empty_inputs() {
        let connector = NearestNeighborConnector::new();
        let mut rng = StdRng::seed_from_u64(3);

        let single = connector.connect(&[Position::new(1, 1)], &mut rng);
        assert_eq!(single.order, vec![0]);
        assert!(single.corridors.is_empty());

        assert_eq!(connector.connect(&[], &mut rng), Connection::default());
    }
}

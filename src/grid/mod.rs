//! # Grid Module
//!
//! Spatial primitives shared by every generator: cell positions, the fixed
//! direction orderings used for neighbour masks, rectangles and dense
//! per-cell fields.
//!
//! Coordinates are y-up: [`Direction::Up`] moves toward larger `y`.

pub mod field;
pub mod rect;

pub use field::*;
pub use rect::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ordered set of cell positions sharing one semantic role.
///
/// Ordered so that iteration, and every random draw that depends on it, is
/// reproducible under a fixed seed.
pub type CellSet = BTreeSet<Position>;

/// Represents a 2D cell address in the tile grid.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let neighbors = pos.neighbors();
/// assert_eq!(neighbors.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns the neighbouring position in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Calculates the Chebyshev (king-move) distance to another position.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns all 8 surrounding positions in [`Direction::EIGHT`] order.
    pub fn neighbors(self) -> [Position; 8] {
        Direction::EIGHT.map(|direction| self.step(direction))
    }

    /// Returns the 4 cardinal positions in [`Direction::CARDINAL`] order.
    pub fn cardinal_neighbors(self) -> [Position; 4] {
        Direction::CARDINAL.map(|direction| self.step(direction))
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions used for walking and for building neighbour masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Cardinal order used for 4-bit masks, most significant bit first.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Diagonal directions, clockwise from up-right.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// Clockwise order used for 8-bit masks, most significant bit first.
    pub const EIGHT: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, 1));
    /// assert_eq!(Direction::DownLeft.to_delta(), Position::new(-1, -1));
    /// ```
    pub const fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, 1),
            Direction::UpRight => Position::new(1, 1),
            Direction::Right => Position::new(1, 0),
            Direction::DownRight => Position::new(1, -1),
            Direction::Down => Position::new(0, -1),
            Direction::DownLeft => Position::new(-1, -1),
            Direction::Left => Position::new(-1, 0),
            Direction::UpLeft => Position::new(-1, 1),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta is not a unit step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        Direction::EIGHT
            .into_iter()
            .find(|direction| direction.to_delta() == delta)
    }
}

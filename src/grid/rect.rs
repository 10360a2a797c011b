//! Axis-aligned integer rectangles used as partition bounds.

use super::Position;
use serde::{Deserialize, Serialize};

/// A rectangular region of cells, `min` inclusive and `min + size` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Lowest-x, lowest-y corner of the region
    pub min: Position,
    /// Width in cells
    pub width: i32,
    /// Height in cells
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Rect};
    ///
    /// let rect = Rect::new(Position::new(2, 3), 10, 4);
    /// assert_eq!(rect.max_x(), 12);
    /// assert_eq!(rect.area(), 40);
    /// ```
    pub const fn new(min: Position, width: i32, height: i32) -> Self {
        Self { min, width, height }
    }

    /// Exclusive upper x bound.
    pub fn max_x(&self) -> i32 {
        self.min.x + self.width
    }

    /// Exclusive upper y bound.
    pub fn max_y(&self) -> i32 {
        self.min.y + self.height
    }

    /// Area in cells.
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Real-valued centre point.
    pub fn center(&self) -> (f64, f64) {
        (
            self.min.x as f64 + self.width as f64 / 2.0,
            self.min.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Centre rounded down onto the grid.
    ///
    /// Always a cell inside the rectangle, and inside it shrunk by any margin
    /// that still leaves at least one cell. Rounding half-way centres to the
    /// nearest cell instead can step past the last cell of an odd-sized
    /// rectangle, e.g. a one-cell rectangle at x = 1 has centre 1.5.
    pub fn center_cell(&self) -> Position {
        Position::new(self.min.x + self.width / 2, self.min.y + self.height / 2)
    }

    /// Checks if a position is inside this rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min.x && pos.y >= self.min.y && pos.x < self.max_x() && pos.y < self.max_y()
    }

    /// Returns this rectangle shrunk by `margin` cells on every side.
    ///
    /// Returns None when nothing would be left.
    pub fn shrink(&self, margin: i32) -> Option<Rect> {
        let width = self.width - 2 * margin;
        let height = self.height - 2 * margin;
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Rect::new(
            Position::new(self.min.x + margin, self.min.y + margin),
            width,
            height,
        ))
    }

    /// Checks if this rectangle overlaps with another one.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.min.x >= other.max_x()
            || other.min.x >= self.max_x()
            || self.min.y >= other.max_y()
            || other.min.y >= self.max_y())
    }

    /// Gets all positions within this rectangle, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min.x..self.max_x())
            .flat_map(move |x| (self.min.y..self.max_y()).map(move |y| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(Position::new(5, 5), 10, 8);

        assert_eq!(rect.center(), (10.0, 9.0));
        assert_eq!(rect.center_cell(), Position::new(10, 9));

        assert!(rect.contains(Position::new(5, 5)));
        assert!(rect.contains(Position::new(14, 12)));
        assert!(!rect.contains(Position::new(15, 12)));
        assert!(!rect.contains(Position::new(4, 5)));
    }

    #[test]
    fn test_rect_center_of_odd_size() {
        let rect = Rect::new(Position::new(0, 0), 5, 5);
        assert_eq!(rect.center(), (2.5, 2.5));
        assert_eq!(rect.center_cell(), Position::new(2, 2));
    }

    #[test]
    fn test_rect_center_cell_stays_inside_thin_rects() {
        for min in -3..4 {
            for size in 1..6 {
                let rect = Rect::new(Position::new(min, min), size, size);
                assert!(rect.contains(rect.center_cell()), "{rect:?}");
                if let Some(inner) = rect.shrink(1) {
                    assert!(inner.contains(rect.center_cell()), "{rect:?}");
                }
            }
        }
    }

    #[test]
    fn test_rect_shrink() {
        let rect = Rect::new(Position::new(0, 0), 6, 4);
        let inner = rect.shrink(1).unwrap();
        assert_eq!(inner, Rect::new(Position::new(1, 1), 4, 2));
        assert!(rect.shrink(2).is_none());
        assert!(rect.contains(inner.center_cell()));
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Position::new(0, 0), 10, 10);
        let b = Rect::new(Position::new(5, 5), 10, 10);
        let c = Rect::new(Position::new(10, 0), 3, 3);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_rect_positions() {
        let rect = Rect::new(Position::new(1, 1), 3, 2);
        let positions: Vec<_> = rect.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(1, 1));
        assert_eq!(positions[1], Position::new(1, 2));
        assert!(positions.iter().all(|p| rect.contains(*p)));
    }
}

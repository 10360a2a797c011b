//! Dense row-major per-cell storage.

use super::Position;
use serde::{Deserialize, Serialize};

/// A `width × height` array of values addressed by grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Field<T> {
    /// Creates a field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }
}

impl<T> Field<T> {
    /// Creates a field by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Gets the value at a position, or None outside the field.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Gets a mutable reference to the value at a position.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        let i = self.index(pos)?;
        Some(&mut self.cells[i])
    }

    /// Iterates over `(position, value)` pairs, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells.iter().enumerate().map(move |(i, value)| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            (Position::new(x, y), value)
        })
    }

    /// Iterates mutably over `(position, value)` pairs, row by row.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Position, &mut T)> + '_ {
        let width = self.width;
        self.cells.iter_mut().enumerate().map(move |(i, value)| {
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            (Position::new(x, y), value)
        })
    }

    /// Iterates over the raw values.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }
}

impl<T: Copy + Default> Field<T> {
    /// Gets a copy of the value at a position, or the default outside the field.
    pub fn sample(&self, pos: Position) -> T {
        self.get(pos).copied().unwrap_or_default()
    }
}

//! # Space Partitioning
//!
//! Binary space partitioning of a rectangular region into room bounds.

use crate::grid::{Position, Rect};
use log::debug;
use rand::{rngs::StdRng, Rng};
use std::collections::VecDeque;

/// Splits a region into non-overlapping sub-regions.
pub trait PartitionStrategy {
    /// Produces the leaf regions of `bounds`.
    fn partition(&self, bounds: Rect, rng: &mut StdRng) -> Vec<Rect>;
}

/// Recursive binary splitter with a minimum leaf size.
///
/// Regions are processed breadth-first. A region splits when at least one
/// axis is twice the minimum; when both are, the longer axis is cut and a
/// square region flips a coin. The cut offset is uniform over the offsets
/// that leave both halves at or above the minimum, so every leaf is at
/// least `min_width × min_height` whenever the root is.
///
/// Random draws per region, in order: the axis coin (square regions with
/// both axes splittable only), then the cut offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySpacePartitioner {
    /// Minimum leaf width
    pub min_width: i32,
    /// Minimum leaf height
    pub min_height: i32,
}

impl BinarySpacePartitioner {
    /// Creates a partitioner with the given minimum leaf size.
    pub fn new(min_width: i32, min_height: i32) -> Self {
        Self {
            min_width: min_width.max(1),
            min_height: min_height.max(1),
        }
    }

    /// Picks the axis for a region, or None if it is a leaf.
    ///
    /// Returns `Some(true)` for a horizontal cut (stacked halves).
    fn split_axis(&self, rect: &Rect, rng: &mut StdRng) -> Option<bool> {
        let can_cut_horizontally = rect.height >= self.min_height * 2;
        let can_cut_vertically = rect.width >= self.min_width * 2;

        match (can_cut_horizontally, can_cut_vertically) {
            (false, false) => None,
            (true, false) => Some(true),
            (false, true) => Some(false),
            (true, true) => Some(if rect.height != rect.width {
                rect.height > rect.width
            } else {
                rng.gen_bool(0.5)
            }),
        }
    }

    fn split(&self, rect: Rect, horizontal: bool, rng: &mut StdRng) -> (Rect, Rect) {
        if horizontal {
            let cut = rng.gen_range(self.min_height..=rect.height - self.min_height);
            let lower = Rect::new(rect.min, rect.width, cut);
            let upper = Rect::new(
                Position::new(rect.min.x, rect.min.y + cut),
                rect.width,
                rect.height - cut,
            );
            (lower, upper)
        } else {
            let cut = rng.gen_range(self.min_width..=rect.width - self.min_width);
            let left = Rect::new(rect.min, cut, rect.height);
            let right = Rect::new(
                Position::new(rect.min.x + cut, rect.min.y),
                rect.width - cut,
                rect.height,
            );
            (left, right)
        }
    }
}

impl PartitionStrategy for BinarySpacePartitioner {
    fn partition(&self, bounds: Rect, rng: &mut StdRng) -> Vec<Rect> {
        let mut queue = VecDeque::from([bounds]);
        let mut leaves = Vec::new();

        while let Some(rect) = queue.pop_front() {
            match self.split_axis(&rect, rng) {
                Some(horizontal) => {
                    let (a, b) = self.split(rect, horizontal, rng);
                    queue.push_back(a);
                    queue.push_back(b);
                }
                None => leaves.push(rect),
            }
        }

        debug!(
            "Partitioned {}x{} region into {} leaves",
            bounds.width,
            bounds.height,
            leaves.len()
        );
        leaves
    }
}

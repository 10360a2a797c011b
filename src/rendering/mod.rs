//! # Rendering Module
//!
//! The boundary between generation and whatever draws the result. The
//! generators only ever produce a category per position and layer; turning
//! that into pixels, sprites or characters belongs to a [`TileSurface`] and
//! its [`TilePresets`].

pub mod ascii;

pub use ascii::*;

use crate::generation::{Level, PathTile, StairTile, WallTile};
use crate::generation::{Ground, Tint};
use crate::grid::Position;
use serde::{Deserialize, Serialize};

/// Independent drawing layers, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SurfaceLayer {
    Ground,
    Path,
    Wall,
    PropBack,
    PropFront,
}

impl SurfaceLayer {
    /// Every layer in drawing order.
    pub const ALL: [SurfaceLayer; 5] = [
        SurfaceLayer::Ground,
        SurfaceLayer::Path,
        SurfaceLayer::Wall,
        SurfaceLayer::PropBack,
        SurfaceLayer::PropFront,
    ];
}

/// What a cell on a layer should look like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileCategory {
    Floor,
    Water,
    Sand,
    Biome { index: usize, tint: Tint },
    Wall(WallTile),
    Path(PathTile),
    Stair(StairTile),
    Prop { index: usize, tall: bool },
}

impl From<Ground> for TileCategory {
    fn from(ground: Ground) -> Self {
        match ground {
            Ground::Water => TileCategory::Water,
            Ground::Sand => TileCategory::Sand,
            Ground::Biome { index, tint } => TileCategory::Biome { index, tint },
        }
    }
}

/// A paintable tile surface.
pub trait TileSurface {
    /// Removes every tile on every layer.
    fn clear(&mut self);

    /// Paints `category` at `position` on `layer`, replacing what was there.
    fn set(&mut self, layer: SurfaceLayer, position: Position, category: TileCategory);
}

/// Occupancy queries against something that holds tiles.
pub trait TileLookup {
    fn has_tile(&self, layer: SurfaceLayer, position: Position) -> bool;
}

/// Maps categories to renderable tokens.
pub trait TilePresets {
    type Token;

    /// Returns the token for a category, or None to leave the cell empty.
    fn token(&self, category: &TileCategory) -> Option<Self::Token>;
}

/// Clears `surface` and paints every layer of `level`.
///
/// Painting the same level twice yields the same surface.
pub fn paint_level<S: TileSurface + ?Sized>(level: &Level, surface: &mut S) {
    surface.clear();

    for &pos in &level.floors {
        if !level.ground.contains_key(&pos) {
            surface.set(SurfaceLayer::Ground, pos, TileCategory::Floor);
        }
    }
    for (&pos, &ground) in &level.ground {
        surface.set(SurfaceLayer::Ground, pos, ground.into());
    }
    for (&pos, &tile) in &level.paths {
        surface.set(SurfaceLayer::Path, pos, TileCategory::Path(tile));
    }
    for (&pos, &tile) in &level.stairs {
        surface.set(SurfaceLayer::Path, pos, TileCategory::Stair(tile));
    }
    for (&pos, &tile) in &level.walls {
        surface.set(SurfaceLayer::Wall, pos, TileCategory::Wall(tile));
    }
    for (&pos, placement) in &level.props {
        let category = TileCategory::Prop {
            index: placement.prop,
            tall: placement.layer == SurfaceLayer::PropFront,
        };
        surface.set(placement.layer, pos, category);
    }
}

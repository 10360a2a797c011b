//! # Prop and Spawn Placement
//!
//! Scatters props over open land and picks a player spawn cell. Occupancy
//! of other layers is read through [`TileLookup`], so any surface that can
//! answer "is something already here" works as the source of truth.

use super::terrain::Terrain;
use crate::grid::Position;
use crate::rendering::{SurfaceLayer, TileLookup};
use log::{debug, warn};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A decoration that may be scattered over land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDefinition {
    pub name: String,
    /// Acceptance probability per eligible cell, in `[0, 1]`
    pub spawn_chance: f64,
    #[serde(default)]
    pub min_height: f64,
    #[serde(default)]
    pub min_moisture: f64,
    #[serde(default)]
    pub min_heat: f64,
    /// Tall props (trees) draw in front of the player
    #[serde(default)]
    pub tall: bool,
    /// No other prop may lie within this Chebyshev distance
    #[serde(default)]
    pub min_spacing: u32,
}

impl PropDefinition {
    pub fn new(name: &str, spawn_chance: f64) -> Self {
        Self {
            name: name.to_string(),
            spawn_chance,
            min_height: 0.0,
            min_moisture: 0.0,
            min_heat: 0.0,
            tall: false,
            min_spacing: 0,
        }
    }

    /// Sets the three minimum thresholds.
    pub fn with_thresholds(mut self, height: f64, moisture: f64, heat: f64) -> Self {
        self.min_height = height;
        self.min_moisture = moisture;
        self.min_heat = heat;
        self
    }

    /// Marks the prop as tall.
    pub fn tall(mut self) -> Self {
        self.tall = true;
        self
    }

    pub fn with_spacing(mut self, min_spacing: u32) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    pub fn matches(&self, height: f64, moisture: f64, heat: f64) -> bool {
        height >= self.min_height && moisture >= self.min_moisture && heat >= self.min_heat
    }

    /// Layer the prop is drawn on.
    pub fn layer(&self) -> SurfaceLayer {
        if self.tall {
            SurfaceLayer::PropFront
        } else {
            SurfaceLayer::PropBack
        }
    }
}

/// A placed prop: index into the definition list and its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropPlacement {
    pub prop: usize,
    pub layer: SurfaceLayer,
}

/// The chosen spawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
    /// True when sampling failed and the unvalidated grid centre was used
    pub fallback: bool,
}

impl SpawnPoint {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            fallback: false,
        }
    }
}

fn occupied(lookup: &impl TileLookup, pos: Position) -> bool {
    lookup.has_tile(SurfaceLayer::Wall, pos)
        || lookup.has_tile(SurfaceLayer::Path, pos)
        || lookup.has_tile(SurfaceLayer::PropBack, pos)
        || lookup.has_tile(SurfaceLayer::PropFront, pos)
}

fn spacing_clear(placed: &BTreeMap<Position, PropPlacement>, pos: Position, spacing: u32) -> bool {
    let s = spacing as i32;
    (-s..=s).all(|dx| (-s..=s).all(|dy| !placed.contains_key(&(pos + Position::new(dx, dy)))))
}

/// Scatters props over eligible land.
///
/// Columns `1..width-1` are scanned left to right, rows `2..height-1`
/// bottom to top. A cell is eligible when it is land and has no wall, path
/// or prop. Definitions are tried in order; one failing its thresholds or
/// its spacing is skipped without a draw, otherwise one `f64` is drawn and
/// the prop is placed when the draw is below its chance. At most one prop
/// lands on a cell.
pub fn place_props(
    terrain: &Terrain,
    lookup: &impl TileLookup,
    definitions: &[PropDefinition],
    rng: &mut StdRng,
) -> BTreeMap<Position, PropPlacement> {
    let mut placed = BTreeMap::new();
    if definitions.is_empty() {
        return placed;
    }

    let width = terrain.ground.width() as i32;
    let height = terrain.ground.height() as i32;

    for x in 1..width - 1 {
        for y in 2..height - 1 {
            let pos = Position::new(x, y);
            if terrain.ground_at(pos).is_shore_or_water()
                || occupied(lookup, pos)
                || placed.contains_key(&pos)
            {
                continue;
            }

            let (h, m, heat) = terrain.climate_at(pos);
            for (index, prop) in definitions.iter().enumerate() {
                if !prop.matches(h, m, heat) {
                    continue;
                }
                if prop.min_spacing > 0 && !spacing_clear(&placed, pos, prop.min_spacing) {
                    continue;
                }
                if rng.gen::<f64>() >= prop.spawn_chance {
                    continue;
                }
                placed.insert(
                    pos,
                    PropPlacement {
                        prop: index,
                        layer: prop.layer(),
                    },
                );
                break;
            }
        }
    }

    debug!("Placed {} props", placed.len());
    placed
}

/// True when a player may start on `pos`.
///
/// The cell must be at least two cells inside the border, on land and
/// free of walls, paths and props.
pub fn can_spawn_at(terrain: &Terrain, lookup: &impl TileLookup, pos: Position) -> bool {
    let width = terrain.ground.width() as i32;
    let height = terrain.ground.height() as i32;
    if pos.x <= 1 || pos.y <= 1 || pos.x >= width - 2 || pos.y >= height - 2 {
        return false;
    }
    !terrain.ground_at(pos).is_shore_or_water() && !occupied(lookup, pos)
}

/// Samples up to `attempts` cells in `[2, w-2) × [2, h-2)`, drawing x then
/// y, and returns the first valid one.
///
/// When every attempt fails the grid centre is returned unvalidated with
/// [`SpawnPoint::fallback`] set.
pub fn choose_spawn(
    terrain: &Terrain,
    lookup: &impl TileLookup,
    attempts: u32,
    rng: &mut StdRng,
) -> SpawnPoint {
    let width = terrain.ground.width() as i32;
    let height = terrain.ground.height() as i32;

    if width > 4 && height > 4 {
        for _ in 0..attempts {
            let x = rng.gen_range(2..width - 2);
            let y = rng.gen_range(2..height - 2);
            let pos = Position::new(x, y);
            if can_spawn_at(terrain, lookup, pos) {
                return SpawnPoint::at(pos);
            }
        }
    }

    let center = Position::new(width / 2, height / 2);
    warn!("No valid spawn found in {attempts} attempts, falling back to centre {center:?}");
    SpawnPoint {
        position: center,
        fallback: true,
    }
}

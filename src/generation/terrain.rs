//! # Terrain Synthesis
//!
//! Combines three noise fields with edge falloff, pond removal and biome
//! classification into a ground grid of water, sand and biome cells.

use super::biome::{BiomeClassifier, Tint};
use super::noise_field::{NoiseField, NoiseOffset, Wave};
use crate::grid::{Field, Position};
use crate::utils::{inverse_lerp, lerp};
use log::debug;
use serde::{Deserialize, Serialize};

/// Height lift applied to interior ponds, above the sand threshold.
const POND_LIFT: f64 = 0.001;

/// Base ground classification of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ground {
    Water,
    Sand,
    /// A land cell with its biome index and blended tint
    Biome { index: usize, tint: Tint },
}

impl Ground {
    /// True for water and sand.
    pub fn is_shore_or_water(&self) -> bool {
        matches!(self, Ground::Water | Ground::Sand)
    }
}

impl Default for Ground {
    fn default() -> Self {
        Ground::Water
    }
}

/// The wave lists for the three terrain fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveLayers {
    pub height: Vec<Wave>,
    pub moisture: Vec<Wave>,
    pub heat: Vec<Wave>,
}

/// Thresholds and border rules for classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainRules {
    /// Height below which a cell is water
    pub water_height: f64,
    /// Height below which a cell is sand
    pub sand_height: f64,
    /// Cells closer than this to the border are pulled toward height 0
    pub edge_band: i32,
    /// Lift sub-water cells outside the edge band to sand level
    pub remove_ponds: bool,
}

/// Raw fields plus the ground classification of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    /// Height after edge falloff
    pub height: Field<f64>,
    pub moisture: Field<f64>,
    pub heat: Field<f64>,
    pub ground: Field<Ground>,
}

impl Terrain {
    pub fn width(&self) -> usize {
        self.ground.width()
    }

    pub fn height_at(&self, pos: Position) -> f64 {
        self.height.sample(pos)
    }

    /// Ground at a position; cells outside the grid read as water.
    pub fn ground_at(&self, pos: Position) -> Ground {
        self.ground.sample(pos)
    }

    /// Height, moisture and heat at a position.
    pub fn climate_at(&self, pos: Position) -> (f64, f64, f64) {
        (
            self.height.sample(pos),
            self.moisture.sample(pos),
            self.heat.sample(pos),
        )
    }
}

/// Produces [`Terrain`] from noise and classification rules.
#[derive(Debug, Clone)]
pub struct TerrainSynthesizer {
    noise: NoiseField,
    classifier: BiomeClassifier,
    rules: TerrainRules,
}

impl TerrainSynthesizer {
    pub fn new(noise: NoiseField, classifier: BiomeClassifier, rules: TerrainRules) -> Self {
        Self {
            noise,
            classifier,
            rules,
        }
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Generates and classifies a `width × height` terrain.
    ///
    /// All three fields share `offset` so they stay spatially correlated.
    pub fn synthesize(
        &self,
        width: usize,
        height: usize,
        waves: &WaveLayers,
        scale: f64,
        offset: NoiseOffset,
    ) -> Terrain {
        let mut height_field = self.noise.generate(width, height, &waves.height, scale, offset);
        let moisture = self.noise.generate(width, height, &waves.moisture, scale, offset);
        let heat = self.noise.generate(width, height, &waves.heat, scale, offset);

        self.apply_edge_falloff(&mut height_field);
        let ground = self.classify(&height_field, &moisture, &heat);

        let water = ground.values().filter(|g| **g == Ground::Water).count();
        let sand = ground.values().filter(|g| **g == Ground::Sand).count();
        debug!("Terrain {width}x{height}: {water} water cells, {sand} sand cells");

        Terrain {
            height: height_field,
            moisture,
            heat,
            ground,
        }
    }

    /// Pulls heights inside the edge band toward 0, reaching 0 on the border.
    pub fn apply_edge_falloff(&self, heights: &mut Field<f64>) {
        let band = self.rules.edge_band;
        if band <= 0 {
            return;
        }
        let (width, height) = (heights.width(), heights.height());
        for (pos, value) in heights.iter_mut() {
            let d = distance_to_edge(pos, width, height);
            if d < band {
                let t = inverse_lerp(band as f64, 0.0, d as f64);
                *value = lerp(*value, 0.0, t);
            }
        }
    }

    /// Classifies every cell from already-adjusted fields.
    pub fn classify(
        &self,
        heights: &Field<f64>,
        moisture: &Field<f64>,
        heat: &Field<f64>,
    ) -> Field<Ground> {
        let (width, height) = (heights.width(), heights.height());
        Field::from_fn(width, height, |x, y| {
            let pos = Position::new(x as i32, y as i32);
            self.classify_cell(
                heights.sample(pos),
                moisture.sample(pos),
                heat.sample(pos),
                distance_to_edge(pos, width, height),
            )
        })
    }

    /// Classifies one cell given its samples and distance to the border.
    ///
    /// Pond removal only changes the height used here; the stored field
    /// keeps the falloff value.
    pub fn classify_cell(&self, height: f64, moisture: f64, heat: f64, edge_distance: i32) -> Ground {
        let rules = &self.rules;
        let mut h = height;
        if rules.remove_ponds && edge_distance >= rules.edge_band && h < rules.water_height {
            h = rules.sand_height + POND_LIFT;
        }

        if h < rules.water_height {
            return Ground::Water;
        }
        if h < rules.sand_height {
            return Ground::Sand;
        }

        let found = self.classifier.classify(h, moisture, heat);
        Ground::Biome {
            index: found.biome,
            tint: found.tint,
        }
    }
}

/// Cells between `pos` and the nearest grid border.
pub fn distance_to_edge(pos: Position, width: usize, height: usize) -> i32 {
    let right = width as i32 - 1 - pos.x;
    let top = height as i32 - 1 - pos.y;
    pos.x.min(right).min(pos.y.min(top))
}

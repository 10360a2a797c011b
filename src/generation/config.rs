//! # Generation Configuration
//!
//! Serializable parameters for both pipelines with preset constructors and
//! fail-fast validation.

use super::biome::{BiomeDefinition, Tint};
use super::noise_field::{NoiseOffset, Wave};
use super::placement::PropDefinition;
use super::terrain::WaveLayers;
use super::walk::WalkParams;
use crate::config::*;
use crate::grid::Position;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for one generation run.
///
/// # Examples
///
/// ```
/// use delve::{GenerationConfig, LevelConfig};
///
/// let config = GenerationConfig::overworld(9);
/// assert!(matches!(config.level, LevelConfig::Overworld(_)));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Which level to build, with its parameters
    pub level: LevelConfig,
}

/// Level mode and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LevelConfig {
    Dungeon(DungeonConfig),
    Overworld(OverworldConfig),
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig::Dungeon(DungeonConfig::default())
    }
}

impl GenerationConfig {
    /// Creates a default dungeon configuration.
    pub fn dungeon(seed: u64) -> Self {
        Self {
            seed,
            level: LevelConfig::Dungeon(DungeonConfig::default()),
        }
    }

    /// Creates a default overworld configuration.
    pub fn overworld(seed: u64) -> Self {
        Self {
            seed,
            level: LevelConfig::Overworld(OverworldConfig::default()),
        }
    }

    /// Creates a small overworld configuration for fast tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            level: LevelConfig::Overworld(OverworldConfig {
                width: 32,
                height: 24,
                scale: 6.0,
                edge_band: 3,
                landmark_count: 4,
                spawn_attempts: 200,
                ..OverworldConfig::default()
            }),
        }
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> DelveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the configuration can produce a valid level.
    pub fn validate(&self) -> DelveResult<()> {
        match &self.level {
            LevelConfig::Dungeon(dungeon) => dungeon.validate(),
            LevelConfig::Overworld(overworld) => overworld.validate(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::dungeon(42)
    }
}

/// Overall dungeon layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DungeonLayout {
    /// Partition into rooms, then join them with corridors
    RoomsFirst,
    /// One organic cave carved by random walks from the start position
    RandomWalk,
}

/// Interior shape of each room in the rooms-first layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomShape {
    /// The whole partition leaf minus the offset margin
    Rectangular,
    /// A random-walk blob clipped to the leaf minus the offset margin
    RandomWalk,
}

/// Parameters for [`crate::DungeonPipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    /// Lower-left corner of the dungeon area
    pub start: Position,
    pub min_room_width: i32,
    pub min_room_height: i32,
    /// Cells left empty between a room and its partition edge
    pub offset: i32,
    pub layout: DungeonLayout,
    pub room_shape: RoomShape,
    pub walk: WalkParams,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DUNGEON_WIDTH,
            height: DEFAULT_DUNGEON_HEIGHT,
            start: Position::origin(),
            min_room_width: DEFAULT_MIN_ROOM_WIDTH,
            min_room_height: DEFAULT_MIN_ROOM_HEIGHT,
            offset: 1,
            layout: DungeonLayout::RoomsFirst,
            room_shape: RoomShape::Rectangular,
            walk: WalkParams::default(),
        }
    }
}

impl DungeonConfig {
    pub fn validate(&self) -> DelveResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return invalid(format!(
                "dungeon dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.offset < 0 {
            return invalid(format!("offset must not be negative, got {}", self.offset));
        }
        if self.layout == DungeonLayout::RandomWalk {
            return Ok(());
        }
        if self.min_room_width <= self.offset || self.min_room_height <= self.offset {
            return invalid(format!(
                "minimum room size {}x{} must exceed the offset {}",
                self.min_room_width, self.min_room_height, self.offset
            ));
        }
        if self.width < self.min_room_width + self.offset
            || self.height < self.min_room_height + self.offset
        {
            return invalid(format!(
                "dungeon {}x{} cannot hold one {}x{} room with offset {}",
                self.width, self.height, self.min_room_width, self.min_room_height, self.offset
            ));
        }
        Ok(())
    }
}

/// Parameters for [`crate::OverworldPipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverworldConfig {
    pub width: i32,
    pub height: i32,
    /// Cells per noise unit; non-positive values are clamped
    pub scale: f64,
    pub base_offset: NoiseOffset,
    /// Add a random jitter to the offset on every run
    pub randomize_offset: bool,
    pub offset_jitter: f64,
    pub waves: WaveLayers,
    /// Biomes in priority order; the first is the fallback
    pub biomes: Vec<BiomeDefinition>,
    pub water_height: f64,
    pub sand_height: f64,
    pub edge_band: i32,
    pub remove_ponds: bool,
    pub landmark_count: u32,
    pub entrance_count: u32,
    pub entrance_width: i32,
    pub place_stairs: bool,
    pub stair_height: i32,
    pub props: Vec<PropDefinition>,
    pub spawn_attempts: u32,
}

impl Default for OverworldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_OVERWORLD_WIDTH,
            height: DEFAULT_OVERWORLD_HEIGHT,
            scale: DEFAULT_NOISE_SCALE,
            base_offset: NoiseOffset::default(),
            randomize_offset: true,
            offset_jitter: 9999.0,
            waves: default_waves(),
            biomes: default_biomes(),
            water_height: DEFAULT_WATER_HEIGHT,
            sand_height: DEFAULT_SAND_HEIGHT,
            edge_band: DEFAULT_EDGE_WATER_BAND,
            remove_ponds: true,
            landmark_count: 6,
            entrance_count: 2,
            entrance_width: 2,
            place_stairs: true,
            stair_height: 3,
            props: default_props(),
            spawn_attempts: DEFAULT_SPAWN_ATTEMPTS,
        }
    }
}

impl OverworldConfig {
    pub fn validate(&self) -> DelveResult<()> {
        if self.width < 8 || self.height < 8 {
            return invalid(format!(
                "overworld must be at least 8x8, got {}x{}",
                self.width, self.height
            ));
        }
        if self.biomes.is_empty() {
            return invalid("at least one biome definition is required".to_string());
        }

        let layers = [
            ("height", &self.waves.height),
            ("moisture", &self.waves.moisture),
            ("heat", &self.waves.heat),
        ];
        for (name, waves) in layers {
            if let Some(wave) = waves.iter().find(|w| w.amplitude < 0.0) {
                return invalid(format!(
                    "{name} wave amplitude must not be negative, got {}",
                    wave.amplitude
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.water_height) || !(0.0..=1.0).contains(&self.sand_height) {
            return invalid("water and sand heights must lie in [0, 1]".to_string());
        }
        if self.sand_height < self.water_height {
            return invalid(format!(
                "sand height {} is below water height {}",
                self.sand_height, self.water_height
            ));
        }
        if self.edge_band < 0 {
            return invalid(format!("edge band must not be negative, got {}", self.edge_band));
        }
        if !self.offset_jitter.is_finite()
            || self.offset_jitter < 0.0
            || self.offset_jitter > MAX_OFFSET_JITTER
        {
            return invalid(format!(
                "offset jitter must lie in [0, {MAX_OFFSET_JITTER:e}], got {}",
                self.offset_jitter
            ));
        }
        let interior_cells = (self.width as i64 - 4) * (self.height as i64 - 4);
        if self.landmark_count as i64 > interior_cells {
            return invalid(format!(
                "{} landmarks do not fit the {interior_cells} interior cells",
                self.landmark_count
            ));
        }
        if self.spawn_attempts == 0 {
            return invalid("spawn attempts must be at least 1".to_string());
        }
        if self.entrance_count > 0
            && (self.entrance_width < 1 || self.width - 2 - self.entrance_width <= 2)
        {
            return invalid(format!(
                "entrance width {} does not fit a border of width {}",
                self.entrance_width, self.width
            ));
        }
        if self.place_stairs
            && self.entrance_count > 0
            && (self.stair_height < 1 || self.stair_height > self.height - 3)
        {
            return invalid(format!(
                "stair height {} does not fit a map of height {}",
                self.stair_height, self.height
            ));
        }
        if let Some(prop) = self
            .props
            .iter()
            .find(|p| !(0.0..=1.0).contains(&p.spawn_chance))
        {
            return invalid(format!(
                "prop '{}' spawn chance {} is outside [0, 1]",
                prop.name, prop.spawn_chance
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> DelveResult<()> {
    Err(DelveError::InvalidConfig(message))
}

/// Two octaves per field with distinct seeds so the fields decorrelate.
pub fn default_waves() -> WaveLayers {
    WaveLayers {
        height: vec![Wave::new(56.0, 0.9, 1.0), Wave::new(199.36, 1.8, 0.5)],
        moisture: vec![Wave::new(621.0, 0.7, 1.0), Wave::new(45.2, 1.4, 0.5)],
        heat: vec![Wave::new(318.6, 0.5, 1.0), Wave::new(329.7, 1.1, 0.4)],
    }
}

pub fn default_biomes() -> Vec<BiomeDefinition> {
    vec![
        BiomeDefinition::new("grassland", 0.15, 0.0, 0.0).with_tint(Tint::rgb(0.55, 0.80, 0.35)),
        BiomeDefinition::new("forest", 0.25, 0.50, 0.0).with_tint(Tint::rgb(0.20, 0.55, 0.20)),
        BiomeDefinition::new("savanna", 0.20, 0.0, 0.55).with_tint(Tint::rgb(0.80, 0.75, 0.40)),
        BiomeDefinition::new("highland", 0.60, 0.0, 0.0).with_tint(Tint::rgb(0.55, 0.55, 0.50)),
    ]
}

pub fn default_props() -> Vec<PropDefinition> {
    vec![
        PropDefinition::new("tree", 0.08)
            .with_thresholds(0.25, 0.45, 0.0)
            .tall()
            .with_spacing(1),
        PropDefinition::new("bush", 0.04).with_thresholds(0.2, 0.3, 0.0),
        PropDefinition::new("rock", 0.02).with_thresholds(0.45, 0.0, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GenerationConfig::dungeon(1).validate().is_ok());
        assert!(GenerationConfig::overworld(1).validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
        assert!(GenerationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_dungeon_validation() {
        let base = DungeonConfig::default();

        let bad = DungeonConfig { width: 0, ..base.clone() };
        assert!(matches!(bad.validate(), Err(DelveError::InvalidConfig(_))));

        let bad = DungeonConfig { min_room_width: 1, ..base.clone() };
        assert!(bad.validate().is_err());

        let bad = DungeonConfig { width: 4, ..base.clone() };
        assert!(bad.validate().is_err());

        // Room sizes are irrelevant to the random walk layout.
        let walk = DungeonConfig {
            width: 4,
            layout: DungeonLayout::RandomWalk,
            ..base
        };
        assert!(walk.validate().is_ok());
    }

    #[test]
    fn test_overworld_validation() {
        let base = OverworldConfig::default();

        assert!(OverworldConfig { biomes: Vec::new(), ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { height: 0, ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { sand_height: 0.05, ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { spawn_attempts: 0, ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { entrance_width: 80, ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { stair_height: 70, ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { stair_height: i32::MAX, ..base.clone() }.validate().is_err());
        assert!(OverworldConfig { stair_height: 57, ..base.clone() }.validate().is_ok());

        let mut negative = base.clone();
        negative.waves.heat.push(Wave::new(0.0, 1.0, -0.5));
        assert!(negative.validate().is_err());

        let mut chance = base.clone();
        chance.props.push(PropDefinition::new("bad", 1.5));
        assert!(chance.validate().is_err());

        // Non-positive scale is recovered at generation time.
        assert!(OverworldConfig { scale: 0.0, ..base }.validate().is_ok());
    }

    #[test]
    fn test_offset_jitter_bounds() {
        let base = OverworldConfig::default();
        for jitter in [1e308, f64::INFINITY, f64::NAN, -1.0] {
            let config = OverworldConfig { offset_jitter: jitter, ..base.clone() };
            assert!(
                matches!(config.validate(), Err(DelveError::InvalidConfig(_))),
                "jitter {jitter} accepted"
            );
        }
        assert!(OverworldConfig { offset_jitter: MAX_OFFSET_JITTER, ..base }.validate().is_ok());
    }

    #[test]
    fn test_landmark_count_must_fit_interior() {
        let base = OverworldConfig::default();
        let huge = OverworldConfig { landmark_count: 200_000_000, ..base.clone() };
        assert!(matches!(huge.validate(), Err(DelveError::InvalidConfig(_))));

        let interior = ((base.width - 4) * (base.height - 4)) as u32;
        assert!(OverworldConfig { landmark_count: interior, ..base }.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GenerationConfig::from_json_str(
            r#"{ "seed": 5, "level": { "Dungeon": { "width": 30, "layout": "RandomWalk" } } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 5);
        match config.level {
            LevelConfig::Dungeon(dungeon) => {
                assert_eq!(dungeon.width, 30);
                assert_eq!(dungeon.height, DEFAULT_DUNGEON_HEIGHT);
                assert_eq!(dungeon.layout, DungeonLayout::RandomWalk);
                assert_eq!(dungeon.walk, WalkParams::default());
            }
            other => panic!("expected a dungeon config, got {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let config = GenerationConfig::overworld(77);
        let json = config.to_json().unwrap();
        assert_eq!(GenerationConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_serde_error() {
        assert!(matches!(
            GenerationConfig::from_json_str("{ not json"),
            Err(DelveError::Serde(_))
        ));
    }
}

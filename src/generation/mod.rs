//! # Generation Module
//!
//! Procedural level generation for dungeons and overworlds.
//!
//! Every component here is deterministic given its inputs and a seeded
//! [`StdRng`]. The two pipelines, [`DungeonPipeline`] and
//! [`OverworldPipeline`], sequence the components into a finished
//! [`Level`]; [`generate_level`] picks the right one for a configuration.

pub mod autotile;
pub mod biome;
pub mod config;
pub mod connect;
pub mod dungeon;
pub mod level;
pub mod noise_field;
pub mod overworld;
pub mod partition;
pub mod placement;
pub mod terrain;
pub mod walk;

pub use autotile::*;
pub use biome::*;
pub use config::*;
pub use connect::*;
pub use dungeon::*;
pub use level::*;
pub use noise_field::*;
pub use overworld::*;
pub use partition::*;
pub use placement::*;
pub use terrain::*;
pub use walk::*;

use crate::grid::{CellSet, Position, Rect};
use crate::DelveResult;
use log::info;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A room produced by the rooms-first dungeon layout.
///
/// Rooms are immutable once generated. The centre is the real-valued centre
/// of the partition leaf; graph algorithms use [`Room::center_cell`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Index of the room in creation order
    pub id: u32,
    /// Partition leaf the room was built in
    pub bounds: Rect,
    /// Real-valued centre of the bounds
    pub center: (f64, f64),
    /// Floor cells owned by this room
    pub floors: CellSet,
}

impl Room {
    /// Creates a room from its bounds and floor cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{CellSet, Position, Rect, Room};
    ///
    /// let bounds = Rect::new(Position::new(0, 0), 6, 5);
    /// let floors: CellSet = bounds.shrink(1).unwrap().positions().collect();
    /// let room = Room::new(0, bounds, floors);
    /// assert_eq!(room.center, (3.0, 2.5));
    /// assert_eq!(room.center_cell(), Position::new(3, 2));
    /// assert!(room.contains(Position::new(1, 1)));
    /// ```
    pub fn new(id: u32, bounds: Rect, floors: CellSet) -> Self {
        Self {
            id,
            bounds,
            center: bounds.center(),
            floors,
        }
    }

    /// Centre rounded down onto the grid; always inside the room's margin.
    pub fn center_cell(&self) -> Position {
        self.bounds.center_cell()
    }

    /// Checks if a cell is one of this room's floors.
    pub fn contains(&self, pos: Position) -> bool {
        self.floors.contains(&pos)
    }

    /// Number of floor cells.
    pub fn area(&self) -> usize {
        self.floors.len()
    }
}

/// Trait for procedural generators.
///
/// Both pipelines implement this trait so callers can drive either through
/// one interface.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Consumer of the finished room list of a dungeon run, such as a loot or
/// encounter placer.
pub trait RoomExtractor {
    fn process_rooms(&mut self, rooms: &[Room]);
}

/// Entry point that picks a pipeline from the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelGenerator;

impl LevelGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a level with a fresh generator seeded from `config.seed`.
    pub fn generate(&self, config: &GenerationConfig) -> DelveResult<Level> {
        let mut rng = utils::create_rng(config);
        let level = match &config.level {
            LevelConfig::Dungeon(dungeon) => {
                let pipeline = DungeonPipeline::from_config(dungeon);
                info!("Running {}", pipeline.generator_type());
                pipeline.generate(config, &mut rng)?
            }
            LevelConfig::Overworld(_) => {
                let pipeline = OverworldPipeline::default();
                info!("Running {}", pipeline.generator_type());
                pipeline.generate(config, &mut rng)?
            }
        };
        Ok(level)
    }

    /// Generates a level, then hands its rooms to `extractor`.
    ///
    /// The extractor runs only after the level is complete and valid.
    pub fn generate_with_extractor(
        &self,
        config: &GenerationConfig,
        extractor: &mut dyn RoomExtractor,
    ) -> DelveResult<Level> {
        let level = self.generate(config)?;
        extractor.process_rooms(&level.rooms);
        Ok(level)
    }
}

/// Generates a level for `config`.
///
/// Identical configurations (seed included) always produce identical levels.
pub fn generate_level(config: &GenerationConfig) -> DelveResult<Level> {
    LevelGenerator::new().generate(config)
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::DelveError;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Validates that a level meets basic requirements.
    ///
    /// A level needs at least one floor, and no wall may share a cell with
    /// a floor or path.
    pub fn validate_level(level: &Level) -> DelveResult<()> {
        if level.floors.is_empty() {
            return Err(DelveError::GenerationFailed(
                "level has no floor cells".to_string(),
            ));
        }

        if let Some(pos) = level
            .walls
            .keys()
            .find(|pos| level.floors.contains(pos) || level.paths.contains_key(pos))
        {
            return Err(DelveError::InvariantViolation(format!(
                "wall at {pos:?} overlaps a floor or path"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DelveError;

    #[derive(Default)]
    struct RecordingExtractor {
        calls: usize,
        room_ids: Vec<u32>,
    }

    impl RoomExtractor for RecordingExtractor {
        fn process_rooms(&mut self, rooms: &[Room]) {
            self.calls += 1;
            self.room_ids = rooms.iter().map(|room| room.id).collect();
        }
    }

    #[test]
    fn test_room_center_rounding() {
        let room = Room::new(3, Rect::new(Position::new(10, 4), 7, 9), CellSet::new());
        assert_eq!(room.center, (13.5, 8.5));
        assert_eq!(room.center_cell(), Position::new(13, 8));
        assert_eq!(room.area(), 0);
    }

    #[test]
    fn test_generate_level_dispatches_on_mode() {
        let dungeon = generate_level(&GenerationConfig::dungeon(4)).unwrap();
        assert_eq!(dungeon.kind, LevelKind::Dungeon);
        assert!(dungeon.ground.is_empty());

        let overworld = generate_level(&GenerationConfig::for_testing(4)).unwrap();
        assert_eq!(overworld.kind, LevelKind::Overworld);
        assert!(overworld.rooms.is_empty());
    }

    #[test]
    fn test_extractor_receives_final_rooms() {
        let mut extractor = RecordingExtractor::default();
        let level = LevelGenerator::new()
            .generate_with_extractor(&GenerationConfig::dungeon(10), &mut extractor)
            .unwrap();

        assert_eq!(extractor.calls, 1);
        assert_eq!(extractor.room_ids.len(), level.rooms.len());
        assert_eq!(extractor.room_ids[0], 0);
    }

    #[test]
    fn test_extractor_not_called_on_failure() {
        let mut config = GenerationConfig::dungeon(1);
        if let LevelConfig::Dungeon(dungeon) = &mut config.level {
            dungeon.width = 0;
        }
        let mut extractor = RecordingExtractor::default();
        let result = LevelGenerator::new().generate_with_extractor(&config, &mut extractor);

        assert!(matches!(result, Err(DelveError::InvalidConfig(_))));
        assert_eq!(extractor.calls, 0);
    }

    #[test]
    fn test_validate_level_rejects_empty_and_overlap() {
        let mut level = Level::new(LevelKind::Dungeon, 0, Rect::new(Position::origin(), 4, 4));
        assert!(matches!(
            utils::validate_level(&level),
            Err(DelveError::GenerationFailed(_))
        ));

        level.floors.insert(Position::new(1, 1));
        assert!(utils::validate_level(&level).is_ok());

        level.walls.insert(Position::new(1, 1), WallTile::Single);
        assert!(matches!(
            utils::validate_level(&level),
            Err(DelveError::InvariantViolation(_))
        ));
    }
}

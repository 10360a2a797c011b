//! # Dungeon Generation
//!
//! Room-and-corridor and cave dungeons assembled from swappable strategies.
//!
//! The rooms-first layout partitions the dungeon area, fills each leaf with
//! a room, chains the room centres with widened corridors and wraps every
//! floor in autotiled walls. The random-walk layout skips rooms and carves
//! one organic cave from the start position.

use super::autotile::{resolve_floor_walls, resolve_paths};
use super::config::{DungeonConfig, DungeonLayout, LevelConfig, RoomShape};
use super::connect::{ConnectStrategy, NearestNeighborConnector};
use super::level::{Level, LevelKind};
use super::partition::{BinarySpacePartitioner, PartitionStrategy};
use super::placement::SpawnPoint;
use super::walk::{CarveStrategy, RandomWalkCarver};
use super::{utils, GenerationConfig, Generator, Room};
use crate::grid::{CellSet, Position, Rect};
use crate::utils::{component_count, reachable_from};
use crate::{DelveError, DelveResult};
use log::{debug, info};
use rand::rngs::StdRng;

/// Dungeon pipeline: partition → rooms → connect → walls → spawn.
///
/// Random draws happen in this order: every partition draw, then per room
/// (in partition order) its carve draws when rooms are walked, then the
/// connector's start index. The random-walk layout draws only its carve.
pub struct DungeonPipeline {
    /// Splits the dungeon area into room leaves
    pub partitioner: Box<dyn PartitionStrategy>,
    /// Joins room centres with corridors
    pub connector: Box<dyn ConnectStrategy>,
    /// Carves caves and walked room interiors
    pub carver: Box<dyn CarveStrategy>,
}

impl DungeonPipeline {
    /// Creates a pipeline with the standard strategies for `config`.
    ///
    /// Partition leaves are at least the minimum room size plus the offset,
    /// so every room keeps a non-empty interior after the margin.
    pub fn from_config(config: &DungeonConfig) -> Self {
        Self {
            partitioner: Box::new(BinarySpacePartitioner::new(
                config.min_room_width + config.offset,
                config.min_room_height + config.offset,
            )),
            connector: Box::new(NearestNeighborConnector::new()),
            carver: Box::new(RandomWalkCarver::new(config.walk)),
        }
    }

    /// Builds one room per partition leaf.
    fn build_rooms(
        &self,
        config: &DungeonConfig,
        leaves: &[Rect],
        rng: &mut StdRng,
    ) -> DelveResult<Vec<Room>> {
        let mut rooms = Vec::with_capacity(leaves.len());

        for (id, leaf) in leaves.iter().enumerate() {
            let inner = leaf.shrink(config.offset).ok_or_else(|| {
                DelveError::InvariantViolation(format!("partition leaf {leaf:?} has no interior"))
            })?;

            let floors = match config.room_shape {
                RoomShape::Rectangular => inner.positions().collect(),
                RoomShape::RandomWalk => {
                    let center = leaf.center_cell();
                    let clipped: CellSet = self
                        .carver
                        .carve(center, rng)
                        .into_iter()
                        .filter(|pos| inner.contains(*pos))
                        .collect();
                    reachable_from(&clipped, center)
                }
            };

            rooms.push(Room::new(id as u32, *leaf, floors));
        }

        Ok(rooms)
    }

    fn generate_rooms_first(
        &self,
        config: &DungeonConfig,
        level: &mut Level,
        rng: &mut StdRng,
    ) -> DelveResult<()> {
        let leaves = self.partitioner.partition(level.bounds, rng);
        let rooms = self.build_rooms(config, &leaves, rng)?;

        let centers: Vec<Position> = rooms.iter().map(Room::center_cell).collect();
        let connection = self.connector.connect(&centers, rng);
        debug!("Connected {} rooms in order {:?}", rooms.len(), connection.order);

        for room in &rooms {
            level.floors.extend(room.floors.iter().copied());
        }
        level.floors.extend(connection.corridors.iter().copied());

        let walls = resolve_floor_walls(&level.floors);
        let wall_cells: CellSet = walls.keys().copied().collect();
        level.paths = resolve_paths(&connection.corridors, &wall_cells);
        level.walls = walls;

        if let Some(first) = rooms.first() {
            level.spawn = SpawnPoint::at(first.center_cell());
        }
        level.rooms = rooms;
        Ok(())
    }

    fn generate_random_walk(&self, config: &DungeonConfig, level: &mut Level, rng: &mut StdRng) {
        level.floors = self.carver.carve(config.start, rng);
        level.walls = resolve_floor_walls(&level.floors);
        level.spawn = SpawnPoint::at(config.start);
    }
}

/// Checks that every floor cell, and every room, is reachable from the spawn.
pub fn validate_connectivity(level: &Level) -> DelveResult<()> {
    let reached = reachable_from(&level.floors, level.spawn.position);
    if reached.len() == level.floors.len() {
        return Ok(());
    }

    let stranded = level
        .rooms
        .iter()
        .find(|room| room.floors.iter().any(|pos| !reached.contains(pos)));
    let message = match stranded {
        Some(room) => format!("room {} is not connected to the other rooms", room.id),
        None => format!(
            "floor splits into {} disconnected regions",
            component_count(&level.floors)
        ),
    };
    Err(DelveError::InvariantViolation(message))
}

impl Generator<Level> for DungeonPipeline {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Level> {
        let dungeon = match &config.level {
            LevelConfig::Dungeon(dungeon) => dungeon,
            LevelConfig::Overworld(_) => {
                return Err(DelveError::InvalidConfig(
                    "dungeon pipeline needs a dungeon configuration".to_string(),
                ))
            }
        };
        dungeon.validate()?;

        info!(
            "Generating {}x{} {:?} dungeon with seed {}",
            dungeon.width, dungeon.height, dungeon.layout, config.seed
        );

        let bounds = Rect::new(dungeon.start, dungeon.width, dungeon.height);
        let mut level = Level::new(LevelKind::Dungeon, config.seed, bounds);

        match dungeon.layout {
            DungeonLayout::RoomsFirst => self.generate_rooms_first(dungeon, &mut level, rng)?,
            DungeonLayout::RandomWalk => self.generate_random_walk(dungeon, &mut level, rng),
        }

        debug!(
            "Dungeon has {} floors, {} walls, {} corridor paths",
            level.floors.len(),
            level.walls.len(),
            level.paths.len()
        );

        validate_connectivity(&level)?;
        self.validate(&level, config)?;

        info!(
            "Dungeon complete: {} rooms, spawn at {:?}",
            level.rooms.len(),
            level.spawn.position
        );
        Ok(level)
    }

    fn validate(&self, level: &Level, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_level(level)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonPipeline"
    }
}

impl Default for DungeonPipeline {
    fn default() -> Self {
        Self::from_config(&DungeonConfig::default())
    }
}

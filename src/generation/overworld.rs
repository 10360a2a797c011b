//! # Overworld Generation
//!
//! Open biome maps: noise terrain ringed by ocean, a walled border with
//! entrances and stairs, winding paths between landmarks, scattered props
//! and a validated spawn point.

use super::autotile::{resolve_paths, resolve_wall_runs};
use super::biome::BiomeClassifier;
use super::config::{LevelConfig, OverworldConfig};
use super::level::{Entrance, Facing, Level, LevelKind, StairPart, StairTile};
use super::noise_field::{NoiseField, NoiseOffset};
use super::placement::{choose_spawn, place_props};
use super::terrain::{Ground, Terrain, TerrainRules, TerrainSynthesizer};
use super::{utils, GenerationConfig, Generator};
use crate::config::LANDMARK_ATTEMPTS_PER_POINT;
use crate::grid::{CellSet, Position, Rect};
use crate::{DelveError, DelveResult};
use log::{debug, info};
use rand::{rngs::StdRng, Rng};

/// Overworld pipeline.
///
/// Stages run in a fixed order, and so do their random draws: offset
/// jitter (x then y), entrance columns, landmark samples (x then y each),
/// path coin flips, prop draws, spawn samples (x then y each).
#[derive(Debug, Clone, Default)]
pub struct OverworldPipeline {
    noise: NoiseField,
}

impl OverworldPipeline {
    pub fn new(noise: NoiseField) -> Self {
        Self { noise }
    }

    fn run(&self, config: &OverworldConfig, seed: u64, rng: &mut StdRng) -> DelveResult<Level> {
        let width = config.width;
        let height = config.height;

        let mut offset = config.base_offset;
        if config.randomize_offset && config.offset_jitter > 0.0 {
            let jitter = config.offset_jitter;
            offset = NoiseOffset::new(
                offset.x + rng.gen_range(-jitter..jitter),
                offset.y + rng.gen_range(-jitter..jitter),
            );
        }

        let synthesizer = TerrainSynthesizer::new(
            self.noise.clone(),
            BiomeClassifier::new(config.biomes.clone())?,
            TerrainRules {
                water_height: config.water_height,
                sand_height: config.sand_height,
                edge_band: config.edge_band,
                remove_ponds: config.remove_ponds,
            },
        );
        let terrain = synthesizer.synthesize(
            width as usize,
            height as usize,
            &config.waves,
            config.scale,
            offset,
        );

        let mut level = Level::new(
            LevelKind::Overworld,
            seed,
            Rect::new(Position::origin(), width, height),
        );
        level.ground = terrain.ground.iter().map(|(pos, g)| (pos, *g)).collect();

        level.entrances = place_entrances(config, rng);
        let walls = border_walls(width, height, &level.entrances);
        level.walls = resolve_wall_runs(&walls);

        let landmarks = find_landmarks(config.landmark_count, &terrain, &walls, rng);
        let budget = (width * height * 2) as u32;
        let mut path_cells = CellSet::new();
        for pair in landmarks.windows(2) {
            trace_path(pair[0], pair[1], &terrain, &walls, budget, rng, &mut path_cells);
        }
        level.paths = resolve_paths(&path_cells, &walls);
        debug!(
            "Traced {} path cells between {} landmarks",
            level.paths.len(),
            landmarks.len()
        );

        if config.place_stairs {
            for entrance in &level.entrances {
                for (pos, tile) in stair_column(entrance, config.stair_height) {
                    level.paths.remove(&pos);
                    level.stairs.insert(pos, tile);
                }
            }
        }

        level.floors = terrain
            .ground
            .iter()
            .filter(|(pos, g)| matches!(g, Ground::Biome { .. }) && !walls.contains(pos))
            .map(|(pos, _)| pos)
            .collect();

        level.props = place_props(&terrain, &level, &config.props, rng);
        level.spawn = choose_spawn(&terrain, &level, config.spawn_attempts, rng);
        Ok(level)
    }
}

/// Picks entrance columns on the inner border row.
fn place_entrances(config: &OverworldConfig, rng: &mut StdRng) -> Vec<Entrance> {
    (0..config.entrance_count)
        .map(|_| {
            let x = rng.gen_range(2..config.width - 2 - config.entrance_width);
            let facing = if x < config.width / 2 {
                Facing::UpRight
            } else {
                Facing::UpLeft
            };
            Entrance {
                position: Position::new(x, 1),
                width: config.entrance_width,
                facing,
            }
        })
        .collect()
}

/// Outer wall ring plus an inner row at y = 1, with entrances carved out.
pub fn border_walls(width: i32, height: i32, entrances: &[Entrance]) -> CellSet {
    let mut walls = CellSet::new();
    for x in 0..width {
        walls.insert(Position::new(x, 0));
        walls.insert(Position::new(x, height - 1));
    }
    for y in 0..height {
        walls.insert(Position::new(0, y));
        walls.insert(Position::new(width - 1, y));
    }
    for x in 1..width - 1 {
        walls.insert(Position::new(x, 1));
    }

    for entrance in entrances {
        for dx in 0..entrance.width {
            walls.remove(&(entrance.position + Position::new(dx, 0)));
        }
    }
    walls
}

/// Sampling attempts allowed for `count` landmarks, saturating at `u32::MAX`.
fn landmark_budget(count: u32) -> u32 {
    count.saturating_mul(LANDMARK_ATTEMPTS_PER_POINT)
}

/// Samples up to `count` landmarks on interior land, falling back to the
/// grid centre when none is found.
fn find_landmarks(
    count: u32,
    terrain: &Terrain,
    walls: &CellSet,
    rng: &mut StdRng,
) -> Vec<Position> {
    let width = terrain.ground.width() as i32;
    let height = terrain.ground.height() as i32;
    let mut attempts = landmark_budget(count);
    let mut points = Vec::new();

    while points.len() < count as usize && attempts > 0 {
        attempts -= 1;
        let x = rng.gen_range(2..width - 2);
        let y = rng.gen_range(2..height - 2);
        let pos = Position::new(x, y);

        if terrain.ground_at(pos).is_shore_or_water() || walls.contains(&pos) {
            continue;
        }
        points.push(pos);
    }

    if points.is_empty() {
        points.push(Position::new(width / 2, height / 2));
    }
    points
}

/// Walks from `start` toward `end`, each step moving one axis closer.
///
/// A coin flip picks the axis; a step on an already aligned axis stays in
/// place. Cells on land and off walls are recorded, and `end` is recorded
/// unless it is a wall.
fn trace_path(
    start: Position,
    end: Position,
    terrain: &Terrain,
    walls: &CellSet,
    budget: u32,
    rng: &mut StdRng,
    cells: &mut CellSet,
) {
    let mut current = start;
    let mut steps = budget;

    while current != end && steps > 0 {
        steps -= 1;
        if !walls.contains(&current) && !terrain.ground_at(current).is_shore_or_water() {
            cells.insert(current);
        }

        if rng.gen::<f64>() > 0.5 {
            current.x += (end.x - current.x).signum();
        } else {
            current.y += (end.y - current.y).signum();
        }
    }

    if !walls.contains(&end) {
        cells.insert(end);
    }
}

/// Stair cells climbing from the row above an entrance.
pub fn stair_column(entrance: &Entrance, stair_height: i32) -> Vec<(Position, StairTile)> {
    (0..stair_height)
        .map(|i| {
            let part = if i == 0 {
                StairPart::Bottom
            } else if i == stair_height - 1 {
                StairPart::Top
            } else {
                StairPart::Middle
            };
            let pos = entrance.position + Position::new(0, 1 + i);
            (
                pos,
                StairTile {
                    part,
                    facing: entrance.facing,
                },
            )
        })
        .collect()
}

impl Generator<Level> for OverworldPipeline {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Level> {
        let overworld = match &config.level {
            LevelConfig::Overworld(overworld) => overworld,
            LevelConfig::Dungeon(_) => {
                return Err(DelveError::InvalidConfig(
                    "overworld pipeline needs an overworld configuration".to_string(),
                ))
            }
        };
        overworld.validate()?;

        info!(
            "Generating {}x{} overworld with seed {}",
            overworld.width, overworld.height, config.seed
        );

        let level = self.run(overworld, config.seed, rng)?;
        self.validate(&level, config)?;

        info!(
            "Overworld complete: {} land cells, {} walls, {} paths, {} stairs, {} props, spawn at {:?}{}",
            level.floors.len(),
            level.walls.len(),
            level.paths.len(),
            level.stairs.len(),
            level.props.len(),
            level.spawn.position,
            if level.spawn.fallback { " (fallback)" } else { "" }
        );
        Ok(level)
    }

    fn validate(&self, level: &Level, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_level(level)
    }

    fn generator_type(&self) -> &'static str {
        "OverworldPipeline"
    }
}

//! # Level Output
//!
//! The finished, classified result of one generation run.

use super::autotile::{PathTile, WallTile};
use super::placement::{PropPlacement, SpawnPoint};
use super::terrain::Ground;
use super::Room;
use crate::grid::{CellSet, Position, Rect};
use crate::rendering::{SurfaceLayer, TileLookup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which pipeline produced a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    Dungeon,
    Overworld,
}

/// Direction a stair climbs, seen from the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    UpRight,
    UpLeft,
}

/// An opening carved into the border wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrance {
    /// Leftmost carved cell
    pub position: Position,
    /// Number of carved cells, extending right
    pub width: i32,
    pub facing: Facing,
}

/// Segment of a stair column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairPart {
    Bottom,
    Middle,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StairTile {
    pub part: StairPart,
    pub facing: Facing,
}

/// A generated level.
///
/// Layers are independent: a cell may be both floor and prop, but never
/// both wall and floor, and the path layer holds either a path or a stair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub kind: LevelKind,
    pub seed: u64,
    /// Generation area; walls may sit one cell outside it
    pub bounds: Rect,
    /// Walkable cells
    pub floors: CellSet,
    #[serde(with = "cell_map")]
    pub walls: BTreeMap<Position, WallTile>,
    #[serde(with = "cell_map")]
    pub paths: BTreeMap<Position, PathTile>,
    #[serde(with = "cell_map")]
    pub stairs: BTreeMap<Position, StairTile>,
    /// Base ground, overworld only
    #[serde(with = "cell_map")]
    pub ground: BTreeMap<Position, Ground>,
    #[serde(with = "cell_map")]
    pub props: BTreeMap<Position, PropPlacement>,
    /// Rooms in creation order, dungeon rooms-first layout only
    pub rooms: Vec<Room>,
    pub entrances: Vec<Entrance>,
    pub spawn: SpawnPoint,
}

impl Level {
    /// Creates an empty level.
    pub fn new(kind: LevelKind, seed: u64, bounds: Rect) -> Self {
        Self {
            kind,
            seed,
            bounds,
            floors: CellSet::new(),
            walls: BTreeMap::new(),
            paths: BTreeMap::new(),
            stairs: BTreeMap::new(),
            ground: BTreeMap::new(),
            props: BTreeMap::new(),
            rooms: Vec::new(),
            entrances: Vec::new(),
            spawn: SpawnPoint::at(bounds.min),
        }
    }

    /// Wall cells as a set.
    pub fn wall_cells(&self) -> CellSet {
        self.walls.keys().copied().collect()
    }

    /// Path cells as a set, stairs excluded.
    pub fn path_cells(&self) -> CellSet {
        self.paths.keys().copied().collect()
    }

    /// Smallest rectangle covering the bounds and every occupied cell.
    pub fn extent(&self) -> Rect {
        let cells = self
            .floors
            .iter()
            .chain(self.walls.keys())
            .chain(self.paths.keys())
            .chain(self.stairs.keys())
            .chain(self.ground.keys())
            .chain(self.props.keys());

        let (mut min_x, mut min_y) = (self.bounds.min.x, self.bounds.min.y);
        let (mut max_x, mut max_y) = (self.bounds.max_x(), self.bounds.max_y());
        for pos in cells {
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x + 1);
            max_y = max_y.max(pos.y + 1);
        }
        Rect::new(Position::new(min_x, min_y), max_x - min_x, max_y - min_y)
    }

    /// Serializes the level as pretty JSON.
    pub fn to_json(&self) -> crate::DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TileLookup for Level {
    fn has_tile(&self, layer: SurfaceLayer, pos: Position) -> bool {
        match layer {
            SurfaceLayer::Ground => self.ground.contains_key(&pos) || self.floors.contains(&pos),
            SurfaceLayer::Wall => self.walls.contains_key(&pos),
            SurfaceLayer::Path => self.paths.contains_key(&pos) || self.stairs.contains_key(&pos),
            SurfaceLayer::PropBack | SurfaceLayer::PropFront => {
                self.props.get(&pos).map_or(false, |p| p.layer == layer)
            }
        }
    }
}

/// Serializes position-keyed maps as `[position, value]` sequences, since
/// JSON object keys must be strings.
mod cell_map {
    use crate::grid::Position;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<V, S>(map: &BTreeMap<Position, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<BTreeMap<Position, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let entries: Vec<(Position, V)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> Level {
        let mut level = Level::new(LevelKind::Overworld, 3, Rect::new(Position::origin(), 4, 4));
        level.floors.insert(Position::new(1, 1));
        level.walls.insert(Position::new(0, 0), WallTile::TopLeft);
        level.paths.insert(Position::new(2, 2), PathTile::Cross);
        level.stairs.insert(
            Position::new(3, 2),
            StairTile {
                part: StairPart::Bottom,
                facing: Facing::UpRight,
            },
        );
        level.props.insert(
            Position::new(1, 1),
            PropPlacement {
                prop: 0,
                layer: SurfaceLayer::PropFront,
            },
        );
        level
    }

    #[test]
    fn test_tile_lookup_by_layer() {
        let level = sample_level();
        assert!(level.has_tile(SurfaceLayer::Ground, Position::new(1, 1)));
        assert!(level.has_tile(SurfaceLayer::Wall, Position::new(0, 0)));
        assert!(level.has_tile(SurfaceLayer::Path, Position::new(2, 2)));
        assert!(level.has_tile(SurfaceLayer::Path, Position::new(3, 2)));
        assert!(level.has_tile(SurfaceLayer::PropFront, Position::new(1, 1)));
        assert!(!level.has_tile(SurfaceLayer::PropBack, Position::new(1, 1)));
        assert!(!level.has_tile(SurfaceLayer::Wall, Position::new(1, 1)));
    }

    #[test]
    fn test_extent_covers_cells_outside_bounds() {
        let mut level = sample_level();
        level.walls.insert(Position::new(-1, 5), WallTile::Single);
        assert_eq!(level.extent(), Rect::new(Position::new(-1, 0), 5, 6));
    }

    #[test]
    fn test_json_round_trip() {
        let level = sample_level();
        let json = level.to_json().unwrap();
        let restored: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, level);
    }
}

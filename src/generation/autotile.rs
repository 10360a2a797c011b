//! # Cellular Autotiling
//!
//! Classifies cells by which of their neighbours belong to a reference set.
//!
//! A neighbour mask has one bit per direction. Cardinal masks follow
//! [`Direction::CARDINAL`] (up = `0b1000`, right = `0b0100`, down = `0b0010`,
//! left = `0b0001`); eight-direction masks follow [`Direction::EIGHT`] with
//! up in bit 7 and up-left in bit 0.
//!
//! Four tables map masks to tile categories:
//!
//! | table | reference set | used for |
//! |-------|---------------|----------|
//! | [`EDGE_TILES`] | floors | dungeon wall faces |
//! | [`CORNER_TILES`] | floors | dungeon wall corners |
//! | [`WALL_RUN_TILES`] | other walls | overworld border walls |
//! | [`PATH_TILES`] | other paths | path networks |

use crate::grid::{CellSet, Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visual category of a wall cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallTile {
    /// Isolated piece, or one fully surrounded by walls
    Single,
    /// Solid filler used where no face is exposed in a named way
    Full,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    InnerCornerDownLeft,
    InnerCornerDownRight,
    InnerCornerUpLeft,
    InnerCornerUpRight,
    DiagonalCornerDownLeft,
    DiagonalCornerDownRight,
    DiagonalCornerUpLeft,
    DiagonalCornerUpRight,
}

/// Visual category of a path cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathTile {
    Horizontal,
    Vertical,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
    /// Junction open up, left and right
    TeeUp,
    /// Junction open down, left and right
    TeeDown,
    /// Junction open left, up and down
    TeeLeft,
    /// Junction open right, up and down
    TeeRight,
    Cross,
}

const UP: u8 = 0b1000;
const RIGHT: u8 = 0b0100;
const DOWN: u8 = 0b0010;
const LEFT: u8 = 0b0001;

/// Dungeon wall faces keyed by the 4-bit mask of adjacent floors.
///
/// Mask 0 never occurs for a face candidate and falls back to `Full`.
pub const EDGE_TILES: [WallTile; 16] = [
    WallTile::Full,  // 0000
    WallTile::Right, // 0001 floor left
    WallTile::Top,   // 0010 floor below
    WallTile::Top,   // 0011
    WallTile::Left,  // 0100 floor right
    WallTile::Full,  // 0101
    WallTile::Top,   // 0110
    WallTile::Top,   // 0111
    WallTile::Bottom, // 1000 floor above
    WallTile::Full,  // 1001
    WallTile::Top,   // 1010
    WallTile::Top,   // 1011
    WallTile::Top,   // 1100
    WallTile::Full,  // 1101
    WallTile::Top,   // 1110
    WallTile::Top,   // 1111
];

/// Overworld wall pieces keyed by the 4-bit mask of adjacent walls.
pub const WALL_RUN_TILES: [WallTile; 16] = [
    WallTile::Single,      // 0000
    WallTile::Right,       // 0001 left only
    WallTile::Top,         // 0010 down only
    WallTile::TopRight,    // 0011 down + left
    WallTile::Left,        // 0100 right only
    WallTile::Top,         // 0101 horizontal run
    WallTile::TopLeft,     // 0110 down + right
    WallTile::Top,         // 0111 missing up
    WallTile::Bottom,      // 1000 up only
    WallTile::BottomRight, // 1001 up + left
    WallTile::Left,        // 1010 vertical run
    WallTile::Right,       // 1011 missing right
    WallTile::BottomLeft,  // 1100 up + right
    WallTile::Bottom,      // 1101 missing down
    WallTile::Left,        // 1110 missing left
    WallTile::Single,      // 1111
];

/// Path pieces keyed by the 4-bit mask of adjacent path cells.
pub const PATH_TILES: [PathTile; 16] = [
    PathTile::Horizontal,        // 0000
    PathTile::Horizontal,        // 0001
    PathTile::Vertical,          // 0010
    PathTile::CornerTopRight,    // 0011 down + left
    PathTile::Horizontal,        // 0100
    PathTile::Horizontal,        // 0101
    PathTile::CornerTopLeft,     // 0110 down + right
    PathTile::TeeDown,           // 0111 missing up
    PathTile::Vertical,          // 1000
    PathTile::CornerBottomRight, // 1001 up + left
    PathTile::Vertical,          // 1010
    PathTile::TeeLeft,           // 1011 missing right
    PathTile::CornerBottomLeft,  // 1100 up + right
    PathTile::TeeUp,             // 1101 missing down
    PathTile::TeeRight,          // 1110 missing left
    PathTile::Cross,             // 1111
];

/// Dungeon wall corners keyed by the 8-bit mask of surrounding floors.
///
/// `None` marks masks with no named corner; face candidates keep their
/// [`EDGE_TILES`] entry and corner-only candidates become `Full`.
pub const CORNER_TILES: [Option<WallTile>; 256] = build_corner_table();

const fn build_corner_table() -> [Option<WallTile>; 256] {
    const N: u8 = 1 << 7;
    const NE: u8 = 1 << 6;
    const E: u8 = 1 << 5;
    const SE: u8 = 1 << 4;
    const S: u8 = 1 << 3;
    const SW: u8 = 1 << 2;
    const W: u8 = 1 << 1;
    const NW: u8 = 1;
    const CARDINALS: u8 = N | E | S | W;

    let mut table = [None; 256];
    let mut mask = 0usize;
    while mask < 256 {
        let m = mask as u8;
        let cardinals = m & CARDINALS;
        table[mask] = if cardinals == N | E {
            Some(WallTile::InnerCornerDownLeft)
        } else if cardinals == N | W {
            Some(WallTile::InnerCornerDownRight)
        } else if cardinals == S | E {
            Some(WallTile::InnerCornerUpLeft)
        } else if cardinals == S | W {
            Some(WallTile::InnerCornerUpRight)
        } else if m == NE {
            Some(WallTile::DiagonalCornerDownLeft)
        } else if m == NW {
            Some(WallTile::DiagonalCornerDownRight)
        } else if m == SE || m == NE | SE {
            Some(WallTile::DiagonalCornerUpLeft)
        } else if m == SW || m == SW | NW {
            Some(WallTile::DiagonalCornerUpRight)
        } else if m == NE | NW {
            Some(WallTile::Bottom)
        } else {
            None
        };
        mask += 1;
    }
    table
}

/// Builds the 4-bit mask of cardinal neighbours of `pos` that are in `set`.
pub fn cardinal_mask(set: &CellSet, pos: Position) -> u8 {
    mask_in_order(&Direction::CARDINAL, |direction| set.contains(&pos.step(direction)))
}

/// Builds the 8-bit mask of surrounding neighbours of `pos` that are in `set`.
pub fn eight_mask(set: &CellSet, pos: Position) -> u8 {
    mask_in_order(&Direction::EIGHT, |direction| set.contains(&pos.step(direction)))
}

fn mask_in_order(directions: &[Direction], mut occupied: impl FnMut(Direction) -> bool) -> u8 {
    directions
        .iter()
        .fold(0u8, |mask, &direction| (mask << 1) | u8::from(occupied(direction)))
}

/// Number of set bits in a cardinal mask.
pub fn connection_count(mask: u8) -> u32 {
    (mask & (UP | RIGHT | DOWN | LEFT)).count_ones()
}

/// Classifies a dungeon wall face from its adjacent floors.
pub fn edge_tile(mask: u8) -> WallTile {
    EDGE_TILES[(mask & 0x0f) as usize]
}

/// Classifies a dungeon wall corner from its surrounding floors.
pub fn corner_tile(mask: u8) -> Option<WallTile> {
    CORNER_TILES[mask as usize]
}

/// Classifies an overworld wall from its adjacent walls.
pub fn wall_run_tile(mask: u8) -> WallTile {
    WALL_RUN_TILES[(mask & 0x0f) as usize]
}

/// Classifies a path cell from its adjacent path cells.
pub fn path_tile(mask: u8) -> PathTile {
    PATH_TILES[(mask & 0x0f) as usize]
}

/// Wall candidates around a floor set: non-floor cells touching a floor in
/// any of the given directions.
pub fn boundary_cells(floors: &CellSet, directions: &[Direction]) -> CellSet {
    floors
        .iter()
        .flat_map(|&floor| directions.iter().map(move |&direction| floor.step(direction)))
        .filter(|candidate| !floors.contains(candidate))
        .collect()
}

/// Derives and classifies the walls that enclose a floor set.
///
/// Face candidates (cardinal neighbours of floors) start from their edge
/// tile; any candidate whose eight-direction mask names a corner takes the
/// corner tile instead.
pub fn resolve_floor_walls(floors: &CellSet) -> BTreeMap<Position, WallTile> {
    let faces = boundary_cells(floors, &Direction::CARDINAL);
    let corners = boundary_cells(floors, &Direction::DIAGONAL);

    faces
        .union(&corners)
        .map(|&pos| {
            let face = faces
                .contains(&pos)
                .then(|| edge_tile(cardinal_mask(floors, pos)));
            let tile = corner_tile(eight_mask(floors, pos))
                .or(face)
                .unwrap_or(WallTile::Full);
            (pos, tile)
        })
        .collect()
}

/// Classifies every wall by its connections to the other walls.
pub fn resolve_wall_runs(walls: &CellSet) -> BTreeMap<Position, WallTile> {
    walls
        .iter()
        .map(|&pos| (pos, wall_run_tile(cardinal_mask(walls, pos))))
        .collect()
}

/// Classifies every path cell by its connections to other path cells.
///
/// Cells that are also walls are skipped.
pub fn resolve_paths(paths: &CellSet, walls: &CellSet) -> BTreeMap<Position, PathTile> {
    paths
        .iter()
        .filter(|pos| !walls.contains(pos))
        .map(|&pos| (pos, path_tile(cardinal_mask(paths, pos))))
        .collect()
}

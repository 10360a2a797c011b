//! # ASCII Surface
//!
//! A text-mode [`TileSurface`] for terminals, logs and tests.

use super::{SurfaceLayer, TileCategory, TileLookup, TilePresets, TileSurface};
use crate::generation::{Facing, PathTile, StairPart, WallTile};
use crate::grid::{Position, Rect};
use std::collections::BTreeMap;

/// Character presets in the classic roguelike style.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiPresets;

impl TilePresets for AsciiPresets {
    type Token = char;

    fn token(&self, category: &TileCategory) -> Option<char> {
        let ch = match category {
            TileCategory::Floor => '.',
            TileCategory::Water => '~',
            TileCategory::Sand => ':',
            TileCategory::Biome { index, .. } => match index % 4 {
                0 => ',',
                1 => '"',
                2 => '`',
                _ => '\'',
            },
            TileCategory::Wall(tile) => wall_char(*tile),
            TileCategory::Path(tile) => path_char(*tile),
            TileCategory::Stair(stair) => match (stair.part, stair.facing) {
                (StairPart::Top, _) => '=',
                (_, Facing::UpRight) => '/',
                (_, Facing::UpLeft) => '\\',
            },
            TileCategory::Prop { tall: true, .. } => 'T',
            TileCategory::Prop { tall: false, .. } => '*',
        };
        Some(ch)
    }
}

fn wall_char(tile: WallTile) -> char {
    match tile {
        WallTile::Top | WallTile::Bottom => '-',
        WallTile::Left | WallTile::Right => '|',
        WallTile::Single | WallTile::Full => '#',
        _ => '+',
    }
}

fn path_char(tile: PathTile) -> char {
    match tile {
        PathTile::Horizontal => '-',
        PathTile::Vertical => '|',
        PathTile::Cross => '+',
        _ => 'o',
    }
}

/// Layered in-memory surface that renders to text.
#[derive(Debug, Clone, Default)]
pub struct AsciiSurface {
    tiles: BTreeMap<(SurfaceLayer, Position), TileCategory>,
}

impl AsciiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of painted tiles across all layers.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, layer: SurfaceLayer, position: Position) -> Option<&TileCategory> {
        self.tiles.get(&(layer, position))
    }

    /// Renders `area` top row first, showing the topmost painted layer of
    /// each cell and a space where nothing is painted.
    pub fn render<P: TilePresets<Token = char>>(&self, area: Rect, presets: &P) -> String {
        let mut out = String::with_capacity(((area.width + 1) * area.height.max(0)) as usize);
        for y in (area.min.y..area.max_y()).rev() {
            for x in area.min.x..area.max_x() {
                let pos = Position::new(x, y);
                let ch = SurfaceLayer::ALL
                    .iter()
                    .rev()
                    .find_map(|&layer| self.get(layer, pos))
                    .and_then(|category| presets.token(category))
                    .unwrap_or(' ');
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl TileSurface for AsciiSurface {
    fn clear(&mut self) {
        self.tiles.clear();
    }

    fn set(&mut self, layer: SurfaceLayer, position: Position, category: TileCategory) {
        self.tiles.insert((layer, position), category);
    }
}

impl TileLookup for AsciiSurface {
    fn has_tile(&self, layer: SurfaceLayer, position: Position) -> bool {
        self.tiles.contains_key(&(layer, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Level, LevelKind, PropPlacement};
    use crate::rendering::paint_level;

    #[test]
    fn test_topmost_layer_wins() {
        let mut surface = AsciiSurface::new();
        let pos = Position::new(0, 0);
        surface.set(SurfaceLayer::Ground, pos, TileCategory::Floor);
        surface.set(SurfaceLayer::PropFront, pos, TileCategory::Prop { index: 0, tall: true });

        let text = surface.render(Rect::new(pos, 2, 1), &AsciiPresets);
        assert_eq!(text, "T \n");
    }

    #[test]
    fn test_rows_render_top_first() {
        let mut surface = AsciiSurface::new();
        surface.set(SurfaceLayer::Ground, Position::new(0, 1), TileCategory::Water);
        surface.set(SurfaceLayer::Ground, Position::new(0, 0), TileCategory::Floor);

        let text = surface.render(Rect::new(Position::origin(), 1, 2), &AsciiPresets);
        assert_eq!(text, "~\n.\n");
    }

    #[test]
    fn test_paint_level_clears_first() {
        let mut level = Level::new(LevelKind::Dungeon, 0, Rect::new(Position::origin(), 3, 3));
        level.floors.insert(Position::new(1, 1));
        level.walls.insert(Position::new(1, 2), WallTile::Top);
        level.props.insert(
            Position::new(1, 1),
            PropPlacement {
                prop: 0,
                layer: SurfaceLayer::PropBack,
            },
        );

        let mut surface = AsciiSurface::new();
        surface.set(SurfaceLayer::Wall, Position::new(9, 9), TileCategory::Wall(WallTile::Full));
        paint_level(&level, &mut surface);
        paint_level(&level, &mut surface);

        assert_eq!(surface.len(), 3);
        assert!(!surface.has_tile(SurfaceLayer::Wall, Position::new(9, 9)));
        assert!(surface.has_tile(SurfaceLayer::Ground, Position::new(1, 1)));
        assert!(surface.has_tile(SurfaceLayer::PropBack, Position::new(1, 1)));
        assert_eq!(
            surface.get(SurfaceLayer::Wall, Position::new(1, 2)),
            Some(&TileCategory::Wall(WallTile::Top))
        );
    }
}

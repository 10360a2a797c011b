//! Integration tests for dungeon generation through the public API.

use delve::{
    generate_level, paint_level, AsciiPresets, AsciiSurface, DelveResult, DungeonConfig,
    DungeonLayout, GenerationConfig, LevelConfig, LevelGenerator, Room, RoomExtractor, RoomShape,
    SurfaceLayer, TileLookup,
};

fn dungeon_config(seed: u64, dungeon: DungeonConfig) -> GenerationConfig {
    GenerationConfig {
        seed,
        level: LevelConfig::Dungeon(dungeon),
    }
}

#[test]
fn test_every_room_reachable_from_spawn() -> DelveResult<()> {
    for seed in [1, 2, 3, 500, 9001] {
        let level = generate_level(&GenerationConfig::dungeon(seed))?;
        let reached = delve::utils::reachable_from(&level.floors, level.spawn.position);

        assert_eq!(reached.len(), level.floors.len(), "seed {seed}");
        for room in &level.rooms {
            assert!(room.floors.iter().all(|pos| reached.contains(pos)));
        }
    }
    Ok(())
}

#[test]
fn test_rooms_do_not_overlap() -> DelveResult<()> {
    let level = generate_level(&GenerationConfig::dungeon(64))?;
    for (i, a) in level.rooms.iter().enumerate() {
        for b in &level.rooms[i + 1..] {
            assert!(!a.bounds.overlaps(&b.bounds));
            assert!(a.floors.is_disjoint(&b.floors));
        }
    }
    Ok(())
}

#[test]
fn test_offset_start_position() -> DelveResult<()> {
    let dungeon = DungeonConfig {
        start: delve::Position::new(-40, 100),
        width: 30,
        height: 20,
        ..DungeonConfig::default()
    };
    let level = generate_level(&dungeon_config(5, dungeon))?;

    for room in &level.rooms {
        assert!(level.bounds.contains(room.center_cell()));
    }
    assert!(level.floors.iter().all(|pos| level.bounds.contains(*pos)));
    Ok(())
}

#[test]
fn test_all_layout_combinations_generate() -> DelveResult<()> {
    let combinations = [
        (DungeonLayout::RoomsFirst, RoomShape::Rectangular),
        (DungeonLayout::RoomsFirst, RoomShape::RandomWalk),
        (DungeonLayout::RandomWalk, RoomShape::Rectangular),
    ];
    for (layout, room_shape) in combinations {
        let dungeon = DungeonConfig {
            layout,
            room_shape,
            ..DungeonConfig::default()
        };
        let level = generate_level(&dungeon_config(17, dungeon))?;
        assert!(!level.floors.is_empty());
        assert!(level.walls.keys().all(|pos| !level.floors.contains(pos)));
    }
    Ok(())
}

#[test]
fn test_regeneration_is_idempotent() -> DelveResult<()> {
    let config = GenerationConfig::dungeon(4242);
    let first = generate_level(&config)?;
    let second = generate_level(&config)?;

    assert_eq!(first.floors, second.floors);
    assert_eq!(first.walls, second.walls);
    assert_eq!(first.paths, second.paths);
    assert_eq!(first.rooms, second.rooms);
    assert_eq!(first.spawn, second.spawn);
    Ok(())
}

struct RoomCounter {
    total_floor: usize,
}

impl RoomExtractor for RoomCounter {
    fn process_rooms(&mut self, rooms: &[Room]) {
        self.total_floor = rooms.iter().map(Room::area).sum();
    }
}

#[test]
fn test_extractor_sees_room_floors() -> DelveResult<()> {
    let mut counter = RoomCounter { total_floor: 0 };
    let level = LevelGenerator::new()
        .generate_with_extractor(&GenerationConfig::dungeon(3), &mut counter)?;

    let room_floor: usize = level.rooms.iter().map(|room| room.floors.len()).sum();
    assert_eq!(counter.total_floor, room_floor);
    assert!(counter.total_floor <= level.floors.len());
    Ok(())
}

#[test]
fn test_painted_dungeon_renders() -> DelveResult<()> {
    let level = generate_level(&GenerationConfig::dungeon(8))?;
    let mut surface = AsciiSurface::new();
    paint_level(&level, &mut surface);

    assert!(surface.has_tile(SurfaceLayer::Ground, level.spawn.position));
    let text = surface.render(level.extent(), &AsciiPresets);
    assert_eq!(text.lines().count(), level.extent().height as usize);
    assert!(text.contains('.'));
    Ok(())
}

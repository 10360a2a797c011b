//! Integration tests for overworld generation through the public API.

use delve::{
    generate_level, DelveResult, GenerationConfig, Ground, LevelConfig, OverworldConfig,
    PropDefinition, SurfaceLayer, TileLookup,
};

fn overworld_config(seed: u64, overworld: OverworldConfig) -> GenerationConfig {
    GenerationConfig {
        seed,
        level: LevelConfig::Overworld(overworld),
    }
}

fn small() -> OverworldConfig {
    match GenerationConfig::for_testing(0).level {
        LevelConfig::Overworld(overworld) => overworld,
        LevelConfig::Dungeon(_) => unreachable!(),
    }
}

#[test]
fn test_border_ring_is_wall() -> DelveResult<()> {
    let config = GenerationConfig::for_testing(12);
    let level = generate_level(&config)?;
    let (w, h) = (level.bounds.width, level.bounds.height);

    for x in 0..w {
        assert!(level.has_tile(SurfaceLayer::Wall, delve::Position::new(x, 0)));
        assert!(level.has_tile(SurfaceLayer::Wall, delve::Position::new(x, h - 1)));
    }
    for y in 0..h {
        assert!(level.has_tile(SurfaceLayer::Wall, delve::Position::new(0, y)));
        assert!(level.has_tile(SurfaceLayer::Wall, delve::Position::new(w - 1, y)));
    }
    Ok(())
}

#[test]
fn test_entrances_are_open() -> DelveResult<()> {
    let level = generate_level(&GenerationConfig::overworld(3))?;
    assert_eq!(level.entrances.len(), 2);
    for entrance in &level.entrances {
        for dx in 0..entrance.width {
            let pos = entrance.position + delve::Position::new(dx, 0);
            assert!(!level.walls.contains_key(&pos));
        }
    }
    Ok(())
}

#[test]
fn test_no_interior_water_with_pond_removal() -> DelveResult<()> {
    let config = overworld_config(
        8,
        OverworldConfig {
            remove_ponds: true,
            ..small()
        },
    );
    let level = generate_level(&config)?;
    let band = small().edge_band;
    let (w, h) = (level.bounds.width, level.bounds.height);

    for (pos, ground) in &level.ground {
        let edge = pos.x.min(pos.y).min(w - 1 - pos.x).min(h - 1 - pos.y);
        if edge >= band {
            assert_ne!(*ground, Ground::Water, "{pos:?}");
        }
    }
    Ok(())
}

#[test]
fn test_certain_props_cover_open_land() -> DelveResult<()> {
    let config = overworld_config(
        21,
        OverworldConfig {
            props: vec![PropDefinition::new("grass tuft", 1.0)],
            landmark_count: 0,
            ..small()
        },
    );
    let level = generate_level(&config)?;

    // With certain props every scanned land cell off walls and paths holds one.
    let (w, h) = (level.bounds.width, level.bounds.height);
    for x in 1..w - 1 {
        for y in 2..h - 1 {
            let pos = delve::Position::new(x, y);
            let open = level.floors.contains(&pos)
                && !level.has_tile(SurfaceLayer::Path, pos)
                && !level.has_tile(SurfaceLayer::Wall, pos);
            assert_eq!(open, level.props.contains_key(&pos), "{pos:?}");
        }
    }
    assert!(level.spawn.fallback || !level.props.contains_key(&level.spawn.position));
    Ok(())
}

#[test]
fn test_tall_props_use_front_layer() -> DelveResult<()> {
    let config = overworld_config(
        2,
        OverworldConfig {
            props: vec![PropDefinition::new("tree", 1.0).tall()],
            ..small()
        },
    );
    let level = generate_level(&config)?;

    assert!(!level.props.is_empty());
    for (pos, placement) in &level.props {
        assert_eq!(placement.layer, SurfaceLayer::PropFront);
        assert!(level.has_tile(SurfaceLayer::PropFront, *pos));
        assert!(!level.has_tile(SurfaceLayer::PropBack, *pos));
    }
    Ok(())
}

#[test]
fn test_stairs_can_be_disabled() -> DelveResult<()> {
    let config = overworld_config(
        6,
        OverworldConfig {
            place_stairs: false,
            ..small()
        },
    );
    let level = generate_level(&config)?;
    assert!(level.stairs.is_empty());
    assert_eq!(level.entrances.len(), 2);
    Ok(())
}

#[test]
fn test_level_json_round_trip() -> DelveResult<()> {
    let level = generate_level(&GenerationConfig::for_testing(44))?;
    let json = level.to_json()?;
    let restored: delve::Level = serde_json::from_str(&json)?;

    assert_eq!(restored.floors, level.floors);
    assert_eq!(restored.walls, level.walls);
    assert_eq!(restored.props, level.props);
    assert_eq!(restored.spawn, level.spawn);
    Ok(())
}

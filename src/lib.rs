//! # Delve
//!
//! Procedural tile-grid level generation for 2D games.
//!
//! ## Architecture Overview
//!
//! Delve turns a handful of tunable parameters and a seed into a finished,
//! classified tile grid. Two level modes are supported:
//!
//! - **Dungeons**: binary space partitioning into rooms, nearest-neighbour
//!   corridor chaining, random-walk carving and neighbour-mask wall autotiling
//! - **Overworlds**: layered noise fields for height, moisture and heat,
//!   biome classification with tint blending, border walls with entrances,
//!   landmark paths, stairs, props and a spawn point
//!
//! Data flows one way: configuration and seed produce raw fields, raw fields
//! produce classified cell sets, and classified sets produce tile categories
//! that an external renderer paints through [`TileSurface`].
//!
//! ```
//! use delve::{generate_level, GenerationConfig};
//!
//! let config = GenerationConfig::dungeon(7);
//! let level = generate_level(&config).unwrap();
//! assert!(!level.floors.is_empty());
//! ```

pub mod generation;
pub mod grid;
pub mod rendering;
pub mod utils;

pub use generation::*;
pub use grid::*;
pub use rendering::*;

/// Core error type for the Delve generator.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration cannot produce a valid level
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation finished but the result is unusable
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// An internal guarantee did not hold; this is a bug in a generator
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation configuration defaults.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: i32 = 50;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: i32 = 50;

    /// Default minimum room width before the offset margin is added
    pub const DEFAULT_MIN_ROOM_WIDTH: i32 = 5;

    /// Default minimum room height before the offset margin is added
    pub const DEFAULT_MIN_ROOM_HEIGHT: i32 = 5;

    /// Default overworld width in tiles
    pub const DEFAULT_OVERWORLD_WIDTH: i32 = 80;

    /// Default overworld height in tiles
    pub const DEFAULT_OVERWORLD_HEIGHT: i32 = 60;

    /// Default noise scale (tiles per noise unit)
    pub const DEFAULT_NOISE_SCALE: f64 = 12.0;

    /// Smallest usable noise scale; non-positive scales are clamped to this
    pub const SCALE_EPSILON: f64 = 0.0001;

    /// Default height below which a cell is water
    pub const DEFAULT_WATER_HEIGHT: f64 = 0.10;

    /// Default height below which a cell is sand
    pub const DEFAULT_SAND_HEIGHT: f64 = 0.15;

    /// Default width of the border band pushed toward sea level
    pub const DEFAULT_EDGE_WATER_BAND: i32 = 6;

    /// Random spawn samples before falling back to the grid centre
    pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 500;

    /// Largest accepted offset jitter; wider sampling ranges overflow
    pub const MAX_OFFSET_JITTER: f64 = f64::MAX / 2.0;

    /// Landmark samples allowed per requested landmark
    pub const LANDMARK_ATTEMPTS_PER_POINT: u32 = 30;
}

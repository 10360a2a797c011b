//! # Delve Command Line
//!
//! Generates a dungeon or overworld and prints it as ASCII art or JSON.

use clap::{Parser, ValueEnum};
use delve::{
    generate_level, paint_level, AsciiPresets, AsciiSurface, DelveResult, GenerationConfig,
    LevelConfig,
};
use log::{info, warn};

/// Level mode to generate when no config file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Dungeon,
    Overworld,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

/// Command line arguments for the Delve level generator.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Procedural dungeon and overworld generator")]
#[command(version)]
struct Args {
    /// Level mode, ignored when --config is given
    #[arg(short, long, value_enum, default_value_t = Mode::Dungeon)]
    mode: Mode,

    /// Random seed; overrides the seed in a config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON generation config
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initializes env_logger; `RUST_LOG` still takes precedence when set.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn run(args: &Args) -> DelveResult<()> {
    info!("Starting Delve v{}", delve::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => match args.mode {
            Mode::Dungeon => GenerationConfig::dungeon(12345),
            Mode::Overworld => GenerationConfig::overworld(12345),
        },
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let level = generate_level(&config)?;
    if level.spawn.fallback {
        warn!("Spawn point is an unvalidated fallback");
    }

    match args.format {
        Format::Json => println!("{}", level.to_json()?),
        Format::Ascii => {
            let mut surface = AsciiSurface::new();
            paint_level(&level, &mut surface);
            print!("{}", surface.render(level.extent(), &AsciiPresets));

            let mode = match config.level {
                LevelConfig::Dungeon(_) => "dungeon",
                LevelConfig::Overworld(_) => "overworld",
            };
            println!(
                "{mode} seed={} spawn=({}, {}) rooms={} props={}",
                config.seed,
                level.spawn.position.x,
                level.spawn.position.y,
                level.rooms.len(),
                level.props.len()
            );
        }
    }
    Ok(())
}

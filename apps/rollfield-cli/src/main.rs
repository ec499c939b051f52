use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rollfield_common::SceneConfig;
use rollfield_input::{ArrowKey, KeyState};
use rollfield_render::{DebugTextRenderer, Renderer};
use rollfield_scene::Scene;
use rollfield_terrain::{TerrainStreamer, TileCoord, required_coords};

#[derive(Parser)]
#[command(name = "rollfield-cli", about = "Headless rollfield simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Drive the frame loop with a scripted key sequence and print the
    /// resulting scene
    Simulate {
        /// Key script: comma-separated `key:frames` segments, where key is
        /// up/down/left/right/idle (e.g. "right:40,up:30,idle:10")
        #[arg(short, long, default_value = "right:60,up:60")]
        script: String,
    },
}

/// One script segment: hold `key` (or nothing) for `frames` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    key: Option<ArrowKey>,
    frames: u64,
}

fn parse_script(script: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in script.split(',') {
        let (name, count) = part
            .split_once(':')
            .with_context(|| format!("segment `{part}` is not `key:frames`"))?;
        let key = match name.trim() {
            "up" => Some(ArrowKey::Up),
            "down" => Some(ArrowKey::Down),
            "left" => Some(ArrowKey::Left),
            "right" => Some(ArrowKey::Right),
            "idle" => None,
            other => bail!("unknown key `{other}` (expected up/down/left/right/idle)"),
        };
        let frames: u64 = count
            .trim()
            .parse()
            .with_context(|| format!("bad frame count in `{part}`"))?;
        segments.push(Segment { key, frames });
    }
    Ok(segments)
}

/// Run the scripted frame loop, checking the streaming invariant as it goes.
fn simulate(script: &str) -> Result<String> {
    let segments = parse_script(script)?;
    let config = SceneConfig::default();

    let mut keys = KeyState::new(config.move_speed);
    let mut scene = Scene::new(config);
    let mut terrain = TerrainStreamer::new(config.tile_size, config.view_radius);

    let steps = (config.view_radius / config.tile_size) as i32;

    for segment in &segments {
        if let Some(key) = segment.key {
            keys.set(key, true);
        }
        for _ in 0..segment.frames {
            scene.tick(keys.movement().as_vec3());
            terrain.update(scene.camera.eye());

            // Live set must equal the required set, coordinate for
            // coordinate, not just in cardinality.
            let anchor = TileCoord::from_world(scene.camera.eye(), config.tile_size);
            let required: HashSet<TileCoord> =
                required_coords(anchor, steps).into_iter().collect();
            let live: HashSet<TileCoord> = terrain.tiles().map(|t| t.coord()).collect();
            if live != required {
                bail!(
                    "streaming invariant broken at frame {}: {} live tiles vs {} required, anchor {}",
                    scene.frame(),
                    live.len(),
                    required.len(),
                    anchor
                );
            }
        }
        if let Some(key) = segment.key {
            keys.set(key, false);
        }
    }

    Ok(DebugTextRenderer::new().render(&scene, &terrain))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("rollfield-cli starting");

    match cli.command {
        Commands::Info => {
            println!("rollfield-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", rollfield_common::crate_info());
            println!("input: {}", rollfield_input::crate_info());
            println!("terrain: {}", rollfield_terrain::crate_info());
            println!("render: {}", rollfield_render::crate_info());
        }
        Commands::Simulate { script } => {
            let summary = simulate(&script)?;
            print!("{summary}");
        }
    }

    Ok(())
}

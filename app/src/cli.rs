use std::path::PathBuf;

use clap::Parser;
use worldgen::WorldConfig;

// Default side of a square world
pub const DEFAULT_SIZE: usize = 512;

/// Generate a seeded world and write PNG previews of its maps.
///
/// Values given here override the ones loaded from `--config`.
#[derive(Parser, Debug, Clone)]
#[command(name = "worldgen", about = "Seeded terrain and NPC placement preview")]
pub struct CliArgs {
    /// Seed text; decimal integers are used as-is, anything else is hashed.
    /// A random seed is picked when omitted.
    #[arg(long)]
    pub seed: Option<String>,

    /// Side length of a square world.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// World width, overrides --size.
    #[arg(long)]
    pub width: Option<usize>,

    /// World height, overrides --size.
    #[arg(long)]
    pub height: Option<usize>,

    /// RON file with a WorldConfig; missing fields use defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable story spawning with this many story slots.
    #[arg(long)]
    pub story_npcs: Option<i32>,

    /// Directory receiving the preview images.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG wins when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl CliArgs {
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.width.unwrap_or(self.size),
            self.height.unwrap_or(self.size),
        )
    }

    pub fn apply_overrides(&self, config: &mut WorldConfig) {
        if let Some(n) = self.story_npcs {
            config.types.spawn_story_npcs = true;
            config.types.min_story_npcs = n;
        }
    }
}

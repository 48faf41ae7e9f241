// app is the headless preview harness: it runs the generation pipeline,
// reports progress at stage boundaries and writes one PNG per map.
pub mod cli;
pub mod config;
pub mod error;

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use worldgen::{Stage, World, WorldGenerator, derive_seed, preview, random_seed};

pub use cli::CliArgs;
pub use error::AppError;

// What a run produced, for the caller to report
#[derive(Debug)]
pub struct RunSummary {
    pub seed: i32,
    pub width: usize,
    pub height: usize,
    pub files: Vec<PathBuf>,
}

// RUST_LOG takes precedence over the CLI level.
// A second call is a no-op, so tests may call it freely.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

pub fn run(args: &CliArgs) -> Result<RunSummary, AppError> {
    let seed = match &args.seed {
        Some(text) => derive_seed(text),
        None => random_seed(),
    };
    let (width, height) = args.dimensions();

    let mut config = config::load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    info!(seed, width, height, "generating world");
    let generator = WorldGenerator::new(config)?;
    let world = generator.generate(seed, width, height, &mut |stage: Stage| {
        info!(percent = stage.percent(), "{stage:?} done");
    })?;

    let files = write_previews(&world, &args.out)?;
    Ok(RunSummary {
        seed,
        width,
        height,
        files,
    })
}

// Writes heightmap.png, density.png, types.png and relief.png into `dir`
pub fn write_previews(world: &World, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir).map_err(|source| AppError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let save_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: image::ImageError| AppError::SaveImage { path, source }
    };

    let heightmap = dir.join("heightmap.png");
    preview::height_image(&world.heights)
        .save(&heightmap)
        .map_err(save_err(&heightmap))?;

    let density = dir.join("density.png");
    preview::density_image(&world.density)
        .save(&density)
        .map_err(save_err(&density))?;

    let types = dir.join("types.png");
    preview::type_image(&world.types)
        .save(&types)
        .map_err(save_err(&types))?;

    let relief = dir.join("relief.png");
    preview::relief_image(&world.heights)
        .save(&relief)
        .map_err(save_err(&relief))?;

    for file in [&heightmap, &density, &types, &relief] {
        info!("saved {}", file.display());
    }
    Ok(vec![heightmap, density, types, relief])
}

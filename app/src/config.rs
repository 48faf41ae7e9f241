use std::path::Path;

use tracing::info;
use worldgen::WorldConfig;

use crate::error::AppError;

pub fn parse_config(text: &str, path: &Path) -> Result<WorldConfig, AppError> {
    ron::from_str(text).map_err(|source| AppError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

// Read a RON WorldConfig, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<WorldConfig, AppError> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, path)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

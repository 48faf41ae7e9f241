use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error(transparent)]
    Generation(#[from] worldgen::GenError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preview {path}: {source}")]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NekoError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to decode sound {path}: {source}")]
    Audio {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },

    #[error("Missing sprite asset: {0}")]
    MissingSprite(String),

    #[error("Missing sound asset: {0}")]
    MissingCue(String),

    #[error("Config parse error in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("No monitor found")]
    NoMonitor,

    #[error("GPU setup failed: {0}")]
    Gpu(String),
}

pub type Result<T> = std::result::Result<T, NekoError>;

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::{NekoError, Result};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "neko.toml";

/// Fastest allowed chase, in pixels per tick. Anything above this crosses a
/// whole screen in a single tick.
pub const MAX_SPEED: i32 = 4096;
/// Scale bounds. Below the minimum the window is under 4px and cursor
/// offsets blow up when mapped into sprite pixels.
pub const MIN_SCALE: f64 = 0.125;
pub const MAX_SCALE: f64 = 64.0;

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Pixels per tick while chasing.
    pub speed: i32,
    /// Window size multiplier for the 32px sprite.
    pub scale: f64,
    /// Disable sound.
    pub quiet: bool,
    /// Let clicks fall through to whatever is under the pet.
    pub mouse_passthrough: bool,
    /// Directory holding `*.png` sprites and `*.wav` cues.
    pub assets: PathBuf,
    /// Cue playback volume, 0.0..=1.0.
    pub volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 2,
            scale: 2.0,
            quiet: false,
            mouse_passthrough: false,
            assets: PathBuf::from("assets"),
            volume: 0.3,
        }
    }
}

/// Command line. Every setting can also come from a `NEKO_*` variable.
#[derive(Parser, Debug, Default)]
#[command(name = "neko", version, about = "A cat that chases your cursor")]
pub struct Cli {
    /// Config file (default: ./neko.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The speed of the cat
    #[arg(long, env = "NEKO_SPEED")]
    pub speed: Option<i32>,

    /// The scale of the cat
    #[arg(long, env = "NEKO_SCALE")]
    pub scale: Option<f64>,

    /// Disable sound
    #[arg(long, env = "NEKO_QUIET", num_args = 0..=1, default_missing_value = "true")]
    pub quiet: Option<bool>,

    /// Enable mouse passthrough
    #[arg(
        long,
        env = "NEKO_MOUSEPASSTHROUGH",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub mouse_passthrough: Option<bool>,

    /// Asset directory
    #[arg(long, env = "NEKO_ASSETS")]
    pub assets: Option<PathBuf>,

    /// Sound volume (0.0 - 1.0)
    #[arg(long, env = "NEKO_VOLUME")]
    pub volume: Option<f32>,
}

/// On-disk config. Every field optional; missing ones fall back to defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub speed: Option<i32>,
    pub scale: Option<f64>,
    pub quiet: Option<bool>,
    #[serde(alias = "mousepassthrough")]
    pub mouse_passthrough: Option<bool>,
    pub assets: Option<PathBuf>,
    pub volume: Option<f32>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| NekoError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`. A missing file is only an error when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(source) => Err(NekoError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl Config {
    /// Parse the command line, environment and config file.
    pub fn load() -> Result<Self> {
        let cli = Cli::parse();
        let file = match &cli.config {
            Some(path) => FileConfig::load(path, true)?,
            None => FileConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        Self::layered(&cli, file)
    }

    /// Defaults < file < environment/CLI.
    pub fn layered(cli: &Cli, file: FileConfig) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            speed: cli.speed.or(file.speed).unwrap_or(defaults.speed),
            scale: cli.scale.or(file.scale).unwrap_or(defaults.scale),
            quiet: cli.quiet.or(file.quiet).unwrap_or(defaults.quiet),
            mouse_passthrough: cli
                .mouse_passthrough
                .or(file.mouse_passthrough)
                .unwrap_or(defaults.mouse_passthrough),
            assets: cli
                .assets
                .clone()
                .or(file.assets)
                .unwrap_or(defaults.assets),
            volume: cli.volume.or(file.volume).unwrap_or(defaults.volume),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SPEED).contains(&self.speed) {
            return Err(NekoError::InvalidConfig(format!(
                "speed must be within 1..={MAX_SPEED}, got {}",
                self.speed
            )));
        }
        // NaN fails the range check too.
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.scale) {
            return Err(NekoError::InvalidConfig(format!(
                "scale must be within {MIN_SCALE}..={MAX_SCALE}, got {}",
                self.scale
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(NekoError::InvalidConfig(format!(
                "volume must be within 0.0..=1.0, got {}",
                self.volume
            )));
        }
        Ok(())
    }
}

use std::path::PathBuf;

use clap::{ Parser, ValueEnum };
use log::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders a scene to a PPM image.
///
/// Without `--scene`, renders a procedural cube of glass spheres.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// JSON scene description; the camera inside it sets the image size
    #[clap(long)]
    pub scene: Option<PathBuf>,

    /// Spheres per edge of the procedural grid
    #[clap(long, default_value = "25")]
    pub grid_size: usize,

    /// Image width in pixels (procedural grid only)
    #[clap(long, default_value = "1024")]
    pub width: usize,

    /// Image height in pixels (procedural grid only)
    #[clap(long, default_value = "576")]
    pub height: usize,

    /// Render threads; 0 uses every available core
    #[clap(short, long, default_value = "0")]
    pub workers: usize,

    /// Rows handed to a render thread at a time
    #[clap(long, default_value = "1")]
    pub rows_per_chunk: usize,

    /// Reflection/refraction bounce limit, overriding the scene's
    #[clap(long)]
    pub depth: Option<usize>,

    /// Where to write the image
    #[clap(short, long, default_value = "scene.ppm")]
    pub output: PathBuf,

    /// Logging level; RUST_LOG is still honored for per-module filters
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

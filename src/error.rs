//! Error type shared by the renderer, the texture loader and the exporter.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Texture dimensions or channel layout don't describe a strip of square tiles
    #[error("invalid texture atlas: {0}")]
    InvalidAtlas(String),

    #[error("textured shading requested but no atlas was supplied")]
    MissingAtlas,

    /// Pixel storage disagrees with the declared dimensions
    #[error("pixel buffer holds {actual} pixels, expected {width}x{height}")]
    BufferSizeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    /// Target framebuffer dimensions differ from the configured frame size
    #[error("framebuffer is {width}x{height}, configured frame is {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("texture sample out of range: tile {tile}/{tile_count}, column {column}/{tile_size}")]
    SampleOutOfRange {
        tile: usize,
        tile_count: usize,
        column: usize,
        tile_size: usize,
    },

    #[error("invalid map: {0}")]
    InvalidMap(String),

    /// A wall tile names a color the palette doesn't have
    #[error("wall index {index} at ({x}, {y}) exceeds palette of {ncolors} colors")]
    PaletteOverflow {
        index: usize,
        x: usize,
        y: usize,
        ncolors: usize,
    },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load image {path}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

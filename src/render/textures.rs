//! Texture atlas: N square tiles packed side by side in one image.
use std::path::Path;

use crate::error::{RenderError, Result};
use crate::render::color::{ColorTable, PackedColor, mix, pack_color, rgb};

/// Decoded image as handed over by an image loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    /// Bytes per pixel in `data`.
    pub channels: usize,
    pub data: Vec<u8>,
}

/// Anything that can turn a file into pixels.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage>;
}

/// Decodes through raylib's bundled image loader. Works without a window.
#[cfg(feature = "raylib")]
pub struct RaylibLoader;

#[cfg(feature = "raylib")]
impl ImageLoader for RaylibLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage> {
        use raylib::consts::PixelFormat;
        use raylib::core::texture::Image;

        let fail = |reason: String| RenderError::ImageLoad { path: path.to_path_buf(), reason };
        let name = path.to_str().ok_or_else(|| fail("path is not valid UTF-8".into()))?;
        let img = Image::load_image(name).map_err(|e| fail(e.to_string()))?;
        let channels = match img.format() {
            PixelFormat::PIXELFORMAT_UNCOMPRESSED_GRAYSCALE => 1,
            PixelFormat::PIXELFORMAT_UNCOMPRESSED_GRAY_ALPHA => 2,
            PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8 => 3,
            PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 => 4,
            other => return Err(fail(format!("unsupported pixel format {other:?}"))),
        };
        // get_image_data always expands to RGBA, keep the source channel count for validation
        let data = img
            .get_image_data()
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect();
        Ok(DecodedImage {
            width: img.width().max(0) as usize,
            height: img.height().max(0) as usize,
            channels,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAtlas {
    tile_size: usize,
    tile_count: usize,
    pixels: Vec<PackedColor>,
}

impl TextureAtlas {
    /// Accepts only 4-channel images whose width is a whole multiple of their height.
    pub fn from_image(img: &DecodedImage) -> Result<TextureAtlas> {
        if img.channels != 4 {
            return Err(RenderError::InvalidAtlas(format!(
                "the texture must be a 32 bit image, got {} channels",
                img.channels
            )));
        }
        if img.height == 0 || img.width == 0 || img.width % img.height != 0 {
            return Err(RenderError::InvalidAtlas(format!(
                "{}x{} is not a horizontal strip of square tiles",
                img.width, img.height
            )));
        }
        if img.data.len() != img.width * img.height * 4 {
            return Err(RenderError::InvalidAtlas(format!(
                "{} bytes of pixel data for a {}x{} image",
                img.data.len(),
                img.width,
                img.height
            )));
        }
        let pixels = img
            .data
            .chunks_exact(4)
            .map(|px| pack_color(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(TextureAtlas {
            tile_size: img.height,
            tile_count: img.width / img.height,
            pixels,
        })
    }

    /// Loads and validates an atlas in one go.
    pub fn load<L: ImageLoader + ?Sized>(loader: &L, path: &Path) -> Result<TextureAtlas> {
        TextureAtlas::from_image(&loader.load(path)?)
    }

    /// Loads `path` when the file exists and falls back to the procedural
    /// atlas only when it doesn't. A present file that can't be decoded (or
    /// no decoder at all) is an error, never a silent fallback.
    pub fn load_or_procedural(
        loader: Option<&dyn ImageLoader>,
        path: &Path,
        tile_size: usize,
        palette: &ColorTable,
    ) -> Result<TextureAtlas> {
        if !path.exists() {
            return TextureAtlas::procedural(tile_size, palette);
        }
        let loader = loader.ok_or_else(|| RenderError::ImageLoad {
            path: path.to_path_buf(),
            reason: "no image decoder available (build with the `raylib` feature)".into(),
        })?;
        TextureAtlas::load(loader, path)
    }

    /// One checker tile per palette color, for running without texture files.
    pub fn procedural(tile_size: usize, palette: &ColorTable) -> Result<TextureAtlas> {
        if tile_size == 0 || palette.is_empty() {
            return Err(RenderError::InvalidAtlas("procedural atlas needs tiles".into()));
        }
        let tile_count = palette.len();
        let width = tile_size * tile_count;
        let cell = (tile_size / 8).max(1);
        let mut pixels = vec![0; width * tile_size];
        for (t, &base) in palette.as_slice().iter().enumerate() {
            for y in 0..tile_size {
                for x in 0..tile_size {
                    let c = if ((x / cell) + (y / cell)) % 2 == 0 {
                        mix(base, rgb(255, 255, 255), 24)
                    } else {
                        base
                    };
                    pixels[t * tile_size + x + y * width] = c;
                }
            }
        }
        Ok(TextureAtlas { tile_size, tile_count, pixels })
    }

    #[inline]
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    #[inline]
    fn texel(&self, tile: usize, x: usize, y: usize) -> PackedColor {
        self.pixels[x + tile * self.tile_size + y * self.tile_size * self.tile_count]
    }

    fn check(&self, tile: usize, column: usize) -> Result<()> {
        if tile >= self.tile_count || column >= self.tile_size {
            return Err(RenderError::SampleOutOfRange {
                tile,
                tile_count: self.tile_count,
                column,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Vertical texel column `column` of tile `tile`, top to bottom.
    pub fn sample_column(&self, tile: usize, column: usize) -> Result<Vec<PackedColor>> {
        self.check(tile, column)?;
        Ok((0..self.tile_size).map(|y| self.texel(tile, column, y)).collect())
    }

    /// Whole tile, row-major, `tile_size` wide.
    pub fn tile(&self, tile: usize) -> Result<Vec<PackedColor>> {
        self.check(tile, 0)?;
        let mut out = Vec::with_capacity(self.tile_size * self.tile_size);
        for y in 0..self.tile_size {
            out.extend((0..self.tile_size).map(|x| self.texel(tile, x, y)));
        }
        Ok(out)
    }
}

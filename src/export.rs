//! Binary PPM (P6) output. Alpha is dropped.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::animation::Frame;
use crate::error::{RenderError, Result};
use crate::render::color::unpack_color;
use crate::render::framebuffer::Framebuffer;

pub fn encode_ppm<W: Write>(out: &mut W, fb: &Framebuffer) -> Result<()> {
    let (w, h) = (fb.width(), fb.height());
    if fb.pixels().len() != w * h {
        return Err(RenderError::BufferSizeMismatch { width: w, height: h, actual: fb.pixels().len() });
    }
    write!(out, "P6\n{w} {h}\n255\n")?;
    let mut bytes = Vec::with_capacity(w * h * 3);
    for &px in fb.pixels() {
        let (r, g, b, _) = unpack_color(px);
        bytes.extend_from_slice(&[r, g, b]);
    }
    out.write_all(&bytes)?;
    Ok(())
}

pub fn write_ppm<P: AsRef<Path>>(path: P, fb: &Framebuffer) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    encode_ppm(&mut out, fb)?;
    out.flush()?;
    Ok(())
}

/// File name used for frame `index` of a sequence.
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:04}.ppm"))
}

/// Writes each frame as `frame_NNNN.ppm` under `dir` (created if missing).
/// Stops at the first failed frame. Returns the number of files written.
pub fn write_sequence<I>(dir: &Path, frames: I) -> Result<usize>
where
    I: IntoIterator<Item = Result<Frame>>,
{
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for frame in frames {
        let frame = frame?;
        write_ppm(frame_path(dir, frame.index), &frame.buffer)?;
        written += 1;
    }
    Ok(written)
}

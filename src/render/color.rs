//! Packed RGBA colors and the wall palette.
//!
//! A color is a plain `u32` laid out as `a << 24 | b << 16 | g << 8 | r`.
//! `pack_color`/`unpack_color` are the only way channels go in or out.
use rand::Rng;

pub type PackedColor = u32;

#[inline]
pub const fn pack_color(r: u8, g: u8, b: u8, a: u8) -> PackedColor {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

#[inline]
pub const fn unpack_color(color: PackedColor) -> (u8, u8, u8, u8) {
    (
        (color & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        ((color >> 16) & 0xff) as u8,
        ((color >> 24) & 0xff) as u8,
    )
}

/// Opaque shorthand.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> PackedColor {
    pack_color(r, g, b, 255)
}

/// Linear blend, `t = 0` keeps `a`, `t = 255` gives `b`.
#[inline]
pub fn mix(a: PackedColor, b: PackedColor, t: u8) -> PackedColor {
    let ta = t as u16;
    let na = 255u16 - ta;
    let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
    let (ar, ag, ab, aa) = unpack_color(a);
    let (br, bg, bb, ba) = unpack_color(b);
    pack_color(mixc(ar, br), mixc(ag, bg), mixc(ab, bb), mixc(aa, ba))
}

/// Wall colors indexed by tile identity. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<PackedColor>,
}

impl ColorTable {
    pub fn new(colors: Vec<PackedColor>) -> Self {
        Self { colors }
    }

    /// `ncolors` opaque colors with every channel drawn from `[0, 255)`.
    /// Seed the generator to get the same palette (and the same frames) back.
    pub fn random<R: Rng>(ncolors: usize, rng: &mut R) -> Self {
        let colors = (0..ncolors)
            .map(|_| rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255)))
            .collect();
        Self { colors }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<PackedColor> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[PackedColor] {
        &self.colors
    }
}

//! Tile map loading and lookup.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{RenderError, Result};

/// The 16×16 reference level. Digits are wall colors, spaces are floor.
pub const DEMO_MAP: [&str; 16] = [
    "0000222222220000",
    "1              0",
    "1      11111   0",
    "1     0        0",
    "0     0  1110000",
    "0     3        0",
    "0   10000      0",
    "0   0   11100  0",
    "0   0   0      0",
    "0   0   1  00000",
    "0       1      0",
    "2       1      0",
    "0       0      0",
    "0 0000000      0",
    "0              0",
    "0002222222200000",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    /// Wall with its color index (`char - '0'`).
    Wall(usize),
}

impl Tile {
    fn from_char(ch: char) -> Option<Tile> {
        match ch {
            ' ' => Some(Tile::Empty),
            c if c >= '0' => Some(Tile::Wall(c as usize - '0' as usize)),
            _ => None,
        }
    }
}

/// Fixed-size grid of tiles, row-major. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileMap {
    /// Builds a map from equally long rows.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<TileMap> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidMap("map is empty".into()));
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(RenderError::InvalidMap(format!(
                    "row {y} has {len} cells, expected {width}"
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or_else(|| {
                    RenderError::InvalidMap(format!("unexpected character {ch:?} at ({x}, {y})"))
                })?;
                cells.push(tile);
            }
        }
        Ok(TileMap { width, height, cells })
    }

    /// Builds a map from a flat row-major string of `width * height` cells.
    pub fn from_cells(width: usize, height: usize, cells: &str) -> Result<TileMap> {
        let chars: Vec<char> = cells.chars().collect();
        if width == 0 || chars.len() != width * height {
            return Err(RenderError::InvalidMap(format!(
                "{} cells for a {width}x{height} map",
                chars.len()
            )));
        }
        let rows: Vec<String> = chars.chunks(width).map(|r| r.iter().collect()).collect();
        TileMap::parse(&rows)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            return Some(self.cells[x + y * self.width]);
        }
        None
    }

    /// Tile under a map-space point; `None` outside the grid.
    #[inline]
    pub fn tile_at(&self, x: f32, y: f32) -> Option<Tile> {
        let (i, j) = (x.floor(), y.floor());
        if i < 0.0 || j < 0.0 {
            return None;
        }
        self.get(i as usize, j as usize)
    }

    /// Walls in row-major order as `(x, y, color index)`.
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(|(k, t)| match *t {
            Tile::Wall(idx) => Some((k % self.width, k / self.width, idx)),
            Tile::Empty => None,
        })
    }

    /// Fails on the first wall whose index falls outside `[0, ncolors)`.
    pub fn check_palette(&self, ncolors: usize) -> Result<()> {
        match self.walls().find(|&(_, _, idx)| idx >= ncolors) {
            Some((x, y, index)) => Err(RenderError::PaletteOverflow { index, x, y, ncolors }),
            None => Ok(()),
        }
    }
}

/// Reads a map from a text file, one row per line. Blank trailing lines are ignored.
pub fn load_maze<P: AsRef<Path>>(path: P) -> Result<TileMap> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    for line in reader.lines() {
        rows.push(line?);
    }
    while rows.last().is_some_and(|r| r.trim().is_empty()) {
        rows.pop();
    }
    TileMap::parse(&rows)
}

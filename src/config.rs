//! Render parameters. No file format: callers build a `RenderConfig` in code.

use crate::error::{RenderError, Result};
use crate::render::color::{PackedColor, pack_color};

/// How the frame is split between the map overview and the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Map overview on the left half, projection on the right half.
    Split,
    /// Projection only, over the full width.
    ViewOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Each wall slab is filled with its palette color.
    Flat,
    /// Each wall slab is sampled from the texture atlas tile matching the wall index.
    Textured,
}

/// Screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view in radians.
    pub fov: f32,
    /// Rays give up after this many map units.
    pub max_distance: f32,
    /// Marching increment in map units.
    pub step: f32,
    pub fisheye_correction: bool,
    pub layout: Layout,
    pub shading: Shading,
    pub background: PackedColor,
    /// Color of the sweep markers painted on the map overview.
    pub cone_color: PackedColor,
    /// Atlas tile copied 1:1 to the top-left corner after the frame is drawn.
    pub overlay_tile: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            fov: std::f32::consts::FRAC_PI_3,
            max_distance: 20.0,
            step: 0.01,
            fisheye_correction: true,
            layout: Layout::Split,
            shading: Shading::Flat,
            background: pack_color(255, 255, 255, 255),
            cone_color: pack_color(160, 160, 160, 255),
            overlay_tile: None,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_fisheye_correction(mut self, enabled: bool) -> Self {
        self.fisheye_correction = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "frame size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.layout == Layout::Split && self.width < 2 {
            return Err(RenderError::InvalidConfig(
                "split layout needs at least two columns".into(),
            ));
        }
        if !(self.step > 0.0) {
            return Err(RenderError::InvalidConfig(format!("step {} must be positive", self.step)));
        }
        if !(self.max_distance > 0.0 && self.max_distance.is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "max_distance {} must be positive and finite",
                self.max_distance
            )));
        }
        // below one ulp of max_distance, `t += step` stops advancing before the ray ends
        if self.step < self.max_distance * f32::EPSILON {
            return Err(RenderError::InvalidConfig(format!(
                "step {} is too small to march {} units",
                self.step, self.max_distance
            )));
        }
        if !(self.fov > 0.0 && self.fov < std::f32::consts::PI) {
            return Err(RenderError::InvalidConfig(format!(
                "fov {} must lie in (0, pi)",
                self.fov
            )));
        }
        Ok(())
    }

    /// Where the 3D projection goes.
    pub fn viewport(&self) -> Rect {
        match self.layout {
            Layout::Split => Rect { x: self.width / 2, y: 0, w: self.width / 2, h: self.height },
            Layout::ViewOnly => Rect { x: 0, y: 0, w: self.width, h: self.height },
        }
    }

    /// Where the map overview goes, if the layout has one.
    pub fn map_panel(&self) -> Option<Rect> {
        match self.layout {
            Layout::Split => Some(Rect { x: 0, y: 0, w: self.width / 2, h: self.height }),
            Layout::ViewOnly => None,
        }
    }
}

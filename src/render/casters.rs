//! Per-column ray marching.
//!
//! Rays advance in fixed steps rather than cell-to-cell (DDA), so a hit is
//! reported at the first sample that lands inside a wall cell. Wall edges
//! in the output depend on that rounding.
use rayon::prelude::*;

use crate::core::maze::{Tile, TileMap};
use crate::core::player::Pose;

/// One march sample: distance along the ray and the point it lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f32,
    pub x: f32,
    pub y: f32,
}

/// Samples a ray at `0, step, 2*step, ...` while `t < max_distance`.
///
/// The sample count is capped at twice `max_distance / step`, so the
/// iterator ends even when `step` is too small to move `t` or the distance
/// isn't finite.
#[derive(Debug, Clone)]
pub struct Ray {
    ox: f32,
    oy: f32,
    cos: f32,
    sin: f32,
    step: f32,
    max_distance: f32,
    t: f32,
    remaining: usize,
}

impl Ray {
    pub fn new(origin: &Pose, angle: f32, step: f32, max_distance: f32) -> Self {
        Self {
            ox: origin.x,
            oy: origin.y,
            cos: angle.cos(),
            sin: angle.sin(),
            step,
            max_distance,
            t: 0.0,
            remaining: sample_cap(step, max_distance),
        }
    }
}

fn sample_cap(step: f32, max_distance: f32) -> usize {
    if !(step > 0.0) || !max_distance.is_finite() {
        return 0;
    }
    let n = (max_distance.max(0.0) as f64 / step as f64).ceil();
    // saturating float -> int cast
    (n * 2.0 + 16.0) as usize
}

impl Iterator for Ray {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.remaining == 0 || !(self.t < self.max_distance) {
            return None;
        }
        self.remaining -= 1;
        let t = self.t;
        self.t += self.step;
        Some(Sample { t, x: self.ox + t * self.cos, y: self.oy + t * self.sin })
    }
}

/// First wall a ray runs into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersect {
    /// Distance along the ray.
    pub distance: f32,
    /// Wall color index.
    pub impact: usize,
    pub hit_x: f32,
    pub hit_y: f32,
    /// Samples taken, the hit sample included.
    pub samples: usize,
    /// Horizontal position across the wall face in `[0, 1)`.
    pub tx: f32,
}

/// Angle of screen column `column` out of `columns`.
#[inline]
pub fn ray_angle(pose: &Pose, fov: f32, column: usize, columns: usize) -> f32 {
    pose.a - fov / 2.0 + fov * column as f32 / columns as f32
}

/// Marches one ray until it enters a wall cell or runs out of distance.
/// Samples outside the map count as empty.
pub fn cast_ray(map: &TileMap, pose: &Pose, angle: f32, step: f32, max_distance: f32) -> Option<Intersect> {
    for (n, s) in Ray::new(pose, angle, step, max_distance).enumerate() {
        if let Some(Tile::Wall(impact)) = map.tile_at(s.x, s.y) {
            return Some(Intersect {
                distance: s.t,
                impact,
                hit_x: s.x,
                hit_y: s.y,
                samples: n + 1,
                tx: wall_offset(s.x, s.y),
            });
        }
    }
    None
}

/// Picks the coordinate running along the wall face: a hit close to a
/// vertical cell edge (x almost whole) lies on an x = const face, so the
/// texture follows y, and vice versa.
fn wall_offset(hit_x: f32, hit_y: f32) -> f32 {
    let fx = hit_x - hit_x.floor();
    let fy = hit_y - hit_y.floor();
    let dist_fx = fx.min(1.0 - fx);
    let dist_fy = fy.min(1.0 - fy);
    if dist_fx < dist_fy { fy } else { fx }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Distance used for scaling, after optional fisheye correction and flooring.
    pub corrected_distance: f32,
    /// Wall slab height in pixels, unclipped.
    pub column_height: f32,
}

/// Scales a hit into a wall slab: height is inversely proportional to distance.
///
/// With `fisheye_correction` the ray length is reduced to its component
/// along the view axis, which keeps flat walls flat. The distance never
/// drops below `min_distance`.
pub fn project(
    hit: &Intersect,
    angle: f32,
    view_angle: f32,
    screen_height: usize,
    fisheye_correction: bool,
    min_distance: f32,
) -> Projection {
    let raw = if fisheye_correction {
        hit.distance * (angle - view_angle).cos()
    } else {
        hit.distance
    };
    let corrected_distance = raw.max(min_distance);
    Projection {
        corrected_distance,
        column_height: screen_height as f32 / corrected_distance,
    }
}

/// Casts every column of a `columns`-wide view. Columns are independent,
/// so they are traced on the rayon pool; the result is in column order.
pub fn trace_columns(
    map: &TileMap,
    pose: &Pose,
    fov: f32,
    columns: usize,
    step: f32,
    max_distance: f32,
) -> Vec<Option<Intersect>> {
    (0..columns)
        .into_par_iter()
        .map(|i| cast_ray(map, pose, ray_angle(pose, fov, i, columns), step, max_distance))
        .collect()
}

use std::f32::consts::TAU;

/// Viewer position in map units (one tile = 1.0) and view angle in
/// radians, measured from the +x axis towards +y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub a: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, a: angle }
    }

    /// Same position, view angle advanced by `delta`.
    #[inline]
    pub fn rotated(self, delta: f32) -> Self {
        Self { a: self.a + delta, ..self }
    }

    /// View angle folded into `[0, 2π)`.
    pub fn heading(&self) -> f32 {
        self.a.rem_euclid(TAU)
    }
}

impl Default for Pose {
    /// Start of the demo level.
    fn default() -> Self {
        Pose::new(3.456, 2.345, 1.523)
    }
}

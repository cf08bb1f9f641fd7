//! Pre-computed rotation sequences.
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::core::player::Pose;
use crate::error::Result;
use crate::render::framebuffer::Framebuffer;
use crate::render::render3d::{Scene, render_new_frame};

/// One rendered step of an animation.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: usize,
    pub pose: Pose,
    pub buffer: Framebuffer,
}

/// Lazily renders `frame_count` frames, turning the viewer by
/// `angle_step` before each one. Exhausted once all frames are out.
pub struct Animation<'a> {
    scene: Scene<'a>,
    config: &'a RenderConfig,
    pose: Pose,
    angle_step: f32,
    index: usize,
    frame_count: usize,
}

impl Animation<'_> {
    /// Pose the next frame will start from (after the last one, the final pose).
    pub fn pose(&self) -> Pose {
        self.pose
    }
}

impl Iterator for Animation<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.frame_count {
            return None;
        }
        self.pose = self.pose.rotated(self.angle_step);
        let index = self.index;
        self.index += 1;
        Some(render_new_frame(&self.scene, self.config, self.pose).map(|buffer| Frame {
            index,
            pose: self.pose,
            buffer,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frame_count - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Animation<'_> {}

pub fn run_animation<'a>(
    scene: Scene<'a>,
    config: &'a RenderConfig,
    initial: Pose,
    frame_count: usize,
    angle_step: f32,
) -> Animation<'a> {
    Animation {
        scene,
        config,
        pose: initial,
        angle_step,
        index: 0,
        frame_count,
    }
}

/// Poses of every frame, accumulated exactly like `Animation` does.
pub fn animation_poses(initial: Pose, frame_count: usize, angle_step: f32) -> Vec<Pose> {
    let mut pose = initial;
    (0..frame_count)
        .map(|_| {
            pose = pose.rotated(angle_step);
            pose
        })
        .collect()
}

/// Same frames as `run_animation`, rendered on the rayon pool.
pub fn render_frames_parallel(
    scene: Scene<'_>,
    config: &RenderConfig,
    initial: Pose,
    frame_count: usize,
    angle_step: f32,
) -> Result<Vec<Frame>> {
    animation_poses(initial, frame_count, angle_step)
        .into_par_iter()
        .enumerate()
        .map(|(index, pose)| {
            render_new_frame(&scene, config, pose).map(|buffer| Frame { index, pose, buffer })
        })
        .collect()
}

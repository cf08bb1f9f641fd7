//! Rendering: colors, framebuffer, ray casting, textures and frame composition.
//!
//! - `color`: packed RGBA codec and wall palette
//! - `framebuffer`: CPU framebuffer and rectangle fills
//! - `casters`: ray marching and projection
//! - `textures`: texture atlas and image loading seam
//! - `render3d`: map overview and wall columns

pub mod casters;
pub mod color;
pub mod framebuffer;
pub mod render3d;
pub mod textures;

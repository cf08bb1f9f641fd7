//! Grid raycaster: renders a first-person view of a 2D tile map into a
//! packed-pixel framebuffer and writes frames out as PPM images.

pub mod animation;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod render;

pub use animation::{Animation, Frame, render_frames_parallel, run_animation};
pub use config::{Layout, RenderConfig, Shading};
pub use crate::core::maze::{DEMO_MAP, Tile, TileMap, load_maze};
pub use crate::core::player::Pose;
pub use error::{RenderError, Result};
pub use render::color::{ColorTable, PackedColor, pack_color, rgb, unpack_color};
pub use render::framebuffer::Framebuffer;
pub use render::render3d::{Scene, render_frame, render_new_frame};
pub use render::textures::{DecodedImage, ImageLoader, TextureAtlas};

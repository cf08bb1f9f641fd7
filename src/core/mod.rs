//! World data: the tile map and the viewer pose.
//!
//! - `maze`: tile map parsing, loading and lookup
//! - `player`: viewer pose

pub mod maze;
pub mod player;

// main.rs
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use tile_raycaster::export::{write_ppm, write_sequence};
use tile_raycaster::{
    ColorTable, DEMO_MAP, ImageLoader, Pose, RenderConfig, Scene, Shading, TextureAtlas, TileMap, render_new_frame,
    run_animation,
};

const NCOLORS: usize = 10;
const PALETTE_SEED: u64 = 0x5eed;
const TEXTURE_PATH: &str = "./textures/walltext.png";
const OVERLAY_TILE: usize = 4;

enum Mode {
    Still(PathBuf),
    Animate { dir: PathBuf, frames: usize },
}

fn parse_args() -> anyhow::Result<Mode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(Mode::Still(PathBuf::from("out.ppm"))),
        [flag, dir] if flag == "--animate" => Ok(Mode::Animate { dir: dir.into(), frames: 360 }),
        [flag, dir, n] if flag == "--animate" => Ok(Mode::Animate {
            dir: dir.into(),
            frames: n.parse().with_context(|| format!("frame count {n:?}"))?,
        }),
        [path] if !path.starts_with("--") => Ok(Mode::Still(path.into())),
        _ => bail!("usage: tile_raycaster [out.ppm] | --animate <dir> [frames]"),
    }
}

#[cfg(feature = "raylib")]
fn image_loader() -> Option<&'static dyn ImageLoader> {
    Some(&tile_raycaster::render::textures::RaylibLoader)
}

#[cfg(not(feature = "raylib"))]
fn image_loader() -> Option<&'static dyn ImageLoader> {
    None
}

fn main() -> anyhow::Result<()> {
    let mode = parse_args()?;

    let map = TileMap::parse(&DEMO_MAP)?;
    let colors = ColorTable::random(NCOLORS, &mut StdRng::seed_from_u64(PALETTE_SEED));
    let atlas = TextureAtlas::load_or_procedural(image_loader(), Path::new(TEXTURE_PATH), 64, &colors)
        .with_context(|| format!("Failed to load wall textures from {TEXTURE_PATH}"))?;
    let scene = Scene::new(&map, &colors)?.with_atlas(&atlas)?;

    let config = RenderConfig {
        shading: Shading::Textured,
        overlay_tile: Some(OVERLAY_TILE),
        ..RenderConfig::default()
    };
    let player = Pose::default();

    match mode {
        Mode::Still(path) => {
            let fb = render_new_frame(&scene, &config, player)?;
            write_ppm(&path, &fb).with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        Mode::Animate { dir, frames } => {
            if frames == 0 {
                bail!("nothing to render: frame count is 0");
            }
            let anim = run_animation(scene, &config, player, frames, TAU / frames as f32);
            let written = write_sequence(&dir, anim).with_context(|| format!("writing frames to {}", dir.display()))?;
            println!("wrote {written} frames to {}", dir.display());
        }
    }
    Ok(())
}

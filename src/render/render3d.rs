//! Frame composition: map overview, sweep cone and wall columns.
use crate::config::{Rect, RenderConfig, Shading};
use crate::core::maze::TileMap;
use crate::core::player::Pose;
use crate::error::{RenderError, Result};
use crate::render::casters::{Intersect, Ray, project, ray_angle, trace_columns};
use crate::render::color::ColorTable;
use crate::render::framebuffer::Framebuffer;
use crate::render::textures::TextureAtlas;

/// Read-only world a frame is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub map: &'a TileMap,
    pub colors: &'a ColorTable,
    pub atlas: Option<&'a TextureAtlas>,
}

impl<'a> Scene<'a> {
    /// Checks up front that every wall has a palette entry.
    pub fn new(map: &'a TileMap, colors: &'a ColorTable) -> Result<Self> {
        map.check_palette(colors.len())?;
        Ok(Self { map, colors, atlas: None })
    }

    /// Every wall index also has to name an atlas tile.
    pub fn with_atlas(mut self, atlas: &'a TextureAtlas) -> Result<Self> {
        if let Some((x, y, idx)) = self.map.walls().find(|&(_, _, idx)| idx >= atlas.tile_count()) {
            return Err(RenderError::InvalidAtlas(format!(
                "wall {idx} at ({x}, {y}) has no tile among {}",
                atlas.tile_count()
            )));
        }
        self.atlas = Some(atlas);
        Ok(self)
    }
}

/// Map overview cell size in pixels for a given panel.
#[inline]
fn cell_size(map: &TileMap, panel: Rect) -> (usize, usize) {
    (panel.w / map.width(), panel.h / map.height())
}

/// Paints every wall tile as a filled rectangle in its palette color.
pub fn render_map(fb: &mut Framebuffer, scene: &Scene, panel: Rect) -> Result<()> {
    let (rect_w, rect_h) = cell_size(scene.map, panel);
    for (i, j, idx) in scene.map.walls() {
        let color = scene.colors.get(idx).ok_or(RenderError::PaletteOverflow {
            index: idx,
            x: i,
            y: j,
            ncolors: scene.colors.len(),
        })?;
        let rect_x = (panel.x + i * rect_w) as isize;
        let rect_y = (panel.y + j * rect_h) as isize;
        fb.fill_rect(rect_x, rect_y, rect_w, rect_h, color);
    }
    Ok(())
}

/// Marks the samples of one ray on the map overview, up to and including
/// the hit sample. Markers outside the panel are dropped.
fn draw_cone(fb: &mut Framebuffer, cfg: &RenderConfig, panel: Rect, cell: (usize, usize), ray: Ray, samples: usize) {
    let (rect_w, rect_h) = (cell.0 as f32, cell.1 as f32);
    for s in ray.take(samples) {
        let px = (s.x * rect_w).floor();
        let py = (s.y * rect_h).floor();
        if px < 0.0 || py < 0.0 || px >= panel.w as f32 || py >= panel.h as f32 {
            continue;
        }
        fb.set_pixel((panel.x + px as usize) as isize, (panel.y + py as usize) as isize, cfg.cone_color);
    }
}

/// Draws one wall slab at screen column `x`, centered vertically.
fn draw_column(
    fb: &mut Framebuffer,
    scene: &Scene,
    cfg: &RenderConfig,
    view: Rect,
    x: usize,
    hit: &Intersect,
    column_height: usize,
) -> Result<()> {
    let top = (view.y + view.h / 2) as isize - (column_height / 2) as isize;
    let x = x as isize;
    match cfg.shading {
        Shading::Flat => {
            let color = scene.colors.get(hit.impact).ok_or(RenderError::PaletteOverflow {
                index: hit.impact,
                x: hit.hit_x as usize,
                y: hit.hit_y as usize,
                ncolors: scene.colors.len(),
            })?;
            fb.fill_rect(x, top, 1, column_height, color);
        }
        Shading::Textured => {
            let atlas = scene.atlas.ok_or(RenderError::MissingAtlas)?;
            let size = atlas.tile_size();
            let tex_x = ((hit.tx * size as f32) as usize).min(size - 1);
            let texels = atlas.sample_column(hit.impact, tex_x)?;
            // only the visible rows of the slab are walked
            let first = (-top).max(0) as usize;
            let last = column_height.min((fb.height() as isize - top).max(0) as usize);
            for j in first..last {
                let ty = j * size / column_height;
                fb.set_pixel(x, top + j as isize, texels[ty]);
            }
        }
    }
    Ok(())
}

/// Casts one ray per viewport column and draws the projected walls; on
/// split layouts the sweep is also marked on the map overview.
pub fn render_3d(fb: &mut Framebuffer, scene: &Scene, cfg: &RenderConfig, pose: Pose) -> Result<()> {
    let view = cfg.viewport();
    let hits = trace_columns(scene.map, &pose, cfg.fov, view.w, cfg.step, cfg.max_distance);
    let panel = cfg.map_panel();
    let cell = panel.map(|p| cell_size(scene.map, p));

    for (i, hit) in hits.iter().enumerate() {
        let angle = ray_angle(&pose, cfg.fov, i, view.w);
        if let (Some(panel), Some(cell)) = (panel, cell) {
            let ray = Ray::new(&pose, angle, cfg.step, cfg.max_distance);
            let samples = hit.map_or(usize::MAX, |h| h.samples);
            draw_cone(fb, cfg, panel, cell, ray, samples);
        }
        let Some(hit) = hit else { continue };
        let proj = project(hit, angle, pose.a, view.h, cfg.fisheye_correction, cfg.step);
        draw_column(fb, scene, cfg, view, view.x + i, hit, proj.column_height as usize)?;
    }
    Ok(())
}

/// Copies atlas tile `tile` unscaled to `(x, y)`.
pub fn blit_tile(fb: &mut Framebuffer, atlas: &TextureAtlas, tile: usize, x: isize, y: isize) -> Result<()> {
    let texels = atlas.tile(tile)?;
    fb.blit(x, y, atlas.tile_size(), &texels);
    Ok(())
}

/// Full pass: clear, map overview (split layout), walls, optional overlay.
pub fn render_frame(fb: &mut Framebuffer, scene: &Scene, cfg: &RenderConfig, pose: Pose) -> Result<()> {
    cfg.validate()?;
    if fb.width() != cfg.width || fb.height() != cfg.height {
        return Err(RenderError::FrameSizeMismatch {
            width: fb.width(),
            height: fb.height(),
            expected_width: cfg.width,
            expected_height: cfg.height,
        });
    }
    fb.set_background_color(cfg.background);
    fb.clear();
    if let Some(panel) = cfg.map_panel() {
        render_map(fb, scene, panel)?;
    }
    render_3d(fb, scene, cfg, pose)?;
    if let Some(tile) = cfg.overlay_tile {
        let atlas = scene.atlas.ok_or(RenderError::MissingAtlas)?;
        blit_tile(fb, atlas, tile, 0, 0)?;
    }
    Ok(())
}

/// Allocates a buffer sized by `cfg` and renders into it.
pub fn render_new_frame(scene: &Scene, cfg: &RenderConfig, pose: Pose) -> Result<Framebuffer> {
    let mut fb = Framebuffer::new(cfg.width, cfg.height, cfg.background);
    render_frame(&mut fb, scene, cfg, pose)?;
    Ok(fb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::render::color::rgb;

    fn palette() -> ColorTable {
        ColorTable::new((0..10).map(|i| rgb(20 * i as u8, 10, 200)).collect())
    }

    fn room() -> TileMap {
        TileMap::parse(&["11111", "1   1", "1   1", "1   1", "11111"]).unwrap()
    }

    #[test]
    fn scene_rejects_short_palette() {
        let map = room();
        let colors = ColorTable::new(vec![0]);
        assert!(matches!(Scene::new(&map, &colors), Err(RenderError::PaletteOverflow { .. })));
    }

    #[test]
    fn scene_rejects_atlas_without_enough_tiles() {
        let map = room();
        let colors = palette();
        let atlas = TextureAtlas::procedural(4, &ColorTable::new(vec![0])).unwrap();
        let scene = Scene::new(&map, &colors).unwrap();
        assert!(scene.with_atlas(&atlas).is_err());
    }

    #[test]
    fn map_overview_fills_wall_cells() {
        let map = room();
        let colors = palette();
        let scene = Scene::new(&map, &colors).unwrap();
        let mut fb = Framebuffer::new(20, 10, 0);
        render_map(&mut fb, &scene, Rect { x: 0, y: 0, w: 10, h: 10 }).unwrap();
        // 2x2 cells
        assert_eq!(fb.get_pixel(0, 0), colors.get(1));
        assert_eq!(fb.get_pixel(3, 3), Some(0));
        assert_eq!(fb.get_pixel(9, 9), colors.get(1));
        assert_eq!(fb.get_pixel(10, 0), Some(0));
    }

    #[test]
    fn split_frame_paints_cone_and_walls() {
        let map = room();
        let colors = palette();
        let scene = Scene::new(&map, &colors).unwrap();
        let cfg = RenderConfig::default().with_size(40, 20);
        let fb = render_new_frame(&scene, &cfg, Pose::new(2.5, 2.5, 0.0)).unwrap();
        // viewer cell (2, 2) is 4x4 pixels at (8, 8) and the cone starts there
        assert_eq!(fb.get_pixel(10, 10), Some(cfg.cone_color));
        // center of the projection: wall at distance 1.5
        assert_eq!(fb.get_pixel(30, 10), colors.get(1));
        assert_eq!(fb.get_pixel(30, 0), Some(cfg.background));
    }

    #[test]
    fn textured_columns_come_from_the_atlas() {
        let map = room();
        let colors = palette();
        let atlas = TextureAtlas::procedural(8, &colors).unwrap();
        let scene = Scene::new(&map, &colors).unwrap().with_atlas(&atlas).unwrap();
        let cfg = RenderConfig::default()
            .with_size(16, 64)
            .with_layout(Layout::ViewOnly)
            .with_shading(Shading::Textured);
        let fb = render_new_frame(&scene, &cfg, Pose::new(2.5, 2.5, 0.0)).unwrap();
        let tile = atlas.tile(1).unwrap();
        let center = fb.get_pixel(8, 32).unwrap();
        assert_ne!(center, cfg.background);
        assert!(tile.contains(&center));
    }

    #[test]
    fn textured_shading_without_atlas_fails() {
        let map = room();
        let colors = palette();
        let scene = Scene::new(&map, &colors).unwrap();
        let cfg = RenderConfig::default().with_size(8, 8).with_shading(Shading::Textured);
        assert!(matches!(render_new_frame(&scene, &cfg, Pose::new(2.5, 2.5, 0.0)), Err(RenderError::MissingAtlas)));
    }

    #[test]
    fn overlay_is_copied_to_the_corner() {
        let map = room();
        let colors = palette();
        let atlas = TextureAtlas::procedural(4, &colors).unwrap();
        let scene = Scene::new(&map, &colors).unwrap().with_atlas(&atlas).unwrap();
        let cfg = RenderConfig { overlay_tile: Some(4), ..RenderConfig::default().with_size(40, 20) };
        let fb = render_new_frame(&scene, &cfg, Pose::new(2.5, 2.5, 0.0)).unwrap();
        let tile = atlas.tile(4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.get_pixel(x, y), Some(tile[x + y * 4]));
            }
        }
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let map = room();
        let colors = palette();
        let scene = Scene::new(&map, &colors).unwrap();
        let mut fb = Framebuffer::new(10, 10, 0);
        let cfg = RenderConfig::default().with_size(5, 20);
        let err = render_frame(&mut fb, &scene, &cfg, Pose::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::FrameSizeMismatch { width: 10, height: 10, expected_width: 5, expected_height: 20 }
        ));
        assert_eq!(err.to_string(), "framebuffer is 10x10, configured frame is 5x20");
    }
}

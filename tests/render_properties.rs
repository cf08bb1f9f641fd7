use std::f32::consts::FRAC_PI_3;

use pretty_assertions::assert_eq;
use tile_raycaster::render::casters::{cast_ray, project, ray_angle};
use tile_raycaster::rgb;
use tile_raycaster::{
    ColorTable, Layout, Pose, RenderConfig, Scene, TileMap, pack_color, render_new_frame, unpack_color,
};

fn palette() -> ColorTable {
    ColorTable::new((0..10u8).map(|i| rgb(25 * i, 255 - 25 * i, 100)).collect())
}

fn open_map(w: usize, h: usize) -> TileMap {
    let rows: Vec<String> = (0..h).map(|_| " ".repeat(w)).collect();
    TileMap::parse(&rows).unwrap()
}

/// Square room with a one-tile wall border.
fn ring(size: usize) -> TileMap {
    let rows: Vec<String> = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| if x == 0 || y == 0 || x == size - 1 || y == size - 1 { '1' } else { ' ' })
                .collect()
        })
        .collect();
    TileMap::parse(&rows).unwrap()
}

/// Open 32x32 field with a single wall along x = 12.
fn flat_wall() -> TileMap {
    let rows: Vec<String> = (0..32)
        .map(|_| (0..32).map(|x| if x == 12 { '2' } else { ' ' }).collect())
        .collect();
    TileMap::parse(&rows).unwrap()
}

/// Projected slab heights for every column of a `columns`-wide view.
fn column_heights(map: &TileMap, pose: Pose, columns: usize, height: usize, fisheye: bool) -> Vec<f32> {
    (0..columns)
        .map(|i| {
            let angle = ray_angle(&pose, FRAC_PI_3, i, columns);
            let hit = cast_ray(map, &pose, angle, 0.01, 20.0).expect("wall in view");
            project(&hit, angle, pose.a, height, fisheye, 0.01).column_height
        })
        .collect()
}

#[test]
fn open_map_leaves_background_untouched() {
    let map = open_map(16, 16);
    let colors = palette();
    let scene = Scene::new(&map, &colors).unwrap();
    let cfg = RenderConfig::default().with_size(128, 64).with_layout(Layout::ViewOnly);
    let fb = render_new_frame(&scene, &cfg, Pose::new(8.0, 8.0, 0.7)).unwrap();
    assert!(fb.pixels().iter().all(|&p| p == cfg.background));
}

#[test]
fn open_map_split_view_has_no_wall_slabs() {
    let map = open_map(16, 16);
    let colors = palette();
    let scene = Scene::new(&map, &colors).unwrap();
    let cfg = RenderConfig::default().with_size(128, 64);
    let fb = render_new_frame(&scene, &cfg, Pose::new(8.0, 8.0, 2.0)).unwrap();
    let view = cfg.viewport();
    for y in 0..view.h {
        for x in view.x..view.x + view.w {
            assert_eq!(fb.get_pixel(x, y), Some(cfg.background), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn central_ray_height_matches_perpendicular_distance() {
    let map = ring(11);
    let pose = Pose::new(5.5, 5.5, 0.0);
    let heights = column_heights(&map, pose, 64, 512, true);
    let expected = 512.0 / 4.5;
    assert!((heights[32] - expected).abs() < 0.3, "{} vs {expected}", heights[32]);

    let colors = palette();
    let scene = Scene::new(&map, &colors).unwrap();
    let cfg = RenderConfig::default().with_size(64, 512).with_layout(Layout::ViewOnly);
    let fb = render_new_frame(&scene, &cfg, pose).unwrap();
    let painted = (0..512).filter(|&y| fb.get_pixel(32, y) == colors.get(1)).count();
    assert!((113..=114).contains(&painted), "slab of {painted} pixels");
}

#[test]
fn corrected_flat_wall_is_flat() {
    let heights = column_heights(&flat_wall(), Pose::new(2.5, 16.5, 0.0), 64, 512, true);
    let expected = 512.0 / 9.5;
    for (i, h) in heights.iter().enumerate() {
        assert!((h - expected).abs() < 0.15, "column {i}: {h} vs {expected}");
    }
}

#[test]
fn uncorrected_flat_wall_bows_towards_the_edges() {
    let heights = column_heights(&flat_wall(), Pose::new(2.5, 16.5, 0.0), 64, 512, false);
    let center = 32;
    // every fourth column the ray grows by more than one marching step
    let left: Vec<usize> = (0..=center).rev().step_by(4).collect();
    let right: Vec<usize> = (center..64).step_by(4).collect();
    for side in [left, right] {
        for pair in side.windows(2) {
            let (inner, outer) = (pair[0], pair[1]);
            assert!(
                heights[outer] < heights[inner],
                "column {outer} ({}) not shorter than column {inner} ({})",
                heights[outer],
                heights[inner]
            );
        }
    }
}

#[test]
fn fisheye_toggle_changes_the_rendered_edge_slabs() {
    let map = flat_wall();
    let colors = palette();
    let scene = Scene::new(&map, &colors).unwrap();
    let pose = Pose::new(2.5, 16.5, 0.0);
    let wall = colors.get(2);
    let slab = |fb: &tile_raycaster::Framebuffer, x: usize| (0..512).filter(|&y| fb.get_pixel(x, y) == wall).count();

    let base = RenderConfig::default().with_size(64, 512).with_layout(Layout::ViewOnly);
    let corrected = render_new_frame(&scene, &base.clone().with_fisheye_correction(true), pose).unwrap();
    let bowed = render_new_frame(&scene, &base.with_fisheye_correction(false), pose).unwrap();

    let (c_left, c_mid, c_right) = (slab(&corrected, 0), slab(&corrected, 32), slab(&corrected, 63));
    assert!(c_left.abs_diff(c_mid) <= 1 && c_right.abs_diff(c_mid) <= 1, "{c_left} {c_mid} {c_right}");

    let (b_left, b_mid, b_right) = (slab(&bowed, 0), slab(&bowed, 32), slab(&bowed, 63));
    assert!(b_mid.abs_diff(c_mid) <= 1);
    assert!(b_left + 3 < b_mid && b_right + 3 < b_mid, "{b_left} {b_mid} {b_right}");
}

#[test]
fn default_alpha_is_opaque() {
    assert_eq!(rgb(10, 20, 30), pack_color(10, 20, 30, 255));
    assert_eq!(unpack_color(rgb(10, 20, 30)), (10, 20, 30, 255));
}

#[test]
fn enclosed_view_fills_every_column() {
    let map = ring(3);
    let colors = palette();
    let scene = Scene::new(&map, &colors).unwrap();
    let cfg = RenderConfig { fov: 0.4, ..RenderConfig::default().with_size(4, 4).with_layout(Layout::ViewOnly) };
    let fb = render_new_frame(&scene, &cfg, Pose::new(1.5, 1.5, 0.0)).unwrap();
    assert_eq!(fb.pixels(), &[colors.get(1).unwrap(); 16][..]);
}

#[test]
fn tall_slabs_are_clipped_to_the_screen() {
    let map = ring(3);
    let colors = palette();
    let scene = Scene::new(&map, &colors).unwrap();
    let cfg = RenderConfig::default().with_size(32, 16).with_layout(Layout::ViewOnly);
    // standing almost against the wall: slabs are far taller than the screen
    let fb = render_new_frame(&scene, &cfg, Pose::new(1.97, 1.5, 0.0)).unwrap();
    assert_eq!(fb.pixels().len(), 32 * 16);
    assert_eq!(fb.get_pixel(16, 0), colors.get(1));
    assert_eq!(fb.get_pixel(16, 15), colors.get(1));
}

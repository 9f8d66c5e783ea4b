#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;
use crate::error::RenderError;
use crate::geometry::Point;
use crate::mocks::MockSurface;
use crate::pattern::OpacityRange;
use crate::surface::DotShape;

fn table(seed: u64) -> GridTable {
    let cfg = DotGridConfig::default();
    GridTable::generate(cfg.max_rows, cfg.max_cols, cfg.speed_min, cfg.speed_max, &mut SmallRng::seed_from_u64(seed))
}

#[test]
fn paints_one_dot_per_visible_cell() {
    let cfg = DotGridConfig::default();
    let mut surface = MockSurface::new(360.0, 200.0);
    let size = surface.size;
    let stats = paint_dots(&mut surface, &table(1), &cfg, size, 0.0, Theme::Light).unwrap();
    assert_eq!(stats.layout, GridLayout { cols: 19, rows: 10 });
    assert_eq!(stats.dots, 190);
    assert_eq!(surface.dots().len(), 190);
}

#[test]
fn first_dot_sits_on_padding_corner() {
    let cfg = DotGridConfig::default();
    let mut surface = MockSurface::new(360.0, 200.0);
    let size = surface.size;
    paint_dots(&mut surface, &table(1), &cfg, size, 0.0, Theme::Light).unwrap();
    let dots = surface.dots();
    assert_eq!(dots[0].0, Point::new(18.0, 18.0));
    assert_eq!(dots[1].0, Point::new(36.0, 18.0));
    assert_eq!(dots[19].0, Point::new(18.0, 36.0));
}

#[test]
fn dot_alpha_follows_twinkle_formula() {
    let cfg = DotGridConfig::default();
    let grid = table(2);
    let mut surface = MockSurface::new(360.0, 200.0);
    let elapsed = 3.25;
    let size = surface.size;
    paint_dots(&mut surface, &grid, &cfg, size, elapsed, Theme::Light).unwrap();

    let dots = surface.dots();
    for row in 0..10 {
        for col in 0..19 {
            let cell = grid.cell(row, col);
            let range = cfg.opacity_range(is_striped(row, col, 4));
            let expected = range.at(twinkle(elapsed, cell.phase, cell.speed));
            assert_eq!(dots[row * 19 + col].1.alpha, expected);
        }
    }
}

#[test]
fn alphas_stay_within_stripe_class_bands() {
    let cfg = DotGridConfig::default();
    let grid = table(3);
    for step in 0..50 {
        let mut surface = MockSurface::new(200.0, 200.0);
        let elapsed = f64::from(step) * 0.173;
        let size = surface.size;
        paint_dots(&mut surface, &grid, &cfg, size, elapsed, Theme::Light).unwrap();
        for (i, (_, style)) in surface.dots().iter().enumerate() {
            let (row, col) = (i / 10, i % 10);
            let range = cfg.opacity_range(is_striped(row, col, cfg.stripe_interval));
            assert!(range.contains(style.alpha), "alpha {} outside {range:?}", style.alpha);
        }
    }
}

#[test]
fn counts_striped_cells() {
    let cfg = DotGridConfig::default();
    let mut surface = MockSurface::new(360.0, 200.0);
    let size = surface.size;
    let stats = paint_dots(&mut surface, &table(1), &cfg, size, 0.0, Theme::Light).unwrap();
    let expected = (0..10).flat_map(|r| (0..19).map(move |c| (r, c))).filter(|&(r, c)| is_striped(r, c, 4)).count();
    assert_eq!(stats.striped, expected);
}

#[test]
fn theme_selects_color() {
    let cfg = DotGridConfig::default();
    let grid = table(4);

    let mut light = MockSurface::new(100.0, 100.0);
    let size = light.size;
    let stats = paint_dots(&mut light, &grid, &cfg, size, 0.0, Theme::Light).unwrap();
    assert_eq!(stats.color, cfg.light_color);
    assert!(light.dots().iter().all(|(_, s)| s.color == cfg.light_color));

    let mut dark = MockSurface::new(100.0, 100.0);
    let size = dark.size;
    let stats = paint_dots(&mut dark, &grid, &cfg, size, 0.0, Theme::Dark).unwrap();
    assert_eq!(stats.color, cfg.dark_color);
    assert!(dark.dots().iter().all(|(_, s)| s.color == cfg.dark_color));
}

#[test]
fn uses_configured_radius_and_shape() {
    let cfg = DotGridConfig { dot_radius: 2.5, dot_shape: DotShape::Square, ..DotGridConfig::default() };
    let mut surface = MockSurface::new(100.0, 100.0);
    let size = surface.size;
    paint_dots(&mut surface, &table(5), &cfg, size, 0.0, Theme::Light).unwrap();
    assert!(surface.dots().iter().all(|(_, s)| s.radius == 2.5 && s.shape == DotShape::Square));
}

#[test]
fn large_surface_tiles_table() {
    let cfg = DotGridConfig { max_rows: 2, max_cols: 3, padding: 0.0, spacing: 10.0, ..DotGridConfig::default() };
    let grid = GridTable::generate(2, 3, 1.5, 3.5, &mut SmallRng::seed_from_u64(6));
    let mut surface = MockSurface::new(50.0, 30.0);
    let elapsed = 1.0;
    let size = surface.size;
    paint_dots(&mut surface, &grid, &cfg, size, elapsed, Theme::Light).unwrap();
    // 6 cols x 4 rows; cell (2, 3) reuses table entry (0, 0).
    let dots = surface.dots();
    assert_eq!(dots.len(), 24);
    let tiled = grid.cell(0, 0);
    let expected = cfg.opacity_range(is_striped(2, 3, 4)).at(twinkle(elapsed, tiled.phase, tiled.speed));
    assert_eq!(dots[2 * 6 + 3].1.alpha, expected);
}

#[test]
fn surface_smaller_than_padding_paints_nothing() {
    let cfg = DotGridConfig::default();
    let mut surface = MockSurface::new(20.0, 20.0);
    let size = surface.size;
    let stats = paint_dots(&mut surface, &table(7), &cfg, size, 0.0, Theme::Light).unwrap();
    assert_eq!(stats.dots, 0);
    assert!(surface.dots().is_empty());
}

#[test]
fn fill_failure_propagates() {
    let cfg = DotGridConfig::default();
    let mut surface = MockSurface::new(100.0, 100.0);
    surface.fail_dots = true;
    let size = surface.size;
    let result = paint_dots(&mut surface, &table(8), &cfg, size, 0.0, Theme::Light);
    assert!(matches!(result, Err(RenderError::Canvas(_))));
}

#[test]
fn constant_opacity_band_gives_constant_alpha() {
    let cfg = DotGridConfig {
        stripe_opacity: OpacityRange::new(0.3, 0.3),
        field_opacity: OpacityRange::new(0.3, 0.3),
        ..DotGridConfig::default()
    };
    let mut surface = MockSurface::new(100.0, 100.0);
    let size = surface.size;
    paint_dots(&mut surface, &table(9), &cfg, size, 12.0, Theme::Light).unwrap();
    assert!(surface.dots().iter().all(|(_, s)| s.alpha == 0.3));
}

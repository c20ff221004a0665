//! Weathered temple masonry, glowing runes and crystals.

use std::f64::consts::TAU;

use rand::Rng;
use vgn_raster::{Canvas, Color, Texture};

use crate::jitter;

pub const DARK_STONE: Color = Color::rgb(70, 70, 70);
pub const MOSS_GREEN: Color = Color::rgb(85, 107, 47);
pub const MAGIC_PURPLE: Color = Color::rgb(138, 43, 226);
pub const MAGIC_CYAN: Color = Color::rgb(0, 255, 255);
pub const MAGIC_PINK: Color = Color::rgb(255, 105, 180);
pub const CRYSTAL_BLUE: Color = Color::rgb(173, 216, 230);
const RUNE_HALO: Color = Color::rgb(80, 20, 120);

const BRICK_W: i32 = 50;
const BRICK_H: i32 = 25;

/// Stone wall: running-bond brick grid, cracks in about 30% of the bricks,
/// then moss clumps on top.
pub fn stone<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let g = 85 + jitter(rng, 20);
            canvas.set(x, y, Color::clamped(g, g, g + 5));
        }
    }

    for row in (0..h).step_by(BRICK_H as usize) {
        let offset = if (row / BRICK_H) % 2 == 1 { BRICK_W / 2 } else { 0 };
        for col in (-BRICK_W..w + BRICK_W).step_by(BRICK_W as usize) {
            let x = col + offset;
            canvas.stroke_rect(x, row, BRICK_W - 2, BRICK_H - 2, 1, DARK_STONE);
            if rng.random::<f32>() > 0.7 {
                let cx = x + rng.random_range(5..=BRICK_W - 10);
                let cy = row + rng.random_range(5..=BRICK_H - 10);
                let len = rng.random_range(5..=15);
                canvas.line(cx, cy, cx + len, cy + len, 1, DARK_STONE);
            }
        }
    }

    for _ in 0..30 {
        let mx = rng.random_range(0..=w);
        let my = rng.random_range(0..=h);
        let clumps = rng.random_range(3..=8);
        for _ in 0..clumps {
            let x = mx + jitter(rng, 5);
            let y = my + jitter(rng, 5);
            let r = rng.random_range(1..=3);
            canvas.fill_circle(x, y, r, MOSS_GREEN);
        }
    }
    canvas.into_texture()
}

/// Eight-point star vertices alternating between an outer and inner radius.
pub fn star_points(center: i32, outer: i32, inner: i32) -> Vec<(f32, f32)> {
    (0..8)
        .map(|i| {
            let angle = f64::from(i) * TAU / 8.0;
            let r = f64::from(if i % 2 == 0 { outer } else { inner });
            let x = (f64::from(center) + angle.cos() * r) as i32;
            let y = (f64::from(center) + angle.sin() * r) as i32;
            (x as f32, y as f32)
        })
        .collect()
}

/// Square rune: cyan ring, purple star, pink core and a faint halo.
pub fn rune(size: u32) -> Texture {
    let s = size as i32;
    let c = s / 2;
    let mut canvas = Canvas::new(size, size);
    canvas.stroke_circle(c, c, s / 2 - 2, 2, MAGIC_CYAN);
    canvas.stroke_polygon(&star_points(c, s / 3, s / 6), 2, MAGIC_PURPLE);
    canvas.fill_circle(c, c, s / 8, MAGIC_PINK);
    for i in (1..=3).rev() {
        canvas.stroke_circle(c, c, s / 2 - 2 + i * 2, 1, RUNE_HALO);
    }
    canvas.into_keyed_texture(Color::BLACK)
}

/// Pentagonal crystal with facet lines meeting at the centre.
pub fn crystal(width: u32, height: u32) -> Texture {
    let (w, h) = (width as i32, height as i32);
    let points = [
        (w / 2, 0),
        (w, h / 3),
        (w * 3 / 4, h),
        (w / 4, h),
        (0, h / 3),
    ]
    .map(|(x, y)| (x as f32, y as f32));

    let mut canvas = Canvas::new(width, height);
    canvas.fill_polygon(&points, CRYSTAL_BLUE);
    let centre = ((w / 2) as f32, (h / 2) as f32);
    for p in points {
        canvas.line_f(p, centre, 1, Color::WHITE);
    }
    canvas.fill_circle(w / 2, h / 4, 3, Color::WHITE);
    canvas.into_keyed_texture(Color::BLACK)
}

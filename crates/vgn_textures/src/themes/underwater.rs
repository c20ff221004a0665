//! Sea floor, coral and the fish sprite.

use rand::Rng;
use vgn_raster::{Canvas, Color, Texture};

use crate::jitter;

pub const SAND: Color = Color::rgb(194, 178, 128);
const SAND_SPOT: Color = Color::rgb(150, 130, 90);
const FISH_ORANGE: Color = Color::rgb(255, 140, 0);
const FISH_YELLOW: Color = Color::rgb(255, 215, 0);

pub fn sand<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, SAND.offset(jitter(rng, 15)));
        }
    }
    for _ in 0..50 {
        let x = rng.random_range(0..=w);
        let y = rng.random_range(0..=h);
        let r = rng.random_range(2..=5);
        canvas.fill_circle(x, y, r, SAND_SPOT);
    }
    canvas.into_texture()
}

/// Bumpy coral surface: a fixed sine lattice, no noise.
pub fn coral_texel(x: i32, y: i32, base: Color) -> Color {
    let bump = (20.0 * (x as f32 * 0.3).sin() * (y as f32 * 0.3).cos()) as i32;
    base.offset(bump)
}

pub fn coral(width: u32, height: u32, base: Color) -> Texture {
    let mut canvas = Canvas::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            canvas.set(x, y, coral_texel(x, y, base));
        }
    }
    canvas.into_keyed_texture(Color::BLACK)
}

/// Fish facing left: body, a grid of scale rings, tail on the right and an
/// eye whose pupil is see-through.
pub fn fish<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);

    canvas.fill_ellipse(5, h / 4, w - 10, h / 2, FISH_ORANGE);

    for row in 0..3 {
        for col in 0..5 {
            let shade = rng.random_range(200..=255u8);
            canvas.stroke_circle(10 + col * 12, h / 4 + 5 + row * 10, 4, 1, Color::rgb(shade, 120, 0));
        }
    }

    let tail = [
        ((w - 10) as f32, (h / 2) as f32),
        (w as f32, (h / 4) as f32),
        (w as f32, (3 * h / 4) as f32),
    ];
    canvas.fill_polygon(&tail, FISH_YELLOW);

    canvas.fill_circle(15, h / 3, 4, Color::WHITE);
    canvas.fill_circle(15, h / 3, 2, Color::BLACK);

    canvas.into_keyed_texture(Color::BLACK)
}

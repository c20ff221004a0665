use rand::Rng;
use vgn_raster::{Canvas, Color, Texture};

use crate::jitter;

pub const BROWN: Color = Color::rgb(101, 67, 33);
pub const DARK_BROWN: Color = Color::rgb(70, 40, 20);
pub const GRASS_GREEN: Color = Color::rgb(34, 139, 34);
pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);

/// Bark: noisy brown, wavy vertical grooves every 8 px and a handful of knots.
pub fn bark<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, BROWN.offset(jitter(rng, 20)));
        }
    }

    for x in (0..w).step_by(8) {
        let offset = jitter(rng, 3);
        for y in (0..h).step_by(3) {
            let groove_x = x + offset + ((y as f32 * 0.1).sin() * 2.0) as i32;
            if (0..w).contains(&groove_x) {
                canvas.fill_circle(groove_x, y, 1, DARK_BROWN);
            }
        }
    }

    for _ in 0..8 {
        let kx = rng.random_range(5..=w - 5);
        let ky = rng.random_range(5..=h - 5);
        let r = rng.random_range(3..=8);
        canvas.stroke_circle(kx, ky, r, 2, DARK_BROWN);
    }
    canvas.into_texture()
}

pub fn grass<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, GRASS_GREEN.offset(jitter(rng, 15)));
        }
    }

    for _ in 0..200 {
        let bx = rng.random_range(0..=w);
        let by = rng.random_range(0..=h);
        let blade = rng.random_range(3..=8);
        let lean = jitter(rng, 2);
        canvas.line(bx, by, bx + lean, by - blade, 1, DARK_GREEN);
    }
    canvas.into_texture()
}

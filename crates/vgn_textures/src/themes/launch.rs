//! Rocket hull plating and the launch-pad slab.

use std::f32::consts::TAU;

use rand::Rng;
use vgn_raster::{Canvas, Color, Texture};

use crate::jitter;

pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
const RIVET_HIGHLIGHT: Color = Color::rgb(180, 180, 180);
const CRACK_SEGMENTS: i32 = 8;

/// Brushed metal: a low-frequency shine lattice plus noise, blue-shifted.
pub fn metal_texel(x: i32, y: i32, noise: i32) -> Color {
    let shine = (20.0 * (x as f32 * 0.1).sin() * (y as f32 * 0.1).cos()) as i32;
    let base = 200 + shine + noise;
    Color::clamped(base, base, base + 20)
}

pub fn metal<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, metal_texel(x, y, jitter(rng, 10)));
        }
    }

    for y in (0..h).step_by(30) {
        canvas.line(0, y, w, y, 2, DARK_GRAY);
    }
    for y in (15..h).step_by(30) {
        for x in (15..w).step_by(20) {
            canvas.fill_circle(x, y, 2, DARK_GRAY);
            canvas.fill_circle(x - 1, y - 1, 1, RIVET_HIGHLIGHT);
        }
    }
    canvas.into_texture()
}

/// Pad concrete with wandering cracks and radial scorch marks.
pub fn concrete<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let g = 128 + jitter(rng, 15);
            canvas.set(x, y, Color::clamped(g, g, g + 5));
        }
    }

    for _ in 0..20 {
        let mut prev = (rng.random_range(0..=w) as f32, rng.random_range(0..=h) as f32);
        let length = rng.random_range(30..=80) as f32;
        let angle = rng.random_range(0.0..TAU);
        let step = length / CRACK_SEGMENTS as f32;
        for _ in 0..CRACK_SEGMENTS {
            let next = (
                prev.0 + angle.cos() * step + jitter(rng, 5) as f32,
                prev.1 + angle.sin() * step + jitter(rng, 5) as f32,
            );
            let inside = (0.0..w as f32).contains(&next.0) && (0.0..h as f32).contains(&next.1);
            if inside {
                canvas.line_f(prev, next, 2, DARK_GRAY);
            }
            prev = next;
        }
    }

    for _ in 0..10 {
        let sx = rng.random_range(0..=w);
        let sy = rng.random_range(0..=h);
        let size = rng.random_range(20..=50);
        for r in (1..=size).rev().step_by(3) {
            let darkness = (100 * r / size) as u8;
            canvas.fill_circle(sx, sy, r, Color::rgb(darkness, darkness, darkness));
        }
    }
    canvas.into_texture()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::rng;

    #[test]
    fn metal_panel_lines_every_thirty_rows() {
        let texture = metal(80, 200, &mut rng(17));
        for y in [0u32, 30, 60, 90] {
            assert_eq!(texture.pixel(40, y), Some(DARK_GRAY), "row {y}");
        }
    }

    #[test]
    fn metal_has_rivet_highlights() {
        let texture = metal(80, 200, &mut rng(17));
        assert_eq!(texture.pixel(14, 14), Some(RIVET_HIGHLIGHT));
    }

    #[test]
    fn concrete_is_deterministic_per_seed() {
        assert_eq!(concrete(300, 100, &mut rng(4)), concrete(300, 100, &mut rng(4)));
    }

    #[test]
    fn concrete_has_scorch_centres() {
        let texture = concrete(300, 100, &mut rng(4));
        let dark = texture.opaque_pixels().filter(|(_, _, c)| c.r < 20).count();
        assert!(dark > 0);
    }

    proptest::proptest! {
        #[test]
        fn metal_texel_is_blue_shifted(x in 0i32..80, y in 0i32..200, noise in -10i32..=10) {
            let c = metal_texel(x, y, noise);
            proptest::prop_assert_eq!(c.r, c.g);
            proptest::prop_assert!(c.b >= c.r);
            proptest::prop_assert!(c.r >= 170);
        }
    }
}

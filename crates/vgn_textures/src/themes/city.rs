//! Night-city facades, neon signs and wet asphalt.

use rand::Rng;
use vgn_raster::{draw_text, Canvas, Color, Texture};

use crate::jitter;

const WINDOW_W: i32 = 8;
const WINDOW_H: i32 = 10;
const WINDOW_SPACING: usize = 15;
const WINDOW_BRIGHTNESS: [f32; 3] = [0.3, 0.6, 1.0];
const SIGN_SCALE: i32 = 3;
const PUDDLE: Color = Color::rgb(20, 20, 50);

/// Grey concrete with a blue cast: `(g, g, g + tint)` around `base`.
pub fn concrete_texel(base: i32, tint: i32, noise: i32) -> Color {
    let g = base + noise;
    Color::clamped(g, g, g + tint)
}

/// Facade with a lit-window grid. Roughly 70% of the window slots are lit,
/// each at one of three brightness levels, with a half-bright frame.
pub fn building<R: Rng + ?Sized>(width: u32, height: u32, window: Color, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, concrete_texel(30, 10, jitter(rng, 10)));
        }
    }

    for row in (5..h - 10).step_by(WINDOW_SPACING) {
        for col in (5..w - 10).step_by(WINDOW_SPACING) {
            if rng.random::<f32>() <= 0.3 {
                continue;
            }
            let brightness = WINDOW_BRIGHTNESS[rng.random_range(0..WINDOW_BRIGHTNESS.len())];
            canvas.fill_rect(col, row, WINDOW_W, WINDOW_H, window.scale(brightness));
            canvas.stroke_rect(
                col - 1,
                row - 1,
                WINDOW_W + 2,
                WINDOW_H + 2,
                1,
                window.scale(brightness * 0.5),
            );
        }
    }
    canvas.into_texture()
}

/// Sign text with a half-bright glow echoed in four directions at
/// decreasing offsets. Background is colour-keyed.
pub fn neon_sign(width: u32, height: u32, text: &str, color: Color) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let y = height as i32 / 2 - 10;
    let glow = color.halve();
    for offset in [8, 6, 4, 2] {
        draw_text(&mut canvas, text, offset, y, SIGN_SCALE, glow);
        draw_text(&mut canvas, text, -offset, y, SIGN_SCALE, glow);
        draw_text(&mut canvas, text, 0, y + offset, SIGN_SCALE, glow);
        draw_text(&mut canvas, text, 0, y - offset, SIGN_SCALE, glow);
    }
    draw_text(&mut canvas, text, 0, y, SIGN_SCALE, color);
    canvas.into_keyed_texture(Color::BLACK)
}

pub fn road<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, concrete_texel(40, 20, jitter(rng, 15)));
        }
    }

    let centre = h / 2;
    for x in (0..w).step_by(40) {
        canvas.fill_rect(x, centre - 2, 20, 4, Color::WHITE);
    }

    for _ in 0..20 {
        let px = rng.random_range(0..=w);
        let py = rng.random_range(0..=h);
        let size = rng.random_range(10..=30);
        for i in (1..=size).rev().step_by(3) {
            canvas.fill_ellipse(px - i, py - i / 2, i * 2, i, PUDDLE);
        }
    }
    canvas.into_texture()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::rng;

    const WINDOW_YELLOW: Color = Color::rgb(255, 255, 150);

    #[test]
    fn concrete_texel_clamps() {
        assert_eq!(concrete_texel(30, 10, -40), Color::rgb(0, 0, 0));
        assert_eq!(concrete_texel(250, 20, 10), Color::rgb(255, 255, 255));
        assert_eq!(concrete_texel(40, 20, 0), Color::rgb(40, 40, 60));
    }

    #[test]
    fn building_windows_use_known_brightness_levels() {
        let texture = building(150, 250, WINDOW_YELLOW, &mut rng(21));
        let levels: Vec<Color> = WINDOW_BRIGHTNESS.iter().map(|b| WINDOW_YELLOW.scale(*b)).collect();
        let mut lit = 0;
        let mut slots = 0;
        for row in (5..240).step_by(WINDOW_SPACING) {
            for col in (5..140).step_by(WINDOW_SPACING) {
                slots += 1;
                let c = texture.pixel(col as u32 + 3, row as u32 + 4).unwrap_or(Color::BLACK);
                if levels.contains(&c) {
                    lit += 1;
                }
            }
        }
        assert!(lit > slots / 2, "only {lit} of {slots} windows lit");
        assert!(lit < slots, "every window lit");
    }

    #[test]
    fn neon_sign_background_is_keyed() {
        let pink = Color::rgb(255, 20, 147);
        let texture = neon_sign(150, 60, "CYBER", pink);
        assert!(!texture.is_opaque_at(149, 0));
        let main = texture.opaque_pixels().filter(|(_, _, c)| *c == pink).count();
        let glow = texture.opaque_pixels().filter(|(_, _, c)| *c == pink.halve()).count();
        assert!(main > 0);
        assert!(glow > 0);
    }

    #[test]
    fn road_has_dashed_centre_line() {
        let texture = road(200, 150, &mut rng(8));
        let dash = texture.pixel(10, 75);
        let gap = texture.pixel(30, 75);
        // Puddles may cover a dash, but both cannot be white.
        assert!(dash != gap || dash != Some(Color::WHITE));
    }

    #[test]
    fn road_is_deterministic_per_seed() {
        assert_eq!(road(100, 50, &mut rng(2)), road(100, 50, &mut rng(2)));
    }
}

//! Wood, book spines and the painted wall of the lo-fi room.

use rand::Rng;
use vgn_raster::{Canvas, Color, Texture};

use crate::jitter;

pub const WOOD_BROWN: Color = Color::rgb(139, 90, 60);
pub const GOLDEN: Color = Color::rgb(255, 223, 186);
pub const LAVENDER: Color = Color::rgb(230, 230, 250);
pub const SOFT_PURPLE: Color = Color::rgb(162, 155, 254);

const GRAIN_LINES: usize = 15;

/// Wood colour at (x, y). Red, green and blue never drop below 50, 40 and
/// 20 respectively.
pub fn wood_texel(x: i32, y: i32, noise: i32) -> Color {
    let grain = (10.0 * (y as f32 * 0.1).sin() * (x as f32 * 0.05).cos()) as i32;
    let value = i32::from(WOOD_BROWN.r) + grain + noise;
    Color::rgb(
        value.clamp(50, 255) as u8,
        ((value as f32 * 0.65) as i32).clamp(40, 255) as u8,
        ((value as f32 * 0.43) as i32).clamp(20, 255) as u8,
    )
}

pub fn wood<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, wood_texel(x, y, jitter(rng, 8)));
        }
    }

    for _ in 0..GRAIN_LINES {
        let line_y = rng.random_range(0..=h);
        let darkness = rng.random_range(20..=40u8);
        for x in 0..w {
            let wave = (3.0 * (x as f32 * 0.02 + line_y as f32).sin()) as i32;
            let y = line_y + wave;
            if let Some(current) = canvas.pixel(x, y) {
                canvas.set(x, y, current.darken(darkness));
            }
        }
    }
    canvas.into_texture()
}

pub fn book_spine<R: Rng + ?Sized>(width: u32, height: u32, color: Color, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, color.offset(jitter(rng, 5)));
        }
    }

    let edge = color.darken(30);
    canvas.line(2, 0, 2, h, 1, edge);
    canvas.line(w - 2, 0, w - 2, h, 1, edge);

    for i in 0..3 {
        let y = h / 4 + i * 8;
        canvas.line(5, y, w - 5, y, 2, GOLDEN);
    }
    canvas.into_texture()
}

/// Wall colour for row `y` of `height`: lavender drifting 30% of the way
/// toward soft purple at the bottom.
pub fn wall_texel(y: i32, height: i32, noise: i32) -> Color {
    let t = y as f32 / height.max(1) as f32;
    LAVENDER.lerp(SOFT_PURPLE, t * 0.3).offset(noise)
}

pub fn wall<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Texture {
    let mut canvas = Canvas::new(width, height);
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            canvas.set(x, y, wall_texel(y, h, jitter(rng, 3)));
        }
    }
    canvas.into_texture()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::rng;

    #[test]
    fn wood_is_deterministic_per_seed() {
        let a = wood(64, 32, &mut rng(11));
        let b = wood(64, 32, &mut rng(11));
        let c = wood(64, 32, &mut rng(12));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn wood_texel_without_noise_follows_grain() {
        // sin(0) = 0, so the first row is the bare base colour.
        assert_eq!(wood_texel(0, 0, 0), Color::rgb(139, 90, 59));
    }

    #[test]
    fn book_spine_has_gold_title_bars() {
        let spine = book_spine(30, 120, Color::rgb(255, 183, 178), &mut rng(5));
        assert_eq!(spine.pixel(15, 30), Some(GOLDEN));
        assert_eq!(spine.pixel(15, 38), Some(GOLDEN));
        assert_eq!(spine.pixel(15, 46), Some(GOLDEN));
    }

    #[test]
    fn book_spine_edges_are_darker() {
        let base = Color::rgb(189, 224, 254);
        let spine = book_spine(30, 120, base, &mut rng(5));
        assert_eq!(spine.pixel(2, 100), Some(base.darken(30)));
        assert_eq!(spine.pixel(28, 100), Some(base.darken(30)));
    }

    #[test]
    fn wall_gets_darker_toward_the_bottom() {
        let top = wall_texel(0, 350, 0);
        let bottom = wall_texel(349, 350, 0);
        assert_eq!(top, LAVENDER);
        assert!(bottom.r < top.r && bottom.g < top.g);
    }

    #[test]
    fn wall_texture_size_matches_request() {
        let texture = wall(90, 35, &mut rng(1));
        assert_eq!((texture.width(), texture.height()), (90, 35));
        assert_eq!(texture.opaque_count(), 90 * 35);
    }

    proptest::proptest! {
        #[test]
        fn wood_texel_respects_channel_floors(x in 0i32..900, y in 0i32..300, noise in -8i32..=8) {
            let c = wood_texel(x, y, noise);
            proptest::prop_assert!(c.r >= 50);
            proptest::prop_assert!(c.g >= 40);
            proptest::prop_assert!(c.b >= 20);
        }
    }
}

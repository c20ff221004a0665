pub mod cyberpunk;
pub mod forest;
pub mod lofi_room;
pub mod rocket_launch;
pub mod temple;
pub mod underwater;

use vgn_raster::{Canvas, Color};

/// Vertical gradient over the whole canvas; `strength` scales how far the
/// bottom row gets toward `to`.
pub(crate) fn fill_gradient(canvas: &mut Canvas, from: Color, to: Color, strength: f32) {
    let rows = canvas.height() as i32;
    canvas.fill_rows(0, rows, |y| from.lerp(to, y as f32 / rows as f32 * strength));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut canvas = Canvas::new(4, 100);
        fill_gradient(&mut canvas, Color::BLACK, Color::WHITE, 1.0);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        let bottom = canvas.pixel(3, 99).unwrap();
        assert!(bottom.r > 240);
    }

    #[test]
    fn gradient_strength_limits_the_far_end() {
        let mut canvas = Canvas::new(4, 100);
        fill_gradient(&mut canvas, Color::BLACK, Color::WHITE, 0.3);
        let bottom = canvas.pixel(0, 99).unwrap();
        assert!(bottom.r <= 77, "bottom = {bottom:?}");
    }
}

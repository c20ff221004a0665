use image::{Rgba, RgbaImage};

use crate::color::Color;
use crate::texture::Texture;

/// Mutable RGBA drawing surface. All primitives clip to the surface, so
/// callers can pass coordinates far outside it (a rocket thousands of pixels
/// above the window is normal).
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Opaque black surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    /// Fully colour-keyed surface; only pixels drawn afterwards are visible.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA8 bytes, row-major, for GPU upload.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_texture(self) -> Texture {
        Texture::from_image(self.image)
    }

    /// Finishes the canvas as a texture in which every pixel equal to `key`
    /// is colour-keyed out, including pixels drawn in `key` on purpose.
    pub fn into_keyed_texture(mut self, key: Color) -> Texture {
        let key = key.to_rgba();
        for px in self.image.pixels_mut() {
            if *px == key {
                px.0[3] = 0;
            }
        }
        Texture::from_image(self.image)
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    /// Colour at (x, y); `None` out of bounds or where nothing was drawn on a
    /// transparent surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let px = self.image.get_pixel(x as u32, y as u32);
        if px.0[3] == 0 {
            return None;
        }
        Some(Color::rgb(px.0[0], px.0[1], px.0[2]))
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, color.to_rgba());
        }
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for px in self.image.pixels_mut() {
            *px = rgba;
        }
    }

    /// Horizontal span from `x0` to `x1` inclusive.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        if y < 0 || y >= self.image.height() as i32 {
            return;
        }
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let lo = lo.max(0);
        let hi = hi.min(self.image.width() as i32 - 1);
        let rgba = color.to_rgba();
        for x in lo..=hi {
            self.image.put_pixel(x as u32, y as u32, rgba);
        }
    }

    /// Fills `rows` full-width rows starting at `top`, asking `color_at` for
    /// the colour of each row offset. Used for vertical gradients.
    pub fn fill_rows(&mut self, top: i32, rows: i32, mut color_at: impl FnMut(i32) -> Color) {
        let right = self.image.width() as i32 - 1;
        for row in 0..rows {
            let color = color_at(row);
            self.hline(0, right, top + row, color);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let y0 = y.max(0);
        let y1 = (y + h).min(self.image.height() as i32);
        for row in y0..y1 {
            self.hline(x, x + w - 1, row, color);
        }
    }

    /// Rectangle border `width` pixels thick, drawn inward from the edge.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, width: i32, color: Color) {
        if width <= 0 || w <= 0 || h <= 0 {
            return;
        }
        if width * 2 >= w || width * 2 >= h {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        self.fill_rect(x, y, w, width, color);
        self.fill_rect(x, y + h - width, w, width, color);
        self.fill_rect(x, y + width, width, h - 2 * width, color);
        self.fill_rect(x + w - width, y + width, width, h - 2 * width, color);
    }

    fn stamp(&mut self, x: i32, y: i32, width: i32, color: Color) {
        if width <= 1 {
            self.set(x, y, color);
        } else {
            let half = (width - 1) / 2;
            self.fill_rect(x - half, y - half, width, width, color);
        }
    }

    /// Bresenham line with a square brush `width` pixels across.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, color: Color) {
        if width <= 0 {
            return;
        }
        let pad = width;
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        if x0.max(x1) < -pad || y0.max(y1) < -pad || x0.min(x1) >= w + pad || y0.min(y1) >= h + pad
        {
            return;
        }

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.stamp(x, y, width, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// `line` with float endpoints, truncated toward zero.
    pub fn line_f(&mut self, from: (f32, f32), to: (f32, f32), width: i32, color: Color) {
        self.line(
            from.0 as i32,
            from.1 as i32,
            to.0 as i32,
            to.1 as i32,
            width,
            color,
        );
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius <= 0 {
            return;
        }
        let h = self.image.height() as i32;
        let dy_lo = (-radius).max(-cy);
        let dy_hi = radius.min(h - 1 - cy);
        for dy in dy_lo..=dy_hi {
            let span = (((radius * radius - dy * dy) as f32).sqrt()) as i32;
            self.hline(cx - span, cx + span, cy + dy, color);
        }
    }

    /// Circle outline `width` pixels thick, drawn inward from `radius`.
    pub fn stroke_circle(&mut self, cx: i32, cy: i32, radius: i32, width: i32, color: Color) {
        if radius <= 0 || width <= 0 {
            return;
        }
        if width >= radius {
            self.fill_circle(cx, cy, radius, color);
            return;
        }
        let inner = radius - width;
        let h = self.image.height() as i32;
        let dy_lo = (-radius).max(-cy);
        let dy_hi = radius.min(h - 1 - cy);
        for dy in dy_lo..=dy_hi {
            let outer_span = (((radius * radius - dy * dy) as f32).sqrt()) as i32;
            if dy.abs() > inner {
                self.hline(cx - outer_span, cx + outer_span, cy + dy, color);
                continue;
            }
            let inner_span = (((inner * inner - dy * dy) as f32).sqrt()) as i32;
            if inner_span >= outer_span {
                self.set(cx - outer_span, cy + dy, color);
                self.set(cx + outer_span, cy + dy, color);
                continue;
            }
            self.hline(cx - outer_span, cx - inner_span - 1, cy + dy, color);
            self.hline(cx + inner_span + 1, cx + outer_span, cy + dy, color);
        }
    }

    /// Horizontal extent of the ellipse inscribed in (x, y, w, h) on row `py`.
    fn ellipse_span(x: f32, y: f32, w: f32, h: f32, py: i32) -> Option<(i32, i32)> {
        let rx = w * 0.5;
        let ry = h * 0.5;
        if rx <= 0.0 || ry <= 0.0 {
            return None;
        }
        let cx = x + rx;
        let cy = y + ry;
        let dy = (py as f32 + 0.5 - cy) / ry;
        if dy.abs() > 1.0 {
            return None;
        }
        let half = rx * (1.0 - dy * dy).sqrt();
        let x0 = (cx - half - 0.5).ceil() as i32;
        let x1 = (cx + half - 0.5).floor() as i32;
        (x0 <= x1).then_some((x0, x1))
    }

    /// Ellipse inscribed in the rectangle (x, y, w, h).
    pub fn fill_ellipse(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let y0 = y.max(0);
        let y1 = (y + h).min(self.image.height() as i32);
        for py in y0..y1 {
            if let Some((x0, x1)) =
                Self::ellipse_span(x as f32, y as f32, w as f32, h as f32, py)
            {
                self.hline(x0, x1, py, color);
            }
        }
    }

    pub fn stroke_ellipse(&mut self, x: i32, y: i32, w: i32, h: i32, width: i32, color: Color) {
        if w <= 0 || h <= 0 || width <= 0 {
            return;
        }
        if width * 2 >= w || width * 2 >= h {
            self.fill_ellipse(x, y, w, h, color);
            return;
        }
        let (ix, iy) = ((x + width) as f32, (y + width) as f32);
        let (iw, ih) = ((w - 2 * width) as f32, (h - 2 * width) as f32);
        let y0 = y.max(0);
        let y1 = (y + h).min(self.image.height() as i32);
        for py in y0..y1 {
            let Some((ox0, ox1)) = Self::ellipse_span(x as f32, y as f32, w as f32, h as f32, py)
            else {
                continue;
            };
            match Self::ellipse_span(ix, iy, iw, ih, py) {
                Some((ix0, ix1)) => {
                    self.hline(ox0, (ix0 - 1).max(ox0), py, color);
                    self.hline((ix1 + 1).min(ox1), ox1, py, color);
                }
                None => self.hline(ox0, ox1, py, color),
            }
        }
    }

    /// Even-odd scanline fill plus a one-pixel outline so slivers stay visible.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        match points.len() {
            0 => return,
            1 => {
                self.set(points[0].0 as i32, points[0].1 as i32, color);
                return;
            }
            2 => {
                self.line_f(points[0], points[1], 1, color);
                return;
            }
            _ => {}
        }

        let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
        let y0 = (min_y.floor() as i32).max(0);
        let y1 = (max_y.ceil() as i32).min(self.image.height() as i32 - 1);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for py in y0..=y1 {
            let sy = py as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.1 <= sy && b.1 > sy) || (b.1 <= sy && a.1 > sy) {
                    crossings.push(a.0 + (sy - a.1) * (b.0 - a.0) / (b.1 - a.1));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil() as i32;
                let x1 = (pair[1] - 0.5).floor() as i32;
                if x0 <= x1 {
                    self.hline(x0, x1, py, color);
                }
            }
        }
        self.stroke_polygon(points, 1, color);
    }

    pub fn stroke_polygon(&mut self, points: &[(f32, f32)], width: i32, color: Color) {
        if points.len() < 2 {
            return;
        }
        for i in 0..points.len() {
            let next = (i + 1) % points.len();
            self.line_f(points[i], points[next], width, color);
        }
    }

    /// Elliptical arc inside (x, y, w, h) from `start` to `stop` radians,
    /// counter-clockwise with angles measured y-up.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        start: f32,
        stop: f32,
        width: i32,
        color: Color,
    ) {
        if w <= 0 || h <= 0 || width <= 0 {
            return;
        }
        let rx = w as f32 * 0.5;
        let ry = h as f32 * 0.5;
        let cx = x as f32 + rx;
        let cy = y as f32 + ry;
        let sweep = stop - start;
        let steps = ((rx.max(ry) * sweep.abs()) as i32).clamp(8, 720);
        let point_at = |t: f32| {
            let a = start + sweep * t;
            (cx + rx * a.cos(), cy - ry * a.sin())
        };
        let mut prev = point_at(0.0);
        for i in 1..=steps {
            let next = point_at(i as f32 / steps as f32);
            self.line_f(prev, next, width, color);
            prev = next;
        }
    }

    /// Copies the visible pixels of `texture` with its top-left at (x, y).
    pub fn blit(&mut self, texture: &Texture, x: i32, y: i32) {
        self.blit_faded(texture, x, y, 1.0);
    }

    /// Blit with every colour scaled by `factor`, the stand-in for a
    /// surface-wide alpha.
    pub fn blit_faded(&mut self, texture: &Texture, x: i32, y: i32, factor: f32) {
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        let (tw, th) = (texture.width() as i32, texture.height() as i32);
        if x >= w || y >= h || x + tw <= 0 || y + th <= 0 {
            return;
        }
        let full = factor >= 1.0;
        for (tx, ty, color) in texture.opaque_pixels() {
            let color = if full { color } else { color.scale(factor) };
            self.set(x + tx as i32, y + ty as i32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn count(canvas: &Canvas, color: Color) -> usize {
        let mut n = 0;
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if canvas.pixel(x, y) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn new_canvas_is_opaque_black() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(3, 2), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.as_raw().len(), 4 * 3 * 4);
    }

    #[test]
    fn transparent_canvas_reports_no_pixels_until_drawn() {
        let mut canvas = Canvas::transparent(4, 4);
        assert_eq!(canvas.pixel(1, 1), None);
        canvas.set(1, 1, RED);
        assert_eq!(canvas.pixel(1, 1), Some(RED));
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(-5, -5, 8, 8, RED);
        assert_eq!(count(&canvas, RED), 9);
        canvas.fill_rect(8, 8, 100, 100, RED);
        assert_eq!(count(&canvas, RED), 13);
    }

    #[test]
    fn stroke_rect_leaves_interior_untouched() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_rect(2, 2, 10, 10, 2, RED);
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(3, 6), Some(RED));
        assert_eq!(canvas.pixel(11, 11), Some(RED));
        assert_eq!(canvas.pixel(6, 6), Some(Color::BLACK));
        assert_eq!(count(&canvas, RED), 100 - 36);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = Canvas::new(20, 20);
        canvas.line(1, 1, 15, 7, 1, RED);
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(15, 7), Some(RED));
        assert_eq!(count(&canvas, RED), 15);
    }

    #[test]
    fn thick_line_is_wider() {
        let mut thin = Canvas::new(20, 20);
        thin.line(2, 10, 17, 10, 1, RED);
        let mut thick = Canvas::new(20, 20);
        thick.line(2, 10, 17, 10, 3, RED);
        assert_eq!(count(&thin, RED), 16);
        assert_eq!(count(&thick, RED), 18 * 3);
    }

    #[test]
    fn far_offscreen_line_is_skipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.line(-100_000, -50_000, -90_000, -40_000, 2, RED);
        assert_eq!(count(&canvas, RED), 0);
    }

    #[test]
    fn filled_circle_is_symmetric_and_round() {
        let mut canvas = Canvas::new(41, 41);
        canvas.fill_circle(20, 20, 10, RED);
        assert_eq!(canvas.pixel(20, 20), Some(RED));
        assert_eq!(canvas.pixel(30, 20), Some(RED));
        assert_eq!(canvas.pixel(10, 20), Some(RED));
        assert_eq!(canvas.pixel(20, 30), Some(RED));
        assert_eq!(canvas.pixel(28, 28), Some(Color::BLACK));
        let area = count(&canvas, RED) as f32;
        let expected = std::f32::consts::PI * 100.0;
        assert!((area - expected).abs() / expected < 0.1, "area = {area}");
    }

    #[test]
    fn zero_radius_circle_draws_nothing() {
        let mut canvas = Canvas::new(5, 5);
        canvas.fill_circle(2, 2, 0, RED);
        canvas.stroke_circle(2, 2, 0, 1, RED);
        assert_eq!(count(&canvas, RED), 0);
    }

    #[test]
    fn stroked_circle_is_hollow() {
        let mut canvas = Canvas::new(41, 41);
        canvas.stroke_circle(20, 20, 12, 2, RED);
        assert_eq!(canvas.pixel(20, 20), Some(Color::BLACK));
        assert_eq!(canvas.pixel(32, 20), Some(RED));
        assert_eq!(canvas.pixel(20, 8), Some(RED));
    }

    #[test]
    fn circle_partially_offscreen_clips() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(0, 0, 5, RED);
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        canvas.fill_circle(-1_000, 5_000, 50, RED);
    }

    #[test]
    fn ellipse_fills_inside_its_rect() {
        let mut canvas = Canvas::new(40, 20);
        canvas.fill_ellipse(0, 0, 40, 20, RED);
        assert_eq!(canvas.pixel(20, 10), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(39, 19), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 10), Some(RED));
    }

    #[test]
    fn stroked_ellipse_is_hollow() {
        let mut canvas = Canvas::new(40, 20);
        canvas.stroke_ellipse(0, 0, 40, 20, 1, RED);
        assert_eq!(canvas.pixel(20, 10), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 10), Some(RED));
        assert_eq!(canvas.pixel(20, 0), Some(RED));
    }

    #[test]
    fn polygon_fills_triangle_interior() {
        let mut canvas = Canvas::new(30, 30);
        canvas.fill_polygon(&[(5.0, 5.0), (25.0, 5.0), (15.0, 25.0)], RED);
        assert_eq!(canvas.pixel(15, 10), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(5, 20), Some(Color::BLACK));
    }

    #[test]
    fn polygon_far_above_surface_is_cheap_noop() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_polygon(&[(0.0, -90_000.0), (10.0, -89_000.0), (5.0, -88_000.0)], RED);
        assert_eq!(count(&canvas, RED), 0);
    }

    #[test]
    fn arc_upper_half_stays_above_center() {
        let mut canvas = Canvas::new(20, 20);
        canvas.arc(0, 0, 20, 20, 0.0, std::f32::consts::PI, 1, RED);
        assert!(count(&canvas, RED) > 0);
        for y in 12..20 {
            for x in 0..20 {
                assert_ne!(canvas.pixel(x, y), Some(RED), "pixel below center at {x},{y}");
            }
        }
    }

    #[test]
    fn blit_skips_colour_keyed_pixels() {
        let mut sprite = Canvas::transparent(3, 3);
        sprite.set(1, 1, RED);
        let texture = sprite.into_texture();

        let mut canvas = Canvas::new(5, 5);
        canvas.fill(Color::WHITE);
        canvas.blit(&texture, 1, 1);
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(count(&canvas, RED), 1);
    }

    #[test]
    fn keyed_texture_drops_key_colour_only() {
        let mut canvas = Canvas::new(3, 1);
        canvas.set(1, 0, RED);
        let texture = canvas.into_keyed_texture(Color::BLACK);
        assert!(!texture.is_opaque_at(0, 0));
        assert_eq!(texture.pixel(1, 0), Some(RED));
        assert_eq!(texture.opaque_count(), 1);
    }

    #[test]
    fn blit_faded_scales_colour() {
        let mut sprite = Canvas::new(2, 2);
        sprite.fill(Color::rgb(200, 100, 50));
        let texture = sprite.into_texture();

        let mut canvas = Canvas::new(4, 4);
        canvas.blit_faded(&texture, 0, 0, 0.5);
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(100, 50, 25)));
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn blit_clips_at_edges() {
        let mut sprite = Canvas::new(4, 4);
        sprite.fill(RED);
        let texture = sprite.into_texture();
        let mut canvas = Canvas::new(4, 4);
        canvas.blit(&texture, 2, -2);
        assert_eq!(count(&canvas, RED), 4);
    }

    #[test]
    fn fill_rows_builds_gradient() {
        let mut canvas = Canvas::new(3, 4);
        canvas.fill_rows(0, 4, |row| Color::rgb((row * 10) as u8, 0, 0));
        assert_eq!(canvas.pixel(2, 0), Some(Color::rgb(0, 0, 0)));
        assert_eq!(canvas.pixel(0, 3), Some(Color::rgb(30, 0, 0)));
    }
}

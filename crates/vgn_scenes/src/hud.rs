//! On-canvas text overlays: the countdown timer and glowing labels.
//!
//! Glow is faked by drawing the text in a dimmer colour shifted left and
//! right by each offset before the main pass.

use vgn_raster::{draw_text, draw_text_centered, Canvas, Color};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowLayer {
    pub offset: i32,
    pub color: Color,
}

/// Layers for `offsets` (drawn in the given order), coloured by `color_for`.
pub fn glow_layers(offsets: &[i32], color_for: impl Fn(i32) -> Color) -> Vec<GlowLayer> {
    offsets
        .iter()
        .map(|&offset| GlowLayer {
            offset,
            color: color_for(offset),
        })
        .collect()
}

pub fn draw_glow_text(
    canvas: &mut Canvas,
    text: &str,
    x: i32,
    y: i32,
    scale: i32,
    glow: &[GlowLayer],
    color: Color,
) {
    for layer in glow {
        draw_text(canvas, text, x + layer.offset, y, scale, layer.color);
        draw_text(canvas, text, x - layer.offset, y, scale, layer.color);
    }
    draw_text(canvas, text, x, y, scale, color);
}

/// `draw_glow_text` centred on (cx, cy).
pub fn draw_glow_text_centered(
    canvas: &mut Canvas,
    text: &str,
    cx: i32,
    cy: i32,
    scale: i32,
    glow: &[GlowLayer],
    color: Color,
) {
    for layer in glow {
        draw_text_centered(canvas, text, cx + layer.offset, cy, scale, layer.color);
        draw_text_centered(canvas, text, cx - layer.offset, cy, scale, layer.color);
    }
    draw_text_centered(canvas, text, cx, cy, scale, color);
}

/// Time-left readout in the top area of a scene.
#[derive(Debug, Clone)]
pub struct TimerOverlay {
    prefix: &'static str,
    x: i32,
    y: i32,
    scale: i32,
    color: Color,
    glow: Vec<GlowLayer>,
}

impl TimerOverlay {
    pub fn new(prefix: &'static str, x: i32, y: i32, scale: i32, color: Color) -> Self {
        Self {
            prefix,
            x,
            y,
            scale,
            color,
            glow: Vec::new(),
        }
    }

    pub fn with_glow(mut self, glow: Vec<GlowLayer>) -> Self {
        self.glow = glow;
        self
    }

    pub fn text(&self, secs_left: f32) -> String {
        format!("{}{:.1}s", self.prefix, secs_left.max(0.0))
    }

    pub fn draw(&self, canvas: &mut Canvas, secs_left: f32) {
        let text = self.text(secs_left);
        draw_glow_text(canvas, &text, self.x, self.y, self.scale, &self.glow, self.color);
    }
}

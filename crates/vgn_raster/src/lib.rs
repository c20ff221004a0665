//! Software rasterizer for the demo scenes.
//!
//! Everything draws into a `Canvas` (an `image::RgbaImage` underneath) with
//! opaque primitives. Translucency is faked by scaling RGB before drawing;
//! the only alpha that matters is 0 vs 255, which marks colour-keyed texture
//! pixels that blits skip.

pub mod canvas;
pub mod color;
pub mod font;
pub mod texture;

pub use canvas::Canvas;
pub use color::Color;
pub use font::{draw_text, draw_text_centered, text_width, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use texture::Texture;

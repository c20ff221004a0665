use image::RgbaImage;

use crate::color::Color;

/// A finished, read-only pixel buffer. Built once from a `Canvas` and only
/// ever blitted afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    pub(crate) fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at (x, y), or `None` when out of bounds or colour-keyed out.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.image.get_pixel_checked(x, y)?;
        if px.0[3] == 0 {
            return None;
        }
        Some(Color::rgb(px.0[0], px.0[1], px.0[2]))
    }

    pub fn is_opaque_at(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|px| px.0[3] != 0)
    }

    /// Every visible pixel with its coordinates, row-major.
    pub fn opaque_pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, px)| px.0[3] != 0)
            .map(|(x, y, px)| (x, y, Color::rgb(px.0[0], px.0[1], px.0[2])))
    }

    pub fn opaque_count(&self) -> usize {
        self.image.pixels().filter(|px| px.0[3] != 0).count()
    }
}

use image::Rgba;

/// Opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from unbounded channel values, clamping each to 0..=255.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }

    /// Adds `delta` to every channel, clamped.
    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(
            i32::from(self.r) + delta,
            i32::from(self.g) + delta,
            i32::from(self.b) + delta,
        )
    }

    /// Subtracts `amount` from every channel, saturating at zero.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }

    /// Multiplies every channel by `factor`, truncating.
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        Self::clamped(
            (f32::from(self.r) * f) as i32,
            (f32::from(self.g) * f) as i32,
            (f32::from(self.b) * f) as i32,
        )
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1), truncating.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let mix = |a: u8, b: u8| {
            let a = f32::from(a);
            (a + (f32::from(b) - a) * t) as i32
        };
        Self::clamped(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Integer halving used for neon glow layers.
    pub fn halve(self) -> Self {
        Self::rgb(self.r / 2, self.g / 2, self.b / 2)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_bounds_channels() {
        assert_eq!(Color::clamped(-40, 128, 999), Color::rgb(0, 128, 255));
    }

    #[test]
    fn offset_clamps_both_directions() {
        assert_eq!(Color::rgb(250, 5, 100).offset(10), Color::rgb(255, 15, 110));
        assert_eq!(Color::rgb(250, 5, 100).offset(-10), Color::rgb(240, 0, 90));
    }

    #[test]
    fn darken_saturates() {
        assert_eq!(Color::rgb(30, 50, 10).darken(40), Color::rgb(0, 10, 0));
    }

    #[test]
    fn scale_truncates_like_integer_cast() {
        assert_eq!(Color::rgb(255, 100, 3).scale(0.5), Color::rgb(127, 50, 1));
        assert_eq!(Color::rgb(255, 100, 3).scale(-1.0), Color::BLACK);
        assert_eq!(Color::rgb(200, 200, 200).scale(2.0), Color::WHITE);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Color::rgb(10, 50, 100);
        let b = Color::rgb(30, 100, 150);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(20, 75, 125));
    }

    #[test]
    fn lerp_downward_blend() {
        let sky = Color::rgb(135, 206, 235);
        let space = Color::rgb(5, 5, 15);
        assert_eq!(sky.lerp(space, 1.0), space);
        assert_eq!(sky.lerp(space, 0.5), Color::rgb(70, 105, 125));
    }

    #[test]
    fn halve_and_rgba() {
        assert_eq!(Color::rgb(255, 20, 147).halve(), Color::rgb(127, 10, 73));
        assert_eq!(Color::rgb(1, 2, 3).to_rgba(), Rgba([1, 2, 3, 255]));
    }

    proptest::proptest! {
        #[test]
        fn clamped_never_panics(r in proptest::num::i32::ANY, g in proptest::num::i32::ANY, b in proptest::num::i32::ANY) {
            let c = Color::clamped(r, g, b);
            proptest::prop_assert_eq!(c.r, r.clamp(0, 255) as u8);
            proptest::prop_assert_eq!(c.g, g.clamp(0, 255) as u8);
            proptest::prop_assert_eq!(c.b, b.clamp(0, 255) as u8);
        }
    }
}

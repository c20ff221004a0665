//! Procedural textures, generated once at scene construction.
//!
//! Every generator takes its RNG explicitly and draws from it in a fixed
//! order, so the same seed always yields the same pixels. Per-pixel colour
//! rules live in pure `*_texel` functions that take the noise sample as an
//! argument.

use rand::Rng;

pub mod themes;

pub use themes::{city, forest, interior, launch, temple, underwater};

/// Uniform integer noise in `-amount..=amount`.
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: i32) -> i32 {
    rng.random_range(-amount..=amount)
}

#[cfg(test)]
pub(crate) mod test_util {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    pub fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }
}

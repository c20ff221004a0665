use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// RNG owned by a scene. Textures and entities draw from it in a fixed order,
/// so one seed reproduces one run.
pub type SceneRng = Pcg32;

/// Builds the scene RNG, drawing a fresh seed when none is configured.
/// Returns the seed actually used so it can be logged.
pub fn scene_rng(seed: Option<u64>) -> (SceneRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (Pcg32::seed_from_u64(seed), seed)
}

/// Per-tick spawn roll: true when a uniform sample in [0, 1) lands above
/// `threshold`.
pub fn roll_above<R: Rng + ?Sized>(rng: &mut R, threshold: f32) -> bool {
    rng.random::<f32>() > threshold
}

/// Uniform choice from a non-empty slice.
pub fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_sequence() {
        let (mut a, seed_a) = scene_rng(Some(42));
        let (mut b, seed_b) = scene_rng(Some(42));
        assert_eq!(seed_a, seed_b);
        for _ in 0..16 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }

    #[test]
    fn roll_above_one_never_fires_and_below_zero_always_fires() {
        let (mut rng, _) = scene_rng(Some(7));
        for _ in 0..1000 {
            assert!(!roll_above(&mut rng, 1.0));
            assert!(roll_above(&mut rng, -0.01));
        }
    }

    #[test]
    fn roll_above_matches_expected_rate() {
        let (mut rng, _) = scene_rng(Some(99));
        let hits = (0..10_000).filter(|_| roll_above(&mut rng, 0.7)).count();
        // 30% nominal spawn rate.
        assert!((2_700..3_300).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn pick_returns_member() {
        let (mut rng, _) = scene_rng(Some(3));
        let options = [1, 5, 9];
        for _ in 0..100 {
            assert!(options.contains(&pick(&mut rng, &options)));
        }
    }
}

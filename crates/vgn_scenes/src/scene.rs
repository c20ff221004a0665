use vgn_core::{PoolUsage, SceneClock};
use vgn_raster::Canvas;

/// One animated demo. `update` runs once per fixed tick; `draw` paints the
/// whole frame back to front and may consume cosmetic randomness, so it takes
/// `&mut self` too.
pub trait Scene {
    fn update(&mut self, clock: &SceneClock);

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock);

    /// Live entities per collection, in draw order. Feeds the debug overlay.
    fn entity_counts(&self) -> Vec<(&'static str, usize)>;

    /// Usage of each capped pool. Scenes without pools report none.
    fn pool_usage(&self) -> Vec<(&'static str, PoolUsage)> {
        Vec::new()
    }
}

use rand::{Rng, SeedableRng};
use vgn_core::{parse_demo_config, DemoConfig, SceneRng};

use crate::scene::Scene;
use crate::scenes::{
    cyberpunk::CyberpunkCity, forest::Forest, lofi_room::LofiRoom, rocket_launch::RocketLaunch,
    temple::MagicTemple, underwater::Underwater,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    LofiRoom,
    Underwater,
    CyberpunkCity,
    Forest,
    RocketLaunch,
    MagicTemple,
}

impl DemoKind {
    pub const ALL: [DemoKind; 6] = [
        DemoKind::LofiRoom,
        DemoKind::Underwater,
        DemoKind::CyberpunkCity,
        DemoKind::Forest,
        DemoKind::RocketLaunch,
        DemoKind::MagicTemple,
    ];

    /// Binary and config name.
    pub fn slug(self) -> &'static str {
        match self {
            Self::LofiRoom => "lofi_room",
            Self::Underwater => "underwater",
            Self::CyberpunkCity => "cyberpunk_city",
            Self::Forest => "forest",
            Self::RocketLaunch => "rocket_launch",
            Self::MagicTemple => "magic_temple",
        }
    }

    fn config_source(self) -> &'static str {
        match self {
            Self::LofiRoom => include_str!("../assets/lofi_room.json"),
            Self::Underwater => include_str!("../assets/underwater.json"),
            Self::CyberpunkCity => include_str!("../assets/cyberpunk_city.json"),
            Self::Forest => include_str!("../assets/forest.json"),
            Self::RocketLaunch => include_str!("../assets/rocket_launch.json"),
            Self::MagicTemple => include_str!("../assets/magic_temple.json"),
        }
    }

    pub fn load_config(self) -> Result<DemoConfig, String> {
        parse_demo_config(self.slug(), self.config_source())
    }

    /// Generates the scene's textures and initial entities from `rng`.
    /// Cosmetic per-frame randomness gets its own stream split off first so
    /// simulation draws do not depend on the frame rate.
    pub fn build_scene(self, config: &DemoConfig, mut rng: SceneRng) -> Box<dyn Scene> {
        let fx = SceneRng::seed_from_u64(rng.random());
        match self {
            Self::LofiRoom => Box::new(LofiRoom::new(config, rng, fx)),
            Self::Underwater => Box::new(Underwater::new(config, rng)),
            Self::CyberpunkCity => Box::new(CyberpunkCity::new(config, rng, fx)),
            Self::Forest => Box::new(Forest::new(config, rng)),
            Self::RocketLaunch => Box::new(RocketLaunch::new(config, rng, fx)),
            Self::MagicTemple => Box::new(MagicTemple::new(config, rng, fx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bundled_config_parses() {
        for kind in DemoKind::ALL {
            let config = kind.load_config();
            assert!(config.is_ok(), "{}: {:?}", kind.slug(), config.err());
        }
    }

    #[test]
    fn bundled_configs_match_window_sizes_and_rates() {
        let expected = [
            (DemoKind::LofiRoom, 900, 700, 60),
            (DemoKind::Underwater, 800, 600, 60),
            (DemoKind::CyberpunkCity, 900, 700, 120),
            (DemoKind::Forest, 800, 600, 400),
            (DemoKind::RocketLaunch, 900, 700, 60),
            (DemoKind::MagicTemple, 900, 700, 60),
        ];
        for (kind, w, h, rate) in expected {
            let config = kind.load_config().unwrap();
            assert_eq!((config.width, config.height, config.tick_rate), (w, h, rate));
            assert_eq!(config.duration_ms, 20_000);
            assert_eq!(config.grace_ms, 1_000);
        }
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = DemoKind::ALL.iter().map(|k| k.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), DemoKind::ALL.len());
    }
}

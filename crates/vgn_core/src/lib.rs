pub mod clock;
pub mod config;
pub mod input;
pub mod particle;
pub mod pool;
pub mod rng;
pub mod time;

pub use clock::{PhaseController, SceneClock, ScenePhase};
pub use config::{parse_demo_config, DemoConfig};
pub use input::{InputState, Key};
pub use particle::{FlameTint, NoteGlyph, Particle, ParticleKind};
pub use pool::{EntityPool, OverflowPolicy, PoolUsage};
pub use rng::SceneRng;
pub use time::TimeState;

//! The six demo scenes, the headless runner that drives them and the winit
//! shell that puts them on screen.

pub mod app;
pub mod demo;
pub mod hud;
pub mod runner;
pub mod scene;
pub mod scenes;

pub use demo::DemoKind;
pub use runner::{FrameOutcome, SceneRunner};
pub use scene::Scene;

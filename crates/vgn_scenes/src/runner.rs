//! Drives one scene through its run: fixed-step updates, one draw per frame,
//! then the stop/grace/terminate sequence. Owns no window, so every
//! behaviour here is testable without a GPU.

use vgn_core::rng::scene_rng;
use vgn_core::{DemoConfig, InputState, PhaseController, SceneClock, ScenePhase, TimeState};
use vgn_devtools::OverlayStats;
use vgn_raster::Canvas;

use crate::demo::DemoKind;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The canvas holds a fresh frame.
    Redraw,
    /// Keep showing the last frame.
    Hold,
    Exit,
}

pub struct SceneRunner {
    config: DemoConfig,
    seed: u64,
    time: TimeState,
    clock: SceneClock,
    phase: PhaseController,
    scene: Box<dyn Scene>,
    canvas: Canvas,
}

impl SceneRunner {
    pub fn new(kind: DemoKind) -> Result<Self, String> {
        let config = kind.load_config()?;
        let (rng, seed) = scene_rng(config.seed);
        log::info!(
            "Building '{}' ({}x{} @ {} Hz, seed {seed})",
            config.title,
            config.width,
            config.height,
            config.tick_rate
        );
        let scene = kind.build_scene(&config, rng);
        Ok(Self::with_scene(config, scene, seed))
    }

    pub fn with_scene(config: DemoConfig, scene: Box<dyn Scene>, seed: u64) -> Self {
        Self {
            time: TimeState::new(config.tick_rate),
            clock: SceneClock::new(config.duration_ms),
            phase: PhaseController::new(config.grace_ms),
            canvas: Canvas::new(config.width, config.height),
            config,
            seed,
            scene,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn time(&self) -> &TimeState {
        &self.time
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase.phase()
    }

    /// Call right before the first frame so setup time is not simulated.
    pub fn restart_clock(&mut self) {
        self.time.restart_clock();
    }

    /// One frame measured against the wall clock.
    pub fn frame_now(&mut self, input: &InputState) -> FrameOutcome {
        self.time.begin_frame();
        self.run_frame(input)
    }

    /// One frame that lasted `real_dt` seconds.
    pub fn frame(&mut self, input: &InputState, real_dt: f64) -> FrameOutcome {
        self.time.advance(real_dt);
        self.run_frame(input)
    }

    fn run_frame(&mut self, input: &InputState) -> FrameOutcome {
        if input.wants_exit() && self.phase.phase() != ScenePhase::Terminated {
            log::info!("Exit requested at {:.0}ms", self.clock.elapsed_ms());
            self.phase.terminate();
        }

        match self.phase.phase() {
            ScenePhase::Terminated => FrameOutcome::Exit,
            ScenePhase::Stopping => {
                self.phase.tick_grace(self.time.real_dt);
                if self.phase.phase() == ScenePhase::Terminated {
                    FrameOutcome::Exit
                } else {
                    FrameOutcome::Hold
                }
            }
            ScenePhase::Running => {
                let step_us = self.time.fixed_dt_us();
                while self.time.should_step() {
                    self.clock.advance(step_us);
                    self.scene.update(&self.clock);
                    self.phase.observe(&self.clock);
                    if self.phase.phase() != ScenePhase::Running {
                        break;
                    }
                }
                self.scene.draw(&mut self.canvas, &self.clock);
                FrameOutcome::Redraw
            }
        }
    }

    pub fn stats(&self) -> OverlayStats {
        OverlayStats {
            demo: self.config.title.clone(),
            phase: self.phase.phase().label().to_string(),
            elapsed_secs: self.clock.elapsed_secs(),
            time_left_secs: self.clock.time_left_secs(),
            seed: self.seed,
            entity_counts: self.scene.entity_counts(),
            pools: self.scene.pool_usage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgn_core::{EntityPool, Key, OverflowPolicy, PoolUsage};
    use vgn_raster::Color;

    /// Counts ticks and paints the frame number into one pixel. Spawns one
    /// entity per tick into a pool of four.
    struct TickCounter {
        ticks: u32,
        draws: u32,
        spawned: EntityPool<u32>,
    }

    impl Scene for TickCounter {
        fn update(&mut self, _clock: &SceneClock) {
            self.ticks += 1;
            self.spawned.spawn(self.ticks);
        }

        fn draw(&mut self, canvas: &mut Canvas, _clock: &SceneClock) {
            self.draws += 1;
            canvas.set(0, 0, Color::rgb(self.draws as u8, 0, 0));
        }

        fn entity_counts(&self) -> Vec<(&'static str, usize)> {
            vec![("ticks", self.ticks as usize)]
        }

        fn pool_usage(&self) -> Vec<(&'static str, PoolUsage)> {
            vec![("spawned", self.spawned.usage())]
        }
    }

    fn counter_runner(duration_ms: u64) -> SceneRunner {
        let config = vgn_core::parse_demo_config(
            "tick_counter",
            &format!(
                r#"{{"title": "Tick Counter", "width": 8, "height": 8, "tick_rate": 100,
                    "duration_ms": {duration_ms}, "grace_ms": 1000}}"#
            ),
        )
        .unwrap();
        let scene = TickCounter {
            ticks: 0,
            draws: 0,
            spawned: EntityPool::new(4, OverflowPolicy::EvictOldest),
        };
        SceneRunner::with_scene(config, Box::new(scene), 1)
    }

    fn ticks(runner: &SceneRunner) -> usize {
        runner.stats().entity_counts[0].1
    }

    #[test]
    fn escape_exits_on_the_next_frame() {
        let mut runner = counter_runner(20_000);
        let input = InputState::new();
        assert_eq!(runner.frame(&input, 0.05), FrameOutcome::Redraw);

        let mut input = InputState::new();
        input.key_down(Key::Escape);
        assert_eq!(runner.frame(&input, 0.05), FrameOutcome::Exit);
        assert_eq!(runner.phase(), ScenePhase::Terminated);
    }

    #[test]
    fn escape_wins_even_when_no_tick_is_due() {
        let mut runner = counter_runner(20_000);
        let mut input = InputState::new();
        input.key_down(Key::Escape);
        assert_eq!(runner.frame(&input, 0.0), FrameOutcome::Exit);
        assert_eq!(ticks(&runner), 0);
    }

    #[test]
    fn close_request_exits() {
        let mut runner = counter_runner(20_000);
        let mut input = InputState::new();
        input.request_close();
        assert_eq!(runner.frame(&input, 0.01), FrameOutcome::Exit);
    }

    #[test]
    fn stops_after_duration_then_terminates_after_grace() {
        let mut runner = counter_runner(500);
        let input = InputState::new();
        let mut frames = 0;
        while runner.phase() == ScenePhase::Running {
            assert_eq!(runner.frame(&input, 0.02), FrameOutcome::Redraw);
            frames += 1;
            assert!(frames < 100, "never stopped");
        }
        assert_eq!(runner.phase(), ScenePhase::Stopping);
        assert!(runner.clock().elapsed_ms() > 500.0);
        assert_eq!(runner.clock().time_left_secs(), 0.0);

        let ticks_at_stop = ticks(&runner);
        for _ in 0..4 {
            assert_eq!(runner.frame(&input, 0.2), FrameOutcome::Hold);
        }
        assert_eq!(ticks(&runner), ticks_at_stop);
        assert_eq!(runner.frame(&input, 0.2), FrameOutcome::Exit);
        assert_eq!(runner.phase(), ScenePhase::Terminated);
    }

    #[test]
    fn last_frame_is_kept_while_stopping() {
        let mut runner = counter_runner(100);
        let input = InputState::new();
        while runner.phase() == ScenePhase::Running {
            runner.frame(&input, 0.02);
        }
        let last = runner.canvas().pixel(0, 0);
        runner.frame(&input, 0.1);
        assert_eq!(runner.canvas().pixel(0, 0), last);
    }

    #[test]
    fn ticks_follow_the_fixed_rate() {
        let mut runner = counter_runner(20_000);
        let input = InputState::new();
        for _ in 0..10 {
            runner.frame(&input, 0.1);
        }
        // 1 s of frames at 100 Hz; float accumulation may leave one step over.
        let n = ticks(&runner);
        assert!((99..=100).contains(&n), "ticks = {n}");
        assert_eq!(runner.clock().elapsed_us(), n as u64 * 10_000);
    }

    #[test]
    fn stats_report_phase_and_seed() {
        let runner = counter_runner(1000);
        let stats = runner.stats();
        assert_eq!(stats.demo, "Tick Counter");
        assert_eq!(stats.phase, "RUNNING");
        assert_eq!(stats.seed, 1);
    }

    #[test]
    fn stats_carry_pool_counters() {
        let mut runner = counter_runner(20_000);
        let input = InputState::new();
        runner.frame(&input, 0.1);
        let n = ticks(&runner) as u64;
        assert!(n > 4);

        let stats = runner.stats();
        assert_eq!(
            stats.pools,
            vec![(
                "spawned",
                PoolUsage {
                    len: 4,
                    capacity: 4,
                    evicted: n - 4,
                    rejected: 0
                }
            )]
        );
        assert!(stats.lines().contains(&format!(
            "spawned pool: 4/4 (evicted {}, rejected 0)",
            n - 4
        )));
    }

    #[test]
    fn every_demo_builds_and_runs_a_few_frames() {
        let input = InputState::new();
        for kind in DemoKind::ALL {
            let mut config = kind.load_config().unwrap();
            config.seed = Some(7);
            let (rng, seed) = scene_rng(config.seed);
            let scene = kind.build_scene(&config, rng);
            let mut runner = SceneRunner::with_scene(config, scene, seed);
            for _ in 0..3 {
                assert_eq!(runner.frame(&input, 1.0 / 30.0), FrameOutcome::Redraw);
            }
            assert!(runner.clock().elapsed_us() > 0, "{}", kind.slug());
        }
    }
}

//! Scene clock and the run/stop/terminate phase machine.
//!
//! Elapsed time is integer microseconds advanced one fixed step per tick, so
//! a given tick count always maps to the same elapsed value. The grace period
//! after the run ends is measured in wall-clock time because no ticks run
//! while stopping.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneClock {
    elapsed_us: u64,
    duration_us: u64,
}

impl SceneClock {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            elapsed_us: 0,
            duration_us: duration_ms * 1000,
        }
    }

    pub fn advance(&mut self, dt_us: u64) {
        self.elapsed_us += dt_us;
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_us as f64 / 1000.0
    }

    pub fn elapsed_secs(&self) -> f32 {
        (self.elapsed_us as f64 / 1_000_000.0) as f32
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_us / 1000
    }

    /// Progress through the run, in [0, 1].
    pub fn normalized(&self) -> f32 {
        if self.duration_us == 0 {
            return 1.0;
        }
        (self.elapsed_us as f64 / self.duration_us as f64).min(1.0) as f32
    }

    /// Seconds left on the countdown overlay. Never negative.
    pub fn time_left_secs(&self) -> f32 {
        (self.duration_us.saturating_sub(self.elapsed_us) as f64 / 1_000_000.0) as f32
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed_us > self.duration_us
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Running,
    Stopping,
    Terminated,
}

impl ScenePhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Terminated => "TERMINATED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhaseController {
    phase: ScenePhase,
    grace_us: u64,
    grace_elapsed_us: u64,
}

impl PhaseController {
    pub fn new(grace_ms: u64) -> Self {
        Self {
            phase: ScenePhase::Running,
            grace_us: grace_ms * 1000,
            grace_elapsed_us: 0,
        }
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Moves RUNNING to STOPPING once the clock passes its duration.
    pub fn observe(&mut self, clock: &SceneClock) {
        if self.phase == ScenePhase::Running && clock.is_expired() {
            log::info!(
                "Scene finished at {:.0}ms, holding last frame for {}ms",
                clock.elapsed_ms(),
                self.grace_us / 1000
            );
            self.phase = ScenePhase::Stopping;
        }
    }

    /// Consumes wall-clock time while STOPPING; TERMINATED once the grace
    /// period is used up.
    pub fn tick_grace(&mut self, real_dt: f64) {
        if self.phase != ScenePhase::Stopping {
            return;
        }
        self.grace_elapsed_us += (real_dt.max(0.0) * 1_000_000.0) as u64;
        if self.grace_elapsed_us >= self.grace_us {
            log::info!("Grace period over, terminating");
            self.phase = ScenePhase::Terminated;
        }
    }

    pub fn terminate(&mut self) {
        self.phase = ScenePhase::Terminated;
    }
}

//! Rocket launch from a pad at dusk up into space.
//!
//! A countdown starts one second in; three seconds later the rocket lifts
//! off with constant acceleration. Sky, ground, clouds, stars and the moon
//! all cross-fade on a transition factor derived from the rocket's speed.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use vgn_core::particle::step_and_expire;
use vgn_core::rng::pick;
use vgn_core::{
    DemoConfig, EntityPool, FlameTint, Particle, ParticleKind, PoolUsage, SceneClock, SceneRng,
};
use vgn_raster::{draw_text_centered, Canvas, Color, Texture, GLYPH_HEIGHT};
use vgn_textures::launch::{self, DARK_GRAY};

use crate::hud::{draw_glow_text_centered, glow_layers, GlowLayer, TimerOverlay};
use crate::scene::Scene;

const SKY_BLUE: Color = Color::rgb(135, 206, 235);
const SPACE_BLACK: Color = Color::rgb(5, 5, 15);
const GROUND_GREEN: Color = Color::rgb(34, 139, 34);
const CONCRETE_GRAY: Color = Color::rgb(128, 128, 128);
const ROCKET_RED: Color = Color::rgb(220, 20, 60);
const ROCKET_TRIM: Color = Color::rgb(180, 0, 40);
const FIRE_ORANGE: Color = Color::rgb(255, 140, 0);
const FIRE_YELLOW: Color = Color::rgb(255, 215, 0);
const FIRE_RED: Color = Color::rgb(255, 69, 0);
const SMOKE_GRAY: Color = Color::rgb(169, 169, 169);
const MOON_GRAY: Color = Color::rgb(200, 200, 200);

const COUNTDOWN_START_MS: f64 = 1000.0;
const COUNTDOWN_MS: f64 = 3000.0;
const ACCELERATION: f32 = 0.15;
const FLAMES_PER_TICK: usize = 8;
const SMOKE_PER_TICK: usize = 3;
const SHAKE_BELOW_VELOCITY: f32 = 5.0;
const MOON: (i32, i32, i32) = (750, 100, 50);
const STATUS_SCALE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchPhase {
    Ready,
    Countdown { started_ms: f64 },
    Launching,
}

impl LaunchPhase {
    fn status(self) -> (&'static str, Color) {
        match self {
            Self::Ready => ("READY FOR LAUNCH", FIRE_YELLOW),
            Self::Countdown { .. } => ("LAUNCHING...", FIRE_ORANGE),
            Self::Launching => ("LIFTOFF!", FIRE_RED),
        }
    }
}

/// READY -> COUNTDOWN at the first tick past one second, then LAUNCHING
/// once the countdown has run for three seconds.
#[derive(Debug, Clone, Copy)]
pub struct LaunchSequence {
    phase: LaunchPhase,
}

impl LaunchSequence {
    pub fn new() -> Self {
        Self {
            phase: LaunchPhase::Ready,
        }
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    pub fn is_launched(&self) -> bool {
        self.phase == LaunchPhase::Launching
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        if self.phase == LaunchPhase::Ready && elapsed_ms >= COUNTDOWN_START_MS {
            log::info!("Countdown started at {elapsed_ms:.0}ms");
            self.phase = LaunchPhase::Countdown {
                started_ms: elapsed_ms,
            };
        }
        if let LaunchPhase::Countdown { started_ms } = self.phase {
            if elapsed_ms - started_ms >= COUNTDOWN_MS {
                log::info!("Liftoff at {elapsed_ms:.0}ms");
                self.phase = LaunchPhase::Launching;
            }
        }
    }

    /// Digit shown during the countdown: 3, 2, 1.
    pub fn countdown_digit(&self, elapsed_ms: f64) -> Option<i32> {
        match self.phase {
            LaunchPhase::Countdown { started_ms } => {
                let remaining = COUNTDOWN_MS - (elapsed_ms - started_ms);
                Some((remaining / 1000.0) as i32 + 1)
            }
            _ => None,
        }
    }
}

impl Default for LaunchSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Rocket {
    x: f32,
    y: f32,
    start_y: f32,
    velocity: f32,
}

#[derive(Debug, Clone, Copy)]
struct Star {
    x: i32,
    y: i32,
    size: i32,
    twinkle: f32,
}

#[derive(Debug, Clone, Copy)]
struct Cloud {
    x: f32,
    y: i32,
    width: i32,
    speed: f32,
}

pub struct RocketLaunch {
    width: i32,
    height: i32,
    rng: SceneRng,
    fx: SceneRng,
    hull: Texture,
    pad: Texture,
    rocket: Rocket,
    sequence: LaunchSequence,
    /// Sky-to-space blend in [0, 1], from the speed at the start of the tick.
    transition: f32,
    shake: (i32, i32),
    stars: Vec<Star>,
    clouds: Vec<Cloud>,
    flames: EntityPool<Particle>,
    smoke: EntityPool<Particle>,
    countdown_glow: Vec<GlowLayer>,
    timer: TimerOverlay,
}

fn flame_color(tint: FlameTint) -> Color {
    match tint {
        FlameTint::Orange => FIRE_ORANGE,
        FlameTint::Yellow => FIRE_YELLOW,
        FlameTint::Red => FIRE_RED,
    }
}

/// Sky-to-space blend for a given rocket speed.
pub fn transition_for(launched: bool, velocity: f32) -> f32 {
    if launched {
        (velocity * 0.15).min(1.0)
    } else {
        0.0
    }
}

impl RocketLaunch {
    pub fn new(config: &DemoConfig, mut rng: SceneRng, fx: SceneRng) -> Self {
        let (width, height) = (config.width as i32, config.height as i32);
        let hull = launch::metal(80, 200, &mut rng);
        let pad = launch::concrete(300, 100, &mut rng);

        let start_y = (height - 200) as f32;
        let rocket = Rocket {
            x: (width / 2) as f32,
            y: start_y,
            start_y,
            velocity: 0.0,
        };

        let stars = (0..150)
            .map(|_| Star {
                x: rng.random_range(0..=width),
                y: rng.random_range(0..=height / 2),
                size: rng.random_range(1..=3),
                twinkle: rng.random_range(0.0..TAU),
            })
            .collect();
        let clouds = (0..8)
            .map(|_| Cloud {
                x: rng.random_range(-100..=width + 100) as f32,
                y: rng.random_range(50..=250),
                width: rng.random_range(80..=150),
                speed: rng.random_range(0.3..0.8),
            })
            .collect();

        // Glow alpha 100 - 15 * offset over the pre-launch sky.
        let countdown_glow = glow_layers(&[5, 4, 3, 2, 1], |offset| {
            SKY_BLUE.lerp(FIRE_ORANGE, (100 - offset * 15) as f32 / 255.0)
        });

        Self {
            width,
            height,
            rng,
            fx,
            hull,
            pad,
            rocket,
            sequence: LaunchSequence::new(),
            transition: 0.0,
            shake: (0, 0),
            stars,
            clouds,
            flames: EntityPool::new(config.particle_cap, config.overflow),
            smoke: EntityPool::new(config.particle_cap, config.overflow),
            countdown_glow,
            timer: TimerOverlay::new("", width - 120, 20, 3, Color::WHITE),
        }
    }

    pub fn rocket_y(&self) -> f32 {
        self.rocket.y
    }

    pub fn start_y(&self) -> f32 {
        self.rocket.start_y
    }

    pub fn sequence(&self) -> &LaunchSequence {
        &self.sequence
    }

    pub fn transition(&self) -> f32 {
        self.transition
    }

    fn spawn_exhaust(&mut self) {
        let nozzle_y = self.rocket.y + 100.0;
        for _ in 0..FLAMES_PER_TICK {
            let x = self.rocket.x + self.rng.random_range(-15..=15) as f32;
            let vel = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(2.0..5.0),
            );
            let size = self.rng.random_range(8..=20) as f32;
            let life = self.rng.random_range(20..=40);
            let tint = pick(&mut self.rng, &FlameTint::ALL);
            self.flames
                .spawn(Particle::flame(Vec2::new(x, nozzle_y), vel, size, life, tint));
        }
        for _ in 0..SMOKE_PER_TICK {
            let x = self.rocket.x + self.rng.random_range(-20..=20) as f32;
            let vel = Vec2::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(0.5..1.5),
            );
            let size = self.rng.random_range(10..=25) as f32;
            let life = self.rng.random_range(40..=80);
            self.smoke
                .spawn(Particle::smoke(Vec2::new(x, nozzle_y), vel, size, life));
        }
    }

    fn draw_backdrop(&mut self, canvas: &mut Canvas) {
        let t = self.transition;
        canvas.fill(SKY_BLUE.lerp(SPACE_BLACK, t));

        if t > 0.3 {
            for star in &self.stars {
                let brightness = (star.twinkle.sin() + 1.0) / 2.0;
                let alpha = brightness * (t - 0.3) / 0.7;
                canvas.fill_circle(star.x, star.y, star.size, Color::WHITE.scale(alpha));
            }
        }

        if t > 0.5 {
            let (mx, my, radius) = MOON;
            let moon_alpha = (t - 0.5) / 0.5;
            let moon = MOON_GRAY.scale(moon_alpha);
            canvas.fill_circle(mx, my, radius, moon);
            if moon_alpha > 0.5 {
                let crater = moon.scale(0.8);
                canvas.fill_circle(mx - 15, my - 10, 8, crater);
                canvas.fill_circle(mx + 10, my + 5, 12, crater);
                canvas.fill_circle(mx + 5, my - 20, 6, crater);
            }
        }

        if t < 0.8 {
            let cloud_color = Color::WHITE.scale(1.0 - t / 0.8);
            for cloud in &self.clouds {
                let x = cloud.x as i32;
                canvas.fill_ellipse(x, cloud.y, cloud.width, 40, cloud_color);
                canvas.fill_ellipse(x + 20, cloud.y - 15, cloud.width - 40, 40, cloud_color);
                canvas.fill_ellipse(x + 40, cloud.y - 10, cloud.width - 60, 35, cloud_color);
            }
        }

        if t < 0.7 {
            let ground_alpha = 1.0 - t / 0.7;
            let ground = SPACE_BLACK.lerp(GROUND_GREEN, ground_alpha);
            canvas.fill_rect(0, self.height - 100, self.width, 100, ground);
            let blade = GROUND_GREEN.scale(ground_alpha * 0.7);
            for _ in 0..30 {
                let gx = self.fx.random_range(0..=self.width);
                let gy = self.height - self.fx.random_range(80..=100);
                let len = self.fx.random_range(5..=15);
                canvas.line(gx, gy, gx, gy - len, 1, blade);
            }
        }
    }

    fn draw_pad(&self, canvas: &mut Canvas) {
        let pad_alpha = ((self.rocket.y - (self.height - 500) as f32) / 200.0).min(1.0);
        if pad_alpha <= 0.0 {
            return;
        }
        let (cx, h) = (self.width / 2, self.height);
        canvas.blit_faded(&self.pad, cx - 150, h - 150, pad_alpha);
        let tower = CONCRETE_GRAY.scale(pad_alpha);
        canvas.fill_rect(cx - 180, h - 250, 20, 150, tower);
        canvas.fill_rect(cx + 160, h - 250, 20, 150, tower);
        canvas.fill_rect(cx - 180, h - 230, 40, 5, tower);
        canvas.fill_rect(cx + 140, h - 230, 40, 5, tower);
    }

    fn draw_exhaust(&self, canvas: &mut Canvas) {
        for puff in self.smoke.iter() {
            let color = SMOKE_GRAY.scale(puff.fade());
            canvas.fill_circle(puff.pos.x as i32, puff.pos.y as i32, puff.size as i32, color);
        }
        for flame in self.flames.iter() {
            if let ParticleKind::Flame(tint) = flame.kind {
                let color = flame_color(tint).scale(flame.fade());
                canvas.fill_circle(flame.pos.x as i32, flame.pos.y as i32, flame.size as i32, color);
            }
        }
    }

    fn draw_rocket(&self, canvas: &mut Canvas) {
        let x = self.rocket.x + self.shake.0 as f32;
        let y = self.rocket.y + self.shake.1 as f32;

        let nose = [(x, y - 40.0), (x - 40.0, y), (x + 40.0, y)];
        canvas.fill_polygon(&nose, ROCKET_RED);
        canvas.stroke_polygon(&nose, 2, ROCKET_TRIM);

        canvas.blit(&self.hull, (x - 40.0) as i32, y as i32);

        let left_fin = [(x - 40.0, y + 180.0), (x - 70.0, y + 200.0), (x - 40.0, y + 200.0)];
        let right_fin = [(x + 40.0, y + 180.0), (x + 70.0, y + 200.0), (x + 40.0, y + 200.0)];
        for fin in [left_fin, right_fin] {
            canvas.fill_polygon(&fin, ROCKET_RED);
            canvas.stroke_polygon(&fin, 2, ROCKET_TRIM);
        }

        let (xi, yi) = (x as i32, y as i32);
        canvas.fill_circle(xi, (y + 30.0) as i32, 12, SKY_BLUE);
        canvas.stroke_circle(xi, (y + 30.0) as i32, 12, 2, DARK_GRAY);
        canvas.fill_rect(xi - 30, yi + 200, 20, 15, DARK_GRAY);
        canvas.fill_rect(xi + 10, yi + 200, 20, 15, DARK_GRAY);
    }

    fn draw_text_overlays(&self, canvas: &mut Canvas, clock: &SceneClock) {
        if let Some(digit) = self.sequence.countdown_digit(clock.elapsed_ms()) {
            draw_glow_text_centered(
                canvas,
                &digit.to_string(),
                self.width / 2,
                self.height / 2 - 100,
                12,
                &self.countdown_glow,
                FIRE_RED,
            );
        }

        self.timer.draw(canvas, clock.time_left_secs());

        // Status line hangs from y = 20.
        let (status, color) = self.sequence.phase().status();
        let cy = 20 + GLYPH_HEIGHT * STATUS_SCALE / 2;
        draw_text_centered(canvas, status, self.width / 2, cy, STATUS_SCALE, color);
    }
}

impl Scene for RocketLaunch {
    fn update(&mut self, clock: &SceneClock) {
        self.sequence.advance(clock.elapsed_ms());
        let launched = self.sequence.is_launched();
        self.transition = transition_for(launched, self.rocket.velocity);

        if self.transition > 0.3 {
            for star in &mut self.stars {
                star.twinkle += 0.05;
            }
        }
        if self.transition < 0.8 {
            let right = (self.width + 100) as f32;
            for cloud in &mut self.clouds {
                cloud.x += cloud.speed;
                if cloud.x > right {
                    cloud.x = -100.0;
                }
            }
        }

        if launched {
            self.rocket.velocity += ACCELERATION;
            self.rocket.y -= self.rocket.velocity;
            self.spawn_exhaust();
        }
        step_and_expire(&mut self.smoke);
        step_and_expire(&mut self.flames);

        self.shake = if launched && self.rocket.velocity < SHAKE_BELOW_VELOCITY {
            (self.rng.random_range(-2..=2), self.rng.random_range(-2..=2))
        } else {
            (0, 0)
        };
    }

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock) {
        self.draw_backdrop(canvas);
        self.draw_pad(canvas);
        self.draw_exhaust(canvas);
        self.draw_rocket(canvas);
        self.draw_text_overlays(canvas, clock);
    }

    fn entity_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("stars", self.stars.len()),
            ("clouds", self.clouds.len()),
            ("smoke", self.smoke.len()),
            ("flames", self.flames.len()),
        ]
    }

    fn pool_usage(&self) -> Vec<(&'static str, PoolUsage)> {
        vec![("smoke", self.smoke.usage()), ("flames", self.flames.usage())]
    }
}

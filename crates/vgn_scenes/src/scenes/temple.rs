//! Ruined temple at night: a pulsing portal, orbiting energy, lightning,
//! glowing runes and crystals, floating orbs and two torches.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use vgn_core::particle::step_and_expire;
use vgn_core::rng::{pick, roll_above};
use vgn_core::{DemoConfig, EntityPool, Particle, PoolUsage, SceneClock, SceneRng};
use vgn_raster::{Canvas, Color, Texture};
use vgn_textures::temple::{self, CRYSTAL_BLUE, MAGIC_CYAN, MAGIC_PINK, MAGIC_PURPLE};

use crate::hud::{glow_layers, TimerOverlay};
use crate::scene::Scene;
use crate::scenes::fill_gradient;

const DEEP_PURPLE: Color = Color::rgb(20, 0, 40);
const GOLD: Color = Color::rgb(255, 215, 0);
const ORANGE: Color = Color::rgb(255, 140, 0);
const TORCH_GLOW: Color = Color::rgb(255, 100, 0);
const TIMER_GLOW: Color = Color::rgb(100, 50, 150);

const PORTAL_RADIUS: i32 = 120;
const RUNE_SIZE: u32 = 60;
const RUNES_AT: [(i32, i32); 4] = [(150, 200), (750, 200), (150, 350), (750, 350)];
const TORCHES_AT: [(i32, i32); 2] = [(100, 150), (800, 150)];
const BOLT_SEGMENTS: i32 = 10;
const TRAIL_LENGTH: i32 = 5;

#[derive(Debug, Clone, Copy)]
struct Rune {
    x: i32,
    y: i32,
    pulse: f32,
}

#[derive(Debug, Clone, Copy)]
struct Crystal {
    x: i32,
    y: i32,
    glow_phase: f32,
}

impl Crystal {
    fn glow(&self) -> f32 {
        (self.glow_phase.sin() + 1.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Orbiter {
    angle: f32,
    distance: f32,
    speed: f32,
    size: i32,
    color: Color,
}

#[derive(Debug, Clone, Copy)]
struct Orb {
    x: i32,
    y: i32,
    float_offset: f32,
    float_speed: f32,
    size: i32,
    color: Color,
}

pub struct MagicTemple {
    width: i32,
    height: i32,
    portal: (i32, i32),
    rng: SceneRng,
    fx: SceneRng,
    ground: Texture,
    wall_left: Texture,
    wall_right: Texture,
    rune_texture: Texture,
    crystal_texture: Texture,
    runes: Vec<Rune>,
    crystals: Vec<Crystal>,
    orbiters: Vec<Orbiter>,
    orbs: Vec<Orb>,
    bolts: EntityPool<Particle>,
    timer: TimerOverlay,
}

impl MagicTemple {
    pub fn new(config: &DemoConfig, mut rng: SceneRng, fx: SceneRng) -> Self {
        let (width, height) = (config.width as i32, config.height as i32);
        let ground = temple::stone(config.width, 150, &mut rng);
        let wall_left = temple::stone(200, 500, &mut rng);
        let wall_right = temple::stone(200, 500, &mut rng);

        let runes = RUNES_AT
            .iter()
            .map(|&(x, y)| Rune {
                x,
                y,
                pulse: rng.random_range(0.0..TAU),
            })
            .collect();
        let crystal_spots = [
            (100, height - 200),
            (800, height - 220),
            (200, height - 180),
            (700, height - 190),
        ];
        let crystals = crystal_spots
            .iter()
            .map(|&(x, y)| Crystal {
                x,
                y,
                glow_phase: rng.random_range(0.0..TAU),
            })
            .collect();
        let orbiters = (0..100)
            .map(|_| Orbiter {
                angle: rng.random_range(0.0..TAU),
                distance: rng.random_range(50.0..150.0),
                speed: rng.random_range(0.02..0.05),
                size: rng.random_range(2..=5),
                color: pick(&mut rng, &[MAGIC_PURPLE, MAGIC_CYAN, MAGIC_PINK]),
            })
            .collect();
        let orbs = (0..8)
            .map(|_| Orb {
                x: rng.random_range(100..=width - 100),
                y: rng.random_range(100..=300),
                float_offset: rng.random_range(0.0..TAU),
                float_speed: rng.random_range(0.02..0.04),
                size: rng.random_range(8..=15),
                color: pick(&mut rng, &[MAGIC_PURPLE, MAGIC_CYAN, MAGIC_PINK, GOLD]),
            })
            .collect();

        let timer = TimerOverlay::new("", width / 2 - 50, 20, 4, MAGIC_CYAN)
            .with_glow(glow_layers(&[4, 3, 2, 1], |_| TIMER_GLOW));

        Self {
            width,
            height,
            portal: (width / 2, height / 2),
            rng,
            fx,
            ground,
            wall_left,
            wall_right,
            rune_texture: temple::rune(RUNE_SIZE),
            crystal_texture: temple::crystal(30, 40),
            runes,
            crystals,
            orbiters,
            orbs,
            bolts: EntityPool::new(config.particle_cap, config.overflow),
            timer,
        }
    }

    fn draw_runes(&self, canvas: &mut Canvas) {
        let half = RUNE_SIZE as i32 / 2;
        for rune in &self.runes {
            let pulse = (rune.pulse.sin() + 1.0) / 2.0;
            let glow_size = (70.0 + 10.0 * pulse) as i32;
            let glow = MAGIC_CYAN.scale(pulse * 0.3);
            // Pure black is the colour key of the glow layer.
            if glow != Color::BLACK {
                canvas.fill_circle(rune.x, rune.y, glow_size / 2, glow);
            }
            canvas.blit(&self.rune_texture, rune.x - half, rune.y - half);
        }
    }

    fn draw_portal(&self, canvas: &mut Canvas, elapsed_ms: f64) {
        let (cx, cy) = self.portal;
        for ring in (1..=5).rev() {
            let alpha = (((elapsed_ms * 0.003 + f64::from(ring)).sin() + 1.0) / 2.0) as f32;
            canvas.stroke_circle(cx, cy, PORTAL_RADIUS + ring * 10, 3, MAGIC_PURPLE.scale(alpha));
        }

        let spin = elapsed_ms * 0.005;
        for i in 0..20 {
            let radius = PORTAL_RADIUS - i * 6;
            if radius <= 0 {
                continue;
            }
            let angle = ((spin + f64::from(i) * std::f64::consts::TAU / 20.0) % std::f64::consts::TAU) as f32;
            let x = cx as f32 + angle.cos() * radius as f32;
            let y = cy as f32 + angle.sin() * radius as f32;
            let color = MAGIC_PURPLE.lerp(MAGIC_CYAN, i as f32 / 20.0);
            canvas.fill_circle(x as i32, y as i32, 5, color);
        }

        let centre = Vec2::new(cx as f32, cy as f32);
        for orbiter in &self.orbiters {
            for t in 0..TRAIL_LENGTH {
                let angle = orbiter.angle - t as f32 * 0.1;
                let pos = centre + Vec2::from_angle(angle) * orbiter.distance;
                let fade = 1.0 - t as f32 / TRAIL_LENGTH as f32;
                let radius = (orbiter.size - t).max(1);
                canvas.fill_circle(pos.x as i32, pos.y as i32, radius, orbiter.color.scale(fade));
            }
            let pos = centre + Vec2::from_angle(orbiter.angle) * orbiter.distance;
            canvas.fill_circle(pos.x as i32, pos.y as i32, orbiter.size, orbiter.color);
        }
    }

    fn draw_lightning(&mut self, canvas: &mut Canvas) {
        let origin = Vec2::new(self.portal.0 as f32, self.portal.1 as f32);
        for bolt in self.bolts.iter() {
            let color = MAGIC_CYAN.scale(bolt.fade());
            let mut prev = origin;
            for i in 0..BOLT_SEGMENTS {
                let t = (i + 1) as f32 / BOLT_SEGMENTS as f32;
                let jitter = Vec2::new(
                    self.fx.random_range(-10..=10) as f32,
                    self.fx.random_range(-10..=10) as f32,
                );
                let next = origin + (bolt.pos - origin) * t + jitter;
                canvas.line(prev.x as i32, prev.y as i32, next.x as i32, next.y as i32, 2, color);
                prev = next;
            }
        }
    }

    fn draw_crystals(&self, canvas: &mut Canvas) {
        let (px, py) = self.portal;
        for crystal in &self.crystals {
            let glow = crystal.glow();
            let glow_color = CRYSTAL_BLUE.scale(glow * 0.3);
            for i in (1..=5).rev() {
                canvas.fill_circle(crystal.x + 15, crystal.y + 20, 30 + i * 3, glow_color);
            }
            canvas.blit(&self.crystal_texture, crystal.x, crystal.y);
            if glow > 0.7 {
                canvas.line(crystal.x + 15, crystal.y, px, py, 1, CRYSTAL_BLUE);
            }
        }
    }

    fn draw_orbs(&self, canvas: &mut Canvas) {
        for orb in &self.orbs {
            let y = (orb.y as f32 + orb.float_offset.sin() * 20.0) as i32;
            for i in (1..=3).rev() {
                canvas.fill_circle(orb.x, y, orb.size + i * 4, orb.color.scale(0.3));
            }
            canvas.fill_circle(orb.x, y, orb.size, orb.color);
        }
    }

    fn draw_torches(&self, canvas: &mut Canvas, elapsed_ms: f64) {
        let flame_height = (20.0 + 10.0 * (elapsed_ms * 0.01).sin()) as f32;
        let inner = flame_height.div_euclid(2.0);
        for (tx, ty) in TORCHES_AT {
            let (x, y) = (tx as f32, ty as f32);
            let outer_flame = [
                (x, y),
                (x - 10.0, y + flame_height),
                (x, y + flame_height - 5.0),
                (x + 10.0, y + flame_height),
            ];
            canvas.fill_polygon(&outer_flame, ORANGE);
            let inner_flame = [
                (x, y),
                (x - 5.0, y + inner),
                (x, y + inner - 3.0),
                (x + 5.0, y + inner),
            ];
            canvas.fill_polygon(&inner_flame, GOLD);
            canvas.fill_circle(tx, ty + 10, 25, TORCH_GLOW);
        }
    }
}

impl Scene for MagicTemple {
    fn update(&mut self, _clock: &SceneClock) {
        for rune in &mut self.runes {
            rune.pulse += 0.05;
        }
        for orbiter in &mut self.orbiters {
            orbiter.angle += orbiter.speed;
        }

        if roll_above(&mut self.rng, 0.95) {
            let x = self.rng.random_range(100..=self.width - 100);
            let y = self.rng.random_range(100..=self.height - 200);
            self.bolts.spawn(Particle::bolt(Vec2::new(x as f32, y as f32)));
        }
        step_and_expire(&mut self.bolts);

        for crystal in &mut self.crystals {
            crystal.glow_phase += 0.05;
        }
        for orb in &mut self.orbs {
            orb.float_offset += orb.float_speed;
        }
    }

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock) {
        let elapsed_ms = clock.elapsed_ms();

        fill_gradient(canvas, DEEP_PURPLE, MAGIC_PURPLE, 0.3);
        for _ in 0..50 {
            let x = self.fx.random_range(0..=self.width);
            let y = self.fx.random_range(0..=self.height / 2);
            if self.fx.random::<f32>() > 0.5 {
                canvas.fill_circle(x, y, 1, Color::WHITE);
            }
        }

        canvas.blit(&self.ground, 0, self.height - 150);
        canvas.blit(&self.wall_left, 0, self.height - 650);
        canvas.blit(&self.wall_right, self.width - 200, self.height - 650);

        self.draw_runes(canvas);
        self.draw_portal(canvas, elapsed_ms);
        self.draw_lightning(canvas);
        self.draw_crystals(canvas);
        self.draw_orbs(canvas);
        self.draw_torches(canvas, elapsed_ms);

        self.timer.draw(canvas, clock.time_left_secs());
    }

    fn entity_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("runes", self.runes.len()),
            ("orbiters", self.orbiters.len()),
            ("bolts", self.bolts.len()),
            ("crystals", self.crystals.len()),
            ("orbs", self.orbs.len()),
        ]
    }

    fn pool_usage(&self) -> Vec<(&'static str, PoolUsage)> {
        vec![("bolts", self.bolts.usage())]
    }
}

//! Reef floor with swaying seaweed, a fish crossing once per run and rising
//! bubbles.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use vgn_core::{DemoConfig, SceneClock, SceneRng};
use vgn_raster::{Canvas, Color, Texture};
use vgn_textures::underwater;

use crate::hud::TimerOverlay;
use crate::scene::Scene;
use crate::scenes::fill_gradient;

const OCEAN_BLUE: Color = Color::rgb(10, 50, 100);
const LIGHT_BLUE: Color = Color::rgb(30, 100, 150);
const CORAL_PINK: Color = Color::rgb(255, 127, 80);
const CORAL_PURPLE: Color = Color::rgb(138, 43, 226);
const SEAWEED_GREEN: Color = Color::rgb(34, 139, 34);

const SAND_HEIGHT: i32 = 80;
const SEAWEED_X: [i32; 5] = [100, 250, 400, 550, 700];

#[derive(Debug, Clone, Copy)]
struct Bubble {
    x: f32,
    y: f32,
    speed: f32,
    size: i32,
    wobble: f32,
}

pub struct Underwater {
    width: i32,
    height: i32,
    rng: SceneRng,
    sand: Texture,
    coral_pink: Texture,
    coral_purple: Texture,
    fish: Texture,
    bubbles: Vec<Bubble>,
    timer: TimerOverlay,
}

/// Fish top-left at normalized time `t`: one left-to-right crossing per run
/// on a sine wave around a third of the height.
pub fn fish_position(t: f32, width: i32, height: i32) -> Vec2 {
    Vec2::new(
        -70.0 + (width + 140) as f32 * t,
        (height / 3) as f32 + (t * 10.0).sin() * 30.0,
    )
}

impl Underwater {
    pub fn new(config: &DemoConfig, mut rng: SceneRng) -> Self {
        let (width, height) = (config.width as i32, config.height as i32);
        let sand = underwater::sand(config.width, SAND_HEIGHT as u32, &mut rng);
        let coral_pink = underwater::coral(60, 80, CORAL_PINK);
        let coral_purple = underwater::coral(50, 70, CORAL_PURPLE);
        let fish = underwater::fish(60, 30, &mut rng);

        let bubbles = (0..15)
            .map(|_| Bubble {
                x: rng.random_range(0..=width) as f32,
                y: rng.random_range(height / 2..=height) as f32,
                speed: rng.random_range(0.5..2.0),
                size: rng.random_range(2..=6),
                wobble: rng.random_range(0.0..TAU),
            })
            .collect();

        Self {
            width,
            height,
            rng,
            sand,
            coral_pink,
            coral_purple,
            fish,
            bubbles,
            timer: TimerOverlay::new("Time: ", 10, 10, 3, Color::WHITE),
        }
    }
}

impl Scene for Underwater {
    fn update(&mut self, clock: &SceneClock) {
        let drift_phase = (clock.elapsed_ms() * 0.003) as f32;
        for bubble in &mut self.bubbles {
            bubble.y -= bubble.speed;
            bubble.x += (bubble.wobble + drift_phase).sin() * 0.5;
            bubble.wobble += 0.02;
            if bubble.y < 0.0 {
                bubble.y = self.height as f32;
                bubble.x = self.rng.random_range(0..=self.width) as f32;
            }
        }
    }

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock) {
        let t = clock.normalized();
        let (w, h) = (self.width, self.height);

        fill_gradient(canvas, OCEAN_BLUE, LIGHT_BLUE, 1.0);
        canvas.blit(&self.sand, 0, h - SAND_HEIGHT);
        canvas.blit(&self.coral_pink, 150, h - 150);
        canvas.blit(&self.coral_purple, 300, h - 140);
        canvas.blit(&self.coral_pink, 500, h - 160);
        canvas.blit(&self.coral_purple, 650, h - 145);

        for pos in SEAWEED_X {
            let sway = (t * 6.0 + pos as f32 * 0.01).sin() * 15.0;
            for i in 0..5 {
                let x = pos as f32 + sway * (i as f32 / 5.0);
                canvas.fill_circle(x as i32, h - SAND_HEIGHT - i * 15, 8 - i, SEAWEED_GREEN);
            }
        }

        let fish = fish_position(t, w, h);
        canvas.blit(&self.fish, fish.x as i32, fish.y as i32);

        for bubble in &self.bubbles {
            let (x, y) = (bubble.x as i32, bubble.y as i32);
            canvas.stroke_circle(x, y, bubble.size, 1, LIGHT_BLUE);
            canvas.fill_circle(
                (bubble.x - 1.0) as i32,
                (bubble.y - 1.0) as i32,
                bubble.size / 3,
                Color::WHITE,
            );
        }

        self.timer.draw(canvas, clock.time_left_secs());
    }

    fn entity_counts(&self) -> Vec<(&'static str, usize)> {
        vec![("bubbles", self.bubbles.len()), ("seaweed", SEAWEED_X.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scene() -> Underwater {
        let config = crate::DemoKind::Underwater.load_config().unwrap();
        Underwater::new(&config, SceneRng::seed_from_u64(11))
    }

    #[test]
    fn fish_crosses_once_per_run() {
        let mid = fish_position(0.5, 800, 600);
        assert_eq!(mid.x, -70.0 + 940.0 * 0.5);
        assert_eq!(fish_position(0.0, 800, 600), Vec2::new(-70.0, 200.0));
        assert_eq!(fish_position(1.0, 800, 600).x, 870.0);
    }

    #[test]
    fn bubbles_wrap_to_the_bottom() {
        let mut scene = scene();
        let mut clock = SceneClock::new(20_000);
        for _ in 0..1500 {
            clock.advance(16_667);
            scene.update(&clock);
            for bubble in &scene.bubbles {
                assert!(bubble.y >= 0.0 && bubble.y <= scene.height as f32);
            }
        }
    }

    #[test]
    fn seaweed_base_is_drawn_at_rest_position() {
        let mut scene = scene();
        scene.bubbles.clear();
        let mut canvas = Canvas::new(800, 600);
        scene.draw(&mut canvas, &SceneClock::new(20_000));
        assert_eq!(canvas.pixel(100, 600 - SAND_HEIGHT), Some(SEAWEED_GREEN));
    }

    #[test]
    fn timer_reads_full_duration_at_start() {
        let scene = scene();
        assert_eq!(scene.timer.text(SceneClock::new(20_000).time_left_secs()), "Time: 20.0s");
    }
}

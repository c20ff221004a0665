//! Sunny clearing: a swaying tree, a butterfly looping over the meadow,
//! falling leaves and flowers that grow out of the grass.

use std::f32::consts::PI;

use rand::Rng;
use vgn_core::rng::pick;
use vgn_core::{DemoConfig, SceneClock, SceneRng};
use vgn_raster::{Canvas, Color, Texture};
use vgn_textures::forest::{self, DARK_GREEN};

use crate::hud::TimerOverlay;
use crate::scene::Scene;

const SKY_BLUE: Color = Color::rgb(135, 206, 235);
const LEAF_GREEN: Color = Color::rgb(50, 205, 50);
const FLOWER_PINK: Color = Color::rgb(255, 182, 193);
const FLOWER_YELLOW: Color = Color::rgb(255, 255, 0);
const FLOWER_MAGENTA: Color = Color::rgb(255, 100, 180);
const BUTTERFLY_ORANGE: Color = Color::rgb(255, 140, 0);
const AUTUMN_LEAF: Color = Color::rgb(255, 200, 0);
const AUTUMN_EDGE: Color = Color::rgb(200, 150, 0);

const FLOWER_COLORS: [Color; 3] = [FLOWER_PINK, FLOWER_YELLOW, FLOWER_MAGENTA];
const GRASS_HEIGHT: i32 = 120;
const BUTTERFLY_RADIUS: f32 = 150.0;
const GROWTH_PER_TICK: f32 = 0.008;

#[derive(Debug, Clone, Copy)]
struct Leaf {
    x: f32,
    y: f32,
    speed: f32,
    rotation: f32,
    rotation_speed: f32,
    size: f32,
}

impl Leaf {
    /// Diamond outline flattened vertically, rotated by `rotation` degrees.
    fn outline(&self) -> [(f32, f32); 4] {
        [0.0f32, 90.0, 180.0, 270.0].map(|angle| {
            let rad = (angle + self.rotation).to_radians();
            let px = (self.x + rad.cos() * self.size) as i32;
            let py = (self.y + rad.sin() * self.size * 0.6) as i32;
            (px as f32, py as f32)
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Flower {
    x: i32,
    y: i32,
    color: Color,
    growth: f32,
}

pub struct Forest {
    width: i32,
    height: i32,
    rng: SceneRng,
    bark: Texture,
    grass: Texture,
    leaves: Vec<Leaf>,
    flowers: Vec<Flower>,
    timer: TimerOverlay,
}

/// Butterfly centre at normalized time `t`: two laps of an ellipse per run.
pub fn butterfly_position(t: f32, width: i32, height: i32) -> (f32, f32) {
    let angle = t * 2.0 * PI * 2.0;
    (
        (width / 2) as f32 + angle.cos() * BUTTERFLY_RADIUS,
        (height / 3) as f32 + angle.sin() * BUTTERFLY_RADIUS * 0.6,
    )
}

fn draw_butterfly(canvas: &mut Canvas, x: i32, y: i32, t: f32) {
    let flap = (t * 10.0).sin().abs() * 15.0;
    let (xf, yf) = (x as f32, y as f32);
    let left = [
        (xf - 15.0, yf),
        (xf - 25.0 - flap, yf - 15.0),
        (xf - 20.0 - flap, yf + 10.0),
    ];
    let right = [
        (xf + 15.0, yf),
        (xf + 25.0 + flap, yf - 15.0),
        (xf + 20.0 + flap, yf + 10.0),
    ];
    for wing in [left, right] {
        canvas.fill_polygon(&wing, BUTTERFLY_ORANGE);
        canvas.stroke_polygon(&wing, 2, Color::BLACK);
    }
    canvas.fill_ellipse(x - 3, y - 10, 6, 20, Color::BLACK);
    canvas.line(x - 2, y - 10, x - 5, y - 18, 1, Color::BLACK);
    canvas.line(x + 2, y - 10, x + 5, y - 18, 1, Color::BLACK);
}

fn draw_flower(canvas: &mut Canvas, x: i32, y: i32, color: Color) {
    canvas.line(x, y, x, y + 30, 3, DARK_GREEN);
    for angle in (0..360).step_by(72) {
        let rad = (angle as f32).to_radians();
        let px = x as f32 + rad.cos() * 8.0;
        let py = y as f32 + rad.sin() * 8.0;
        canvas.fill_circle(px as i32, py as i32, 5, color);
    }
    canvas.fill_circle(x, y, 4, FLOWER_YELLOW);
}

impl Forest {
    pub fn new(config: &DemoConfig, mut rng: SceneRng) -> Self {
        let (width, height) = (config.width as i32, config.height as i32);
        let bark = forest::bark(80, 200, &mut rng);
        let grass = forest::grass(config.width, GRASS_HEIGHT as u32, &mut rng);

        let leaves = (0..20)
            .map(|_| Leaf {
                x: rng.random_range(0..=width) as f32,
                y: rng.random_range(-height..=0) as f32,
                speed: rng.random_range(0.5..1.5),
                rotation: rng.random_range(0.0..360.0),
                rotation_speed: rng.random_range(-5.0..5.0),
                size: rng.random_range(4..=8) as f32,
            })
            .collect();
        let flowers = (0..15)
            .map(|_| Flower {
                x: rng.random_range(50..=width - 50),
                y: height - 100 + rng.random_range(-10..=10),
                color: pick(&mut rng, &FLOWER_COLORS),
                growth: 0.0,
            })
            .collect();

        Self {
            width,
            height,
            rng,
            bark,
            grass,
            leaves,
            flowers,
            timer: TimerOverlay::new("Time: ", 10, 10, 3, Color::WHITE),
        }
    }
}

impl Scene for Forest {
    fn update(&mut self, _clock: &SceneClock) {
        for leaf in &mut self.leaves {
            leaf.y += leaf.speed;
            leaf.x += (leaf.y * 0.01).sin() * 0.5;
            leaf.rotation += leaf.rotation_speed;
            if leaf.y > self.height as f32 {
                leaf.y = -20.0;
                leaf.x = self.rng.random_range(0..=self.width) as f32;
            }
        }
        for flower in &mut self.flowers {
            flower.growth = (flower.growth + GROWTH_PER_TICK).min(1.0);
        }
    }

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock) {
        let t = clock.normalized();
        let (w, h) = (self.width, self.height);

        canvas.fill(SKY_BLUE);
        canvas.blit(&self.grass, 0, h - GRASS_HEIGHT);

        let (tree_x, tree_y) = (w / 4, h - 320);
        canvas.blit(&self.bark, tree_x, tree_y);
        for i in 0..3 {
            let sway = (t * 4.0 + i as f32).sin() * 5.0;
            let cx = (tree_x as f32 + 40.0 + sway) as i32;
            let cy = tree_y - 30 - i * 40;
            let radius = 100 + i * 20;
            canvas.fill_circle(cx, cy, radius, LEAF_GREEN);
            canvas.stroke_circle(cx, cy, radius, 2, DARK_GREEN);
        }

        let (bx, by) = butterfly_position(t, w, h);
        draw_butterfly(canvas, bx as i32, by as i32, t);

        for leaf in &self.leaves {
            let outline = leaf.outline();
            canvas.fill_polygon(&outline, AUTUMN_LEAF);
            canvas.stroke_polygon(&outline, 1, AUTUMN_EDGE);
        }

        for flower in &self.flowers {
            if flower.growth > 0.0 {
                let y = flower.y as f32 + 30.0 * (1.0 - flower.growth);
                draw_flower(canvas, flower.x, y as i32, flower.color);
            }
        }

        let (sun_x, sun_y) = (w - 100, 80);
        canvas.fill_circle(sun_x, sun_y, 30, FLOWER_YELLOW);
        for angle in (0..360).step_by(45) {
            let rad = (angle as f32 + t * 50.0).to_radians();
            let end_x = (sun_x as f32 + rad.cos() * 50.0) as i32;
            let end_y = (sun_y as f32 + rad.sin() * 50.0) as i32;
            canvas.line(sun_x, sun_y, end_x, end_y, 3, FLOWER_YELLOW);
        }

        self.timer.draw(canvas, clock.time_left_secs());
    }

    fn entity_counts(&self) -> Vec<(&'static str, usize)> {
        vec![("leaves", self.leaves.len()), ("flowers", self.flowers.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scene() -> Forest {
        let config = crate::DemoKind::Forest.load_config().unwrap();
        Forest::new(&config, SceneRng::seed_from_u64(21))
    }

    fn tick(scene: &mut Forest, n: u32) {
        let clock = SceneClock::new(20_000);
        for _ in 0..n {
            scene.update(&clock);
        }
    }

    #[test]
    fn leaves_wrap_above_the_screen() {
        let mut scene = scene();
        for _ in 0..3000 {
            tick(&mut scene, 1);
            for leaf in &scene.leaves {
                assert!(leaf.y <= scene.height as f32);
                assert!(leaf.y >= -(scene.height as f32));
            }
        }
    }

    #[test]
    fn leaf_rotation_is_not_limited_to_whole_degrees() {
        let scene = scene();
        assert!(scene.leaves.iter().all(|l| (0.0..360.0).contains(&l.rotation)));
        assert!(scene.leaves.iter().any(|l| l.rotation.fract() != 0.0));
    }

    #[test]
    fn flowers_grow_to_full_size_and_stop() {
        let mut scene = scene();
        tick(&mut scene, 1);
        assert!(scene.flowers.iter().all(|f| (f.growth - GROWTH_PER_TICK).abs() < 1e-6));
        tick(&mut scene, 200);
        assert!(scene.flowers.iter().all(|f| f.growth == 1.0));
    }

    #[test]
    fn butterfly_starts_right_of_centre() {
        let (x, y) = butterfly_position(0.0, 800, 600);
        assert_eq!((x, y), (550.0, 200.0));
        let (x, _) = butterfly_position(0.25, 800, 600);
        assert!((x - 250.0).abs() < 1e-3);
    }

    #[test]
    fn leaf_outline_is_a_flattened_diamond() {
        let leaf = Leaf {
            x: 100.0,
            y: 100.0,
            speed: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            size: 8.0,
        };
        let outline = leaf.outline();
        assert_eq!(outline[0], (108.0, 100.0));
        assert_eq!(outline[2], (92.0, 100.0));
        assert_eq!(outline[1], (100.0, 104.0));
    }

    #[test]
    fn sun_centre_is_yellow() {
        let mut scene = scene();
        scene.leaves.clear();
        let mut canvas = Canvas::new(800, 600);
        scene.draw(&mut canvas, &SceneClock::new(20_000));
        assert_eq!(canvas.pixel(700, 80), Some(FLOWER_YELLOW));
        assert_eq!(canvas.pixel(5, 300), Some(SKY_BLUE));
    }
}

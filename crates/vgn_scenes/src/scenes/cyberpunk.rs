//! Rainy neon skyline: textured towers, flickering signs, a hovering car and
//! glowing reflections on the wet road.

use std::f32::consts::TAU;

use rand::Rng;
use vgn_core::rng::pick;
use vgn_core::{DemoConfig, SceneClock, SceneRng};
use vgn_raster::{Canvas, Color, Texture};
use vgn_textures::city;

use crate::hud::{glow_layers, TimerOverlay};
use crate::scene::Scene;

const NIGHT_SKY: Color = Color::rgb(10, 5, 30);
const NEON_PINK: Color = Color::rgb(255, 20, 147);
const NEON_CYAN: Color = Color::rgb(0, 255, 255);
const NEON_PURPLE: Color = Color::rgb(186, 85, 211);
const NEON_ORANGE: Color = Color::rgb(255, 165, 0);
const WINDOW_YELLOW: Color = Color::rgb(255, 255, 150);
const WINDOW_CYAN: Color = Color::rgb(100, 200, 255);
const RAIN_BLUE: Color = Color::rgb(150, 180, 220);
const CAR_BODY: Color = Color::rgb(80, 80, 100);

const SPARK_COLORS: [Color; 4] = [NEON_PINK, NEON_CYAN, NEON_PURPLE, NEON_ORANGE];
const ROAD_HEIGHT: i32 = 150;

/// (x, width, height, window colour)
const SKYLINE: [(i32, u32, u32, Color); 6] = [
    (50, 150, 250, WINDOW_YELLOW),
    (180, 150, 300, WINDOW_CYAN),
    (320, 150, 200, WINDOW_YELLOW),
    (480, 150, 280, WINDOW_CYAN),
    (620, 150, 220, WINDOW_YELLOW),
    (770, 150, 180, WINDOW_CYAN),
];
const SIGNS: [(&str, Color, i32, i32); 3] = [
    ("CYBER", NEON_PINK, 100, 250),
    ("TECH", NEON_CYAN, 300, 200),
    ("NEON", NEON_PURPLE, 550, 280),
];

struct Building {
    x: i32,
    y: i32,
    texture: Texture,
}

struct Sign {
    x: i32,
    y: i32,
    texture: Texture,
}

#[derive(Debug, Clone, Copy)]
struct RainDrop {
    x: f32,
    y: f32,
    speed: f32,
    length: i32,
}

#[derive(Debug, Clone, Copy)]
struct Spark {
    x: f32,
    y: f32,
    speed: f32,
    size: i32,
    color: Color,
    pulse: f32,
}

#[derive(Debug, Clone, Copy)]
struct FlyingCar {
    x: f32,
    y: f32,
    speed: f32,
}

pub struct CyberpunkCity {
    width: i32,
    height: i32,
    rng: SceneRng,
    fx: SceneRng,
    buildings: Vec<Building>,
    signs: Vec<Sign>,
    road: Texture,
    rain: Vec<RainDrop>,
    sparks: Vec<Spark>,
    car: FlyingCar,
    timer: TimerOverlay,
}

impl CyberpunkCity {
    pub fn new(config: &DemoConfig, mut rng: SceneRng, fx: SceneRng) -> Self {
        let (width, height) = (config.width as i32, config.height as i32);

        let buildings = SKYLINE
            .iter()
            .map(|&(x, w, h, window)| Building {
                x,
                y: height - h as i32 - ROAD_HEIGHT,
                texture: city::building(w, h, window, &mut rng),
            })
            .collect();
        let signs = SIGNS
            .iter()
            .map(|&(text, color, x, y)| Sign {
                x,
                y,
                texture: city::neon_sign(150, 60, text, color),
            })
            .collect();
        let road = city::road(config.width, ROAD_HEIGHT as u32, &mut rng);

        let rain = (0..150)
            .map(|_| RainDrop {
                x: rng.random_range(0..=width) as f32,
                y: rng.random_range(0..=height) as f32,
                speed: rng.random_range(8.0..15.0),
                length: rng.random_range(10..=20),
            })
            .collect();
        let sparks = (0..50)
            .map(|_| Spark {
                x: rng.random_range(0..=width) as f32,
                y: rng.random_range(0..=height / 2) as f32,
                speed: rng.random_range(0.2..0.8),
                size: rng.random_range(1..=3),
                color: pick(&mut rng, &SPARK_COLORS),
                pulse: rng.random_range(0.0..TAU),
            })
            .collect();

        let timer = TimerOverlay::new("", width - 140, 20, 4, NEON_PINK)
            .with_glow(glow_layers(&[4, 3, 2, 1], |_| NEON_PINK.halve()));

        Self {
            width,
            height,
            rng,
            fx,
            buildings,
            signs,
            road,
            rain,
            sparks,
            car: FlyingCar {
                x: -100.0,
                y: (height / 6) as f32,
                speed: 3.0,
            },
            timer,
        }
    }

    fn draw_sky(&mut self, canvas: &mut Canvas, elapsed_ms: f64) {
        canvas.fill(NIGHT_SKY);
        for _ in 0..30 {
            let x = self.fx.random_range(0..=self.width);
            let y = self.fx.random_range(0..=self.height / 2);
            let level = (150.0 + 105.0 * (elapsed_ms * 0.005 + f64::from(x)).sin()) as i32;
            canvas.fill_circle(x, y, 1, Color::clamped(level, level, level));
        }
        for spark in &self.sparks {
            let color = spark.color.scale((spark.pulse.sin() + 1.0) / 2.0);
            canvas.fill_circle(spark.x as i32, spark.y as i32, spark.size, color);
        }
    }

    fn draw_car(&self, canvas: &mut Canvas, elapsed_ms: f64) {
        let x = self.car.x as i32;
        let y = (f64::from(self.car.y) + (elapsed_ms * 0.003).sin() * 10.0) as i32;
        canvas.fill_rect(x, y, 60, 20, CAR_BODY);
        canvas.fill_rect(x + 5, y + 5, 50, 10, NEON_CYAN);
        for i in 0..3 {
            canvas.line(x, y + 20 + i, x + 60, y + 20 + i, 1, NEON_CYAN);
        }
    }
}

impl Scene for CyberpunkCity {
    fn update(&mut self, _clock: &SceneClock) {
        let half = (self.height / 2) as f32;
        for spark in &mut self.sparks {
            spark.y += spark.speed;
            if spark.y > half {
                spark.y = 0.0;
                spark.x = self.rng.random_range(0..=self.width) as f32;
            }
            spark.pulse += 0.1;
        }

        self.car.x += self.car.speed;
        if self.car.x > (self.width + 100) as f32 {
            self.car.x = -100.0;
            self.car.y = self.rng.random_range(150..=350) as f32;
        }

        for drop in &mut self.rain {
            drop.y += drop.speed;
            if drop.y > self.height as f32 {
                drop.y = 0.0;
                drop.x = self.rng.random_range(0..=self.width) as f32;
            }
        }
    }

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock) {
        let elapsed_ms = clock.elapsed_ms();
        self.draw_sky(canvas, elapsed_ms);

        for building in &self.buildings {
            canvas.blit(&building.texture, building.x, building.y);
            let bottom = building.y + building.texture.height() as i32;
            canvas.line(building.x, building.y, building.x, bottom, 2, NEON_CYAN);
        }

        for (i, sign) in self.signs.iter().enumerate() {
            // Each sign drops out on about one frame in twenty.
            if self.fx.random::<f32>() > 0.05 {
                let flicker = ((elapsed_ms * 0.01 + i as f64).sin() * 0.2 + 0.8) as f32;
                canvas.blit_faded(&sign.texture, sign.x, sign.y, flicker);
            }
        }

        self.draw_car(canvas, elapsed_ms);
        canvas.blit(&self.road, 0, self.height - ROAD_HEIGHT);

        for drop in &self.rain {
            let (x, y) = (drop.x as i32, drop.y as i32);
            canvas.line(x, y, x - 2, y - drop.length, 1, RAIN_BLUE);
        }

        let reflection_y = self.height - 100;
        let reflection = Color::rgb(NEON_CYAN.r / 4, NEON_CYAN.g / 4, NEON_CYAN.b / 4);
        for building in &self.buildings {
            let glow_x = building.x + building.texture.width() as i32 / 2;
            for i in 0..5 {
                canvas.fill_circle(glow_x, reflection_y + i * 10, 30 - i * 5, reflection);
            }
        }

        self.timer.draw(canvas, clock.time_left_secs());
    }

    fn entity_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("sparks", self.sparks.len()),
            ("buildings", self.buildings.len()),
            ("rain", self.rain.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scene() -> CyberpunkCity {
        let config = crate::DemoKind::CyberpunkCity.load_config().unwrap();
        CyberpunkCity::new(&config, SceneRng::seed_from_u64(3), SceneRng::seed_from_u64(4))
    }

    fn tick(scene: &mut CyberpunkCity, n: u32) {
        let clock = SceneClock::new(20_000);
        for _ in 0..n {
            scene.update(&clock);
        }
    }

    #[test]
    fn buildings_stand_on_the_road() {
        let scene = scene();
        for building in &scene.buildings {
            assert_eq!(
                building.y + building.texture.height() as i32,
                scene.height - ROAD_HEIGHT
            );
        }
    }

    #[test]
    fn rain_and_sparks_wrap() {
        let mut scene = scene();
        for _ in 0..1000 {
            tick(&mut scene, 1);
            assert!(scene.rain.iter().all(|d| d.y >= 0.0 && d.y <= scene.height as f32));
            let half = (scene.height / 2) as f32;
            assert!(scene.sparks.iter().all(|s| s.y >= 0.0 && s.y <= half));
        }
    }

    #[test]
    fn car_wraps_to_new_altitude() {
        let mut scene = scene();
        // 1100 px at 3 px per tick.
        tick(&mut scene, 367);
        assert_eq!(scene.car.x, -100.0);
        assert!((150.0..=350.0).contains(&scene.car.y));
        tick(&mut scene, 1);
        assert_eq!(scene.car.x, -97.0);
    }

    #[test]
    fn reflections_use_quarter_cyan() {
        let mut scene = scene();
        let mut canvas = Canvas::new(900, 700);
        scene.rain.clear();
        scene.draw(&mut canvas, &SceneClock::new(20_000));
        let glow_x = SKYLINE[0].0 + 75;
        assert_eq!(canvas.pixel(glow_x, 640), Some(Color::rgb(0, 63, 63)));
    }
}

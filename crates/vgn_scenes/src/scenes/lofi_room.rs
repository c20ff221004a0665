//! Cozy bedroom corner: rain on the window, fairy lights, a steaming mug, a
//! record player throwing notes and a sleeping cat.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::Rng;
use vgn_core::particle::step_and_expire;
use vgn_core::rng::{pick, roll_above};
use vgn_core::{
    DemoConfig, EntityPool, NoteGlyph, Particle, ParticleKind, PoolUsage, SceneClock, SceneRng,
};
use vgn_raster::{draw_text, Canvas, Color, Texture};
use vgn_textures::interior::{self, GOLDEN, LAVENDER, SOFT_PURPLE, WOOD_BROWN};

use crate::hud::{glow_layers, TimerOverlay};
use crate::scene::Scene;

const SOFT_PINK: Color = Color::rgb(255, 198, 255);
const SOFT_BLUE: Color = Color::rgb(189, 224, 254);
const CREAM: Color = Color::rgb(255, 250, 240);
const PEACH: Color = Color::rgb(255, 218, 185);
const MINT: Color = Color::rgb(189, 252, 201);
const CORAL: Color = Color::rgb(255, 183, 178);
const DEEP_BLUE: Color = Color::rgb(67, 97, 238);
const DARK_WOOD: Color = Color::rgb(101, 67, 33);
const PLANT_GREEN: Color = Color::rgb(119, 221, 119);
const DARK_GREEN: Color = Color::rgb(34, 139, 34);
const COFFEE: Color = Color::rgb(101, 67, 33);
const VINYL: Color = Color::rgb(20, 20, 20);
const GROOVE: Color = Color::rgb(40, 40, 40);

const BOOK_COLORS: [Color; 6] = [SOFT_PURPLE, CORAL, MINT, SOFT_PINK, SOFT_BLUE, PEACH];
const LIGHT_COLORS: [Color; 4] = [SOFT_PINK, SOFT_BLUE, GOLDEN, MINT];

/// Window pane, in canvas coordinates.
const WINDOW_X: i32 = 520;
const WINDOW_Y: i32 = 80;
const WINDOW_SIZE: i32 = 200;
const DESK_Y: i32 = 350;

const MUG: (i32, i32) = (320, 310);
const VINYL_AT: (i32, i32) = (680, 300);
const CAT: (i32, i32) = (750, 330);
const PLANT: (i32, i32) = (150, 320);
const LAPTOP: (i32, i32) = (400, 280);

#[derive(Debug, Clone, Copy)]
struct RainStreak {
    x: f32,
    y: f32,
    length: i32,
    speed: f32,
}

#[derive(Debug, Clone, Copy)]
struct FairyLight {
    x: i32,
    y: i32,
    phase: f32,
    color: Color,
}

#[derive(Debug, Clone, Copy)]
struct DustMote {
    x: f32,
    y: f32,
    speed_x: f32,
    speed_y: f32,
    size: i32,
}

struct Book {
    x: i32,
    y: i32,
    texture: Texture,
}

pub struct LofiRoom {
    width: i32,
    height: i32,
    rng: SceneRng,
    fx: SceneRng,
    wall: Texture,
    desk: Texture,
    floor: Texture,
    books: Vec<Book>,
    rain: Vec<RainStreak>,
    lights: Vec<FairyLight>,
    dust: Vec<DustMote>,
    steam: EntityPool<Particle>,
    notes: EntityPool<Particle>,
    timer: TimerOverlay,
}

impl LofiRoom {
    pub fn new(config: &DemoConfig, mut rng: SceneRng, fx: SceneRng) -> Self {
        let (width, height) = (config.width as i32, config.height as i32);
        let wall = interior::wall(config.width, config.height / 2, &mut rng);
        let desk = interior::wood(config.width, 200, &mut rng);
        let floor = interior::wood(config.width, 300, &mut rng);

        let mut books = Vec::with_capacity(8);
        let mut book_x = 100;
        for _ in 0..8 {
            let w = rng.random_range(25..=40);
            let h = rng.random_range(120..=160);
            let color = pick(&mut rng, &BOOK_COLORS);
            let texture = interior::book_spine(w as u32, h as u32, color, &mut rng);
            books.push(Book {
                x: book_x,
                y: DESK_Y - h,
                texture,
            });
            book_x += w + 2;
        }

        let dust = (0..40)
            .map(|_| DustMote {
                x: rng.random_range(0..=width) as f32,
                y: rng.random_range(0..=height / 2) as f32,
                speed_x: rng.random_range(-0.1..0.1),
                speed_y: rng.random_range(0.2..0.5),
                size: rng.random_range(1..=3),
            })
            .collect();

        let rain = (0..30)
            .map(|_| RainStreak {
                x: rng.random_range(WINDOW_X..=WINDOW_X + WINDOW_SIZE) as f32,
                y: rng.random_range(WINDOW_Y..=WINDOW_Y + WINDOW_SIZE) as f32,
                length: rng.random_range(15..=30),
                speed: rng.random_range(1.0..3.0),
            })
            .collect();

        let lights = (0..12)
            .map(|i| FairyLight {
                x: 50 + i * 70,
                y: 50,
                phase: rng.random_range(0.0..TAU),
                color: pick(&mut rng, &LIGHT_COLORS),
            })
            .collect();

        // Glow alpha 100 - 30 * offset, pre-blended against the wall.
        let glow = glow_layers(&[3, 2, 1], |offset| {
            let alpha = (100 - offset * 30) as f32 / 255.0;
            LAVENDER.lerp(SOFT_PURPLE, alpha)
        });
        let timer = TimerOverlay::new("", width / 2 - 45, 15, 3, CREAM).with_glow(glow);

        Self {
            width,
            height,
            rng,
            fx,
            wall,
            desk,
            floor,
            books,
            rain,
            lights,
            dust,
            steam: EntityPool::new(config.particle_cap, config.overflow),
            notes: EntityPool::new(config.particle_cap, config.overflow),
            timer,
        }
    }

    fn update_ambient(&mut self) {
        let bottom = (WINDOW_Y + WINDOW_SIZE) as f32;
        for drop in &mut self.rain {
            drop.y += drop.speed;
            if drop.y > bottom {
                drop.y = WINDOW_Y as f32;
                drop.x = self.rng.random_range(WINDOW_X..=WINDOW_X + WINDOW_SIZE) as f32;
            }
        }

        for light in &mut self.lights {
            light.phase += 0.05;
        }

        let half = (self.height / 2) as f32;
        for mote in &mut self.dust {
            mote.y += mote.speed_y;
            mote.x += mote.speed_x;
            if mote.y > half {
                mote.y = 0.0;
                mote.x = self.rng.random_range(0..=self.width) as f32;
            }
        }
    }

    fn spawn_particles(&mut self) {
        if roll_above(&mut self.rng, 0.7) {
            let x = MUG.0 + self.rng.random_range(-5..=5);
            let speed = self.rng.random_range(0.5..1.0);
            let size = self.rng.random_range(3..=6) as f32;
            self.steam
                .spawn(Particle::steam(Vec2::new(x as f32, MUG.1 as f32), speed, size));
        }
        step_and_expire(&mut self.steam);

        if roll_above(&mut self.rng, 0.97) {
            let x = VINYL_AT.0 + self.rng.random_range(-20..=20);
            let glyph = pick(&mut self.rng, &NoteGlyph::ALL);
            self.notes
                .spawn(Particle::note(Vec2::new(x as f32, VINYL_AT.1 as f32), glyph));
        }
        step_and_expire(&mut self.notes);
    }

    fn draw_window(&self, canvas: &mut Canvas) {
        for row in 0..WINDOW_SIZE {
            let color = SOFT_BLUE.lerp(SOFT_PURPLE, row as f32 / WINDOW_SIZE as f32);
            canvas.hline(WINDOW_X, WINDOW_X + WINDOW_SIZE - 1, WINDOW_Y + row, color);
        }
        for drop in &self.rain {
            let (x, y) = (drop.x as i32, drop.y as i32);
            canvas.line(x, y, x + 2, y + drop.length, 2, SOFT_BLUE);
        }
        canvas.stroke_rect(WINDOW_X, WINDOW_Y, WINDOW_SIZE, WINDOW_SIZE, 8, CREAM);
        let mid_x = WINDOW_X + WINDOW_SIZE / 2;
        let mid_y = WINDOW_Y + WINDOW_SIZE / 2;
        canvas.line(mid_x, WINDOW_Y, mid_x, WINDOW_Y + WINDOW_SIZE, 8, CREAM);
        canvas.line(WINDOW_X, mid_y, WINDOW_X + WINDOW_SIZE, mid_y, 8, CREAM);
    }

    fn draw_lights(&self, canvas: &mut Canvas) {
        for light in &self.lights {
            let brightness = (light.phase.sin() + 1.0) / 2.0;
            for i in (1..=3).rev() {
                let glow = light.color.scale(brightness * 0.4);
                canvas.fill_circle(light.x, light.y, 8 + i * 2, glow);
            }
            canvas.fill_circle(light.x, light.y, 6, light.color.scale(0.6 + 0.4 * brightness));
            if light.x < self.width - 70 {
                canvas.line(light.x, light.y, light.x + 70, light.y, 2, DARK_WOOD);
            }
        }
    }

    fn draw_laptop(&mut self, canvas: &mut Canvas) {
        let (x, y) = LAPTOP;
        canvas.fill_rect(x, y, 140, 100, DEEP_BLUE);
        canvas.fill_rect(x + 5, y + 5, 130, 90, SOFT_BLUE);
        for i in 0..6 {
            let line_width = self.fx.random_range(60..=120);
            canvas.fill_rect(x + 10, y + 10 + i * 13, line_width, 8, SOFT_PURPLE);
        }
        canvas.fill_rect(x - 10, y + 100, 160, 40, DEEP_BLUE.darken(20));
    }

    fn draw_mug(&self, canvas: &mut Canvas) {
        let (x, y) = MUG;
        for particle in self.steam.iter() {
            let color = CREAM.scale(particle.fade());
            canvas.fill_circle(particle.pos.x as i32, particle.pos.y as i32, particle.size as i32, color);
        }
        canvas.fill_rect(x - 20, y, 40, 35, SOFT_PINK);
        canvas.stroke_rect(x - 20, y, 40, 35, 2, SOFT_PINK.darken(40));
        canvas.arc(x + 15, y + 5, 15, 25, -FRAC_PI_2, FRAC_PI_2, 3, SOFT_PINK);
        canvas.fill_ellipse(x - 18, y + 2, 36, 10, COFFEE);
        canvas.fill_circle(x - 5, y + 6, 4, CREAM);
        canvas.fill_circle(x + 5, y + 6, 4, CREAM);
        let heart = [(x - 8, y + 7), (x, y + 12), (x + 8, y + 7)].map(|(px, py)| (px as f32, py as f32));
        canvas.fill_polygon(&heart, CREAM);
    }

    fn draw_record_player(&self, canvas: &mut Canvas) {
        let (x, y) = VINYL_AT;
        canvas.fill_rect(x - 40, y, 80, 50, WOOD_BROWN);
        canvas.fill_circle(x, y + 15, 35, VINYL);
        canvas.fill_circle(x, y + 15, 5, DARK_WOOD);
        for r in (14..=30).rev().step_by(4) {
            canvas.stroke_circle(x, y + 15, r, 1, GROOVE);
        }
        for particle in self.notes.iter() {
            if let ParticleKind::Note(glyph) = particle.kind {
                let color = SOFT_PURPLE.scale(particle.fade());
                let text = glyph.as_char().to_string();
                draw_text(canvas, &text, particle.pos.x as i32, particle.pos.y as i32, 3, color);
            }
        }
    }

    fn draw_cat(&self, canvas: &mut Canvas, elapsed_ms: f64) {
        let (x, y) = CAT;
        canvas.fill_ellipse(x, y, 80, 40, PEACH);
        let bob = ((elapsed_ms * 0.002).sin() * 2.0) as f32;
        let yf = y as f32 + bob;
        canvas.fill_circle(x + 20, (yf + 10.0) as i32, 18, PEACH);
        let xf = x as f32;
        canvas.fill_polygon(&[(xf + 12.0, yf), (xf + 7.0, yf - 8.0), (xf + 17.0, yf + 5.0)], PEACH);
        canvas.fill_polygon(&[(xf + 28.0, yf), (xf + 33.0, yf - 8.0), (xf + 23.0, yf + 5.0)], PEACH);
        let eye_y = (yf + 12.0) as i32;
        canvas.arc(x + 12, eye_y, 6, 4, 0.0, PI, 2, Color::BLACK);
        canvas.arc(x + 20, eye_y, 6, 4, 0.0, PI, 2, Color::BLACK);
        let zzz_y = y as f64 - 20.0 + (elapsed_ms * 0.003).sin() * 5.0;
        draw_text(canvas, "Z z z", x + 40, zzz_y as i32, 2, SOFT_PURPLE);
    }
}

/// Potted plant with eight leaves swaying around their rest angle.
fn draw_plant(canvas: &mut Canvas, x: i32, y: i32, sway_time: f32) {
    let pot = [(x - 20, y + 30), (x - 15, y), (x + 15, y), (x + 20, y + 30)]
        .map(|(px, py)| (px as f32, py as f32));
    canvas.fill_polygon(&pot, CORAL);
    canvas.stroke_polygon(&pot, 2, CORAL.darken(40));
    canvas.fill_ellipse(x - 15, y - 5, 30, 10, DARK_WOOD);

    for i in 0..8 {
        let angle = i as f32 / 8.0 * TAU + (sway_time * 2.0 + i as f32).sin() * 0.1;
        let length = (35 + (i % 3) * 8) as f32;
        let end_x = (x as f32 + angle.cos() * length) as i32;
        let end_y = (y as f32 - angle.sin().abs() * length) as i32;
        canvas.line(x, y, end_x, end_y, 3, DARK_GREEN);
        let leaf = 12 + (i % 2) * 4;
        canvas.fill_ellipse(end_x - leaf / 2, end_y - leaf / 2, leaf, leaf, PLANT_GREEN);
        canvas.stroke_ellipse(end_x - leaf / 2, end_y - leaf / 2, leaf, leaf, 1, DARK_GREEN);
    }
}

impl Scene for LofiRoom {
    fn update(&mut self, _clock: &SceneClock) {
        self.update_ambient();
        self.spawn_particles();
    }

    fn draw(&mut self, canvas: &mut Canvas, clock: &SceneClock) {
        let elapsed_ms = clock.elapsed_ms();

        canvas.blit(&self.wall, 0, 0);
        self.draw_window(canvas);
        self.draw_lights(canvas);
        for mote in &self.dust {
            canvas.fill_circle(mote.x as i32, mote.y as i32, mote.size, GOLDEN);
        }

        canvas.blit(&self.floor, 0, self.height - 300);
        canvas.blit(&self.desk, 0, DESK_Y);
        self.draw_laptop(canvas);
        for book in &self.books {
            canvas.blit(&book.texture, book.x, book.y);
        }

        draw_plant(canvas, PLANT.0, PLANT.1, clock.normalized());
        self.draw_mug(canvas);
        self.draw_record_player(canvas);
        self.draw_cat(canvas, elapsed_ms);

        self.timer.draw(canvas, clock.time_left_secs());
    }

    fn entity_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("rain", self.rain.len()),
            ("lights", self.lights.len()),
            ("dust", self.dust.len()),
            ("steam", self.steam.len()),
            ("notes", self.notes.len()),
        ]
    }

    fn pool_usage(&self) -> Vec<(&'static str, PoolUsage)> {
        vec![("steam", self.steam.usage()), ("notes", self.notes.usage())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn room() -> LofiRoom {
        let config = crate::DemoKind::LofiRoom.load_config().unwrap();
        LofiRoom::new(&config, SceneRng::seed_from_u64(5), SceneRng::seed_from_u64(6))
    }

    fn run_ticks(scene: &mut LofiRoom, ticks: u32) {
        let mut clock = SceneClock::new(20_000);
        for _ in 0..ticks {
            clock.advance(16_667);
            scene.update(&clock);
        }
    }

    #[test]
    fn books_sit_on_the_desk_side_by_side() {
        let scene = room();
        assert_eq!(scene.books.len(), 8);
        assert_eq!(scene.books[0].x, 100);
        for pair in scene.books.windows(2) {
            let gap = pair[1].x - (pair[0].x + pair[0].texture.width() as i32);
            assert_eq!(gap, 2);
        }
        for book in &scene.books {
            assert_eq!(book.y + book.texture.height() as i32, DESK_Y);
        }
    }

    #[test]
    fn rain_stays_inside_the_window() {
        let mut scene = room();
        for _ in 0..600 {
            run_ticks(&mut scene, 1);
            for drop in &scene.rain {
                assert!(drop.y >= WINDOW_Y as f32 && drop.y <= (WINDOW_Y + WINDOW_SIZE) as f32);
                assert!(drop.x >= WINDOW_X as f32 && drop.x <= (WINDOW_X + WINDOW_SIZE) as f32);
            }
        }
    }

    #[test]
    fn dust_wraps_within_upper_half() {
        let mut scene = room();
        let half = (scene.height / 2) as f32;
        for _ in 0..2000 {
            run_ticks(&mut scene, 1);
            assert!(scene.dust.iter().all(|m| m.y >= 0.0 && m.y <= half));
        }
    }

    #[test]
    fn steam_spawns_and_expires() {
        let mut scene = room();
        run_ticks(&mut scene, 60);
        assert!(!scene.steam.is_empty());
        assert!(scene.steam.iter().all(|p| p.life > 0));
        // Steam lives 100 ticks, spawning at most once per tick.
        run_ticks(&mut scene, 300);
        assert!(scene.steam.len() <= 100);
    }

    #[test]
    fn notes_are_rare() {
        let mut scene = room();
        run_ticks(&mut scene, 1200);
        assert!(scene.notes.len() < 20, "notes = {}", scene.notes.len());
    }

    #[test]
    fn draw_paints_cat_and_timer() {
        let mut scene = room();
        let config = crate::DemoKind::LofiRoom.load_config().unwrap();
        let mut canvas = Canvas::new(config.width, config.height);
        let clock = SceneClock::new(20_000);
        scene.draw(&mut canvas, &clock);
        assert_eq!(canvas.pixel(CAT.0 + 40, CAT.1 + 20), Some(PEACH));
        assert_eq!(canvas.pixel(VINYL_AT.0, VINYL_AT.1 + 15), Some(DARK_WOOD));

        // "20.0s" at scale 3: the top bar of the '2' starts one font pixel in.
        assert_eq!(scene.timer.text(clock.time_left_secs()), "20.0s");
        let timer_x = config.width as i32 / 2 - 45;
        assert_eq!(canvas.pixel(timer_x + 3, 15), Some(CREAM));
        assert_eq!(canvas.pixel(timer_x + 4, 16), Some(CREAM));
    }
}

//! Short-lived particles that expire after a fixed number of ticks.
//!
//! One struct covers every expiring effect; the closed `ParticleKind` set
//! picks the kinematic rule and the fade span.

use glam::Vec2;

use crate::pool::EntityPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameTint {
    Orange,
    Yellow,
    Red,
}

impl FlameTint {
    pub const ALL: [FlameTint; 3] = [FlameTint::Orange, FlameTint::Yellow, FlameTint::Red];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteGlyph {
    Quaver,
    Beamed,
}

impl NoteGlyph {
    pub const ALL: [NoteGlyph; 2] = [NoteGlyph::Quaver, NoteGlyph::Beamed];

    pub fn as_char(self) -> char {
        match self {
            Self::Quaver => '♪',
            Self::Beamed => '♫',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Rises, drifting sideways with a sine of its height.
    Steam,
    /// Drifts with constant velocity and grows.
    Smoke,
    Flame(FlameTint),
    Note(NoteGlyph),
    /// Stationary lightning endpoint; the path is re-jittered every draw.
    Bolt,
}

impl ParticleKind {
    /// Ticks over which brightness fades from full to zero.
    pub fn fade_span(self) -> f32 {
        match self {
            Self::Steam => 100.0,
            Self::Smoke => 80.0,
            Self::Flame(_) => 40.0,
            Self::Note(_) => 100.0,
            Self::Bolt => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: i32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn steam(pos: Vec2, rise_speed: f32, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -rise_speed),
            size,
            life: 100,
            kind: ParticleKind::Steam,
        }
    }

    pub fn smoke(pos: Vec2, vel: Vec2, size: f32, life: i32) -> Self {
        Self {
            pos,
            vel,
            size,
            life,
            kind: ParticleKind::Smoke,
        }
    }

    pub fn flame(pos: Vec2, vel: Vec2, size: f32, life: i32, tint: FlameTint) -> Self {
        Self {
            pos,
            vel,
            size,
            life,
            kind: ParticleKind::Flame(tint),
        }
    }

    pub fn note(pos: Vec2, glyph: NoteGlyph) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -1.0),
            size: 1.0,
            life: 100,
            kind: ParticleKind::Note(glyph),
        }
    }

    pub fn bolt(target: Vec2) -> Self {
        Self {
            pos: target,
            vel: Vec2::ZERO,
            size: 2.0,
            life: 5,
            kind: ParticleKind::Bolt,
        }
    }

    /// One tick of motion plus one tick of life.
    pub fn step(&mut self) {
        match self.kind {
            ParticleKind::Steam => {
                self.pos.y += self.vel.y;
                self.pos.x += (self.pos.y * 0.1).sin() * 0.5;
            }
            ParticleKind::Smoke => {
                self.pos += self.vel;
                self.size += 0.3;
            }
            ParticleKind::Flame(_) | ParticleKind::Note(_) => {
                self.pos += self.vel;
            }
            ParticleKind::Bolt => {}
        }
        self.life -= 1;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }

    /// Brightness factor in [0, 1] from remaining life.
    pub fn fade(&self) -> f32 {
        (self.life as f32 / self.kind.fade_span()).clamp(0.0, 1.0)
    }
}

/// Steps every particle once, then drops the ones whose life ran out, so an
/// expired particle is never visible on the following draw.
pub fn step_and_expire(pool: &mut EntityPool<Particle>) {
    for particle in pool.iter_mut() {
        particle.step();
    }
    pool.retain(|p| !p.is_expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::OverflowPolicy;

    #[test]
    fn steam_rises_and_sways() {
        let mut p = Particle::steam(Vec2::new(320.0, 310.0), 1.0, 4.0);
        p.step();
        assert_eq!(p.pos.y, 309.0);
        let expected_x = 320.0 + (309.0f32 * 0.1).sin() * 0.5;
        assert!((p.pos.x - expected_x).abs() < 1e-4);
        assert_eq!(p.life, 99);
    }

    #[test]
    fn smoke_grows_while_drifting() {
        let mut p = Particle::smoke(Vec2::ZERO, Vec2::new(1.0, 0.5), 10.0, 40);
        p.step();
        assert_eq!(p.pos, Vec2::new(1.0, 0.5));
        assert!((p.size - 10.3).abs() < 1e-5);
    }

    #[test]
    fn bolt_does_not_move() {
        let mut p = Particle::bolt(Vec2::new(100.0, 200.0));
        p.step();
        assert_eq!(p.pos, Vec2::new(100.0, 200.0));
        assert_eq!(p.life, 4);
    }

    #[test]
    fn fade_is_life_over_span() {
        let mut p = Particle::flame(Vec2::ZERO, Vec2::ZERO, 10.0, 20, FlameTint::Red);
        assert!((p.fade() - 0.5).abs() < 1e-6);
        p.life = 100;
        assert_eq!(p.fade(), 1.0);
        p.life = -3;
        assert_eq!(p.fade(), 0.0);
    }

    #[test]
    fn step_and_expire_removes_dead_particles_same_tick() {
        let mut pool = EntityPool::new(16, OverflowPolicy::EvictOldest);
        pool.spawn(Particle::bolt(Vec2::ZERO));
        let mut long_lived = Particle::bolt(Vec2::ONE);
        long_lived.life = 50;
        pool.spawn(long_lived);

        for _ in 0..4 {
            step_and_expire(&mut pool);
            assert_eq!(pool.len(), 2);
        }
        step_and_expire(&mut pool);
        assert_eq!(pool.len(), 1);
        assert!(pool.iter().all(|p| p.life > 0));
    }

    #[test]
    fn note_glyph_chars() {
        assert_eq!(NoteGlyph::Quaver.as_char(), '♪');
        assert_eq!(NoteGlyph::Beamed.as_char(), '♫');
    }
}

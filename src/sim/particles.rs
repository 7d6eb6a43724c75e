//! Short-lived visual particles (landing dust, milestone sparkles)

use glam::Vec2;
use rand::Rng;

/// Downward acceleration applied to particles each tick
const PARTICLE_GRAVITY: f32 = 0.3;

pub const DUST_COLOR: [u8; 3] = [139, 69, 19];
pub const SPARKLE_COLOR: [u8; 3] = [255, 215, 0];

pub const DUST_COUNT: usize = 6;
pub const SPARKLE_COUNT: usize = 10;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [u8; 3],
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    /// Advance one tick. Returns false once the particle has expired.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Opacity in 0..=1, fading with remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// Dust kicked up where the player lands
pub fn spawn_dust(particles: &mut Vec<Particle>, rng: &mut impl Rng, at: Vec2, count: usize) {
    for _ in 0..count {
        let life = rng.random_range(20..=40);
        particles.push(Particle {
            pos: at,
            vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-4.0..-1.0)),
            color: DUST_COLOR,
            life,
            max_life: life,
            size: 2.0,
        });
    }
}

/// Gold burst over the player's head on a score milestone
pub fn spawn_sparkles(particles: &mut Vec<Particle>, rng: &mut impl Rng, at: Vec2, count: usize) {
    for _ in 0..count {
        let life = rng.random_range(30..=60);
        particles.push(Particle {
            pos: at,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-5.0..-2.0)),
            color: SPARKLE_COLOR,
            life,
            max_life: life,
            size: rng.random_range(1..=3) as f32,
        });
    }
}

/// Advance all particles and drop expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| p.update());
}

//! Run state and core simulation types
//!
//! Everything a single run mutates lives in [`RunState`]. A new run builds a
//! fresh value; nothing carries over between runs.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use super::particles::Particle;
use super::player::Player;
use super::rect::Rect;
use crate::assets::{Sprite, SpriteCatalog};
use crate::consts::*;

/// Obstacle category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Sits on the ground; jump over it
    Ground,
    /// Hovers above the ground; slide under it
    Flying,
}

/// An active obstacle. The sprite (surface and mask) is shared with the
/// catalog and never changes; only the rectangle moves.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub sprite: Arc<Sprite>,
    pub rect: Rect,
}

impl Obstacle {
    /// Place an obstacle with its left edge at `x`. Vertical placement is
    /// fixed by the category.
    pub fn spawn(kind: ObstacleKind, sprite: Arc<Sprite>, x: i32) -> Self {
        let bottom = match kind {
            ObstacleKind::Ground => GROUND_Y,
            ObstacleKind::Flying => GROUND_Y - FLYING_HEIGHT,
        };
        let (w, h) = sprite.size();
        Self {
            kind,
            rect: Rect::from_bottom_left(x, bottom, w, h),
            sprite,
        }
    }
}

/// Score counter and milestone tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u64,
    /// Ticks since the last point
    pub timer: u32,
    /// Last milestone score that already fired feedback
    pub last_milestone: u64,
}

impl ScoreState {
    /// Advance one tick. Returns the new score if it just crossed into a
    /// milestone that has not fired yet.
    pub fn advance(&mut self) -> Option<u64> {
        self.timer += 1;
        if self.timer < TICKS_PER_POINT {
            return None;
        }
        self.timer = 0;
        self.score += 1;
        if self.score % MILESTONE_INTERVAL == 0 && self.score > self.last_milestone {
            self.last_milestone = self.score;
            return Some(self.score);
        }
        None
    }
}

/// Outcome of a run, handed to persistence when the player collides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub player_name: String,
    pub score: u64,
    pub level: u32,
    /// Ticks survived
    pub ticks: u64,
}

/// Something noteworthy that happened during a tick. Drained by the
/// session to drive audio and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    WallJumped,
    Landed,
    Milestone { score: u64 },
    LevelUp { level: u32 },
    GameOver { result: RunResult },
}

/// Running animation cursor. Lives with the run so the catalog stays
/// read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunAnimation {
    pub frame: usize,
    pub timer: u32,
}

impl RunAnimation {
    pub fn advance(&mut self, frame_count: usize) {
        self.timer += 1;
        if self.timer >= RUN_ANIMATION_TICKS {
            self.timer = 0;
            self.frame = (self.frame + 1) % frame_count.max(1);
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub player_name: String,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    pub difficulty: Difficulty,
    pub score: ScoreState,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub particles_enabled: bool,
    pub animation: RunAnimation,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once a collision ends the run
    pub finished: bool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl RunState {
    /// Fresh run for `player_name`. Player dimensions come from the catalog.
    pub fn new(player_name: impl Into<String>, catalog: &SpriteCatalog, seed: u64) -> Self {
        Self {
            player_name: player_name.into(),
            player: Player::new(catalog.player.standing_size(), catalog.player.slide_size()),
            obstacles: Vec::new(),
            spawn_timer: 0,
            difficulty: Difficulty::default(),
            score: ScoreState::default(),
            particles: Vec::new(),
            particles_enabled: true,
            animation: RunAnimation::default(),
            time_ticks: 0,
            finished: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_particles(mut self, enabled: bool) -> Self {
        self.particles_enabled = enabled;
        self
    }

    /// Snapshot the run for persistence
    pub fn result(&self) -> RunResult {
        RunResult {
            player_name: self.player_name.clone(),
            score: self.score.score,
            level: self.difficulty.level,
            ticks: self.time_ticks,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

//! Score-driven difficulty curve

use crate::consts::*;

/// Current difficulty. Only ever increases within a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    /// Obstacle speed in pixels per tick
    pub obstacle_speed: f32,
    /// Ticks between spawns
    pub spawn_interval: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::for_level(1)
    }
}

/// Level reached at `score`
pub fn level_for_score(score: u64) -> u32 {
    (score / POINTS_PER_LEVEL) as u32 + 1
}

impl Difficulty {
    /// Tuning for a given level (1-based)
    pub fn for_level(level: u32) -> Self {
        let steps = level.saturating_sub(1);
        Self {
            level: level.max(1),
            obstacle_speed: (BASE_OBSTACLE_SPEED + steps as f32 * OBSTACLE_SPEED_STEP)
                .min(MAX_OBSTACLE_SPEED),
            spawn_interval: BASE_SPAWN_INTERVAL
                .saturating_sub(steps.saturating_mul(SPAWN_INTERVAL_STEP))
                .max(MIN_SPAWN_INTERVAL),
        }
    }

    /// Re-evaluate from the current score. Returns the new level when it
    /// went up; a lower score never lowers the level.
    pub fn update(&mut self, score: u64) -> Option<u32> {
        let level = level_for_score(score);
        if level <= self.level {
            return None;
        }
        *self = Self::for_level(level);
        Some(level)
    }

    /// Whole pixels every obstacle moves per tick
    pub fn step_px(&self) -> i32 {
        self.obstacle_speed as i32
    }
}

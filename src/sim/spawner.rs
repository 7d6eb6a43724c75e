//! Obstacle spawning, movement and culling

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Obstacle, ObstacleKind};
use crate::assets::SpriteCatalog;
use crate::consts::*;

/// Advance the spawn timer. Once it passes `interval` the timer resets and
/// an obstacle is spawned at the right edge of the play area (if the
/// catalog has any sprite to use).
pub fn advance_spawner(
    timer: &mut u32,
    interval: u32,
    rng: &mut impl Rng,
    catalog: &SpriteCatalog,
) -> Option<Obstacle> {
    *timer += 1;
    if *timer <= interval {
        return None;
    }
    *timer = 0;
    spawn_obstacle(rng, catalog)
}

/// Choose a category and sprite and place a new obstacle off the right edge
pub fn spawn_obstacle(rng: &mut impl Rng, catalog: &SpriteCatalog) -> Option<Obstacle> {
    let roll: f32 = rng.random();
    let (kind, pool) = if roll < FLYING_PROBABILITY && !catalog.flying.is_empty() {
        (ObstacleKind::Flying, &catalog.flying)
    } else {
        (ObstacleKind::Ground, &catalog.ground)
    };
    let sprite = pool.choose(rng)?;
    log::debug!("Spawned {:?} obstacle", kind);
    Some(Obstacle::spawn(kind, sprite.clone(), SCREEN_WIDTH))
}

/// Shift every obstacle left by `step` pixels
pub fn move_obstacles(obstacles: &mut [Obstacle], step: i32) {
    for obstacle in obstacles {
        obstacle.rect.x -= step;
    }
}

/// Drop obstacles that have scrolled off the left edge, keeping spawn order
pub fn purge_offscreen(obstacles: &mut Vec<Obstacle>) {
    obstacles.retain(|o| o.rect.x > OBSTACLE_PURGE_X);
}

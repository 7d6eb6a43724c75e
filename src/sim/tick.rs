//! Fixed timestep simulation tick
//!
//! One call advances a run by one frame. The step order is fixed:
//! input, difficulty, slide timer, gravity, ground, wall, spawn, move,
//! collide, purge, score, particles.

use glam::Vec2;

use super::collision::first_collision;
use super::particles::{DUST_COUNT, SPARKLE_COUNT, spawn_dust, spawn_sparkles, update_particles};
use super::player::{JumpKind, PlayerState};
use super::spawner::{advance_spawner, move_obstacles, purge_offscreen};
use super::state::{GameEvent, RunResult, RunState};
use crate::assets::SpriteCatalog;
use crate::consts::*;

/// Discrete inputs delivered since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub slide: bool,
}

/// Whether the run continues after this tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// The player collided; the run is over
    GameOver(RunResult),
}

/// Apply key presses to the player
fn apply_input(state: &mut RunState, input: &TickInput) {
    if input.jump {
        match state.player.try_jump() {
            Some(JumpKind::Ground) => state.events.push(GameEvent::Jumped),
            Some(JumpKind::Wall) => state.events.push(GameEvent::WallJumped),
            None => {}
        }
    }
    if input.slide {
        state.player.try_slide();
    }
}

/// Advance the run by one tick
pub fn tick(state: &mut RunState, catalog: &SpriteCatalog, input: &TickInput) -> TickStatus {
    if state.finished {
        return TickStatus::GameOver(state.result());
    }

    apply_input(state, input);
    state.time_ticks += 1;

    if let Some(level) = state.difficulty.update(state.score.score) {
        log::debug!(
            "Level {} (speed {}, spawn every {} ticks)",
            level,
            state.difficulty.obstacle_speed,
            state.difficulty.spawn_interval
        );
        state.events.push(GameEvent::LevelUp { level });
    }

    // Player physics
    state.player.advance_slide_timer();
    state.player.apply_gravity();
    if state.player.resolve_ground(GROUND_Y) {
        let body = state.player.rect();
        if state.particles_enabled {
            let at = Vec2::new(body.centerx() as f32, GROUND_Y as f32);
            spawn_dust(&mut state.particles, &mut state.rng, at, DUST_COUNT);
        }
        state.events.push(GameEvent::Landed);
    }
    state.player.resolve_wall(SCREEN_WIDTH);

    // Obstacles
    let interval = state.difficulty.spawn_interval;
    if let Some(obstacle) =
        advance_spawner(&mut state.spawn_timer, interval, &mut state.rng, catalog)
    {
        state.obstacles.push(obstacle);
    }
    move_obstacles(&mut state.obstacles, state.difficulty.step_px());

    if let Some(index) = first_collision(&state.player, &state.obstacles) {
        let result = state.result();
        log::info!(
            "{} hit a {:?} obstacle: score {} at level {}",
            result.player_name,
            state.obstacles[index].kind,
            result.score,
            result.level
        );
        state.finished = true;
        state.events.push(GameEvent::GameOver {
            result: result.clone(),
        });
        return TickStatus::GameOver(result);
    }
    purge_offscreen(&mut state.obstacles);

    // Score
    if let Some(score) = state.score.advance() {
        if state.particles_enabled {
            let body = state.player.rect();
            let at = Vec2::new(body.centerx() as f32, body.top() as f32);
            spawn_sparkles(&mut state.particles, &mut state.rng, at, SPARKLE_COUNT);
        }
        state.events.push(GameEvent::Milestone { score });
    }

    // Effects
    update_particles(&mut state.particles);
    if state.player.state == PlayerState::Running && !state.player.is_jumping {
        state.animation.advance(catalog.player.run_frames.len());
    }

    TickStatus::Running
}

//! Attract-mode pilot
//!
//! Looks at the nearest obstacle still ahead of the player and decides
//! whether to jump or slide this tick. Good enough for demos, not perfect.

use super::collision::hitbox;
use super::player::PlayerState;
use super::state::{ObstacleKind, RunState};
use super::tick::TickInput;

/// Ticks of lead time before a ground obstacle reaches the hitbox
const JUMP_LEAD_TICKS: i32 = 4;
/// Ticks of lead time before a flying obstacle reaches the hitbox
const SLIDE_LEAD_TICKS: i32 = 3;

/// Choose inputs for the next tick
pub fn autopilot(state: &RunState) -> TickInput {
    let mut input = TickInput::default();
    let player = &state.player;
    let hb = hitbox(player);
    let speed = state.difficulty.step_px().max(1);

    let Some(next) = state
        .obstacles
        .iter()
        .filter(|o| o.rect.right() > hb.left())
        .min_by_key(|o| o.rect.left())
    else {
        return input;
    };

    let gap = next.rect.left() - hb.right();
    match next.kind {
        ObstacleKind::Ground => {
            if !player.is_jumping
                && player.state != PlayerState::Sliding
                && (0..=speed * JUMP_LEAD_TICKS).contains(&gap)
            {
                input.jump = true;
            }
        }
        ObstacleKind::Flying => {
            if !player.is_jumping && gap <= speed * SLIDE_LEAD_TICKS {
                input.slide = true;
            }
        }
    }
    input
}

//! Player body and movement state machine
//!
//! ```text
//! Running --jump--> Jumping --ground--> Running
//!                   Jumping --right wall, falling--> WallSliding
//! WallSliding --wall jump--> Jumping
//! WallSliding --timer--> Jumping | Running
//! Running/Jumping --slide (grounded)--> Sliding --timer--> Jumping | Running
//! ```
//!
//! `is_jumping` tracks whether the body is airborne and is kept separately
//! from [`PlayerState`]; a wall-slide that reaches the ground keeps its state
//! until the timer runs out.

use super::rect::Rect;
use crate::consts::*;

/// Current movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Running,
    Jumping,
    Sliding,
    WallSliding,
}

/// Which jump a jump input produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall,
}

/// The player's body
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge of the lane (constant during a run)
    pub lane_x: i32,
    /// Top edge (sub-pixel)
    pub y: f32,
    /// Vertical velocity, positive is downward
    pub vel_y: f32,
    pub state: PlayerState,
    /// Airborne flag
    pub is_jumping: bool,
    pub slide_timer: u32,
    pub wall_slide_timer: u32,
    pub wall_jump_available: bool,
    /// Body size while upright
    pub standing_size: (i32, i32),
    /// Body size while sliding
    pub slide_size: (i32, i32),
}

impl Player {
    /// Player standing on the ground in the default lane
    pub fn new(standing_size: (i32, i32), slide_size: (i32, i32)) -> Self {
        Self {
            lane_x: PLAYER_X,
            y: (GROUND_Y - standing_size.1) as f32,
            vel_y: 0.0,
            state: PlayerState::Running,
            is_jumping: false,
            slide_timer: 0,
            wall_slide_timer: 0,
            wall_jump_available: false,
            standing_size,
            slide_size,
        }
    }

    /// Body size for the current state
    pub fn size(&self) -> (i32, i32) {
        match self.state {
            PlayerState::Sliding => self.slide_size,
            _ => self.standing_size,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.size().1 as f32
    }

    /// Bounding rectangle in whole pixels
    pub fn rect(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(self.lane_x, self.y.round() as i32, w, h)
    }

    /// Switch state keeping the bottom edge where it is
    fn set_state(&mut self, state: PlayerState) {
        let bottom = self.bottom();
        self.state = state;
        self.y = bottom - self.size().1 as f32;
    }

    /// Handle a jump key. Grounded players jump; a wall-sliding player gets
    /// one weaker wall jump per wall-slide. Anything else is ignored.
    pub fn try_jump(&mut self) -> Option<JumpKind> {
        if self.state == PlayerState::Sliding {
            return None;
        }
        if !self.is_jumping {
            self.vel_y = JUMP_VELOCITY;
            self.is_jumping = true;
            self.set_state(PlayerState::Jumping);
            Some(JumpKind::Ground)
        } else if self.wall_jump_available && self.state == PlayerState::WallSliding {
            self.vel_y = WALL_JUMP_VELOCITY;
            self.wall_jump_available = false;
            self.set_state(PlayerState::Jumping);
            Some(JumpKind::Wall)
        } else {
            None
        }
    }

    /// Handle a slide key. Only grounded, non-sliding players slide.
    pub fn try_slide(&mut self) -> bool {
        if self.is_jumping || self.state == PlayerState::Sliding {
            return false;
        }
        self.slide_timer = SLIDE_TICKS;
        self.set_state(PlayerState::Sliding);
        true
    }

    /// Count down an active slide and stand back up when it ends
    pub fn advance_slide_timer(&mut self) {
        if self.state != PlayerState::Sliding {
            return;
        }
        self.slide_timer = self.slide_timer.saturating_sub(1);
        if self.slide_timer == 0 {
            self.set_state(self.airborne_state());
        }
    }

    /// Apply gravity for one tick and integrate the vertical position.
    /// Wall-sliding falls slowly and counts down its own timer.
    pub fn apply_gravity(&mut self) {
        if self.state == PlayerState::WallSliding {
            self.vel_y += WALL_SLIDE_GRAVITY;
            self.wall_slide_timer = self.wall_slide_timer.saturating_sub(1);
            if self.wall_slide_timer == 0 {
                self.wall_jump_available = false;
                self.set_state(self.airborne_state());
            }
        } else {
            self.vel_y += GRAVITY;
        }
        self.y += self.vel_y;
    }

    /// Clamp to the ground. Returns true on the tick an airborne player lands.
    pub fn resolve_ground(&mut self, ground_y: i32) -> bool {
        if self.bottom() < ground_y as f32 {
            return false;
        }
        let landed = self.is_jumping;
        self.y = (ground_y - self.size().1) as f32;
        self.vel_y = 0.0;
        self.is_jumping = false;
        if self.state == PlayerState::Jumping {
            self.state = PlayerState::Running;
        }
        landed
    }

    /// Enter a wall-slide when falling against the right edge of the play
    /// area. Returns true when a wall-slide begins.
    pub fn resolve_wall(&mut self, play_width: i32) -> bool {
        let touching = self.rect().right() >= play_width - WALL_MARGIN;
        if !(self.is_jumping && touching && self.vel_y > 0.0) {
            return false;
        }
        if self.state == PlayerState::WallSliding {
            return false;
        }
        self.set_state(PlayerState::WallSliding);
        self.wall_slide_timer = WALL_SLIDE_TICKS;
        self.wall_jump_available = true;
        self.vel_y = self.vel_y.min(WALL_SLIDE_ENTRY_SPEED);
        true
    }

    /// State to resume when a timed state ends
    fn airborne_state(&self) -> PlayerState {
        if self.is_jumping {
            PlayerState::Jumping
        } else {
            PlayerState::Running
        }
    }
}

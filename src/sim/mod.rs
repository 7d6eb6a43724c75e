//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, fixed order
//! - Seeded RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod mask;
pub mod particles;
pub mod player;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{first_collision, hitbox};
pub use difficulty::{Difficulty, level_for_score};
pub use mask::Mask;
pub use particles::Particle;
pub use player::{JumpKind, Player, PlayerState};
pub use rect::Rect;
pub use state::{GameEvent, Obstacle, ObstacleKind, RunResult, RunState, ScoreState};
pub use tick::{TickInput, TickStatus, tick};

//! Super Maro - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (player state machine, obstacles, collisions)
//! - `assets`: Sprite catalog with alpha-derived collision masks
//! - `renderer`: Draw lists and a software compositor
//! - `platform`: Key events and fixed-step timing
//! - `persistence`: Score storage behind a fallible trait
//! - `ui`: Menu, dashboard and run session flow

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use assets::SpriteCatalog;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical play area
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 400;
    /// Y coordinate of the running surface
    pub const GROUND_Y: i32 = 325;

    /// Player defaults
    pub const PLAYER_HEIGHT: i32 = SCREEN_HEIGHT / 4;
    /// Left edge of the player's lane
    pub const PLAYER_X: i32 = 100;
    /// Slide sprite height relative to the player
    pub const SLIDE_HEIGHT_RATIO: f32 = 0.6;
    /// Run animation advances one frame every N ticks
    pub const RUN_ANIMATION_TICKS: u32 = 8;

    /// Vertical motion (pixels/tick, y grows downward)
    pub const GRAVITY: f32 = 1.0;
    pub const WALL_SLIDE_GRAVITY: f32 = 0.3;
    /// Fall speed cap applied when a wall-slide begins
    pub const WALL_SLIDE_ENTRY_SPEED: f32 = 2.0;
    pub const JUMP_VELOCITY: f32 = -16.0;
    pub const WALL_JUMP_VELOCITY: f32 = -14.0;
    /// Distance from the right edge that counts as wall contact
    pub const WALL_MARGIN: i32 = 10;
    pub const SLIDE_TICKS: u32 = 30;
    pub const WALL_SLIDE_TICKS: u32 = 60;

    /// Difficulty curve
    pub const POINTS_PER_LEVEL: u64 = 100;
    pub const BASE_OBSTACLE_SPEED: f32 = 5.0;
    pub const OBSTACLE_SPEED_STEP: f32 = 1.5;
    pub const MAX_OBSTACLE_SPEED: f32 = 12.0;
    pub const BASE_SPAWN_INTERVAL: u32 = 60;
    pub const SPAWN_INTERVAL_STEP: u32 = 5;
    pub const MIN_SPAWN_INTERVAL: u32 = 25;

    /// Obstacles
    pub const FLYING_PROBABILITY: f32 = 0.4;
    /// Gap between the ground and a flying obstacle's bottom edge
    pub const FLYING_HEIGHT: i32 = PLAYER_HEIGHT / 2;
    pub const GROUND_OBSTACLE_SCALE: f32 = 0.48;
    pub const FLYING_OBSTACLE_SCALE: f32 = 0.5;
    /// Obstacles at or left of this x are purged
    pub const OBSTACLE_PURGE_X: i32 = -50;

    /// Scoring
    pub const TICKS_PER_POINT: u32 = 5;
    pub const MILESTONE_INTERVAL: u64 = 10;

    /// Player name entry
    pub const MAX_NAME_LEN: usize = 12;
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
    /// Entries shown on the dashboard
    pub const LEADERBOARD_SIZE: usize = 10;
}

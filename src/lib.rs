//! Brickfall - a brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Game rules (state machine, contact resolution, scoring, power-ups)
//! - `physics`: Boundary trait for the hosting 2D physics/rendering engine
//! - `config`: Data-driven gameplay tuning
//!
//! The crate owns the rules; the hosting engine owns velocity integration,
//! broad-phase collision detection and presentation. Contacts, frames and
//! taps flow in through [`sim::GameSession`], body mutations flow out through
//! [`physics::PhysicsWorld`], and change notifications for a presentation
//! layer are drained from the session's [`sim::GameEvent`] queue.

pub mod config;
pub mod physics;
pub mod sim;

pub use config::{GameConfig, Ruleset};

/// Gameplay defaults. [`GameConfig`] starts from these; tests override them
/// with deterministic values.
pub mod consts {
    /// Arena dimensions (points, origin bottom-left, y up)
    pub const ARENA_WIDTH: f32 = 480.0;
    pub const ARENA_HEIGHT: f32 = 640.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    /// Paddle center height above the arena floor
    pub const PADDLE_Y: f32 = 40.0;
    /// Width floor below which PaddleShrink stops applying
    pub const PADDLE_MIN_WIDTH: f32 = 40.0;
    /// PaddleGrow is skipped once the resulting width would reach this
    /// fraction of the arena width
    pub const PADDLE_MAX_WIDTH_FRAC: f32 = 0.4;
    pub const PADDLE_GROW_FACTOR: f32 = 1.25;
    pub const PADDLE_SHRINK_FACTOR: f32 = 0.75;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_LAUNCH_SPEED: f32 = 260.0;
    pub const BALL_SPEED_UP_FACTOR: f32 = 1.25;
    pub const BALL_SPEED_DOWN_FACTOR: f32 = 0.75;

    /// Block grid
    pub const BLOCK_WIDTH: f32 = 48.0;
    pub const BLOCK_HEIGHT: f32 = 16.0;
    /// Top row sits at this fraction of arena height; rows stack downward
    pub const BLOCK_TOP_FRAC: f32 = 0.85;
    pub const MIN_ROWS: u32 = 10;
    pub const MAX_ROWS: u32 = 15;
    pub const MIN_BLOCKS_PER_ROW: u32 = 1;
    pub const MAX_BLOCKS_PER_ROW: u32 = 7;

    /// Scoring and lives
    pub const SCORE_PER_BLOCK: u32 = 100;
    pub const STARTING_LIVES: u32 = 3;

    /// Power-ups
    pub const DROP_CHANCE_PERCENT: u32 = 10;
    pub const POWER_UP_SIZE: f32 = 24.0;
    pub const POWER_UP_FALL_SPEED: f32 = 500.0;

    /// Post-life-loss grace window (seconds)
    pub const INVULNERABILITY_SECS: f32 = 3.0;

    /// Game-over presentation physics: gravity engages and the ball is
    /// damped to a near-stop once the session ends.
    pub const GAME_OVER_GRAVITY_Y: f32 = -9.8;
    pub const GAME_OVER_BALL_DAMPING: f32 = 1.0;
}

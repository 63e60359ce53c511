//! Data-driven gameplay tuning.
//!
//! Every knob the rules read lives here rather than as a literal at the use
//! site, so tests can pin deterministic values and hosts can ship tweaked
//! balance without recompiling.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which rule variant a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ruleset {
    /// Canonical rules: lives, an invulnerability window and power-ups.
    #[default]
    Arcade,
    /// Reduced rules: no power-ups, no lives - the first ball loss ends the
    /// session.
    Basic,
}

/// Gameplay configuration. Defaults mirror [`crate::consts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ruleset: Ruleset,

    // Arena
    pub arena_width: f32,
    pub arena_height: f32,

    // Paddle
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_min_width: f32,
    pub paddle_max_width_frac: f32,
    pub paddle_grow_factor: f32,
    pub paddle_shrink_factor: f32,

    // Ball
    pub ball_radius: f32,
    pub ball_launch_speed: f32,
    pub ball_speed_up_factor: f32,
    pub ball_speed_down_factor: f32,

    // Block grid
    pub block_width: f32,
    pub block_height: f32,
    pub min_rows: u32,
    pub max_rows: u32,
    pub min_blocks_per_row: u32,
    pub max_blocks_per_row: u32,

    // Scoring and lives
    pub score_per_block: u32,
    pub starting_lives: u32,

    // Power-ups
    pub drop_chance_percent: u32,
    pub power_up_fall_speed: f32,

    // Grace window
    pub invulnerability_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Arcade,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_min_width: PADDLE_MIN_WIDTH,
            paddle_max_width_frac: PADDLE_MAX_WIDTH_FRAC,
            paddle_grow_factor: PADDLE_GROW_FACTOR,
            paddle_shrink_factor: PADDLE_SHRINK_FACTOR,
            ball_radius: BALL_RADIUS,
            ball_launch_speed: BALL_LAUNCH_SPEED,
            ball_speed_up_factor: BALL_SPEED_UP_FACTOR,
            ball_speed_down_factor: BALL_SPEED_DOWN_FACTOR,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            min_rows: MIN_ROWS,
            max_rows: MAX_ROWS,
            min_blocks_per_row: MIN_BLOCKS_PER_ROW,
            max_blocks_per_row: MAX_BLOCKS_PER_ROW,
            score_per_block: SCORE_PER_BLOCK,
            starting_lives: STARTING_LIVES,
            drop_chance_percent: DROP_CHANCE_PERCENT,
            power_up_fall_speed: POWER_UP_FALL_SPEED,
            invulnerability_secs: INVULNERABILITY_SECS,
        }
    }
}

impl GameConfig {
    /// Default configuration for the reduced [`Ruleset::Basic`] variant.
    pub fn basic() -> Self {
        Self {
            ruleset: Ruleset::Basic,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_consts() {
        let config = GameConfig::default();
        assert_eq!(config.ruleset, Ruleset::Arcade);
        assert_eq!(config.starting_lives, STARTING_LIVES);
        assert_eq!(config.drop_chance_percent, 10);
        assert_eq!(config.score_per_block, 100);
        assert!((config.invulnerability_secs - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"starting_lives": 5, "ruleset": "Basic"}"#)
            .expect("valid json");
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.ruleset, Ruleset::Basic);
        assert_eq!(config.max_rows, MAX_ROWS);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::basic();
        let json = serde_json::to_string(&config).expect("serialize");
        let back = GameConfig::from_json(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}

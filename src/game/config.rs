use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::particles::ParticleConfig;

/// Player-tunable values read from the config file
///
/// Any value that differs from its default turns on cheat mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    /// Milliseconds between snake moves
    pub snake_speed_ms: u64,
    /// Segments gained per food
    pub length_increment: usize,
    /// Points gained per food
    pub score_increment: u32,
    /// Length after a (re)start
    pub starting_length: usize,
    pub disable_wall_collision: bool,
    /// When false the snake may pass through its own body
    pub fix_self_collision: bool,
    /// When true food is never eaten nor purged
    pub disable_food_collision: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            snake_speed_ms: 100,
            length_increment: 1,
            score_increment: 1,
            starting_length: 1,
            disable_wall_collision: false,
            fix_self_collision: true,
            disable_food_collision: false,
        }
    }
}

impl Tuning {
    pub fn is_cheat(&self) -> bool {
        *self != Self::default()
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Screen width in pixels
    pub width: i32,
    /// Screen height in pixels
    pub height: i32,
    /// Edge of one grid tile in pixels
    pub tile_size: i32,
    /// Minimum milliseconds between two accepted direction changes
    pub move_delay_ms: u64,
    /// Frame rate of the outer loop
    pub fps: u32,
    /// Foods on the board at session start
    pub initial_food: usize,
    /// Range the per-level batch multiplier is drawn from
    pub food_batch: RangeInclusive<usize>,
    /// Most foods allowed right after a restart
    pub restart_food_cap: usize,
    pub particles: ParticleConfig,
    pub tuning: Tuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 650,
            tile_size: 20,
            move_delay_ms: 80,
            fps: 60,
            initial_food: 5,
            food_batch: 4..=15,
            restart_food_cap: 15,
            particles: ParticleConfig::default(),
            tuning: Tuning::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom screen size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (800, 650));
        assert_eq!(config.tile_size, 20);
        assert_eq!(config.move_delay_ms, 80);
        assert_eq!(config.tuning.snake_speed_ms, 100);
        assert_eq!(config.frame_interval_ms(), 16);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(400, 300);
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 300);
        assert_eq!(config.tile_size, 20);
    }

    #[test]
    fn test_cheat_detection() {
        assert!(!Tuning::default().is_cheat());

        let faster = Tuning {
            snake_speed_ms: 60,
            ..Default::default()
        };
        assert!(faster.is_cheat());

        let ghost = Tuning {
            fix_self_collision: false,
            ..Default::default()
        };
        assert!(ghost.is_cheat());
    }
}

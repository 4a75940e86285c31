use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at construction time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("screen dimensions must be positive, got {width}x{height}")]
    Screen { width: f32, height: f32 },
    #[error("gap floor {min} must be positive and below the starting gap {start}")]
    GapBounds { min: f32, start: f32 },
    #[error("gap of {gap} cannot fit between {margin} margins on a {height} screen")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },
    #[error("pipe spawn interval must be at least 1 tick")]
    ZeroSpawnInterval,
    #[error("pipe speed must start positive, got {0}")]
    NonPositiveSpeed(f32),
    #[error("{name} must be non-negative, got {value}")]
    NegativeIncrement { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositiveSize { name: &'static str, value: f32 },
}

/// Configuration for the game
///
/// All tunables are per-tick quantities; the simulation has no wall-clock
/// timestep of its own. Defaults reproduce the classic feel: a 480x640
/// screen, a 38px square at quarter-screen, and a gap that shrinks from
/// 170 down to a 100px floor as the score climbs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Velocity assigned on flap (negative = upward)
    pub flap_impulse: f32,
    /// Side length of the player square
    pub square_size: f32,

    /// Horizontal pipe speed at episode start
    pub pipe_speed_start: f32,
    /// Speed added per pipe passed
    pub pipe_speed_increment: f32,
    /// Gap height at episode start
    pub gap_start: f32,
    /// Minimum gap height (difficulty cap)
    pub gap_min: f32,
    /// Gap shrink per pipe passed
    pub gap_decrement: f32,
    /// Vertical margin the gap must keep from both screen edges
    pub gap_margin: f32,
    /// Ticks between pipe spawns
    pub pipe_interval_ticks: u32,
    /// Width of each pipe pair
    pub pipe_width: f32,

    // Rewards (for programmatic control)
    /// Reward for passing a pipe
    pub pass_reward: f32,
    /// Penalty for each tick survived (encourages speed)
    pub step_penalty: f32,
    /// Reward forced on the colliding tick
    pub collision_penalty: f32,
    /// Scale of the gap-center proximity shaping term
    pub shaping_scale: f32,
    /// Velocity normalization divisor for observations
    pub velocity_scale: f32,

    /// Truncate episodes after this many ticks (None = never)
    pub max_episode_ticks: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 480.0,
            screen_height: 640.0,
            gravity: 0.35,
            flap_impulse: -7.5,
            square_size: 38.0,
            pipe_speed_start: 3.0,
            pipe_speed_increment: 0.15,
            gap_start: 170.0,
            gap_min: 100.0,
            gap_decrement: 4.0,
            gap_margin: 60.0,
            pipe_interval_ticks: 90,
            pipe_width: 60.0,
            pass_reward: 1.0,
            step_penalty: -0.01,
            collision_penalty: -1.0,
            shaping_scale: 0.1,
            velocity_scale: 10.0,
            max_episode_ticks: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom screen size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Default::default()
        }
    }

    /// The square's fixed horizontal position
    pub fn entity_x(&self) -> f32 {
        self.screen_width / 4.0
    }

    /// Check the tunables for contradictions
    ///
    /// Anything that would make the mid-episode uniform draw or the
    /// observation rescale degenerate is rejected here, so nothing past
    /// construction can fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::Screen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.gap_min <= 0.0 || self.gap_min >= self.gap_start {
            return Err(ConfigError::GapBounds {
                min: self.gap_min,
                start: self.gap_start,
            });
        }
        if self.gap_start + 2.0 * self.gap_margin > self.screen_height {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap_start,
                margin: self.gap_margin,
                height: self.screen_height,
            });
        }
        if self.pipe_interval_ticks == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.pipe_speed_start <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.pipe_speed_start));
        }
        for (name, value) in [
            ("pipe_speed_increment", self.pipe_speed_increment),
            ("gap_decrement", self.gap_decrement),
            ("gap_margin", self.gap_margin),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeIncrement { name, value });
            }
        }
        for (name, value) in [
            ("square_size", self.square_size),
            ("pipe_width", self.pipe_width),
            ("velocity_scale", self.velocity_scale),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveSize { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.screen_width, 480.0);
        assert_eq!(config.screen_height, 640.0);
        assert_eq!(config.entity_x(), 120.0);
    }

    #[test]
    fn test_custom_screen_size() {
        let config = GameConfig::new(800.0, 600.0);
        assert_eq!(config.screen_width, 800.0);
        assert_eq!(config.screen_height, 600.0);
        // Remaining tunables keep their defaults
        assert_eq!(config.gravity, 0.35);
    }

    #[test]
    fn test_gap_floor_above_start_rejected() {
        let config = GameConfig {
            gap_min: 200.0,
            gap_start: 170.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GapBounds {
                min: 200.0,
                start: 170.0
            })
        );
    }

    #[test]
    fn test_gap_wider_than_screen_rejected() {
        let config = GameConfig {
            gap_start: 600.0,
            gap_margin: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = GameConfig {
            pipe_interval_ticks: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn test_negative_decrement_rejected() {
        let config = GameConfig {
            gap_decrement: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeIncrement { .. })
        ));
    }
}

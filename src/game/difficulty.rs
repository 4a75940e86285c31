//! Difficulty escalation: called exactly once per pipe passed

use super::config::GameConfig;

/// Speed up the pipes and shrink the gap, clamped at the configured floor
///
/// Never reversed within an episode; a fresh [`GameState`] resets both
/// values at episode start.
///
/// [`GameState`]: super::state::GameState
pub fn on_score(pipe_speed: &mut f32, gap_height: &mut f32, config: &GameConfig) {
    *pipe_speed += config.pipe_speed_increment;
    *gap_height = config.gap_min.max(*gap_height - config.gap_decrement);
}

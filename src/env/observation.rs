use crate::game::{GameConfig, GameState};

/// Number of components in an observation vector
pub const OBSERVATION_SIZE: usize = 4;

/// Encode the current state as a 4-component feature vector
///
/// Components, each normalized to roughly `[-1, 1]`:
/// - 0: vertical distance from the square to the nearest upcoming gap
///   center, over half the screen height (0.0 with no pipe on screen)
/// - 1: horizontal distance to that pipe's trailing edge, over the screen
///   width (1.0 with no pipe on screen)
/// - 2: vertical velocity over the velocity scale
/// - 3: that pipe's gap height rescaled from `[gap_min, gap_start]` to
///   `[0, 1]` (the ambient gap height with no pipe on screen)
pub fn observe(state: &GameState, config: &GameConfig) -> [f32; OBSERVATION_SIZE] {
    let (vertical, horizontal, gap_height) = match state.next_pipe() {
        Some(pipe) => (
            state.square.y - pipe.gap_center(),
            pipe.trailing_edge() - state.square.x,
            pipe.gap_height,
        ),
        None => (0.0, state.screen_width, state.gap_height),
    };

    [
        vertical / (state.screen_height / 2.0),
        horizontal / state.screen_width,
        state.square.vel / config.velocity_scale,
        (gap_height - config.gap_min) / (config.gap_start - config.gap_min),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PipePair;

    #[test]
    fn test_observation_without_pipes() {
        let config = GameConfig::default();
        let state = GameState::new(&config);

        let obs = observe(&state, &config);

        // Centered square, no velocity, ambient gap at its starting value
        assert_eq!(obs, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_observation_tracks_nearest_pipe() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.pipes = vec![PipePair::new(300.0, 200.0, 170.0, 60.0)];

        let obs = observe(&state, &config);

        // Square top at 320, gap center at 285
        assert_eq!(obs[0], (320.0 - 285.0) / 320.0);
        // Trailing edge 360, square at 120
        assert_eq!(obs[1], (360.0 - 120.0) / 480.0);
        assert_eq!(obs[2], 0.0);
        assert_eq!(obs[3], 1.0);
    }

    #[test]
    fn test_observation_ignores_passed_pipes() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.pipes = vec![
            PipePair::new(20.0, 100.0, 170.0, 60.0), // trailing edge behind the square
            PipePair::new(400.0, 200.0, 170.0, 60.0),
        ];

        let obs = observe(&state, &config);

        assert_eq!(obs[1], (460.0 - 120.0) / 480.0);
    }

    #[test]
    fn test_velocity_component() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);

        state.square.vel = config.flap_impulse;
        let obs = observe(&state, &config);
        assert_eq!(obs[2], -0.75);

        state.square.vel = 5.0;
        let obs = observe(&state, &config);
        assert_eq!(obs[2], 0.5);
    }

    #[test]
    fn test_gap_component_rescales_to_unit_interval() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);

        // A pipe frozen at the minimum gap reads as 0.0
        state.pipes = vec![PipePair::new(300.0, 200.0, config.gap_min, 60.0)];
        let obs = observe(&state, &config);
        assert_eq!(obs[3], 0.0);

        // Halfway between floor and start reads as 0.5
        let halfway = (config.gap_min + config.gap_start) / 2.0;
        state.pipes = vec![PipePair::new(300.0, 200.0, halfway, 60.0)];
        let obs = observe(&state, &config);
        assert_eq!(obs[3], 0.5);
    }

    #[test]
    fn test_ambient_gap_used_when_no_pipe_upcoming() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.gap_height = 135.0; // (135 - 100) / 70 = 0.5

        let obs = observe(&state, &config);
        assert_eq!(obs[3], 0.5);
    }

    #[test]
    fn test_square_above_gap_center_reads_negative() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.pipes = vec![PipePair::new(300.0, 400.0, 170.0, 60.0)]; // gap center 485
        state.square.y = 100.0;

        let obs = observe(&state, &config);
        assert!(obs[0] < 0.0);
    }
}

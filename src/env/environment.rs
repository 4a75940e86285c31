use log::debug;

use super::observation::{observe, OBSERVATION_SIZE};
use crate::game::{Action, ConfigError, GameConfig, GameEngine, GameState, StepError};

/// Per-episode information handed back alongside observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeInfo {
    /// Current episode score
    pub score: u32,
}

/// Outcome of stepping the environment
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Observation after the step
    pub observation: [f32; OBSERVATION_SIZE],
    /// Reward for this step
    pub reward: f32,
    /// Whether the square collided this step
    pub terminated: bool,
    /// Whether the episode hit the configured tick limit
    pub truncated: bool,
    /// Additional information about the step
    pub info: EpisodeInfo,
}

/// Flappy-Square environment for programmatic control
///
/// Wraps the game engine behind a reset/step/observe contract:
/// - 4-component normalized observations
/// - discrete action space (0: do nothing, 1: flap)
/// - seedable reset for deterministic replay
///
/// Rendering is a separate, optional consumer: it may read
/// [`FlappyEnv::state`] between steps and must not mutate it. Headless
/// operation is the default.
pub struct FlappyEnv {
    engine: GameEngine,
    state: GameState,
}

impl FlappyEnv {
    /// Create an environment, validating the configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset(None);
        Ok(Self { engine, state })
    }

    /// Reset the episode and return the initial observation
    ///
    /// `Some(seed)` makes the episode deterministic; `None` continues the
    /// engine's current random stream.
    pub fn reset(&mut self, seed: Option<u64>) -> ([f32; OBSERVATION_SIZE], EpisodeInfo) {
        self.state = self.engine.reset(seed);
        (self.observation(), EpisodeInfo { score: 0 })
    }

    /// Step the environment with a game action
    ///
    /// Fails with [`StepError::EpisodeOver`] when called after the
    /// terminal or truncating step without an intervening reset.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome, StepError> {
        let result = self.engine.step(&mut self.state, action)?;

        if result.terminated || result.truncated {
            debug!(
                "episode finished: score {}, reward {:+.2}",
                result.info.score, result.reward
            );
        }

        Ok(StepOutcome {
            observation: self.observation(),
            reward: result.reward,
            terminated: result.terminated,
            truncated: result.truncated,
            info: EpisodeInfo {
                score: result.info.score,
            },
        })
    }

    /// Step with a discrete action index (0: do nothing, 1: flap)
    pub fn step_index(&mut self, action_idx: usize) -> Result<StepOutcome, StepError> {
        self.step(crate::game::action_from_index(action_idx))
    }

    /// Encode the current observation without stepping
    pub fn observation(&self) -> [f32; OBSERVATION_SIZE] {
        observe(&self.state, self.engine.config())
    }

    /// Read access to the episode state, for renderers and debugging
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Release presentation resources
    ///
    /// The environment itself holds none (rendering is an external
    /// consumer), so this is a no-op kept for interface symmetry.
    pub fn close(&mut self) {}
}

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use super::action::Action;
use super::collision;
use super::config::{ConfigError, GameConfig};
use super::difficulty;
use super::pipes;
use super::state::{GameState, Phase};

/// Contract violation on the step interface.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// The episode already ended; the state must be reset before stepping.
    #[error("episode is over; call reset before stepping again")]
    EpisodeOver,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    /// Episode score after this step
    pub score: u32,
    /// Pipes passed during this step
    pub pipes_passed: u32,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for programmatic control)
    pub reward: f32,
    /// Whether the square collided this step
    pub terminated: bool,
    /// Whether the episode hit the configured tick limit
    pub truncated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that advances episodes one fixed timestep at a time
///
/// Owns the config and the only source of randomness (the gap offset
/// draw). Seeding the generator via [`GameEngine::reset`] makes a whole
/// episode bit-reproducible for a fixed action sequence. Episode state
/// lives outside the engine and is borrowed for one call at a time, so a
/// single engine can drive states for interactive play and programmatic
/// stepping alike.
pub struct GameEngine {
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Create an engine, rejecting contradictory tunables up front
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh episode
    ///
    /// `Some(seed)` reseeds the generator for deterministic replay;
    /// `None` keeps consuming the current stream.
    pub fn reset(&mut self, seed: Option<u64>) -> GameState {
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
            debug!("episode reset with seed {seed}");
        }
        GameState::new(&self.config)
    }

    /// Advance the episode by exactly one tick
    ///
    /// The per-tick order is fixed: integrate physics, spawn, advance and
    /// retire pipes, score passes, check collision, apply shaping, count
    /// the tick. Stepping a terminated episode is an error rather than a
    /// silent no-op.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<StepResult, StepError> {
        if state.phase == Phase::Terminated {
            return Err(StepError::EpisodeOver);
        }
        state.phase = Phase::Running;

        let mut reward = self.config.step_penalty;

        state.square.integrate(
            action.is_flap(),
            self.config.gravity,
            self.config.flap_impulse,
        );

        pipes::maybe_spawn(state, &self.config, &mut self.rng);
        pipes::advance_and_retire(&mut state.pipes, state.pipe_speed);

        let entity_x = state.square.x;
        let mut pipes_passed = 0u32;
        {
            let GameState {
                pipes: live_pipes,
                score,
                pipe_speed,
                gap_height,
                ..
            } = state;
            pipes::score_passes(live_pipes, entity_x, || {
                *score += 1;
                pipes_passed += 1;
                difficulty::on_score(pipe_speed, gap_height, &self.config);
            });
        }
        reward += pipes_passed as f32 * self.config.pass_reward;

        // A collision overrides every other reward term for the tick
        let terminated = collision::check(&state.square, &state.pipes, self.config.screen_height);
        if terminated {
            reward = self.config.collision_penalty;
            state.phase = Phase::Terminated;
        } else if let Some(next) = state.next_pipe() {
            let dist = (state.square.y - next.gap_center()).abs();
            reward += self.config.shaping_scale * (1.0 - dist / (self.config.screen_height / 2.0));
        }

        state.tick += 1;

        let mut truncated = false;
        if !terminated {
            if let Some(limit) = self.config.max_episode_ticks {
                if state.tick >= limit {
                    truncated = true;
                    state.phase = Phase::Terminated;
                }
            }
        }

        if state.phase == Phase::Terminated {
            debug!(
                "episode over at tick {}: score {}, terminated {}, truncated {}",
                state.tick, state.score, terminated, truncated
            );
        }

        Ok(StepResult {
            reward,
            terminated,
            truncated,
            info: StepInfo {
                score: state.score,
                pipes_passed,
            },
        })
    }
}

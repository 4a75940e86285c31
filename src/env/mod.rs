//! Programmatic-control environment for Flappy-Square
//!
//! Provides:
//! - 4-component normalized observations (gap offset, pipe distance,
//!   velocity, gap height)
//! - a reset/step/observe/close contract over the game engine
//! - seedable episodes for deterministic replay

pub mod environment;
pub mod observation;

pub use environment::{EpisodeInfo, FlappyEnv, StepOutcome};
pub use observation::{observe, OBSERVATION_SIZE};

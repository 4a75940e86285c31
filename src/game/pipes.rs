//! Pipe lifecycle: spawning, horizontal advance, retirement, pass scoring
//!
//! The engine calls these in a fixed order every tick: spawn, advance and
//! retire, then score passes. Scoring before the collision check is what
//! lets a borderline pipe count in the same tick it clears the square.

use rand::Rng;

use super::config::GameConfig;
use super::state::{GameState, PipePair};

/// Spawn one pipe pair at the right screen edge on spawn ticks
///
/// Fires when `tick % pipe_interval_ticks == 0`, so the first step of every
/// episode spawns the first pipe. The gap offset is a bounded uniform draw;
/// config validation guarantees the range is never empty, so the draw is
/// infallible mid-episode.
pub fn maybe_spawn<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    if state.tick % config.pipe_interval_ticks != 0 {
        return;
    }

    let low = config.gap_margin;
    let high = config.screen_height - config.gap_margin - state.gap_height;
    let gap_y = rng.gen_range(low..=high);

    state.pipes.push(PipePair::new(
        config.screen_width,
        gap_y,
        state.gap_height,
        config.pipe_width,
    ));
}

/// Move every pipe left by `speed` and drop the ones that left the screen
pub fn advance_and_retire(pipes: &mut Vec<PipePair>, speed: f32) {
    for pipe in pipes.iter_mut() {
        pipe.x -= speed;
    }
    pipes.retain(|pipe| !pipe.off_screen());
}

/// Flag newly passed pipes and invoke the callback once per pass
///
/// A pipe is passed when its trailing edge has crossed the square's fixed
/// horizontal position. The flag is one-way, so each pipe fires the
/// callback at most once over its lifetime.
pub fn score_passes<F: FnMut()>(pipes: &mut [PipePair], entity_x: f32, mut on_pass: F) {
    for pipe in pipes.iter_mut() {
        if !pipe.passed && pipe.trailing_edge() < entity_x {
            pipe.passed = true;
            on_pass();
        }
    }
}

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_flap: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
        let state = engine.reset(seed);

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_flap: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 60 Hz, matching the classic feel of the physics
        // constants (one tick = one frame of the original)
        let tick_interval = Duration::from_millis(16);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.state.is_over() {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);

            match action {
                KeyAction::GameAction(Action::Flap) => {
                    // A flap on the game-over screen restarts, as in the
                    // classic control scheme
                    if self.state.is_over() {
                        self.reset_episode();
                    } else {
                        self.pending_flap = true;
                    }
                }
                KeyAction::GameAction(Action::Continue) => {
                    // No action needed
                }
                KeyAction::Restart => {
                    // Restart is only honored on the game-over screen
                    if self.state.is_over() {
                        self.reset_episode();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    /// Consume the buffered input and advance exactly one tick
    fn update_game(&mut self) -> Result<()> {
        let action = if self.pending_flap {
            Action::Flap
        } else {
            Action::Continue
        };
        self.pending_flap = false;

        let result = self.engine.step(&mut self.state, action)?;

        if result.terminated || result.truncated {
            self.metrics.on_episode_over(self.state.score);
        }

        Ok(())
    }

    fn reset_episode(&mut self) {
        self.state = self.engine.reset(None);
        self.metrics.on_episode_start();
        self.pending_flap = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(42)).unwrap();
        assert!(!mode.state.is_over());
        assert_eq!(mode.state.score, 0);
    }

    #[test]
    fn test_one_flap_per_tick() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(42)).unwrap();

        // Two key presses between ticks collapse into one flap
        mode.pending_flap = true;
        mode.pending_flap = true;
        mode.update_game().unwrap();

        assert_eq!(
            mode.state.square.vel,
            mode.engine.config().flap_impulse + mode.engine.config().gravity
        );
        assert!(!mode.pending_flap, "the buffered flap is consumed");
    }

    #[test]
    fn test_episode_reset() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(42)).unwrap();
        mode.state.score = 10;
        mode.reset_episode();
        assert_eq!(mode.state.score, 0);
        assert!(!mode.state.is_over());
    }

    #[test]
    fn test_metrics_record_episode_end() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(42)).unwrap();

        // Let the square free-fall into the floor
        while !mode.state.is_over() {
            mode.update_game().unwrap();
        }

        assert_eq!(mode.metrics.episodes_played, 1);
    }
}

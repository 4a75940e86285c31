use super::collision::Rect;
use super::config::GameConfig;

/// The player square
///
/// Horizontal position and size are fixed for the life of the episode;
/// only `y` and `vel` change, and only through [`Square::integrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    /// Fixed horizontal position of the left edge
    pub x: f32,
    /// Vertical position of the top edge
    pub y: f32,
    /// Vertical velocity (positive = falling)
    pub vel: f32,
    /// Side length
    pub size: f32,
}

impl Square {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            vel: 0.0,
            size,
        }
    }

    /// Advance the square by exactly one tick
    ///
    /// A flap replaces the velocity with the impulse before gravity is
    /// applied, so the post-tick velocity of a flap tick is always
    /// `flap_impulse + gravity`.
    pub fn integrate(&mut self, flapped: bool, gravity: f32, flap_impulse: f32) {
        if flapped {
            self.vel = flap_impulse;
        }
        self.vel += gravity;
        self.y += self.vel;
    }

    /// Vertical center of the square
    pub fn center_y(&self) -> f32 {
        self.y + self.size / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// A top/bottom pipe pair with one gap between them
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    /// Horizontal position of the leading (left) edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
    /// Gap height, frozen at spawn time
    pub gap_height: f32,
    /// Pipe width
    pub width: f32,
    /// Set once when the pair crosses the square's position
    pub passed: bool,
}

impl PipePair {
    pub fn new(x: f32, gap_y: f32, gap_height: f32, width: f32) -> Self {
        Self {
            x,
            gap_y,
            gap_height,
            width,
            passed: false,
        }
    }

    /// Horizontal position of the trailing (right) edge
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical center of the gap
    pub fn gap_center(&self) -> f32 {
        self.gap_y + self.gap_height / 2.0
    }

    /// The solid top and bottom rectangles
    pub fn rects(&self, screen_height: f32) -> (Rect, Rect) {
        let top = Rect::new(self.x, 0.0, self.width, self.gap_y);
        let bottom_y = self.gap_y + self.gap_height;
        let bottom = Rect::new(self.x, bottom_y, self.width, screen_height - bottom_y);
        (top, bottom)
    }

    /// Whether the pair has fully left the screen on the left
    pub fn off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }
}

/// Episode lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly reset, no step taken yet
    Ready,
    /// Ticks are being accepted
    Running,
    /// Collision or truncation; only reset is accepted
    Terminated,
}

/// Complete episode state
///
/// Owned by whichever front end drives the engine; the engine borrows it
/// for the duration of a single `step` or `reset` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub square: Square,
    /// Live pipes in spawn order (oldest, leftmost first)
    pub pipes: Vec<PipePair>,
    pub score: u32,
    pub tick: u32,
    /// Current horizontal pipe speed
    pub pipe_speed: f32,
    /// Gap height the next spawn will use
    pub gap_height: f32,
    pub phase: Phase,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl GameState {
    /// Fresh episode state: square centered, no pipes, starting difficulty
    pub fn new(config: &GameConfig) -> Self {
        let square = Square::new(
            config.entity_x(),
            config.screen_height / 2.0,
            config.square_size,
        );

        Self {
            square,
            pipes: Vec::new(),
            score: 0,
            tick: 0,
            pipe_speed: config.pipe_speed_start,
            gap_height: config.gap_start,
            phase: Phase::Ready,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// The nearest pipe the square has yet to pass
    ///
    /// Smallest `x` among live pipes whose trailing edge has not crossed
    /// the square's fixed position. Linear scan; the pipe list is tiny and
    /// changes every tick, so nothing is cached.
    pub fn next_pipe(&self) -> Option<&PipePair> {
        self.pipes
            .iter()
            .filter(|pipe| pipe.trailing_edge() >= self.square.x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_accumulates_gravity() {
        let mut square = Square::new(120.0, 320.0, 38.0);

        square.integrate(false, 0.35, -7.5);
        assert_eq!(square.vel, 0.35);
        assert_eq!(square.y, 320.0 + 0.35);

        square.integrate(false, 0.35, -7.5);
        assert_eq!(square.vel, 0.7);
        assert_eq!(square.y, 320.0 + 0.35 + 0.7);
    }

    #[test]
    fn test_flap_replaces_velocity() {
        let mut square = Square::new(120.0, 320.0, 38.0);
        square.vel = 5.0;

        square.integrate(true, 0.35, -7.5);

        // The impulse overwrites accumulated velocity before gravity lands
        assert_eq!(square.vel, -7.5 + 0.35);
        assert_eq!(square.y, 320.0 - 7.5 + 0.35);
    }

    #[test]
    fn test_integrate_is_deterministic() {
        let mut a = Square::new(120.0, 320.0, 38.0);
        let mut b = Square::new(120.0, 320.0, 38.0);

        for i in 0..100 {
            let flap = i % 7 == 0;
            a.integrate(flap, 0.35, -7.5);
            b.integrate(flap, 0.35, -7.5);
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_pipe_rects_partition_the_column() {
        let pipe = PipePair::new(100.0, 200.0, 170.0, 60.0);
        let (top, bottom) = pipe.rects(640.0);

        assert_eq!(top, Rect::new(100.0, 0.0, 60.0, 200.0));
        assert_eq!(bottom, Rect::new(100.0, 370.0, 60.0, 270.0));
        assert_eq!(pipe.gap_center(), 285.0);
    }

    #[test]
    fn test_pipe_off_screen() {
        let mut pipe = PipePair::new(10.0, 200.0, 170.0, 60.0);
        assert!(!pipe.off_screen());

        pipe.x = -60.0; // trailing edge exactly at zero
        assert!(!pipe.off_screen());

        pipe.x = -60.5;
        assert!(pipe.off_screen());
    }

    #[test]
    fn test_initial_state() {
        let config = GameConfig::default();
        let state = GameState::new(&config);

        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.square.x, 120.0);
        assert_eq!(state.square.y, 320.0);
        assert_eq!(state.square.vel, 0.0);
        assert_eq!(state.pipe_speed, config.pipe_speed_start);
        assert_eq!(state.gap_height, config.gap_start);
    }

    #[test]
    fn test_next_pipe_picks_nearest_upcoming() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);

        state.pipes = vec![
            PipePair::new(50.0, 200.0, 170.0, 60.0),  // trailing edge 110 < 120: behind
            PipePair::new(300.0, 250.0, 170.0, 60.0), // upcoming
            PipePair::new(430.0, 150.0, 170.0, 60.0), // upcoming, farther
        ];

        let next = state.next_pipe().unwrap();
        assert_eq!(next.x, 300.0);
    }

    #[test]
    fn test_next_pipe_includes_overlapping_pipe() {
        // Trailing edge exactly at the square's position still counts
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.pipes = vec![PipePair::new(60.0, 200.0, 170.0, 60.0)];

        assert!(state.next_pipe().is_some());
    }

    #[test]
    fn test_next_pipe_empty_list() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert!(state.next_pipe().is_none());
    }
}

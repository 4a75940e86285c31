//! Axis-aligned collision checks between the square and the pipe field
//!
//! Everything here is a pure function of the rectangles involved, so the
//! engine can call it mid-tick without handing out mutable state.

use super::state::{PipePair, Square};

/// An axis-aligned rectangle occupying `[x, x+w) x [y, y+h)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open overlap test: rectangles that merely share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Whether the square's vertical extent has left `[0, screen_height]`
pub fn out_of_bounds(square: &Square, screen_height: f32) -> bool {
    square.y < 0.0 || square.y + square.size > screen_height
}

/// Terminal-collision check for one tick
///
/// True when the square leaves the vertical screen bounds or overlaps the
/// top or bottom rectangle of any live pipe.
pub fn check(square: &Square, pipes: &[PipePair], screen_height: f32) -> bool {
    if out_of_bounds(square, screen_height) {
        return true;
    }

    let square_rect = square.rect();
    pipes.iter().any(|pipe| {
        let (top, bottom) = pipe.rects(screen_height);
        square_rect.intersects(&top) || square_rect.intersects(&bottom)
    })
}

//! Plane geometry shared by the engine and the drawing interface
//!
//! Coordinates follow slide conventions: the origin is the top-left corner,
//! `x` grows to the right and `y` grows downward. All units are points.

use serde::{Deserialize, Serialize};

/// A position on the slide
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Translate by `(dx, dy)`
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle (position + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same size, moved by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same position, new size
    pub fn with_size(&self, width: f64, height: f64) -> Self {
        Rect::new(self.x, self.y, width, height)
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    /// Sizes never go negative.
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }

    /// Midpoint of the left edge
    pub fn left_anchor(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    /// Midpoint of the right edge
    pub fn right_anchor(&self) -> Point {
        Point::new(self.right(), self.y + self.height / 2.0)
    }
}

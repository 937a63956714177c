use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world (pixel) coordinates.
///
/// `x`/`y` is the top-left corner; Y grows downward, matching screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle of the given size centered on `(cx, cy)`.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect,
    /// and a zero-area rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn with_left(self, left: f32) -> Self {
        Self { x: left, ..self }
    }

    pub fn with_right(self, right: f32) -> Self {
        Self {
            x: right - self.width,
            ..self
        }
    }

    pub fn with_top(self, top: f32) -> Self {
        Self { y: top, ..self }
    }

    pub fn with_bottom(self, bottom: f32) -> Self {
        Self {
            y: bottom - self.height,
            ..self
        }
    }
}

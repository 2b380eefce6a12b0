//! Viewport that follows a target across the world canvas.

use delve_core::types::Position;

/// Keeps a viewport centred on a target without showing anything past the
/// canvas edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    canvas_size: (f64, f64),
    viewport_size: (f64, f64),
    /// Top-left corner of the visible region, in world pixels.
    origin: Position,
}

impl Camera {
    pub fn new(canvas_size: (f64, f64), viewport_size: (u32, u32), target: Position) -> Self {
        let mut camera = Self {
            canvas_size,
            viewport_size: (viewport_size.0 as f64, viewport_size.1 as f64),
            origin: Position::default(),
        };
        camera.follow(target);
        camera
    }

    /// Re-centre on `target`, clamped to the canvas. A canvas narrower than
    /// the viewport stays pinned to the left (or top) edge.
    pub fn follow(&mut self, target: Position) {
        let axis = |pos: f64, canvas: f64, view: f64| {
            let max = (canvas - view).max(0.0);
            (pos - (view / 2.0).floor()).clamp(0.0, max)
        };
        self.origin = Position::new(
            axis(target.x, self.canvas_size.0, self.viewport_size.0),
            axis(target.y, self.canvas_size.1, self.viewport_size.1),
        );
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Where to draw the canvas on screen: the negated origin.
    pub fn canvas_offset(&self) -> Position {
        Position::new(-self.origin.x, -self.origin.y)
    }
}

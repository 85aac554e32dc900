use crate::config::Config;
use crate::geometry::Rect;

/// The player sprite. Only `y` and `vy` change during a round.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
}

impl Bird {
    /// A fresh bird at its start position, at rest.
    pub fn new(config: &Config) -> Self {
        Self {
            x: config.bird_x(),
            y: config.bird_start_y(),
            vy: 0.0,
            width: config.bird_width,
            height: config.bird_height,
        }
    }

    /// One physics step: integrate gravity, then position. The bird can
    /// never rise above the top of the board.
    pub fn step(&mut self, gravity: f64) {
        self.vy += gravity;
        self.y = (self.y + self.vy).max(0.0);
    }

    /// Velocity override, not an additive impulse.
    pub fn jump(&mut self, velocity: f64) {
        self.vy = velocity;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

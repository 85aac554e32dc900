//! Pipe pairs and the timer that spawns them.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::config::Config;
use crate::geometry::Rect;

/// A top and a bottom pipe sharing one x position. Scored once, as a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub x: f64,
    /// Y of the top pipe's upper edge. Always negative: the top pipe pokes
    /// out of the ceiling.
    pub top_y: f64,
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub passed: bool,
}

impl PipePair {
    /// Random pair at the right edge of the board.
    pub fn spawn<R: Rng>(config: &Config, rng: &mut R) -> Self {
        let h = config.pipe_height;
        let top_y = -h / 4.0 - rng.gen_range(0.0..h / 2.0);
        Self::at(config, config.spawn_x(), top_y)
    }

    pub fn at(config: &Config, x: f64, top_y: f64) -> Self {
        Self {
            x,
            top_y,
            width: config.pipe_width,
            height: config.pipe_height,
            gap: config.gap_height(),
            passed: false,
        }
    }

    pub fn top(&self) -> Rect {
        Rect::new(self.x, self.top_y, self.width, self.height)
    }

    pub fn bottom(&self) -> Rect {
        Rect::new(self.x, self.gap_top() + self.gap, self.width, self.height)
    }

    /// Y where the opening starts (bottom edge of the top pipe).
    pub fn gap_top(&self) -> f64 {
        self.top_y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn hits(&self, other: &Rect) -> bool {
        self.top().overlaps(other) || self.bottom().overlaps(other)
    }
}

/// Active pipe pairs, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Pipes {
    pairs: Vec<PipePair>,
}

impl Pipes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: PipePair) {
        debug!("pipe pair spawned at x={:.0}, gap at y={:.0}", pair.x, pair.gap_top());
        self.pairs.push(pair);
    }

    /// Scrolls every pair by `dx` (negative = leftward).
    pub fn advance(&mut self, dx: f64) {
        for pair in &mut self.pairs {
            pair.x += dx;
        }
    }

    /// Drops pairs that have fully left the board on the left side.
    pub fn prune(&mut self) {
        self.pairs.retain(|p| p.x > -p.width);
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.pairs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PipePair> {
        self.pairs.iter_mut()
    }
}

/// Wall-clock spawn cadence. Only advanced while a round is being played.
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: Duration,
    elapsed: Duration,
}

impl Spawner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `dt` and reports whether a spawn came due. A stalled frame
    /// yields a single spawn; the missed intervals are dropped.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.interval.is_zero() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return false;
        }
        let rest = self.elapsed.as_nanos() % self.interval.as_nanos();
        self.elapsed = Duration::from_nanos(rest as u64);
        true
    }

    /// Restarts the interval from zero.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

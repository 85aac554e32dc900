use std::fmt;

/// Score kept in half points so it stays exact. Only ever grows, except
/// through [`Score::clear`] when a round is thrown away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    halves: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds half a point.
    pub fn add_half(&mut self) {
        self.halves += 1;
    }

    pub fn halves(&self) -> u32 {
        self.halves
    }

    pub fn value(&self) -> f64 {
        self.halves as f64 / 2.0
    }

    pub fn clear(&mut self) {
        self.halves = 0;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.halves / 2;
        if self.halves % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::FlappyError;

/// Obstacle scroll speed presets.
///
/// The names do not read in order: `Soft` scrolls fastest and `Hard`
/// slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedLevel {
    Soft,
    #[default]
    Normal,
    Medium,
    Hard,
}

impl SpeedLevel {
    pub const ALL: [SpeedLevel; 4] = [
        SpeedLevel::Soft,
        SpeedLevel::Normal,
        SpeedLevel::Medium,
        SpeedLevel::Hard,
    ];

    /// Horizontal obstacle velocity in board units per frame (negative = leftward).
    pub fn velocity(self) -> f64 {
        match self {
            Self::Soft => -3.0,
            Self::Normal => -2.0,
            Self::Medium => -1.75,
            Self::Hard => -1.55,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Maps `0..4` to a preset, anything else to `None`.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpeedLevel {
    type Err = FlappyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FlappyError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocities_match_presets() {
        assert_eq!(SpeedLevel::Soft.velocity(), -3.0);
        assert_eq!(SpeedLevel::Normal.velocity(), -2.0);
        assert_eq!(SpeedLevel::Medium.velocity(), -1.75);
        assert_eq!(SpeedLevel::Hard.velocity(), -1.55);
        assert!(SpeedLevel::ALL.iter().all(|l| l.velocity() < 0.0));
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(SpeedLevel::default(), SpeedLevel::Normal);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("hard".parse::<SpeedLevel>().unwrap(), SpeedLevel::Hard);
        assert_eq!("MEDIUM".parse::<SpeedLevel>().unwrap(), SpeedLevel::Medium);
        assert!(matches!(
            "brutal".parse::<SpeedLevel>(),
            Err(FlappyError::UnknownLevel(s)) if s == "brutal"
        ));
    }

    #[test]
    fn test_from_index() {
        assert_eq!(SpeedLevel::from_index(0), Some(SpeedLevel::Soft));
        assert_eq!(SpeedLevel::from_index(3), Some(SpeedLevel::Hard));
        assert_eq!(SpeedLevel::from_index(4), None);
    }
}

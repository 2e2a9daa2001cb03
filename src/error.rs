//! Configuration errors
//!
//! Runtime inputs are always clamped; only construction-time settings can
//! be rejected.

/// Rejected animation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The ring has no elements
    EmptyRing,
    /// Chase cross-fade needs at least one step per slot
    ZeroTransitionSteps,
    /// Fastest step interval is longer than the slowest one
    InvertedSpeedCurve,
    /// Full-scale speed must be finite and positive
    InvalidFullSpeed,
    /// A named tuning parameter is outside its valid range
    ParameterOutOfRange(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyRing => write!(f, "ring must have at least one element"),
            Self::ZeroTransitionSteps => {
                write!(f, "transition must take at least one step")
            }
            Self::InvertedSpeedCurve => {
                write!(f, "fastest interval must not exceed slowest interval")
            }
            Self::InvalidFullSpeed => {
                write!(f, "full-scale speed must be finite and positive")
            }
            Self::ParameterOutOfRange(name) => {
                write!(f, "parameter `{}` is out of range", name)
            }
        }
    }
}

/// A direction sign other than `+1` or `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirection(pub i8);

impl core::fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "direction must be +1 or -1, got {}", self.0)
    }
}

/// Check that a unit-range parameter is inside `[0, 1]`
pub(crate) fn check_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange(name))
    }
}

//! Configuration errors
//!
//! The engine itself never fails at runtime, every bad intermediate value is clamped or ignored. The only place where
//! something can be rejected is when an `ArpConfig` is turned into an engine.

use core::fmt;

/// Reasons an arpeggiator configuration can be rejected are represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The chord template has no intervals
    EmptyChord,
    /// The pattern table has no patterns
    EmptyPatternTable,
    /// A chord template, pattern, or pattern table was built from more items than it can hold
    CapacityExceeded,
    /// A pattern refers to a chord degree the chord template does not have
    PatternIndexOutOfRange {
        pattern: usize,
        step: usize,
        index: u8,
    },
    /// The tempo bounds are not positive, or the minimum is above the maximum
    InvalidTempoRange,
    /// The gate pulse would not fit inside the shortest possible step
    PulseTooWide,
    /// The input full scale or the output ceiling is not positive
    InvalidVoltageRange,
    /// The control rate or the tempo smoothing time is not a positive finite number
    InvalidControlRate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyChord => write!(f, "chord template has no intervals"),
            ConfigError::EmptyPatternTable => write!(f, "pattern table has no patterns"),
            ConfigError::CapacityExceeded => write!(f, "too many items for fixed capacity storage"),
            ConfigError::PatternIndexOutOfRange {
                pattern,
                step,
                index,
            } => write!(
                f,
                "pattern {} step {} refers to chord degree {} which does not exist",
                pattern, step, index
            ),
            ConfigError::InvalidTempoRange => write!(f, "tempo range is empty or not positive"),
            ConfigError::PulseTooWide => {
                write!(f, "gate pulse is not shorter than the shortest step")
            }
            ConfigError::InvalidVoltageRange => write!(f, "voltage range is not positive"),
            ConfigError::InvalidControlRate => {
                write!(f, "control rate or smoothing time is not positive and finite")
            }
        }
    }
}

//! Numeric engine levels.
//!
//! The engine knows more levels than the facade does. Levels compare by their
//! numeric value; two levels are equal only when both value and name match,
//! so `DEBUG` and `FINE` sort together but are distinct levels.

use log::{Level, LevelFilter};
use std::cmp::Ordering;
use std::fmt;

/// A named engine level with a numeric weight. Higher is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineLevel {
    value: i32,
    name: &'static str,
}

impl EngineLevel {
    /// Threshold that disables all output
    pub const OFF: EngineLevel = EngineLevel::new(i32::MAX, "OFF");
    /// System unusable
    pub const EMERGENCY: EngineLevel = EngineLevel::new(120_000, "EMERGENCY");
    /// Unrecoverable failure
    pub const FATAL: EngineLevel = EngineLevel::new(110_000, "FATAL");
    /// Action required immediately
    pub const ALERT: EngineLevel = EngineLevel::new(100_000, "ALERT");
    /// Critical condition
    pub const CRITICAL: EngineLevel = EngineLevel::new(90_000, "CRITICAL");
    /// Severe failure
    pub const SEVERE: EngineLevel = EngineLevel::new(80_000, "SEVERE");
    /// Error
    pub const ERROR: EngineLevel = EngineLevel::new(70_000, "ERROR");
    /// Warning
    pub const WARN: EngineLevel = EngineLevel::new(60_000, "WARN");
    /// Normal but significant
    pub const NOTICE: EngineLevel = EngineLevel::new(50_000, "NOTICE");
    /// Informational
    pub const INFO: EngineLevel = EngineLevel::new(40_000, "INFO");
    /// Debug
    pub const DEBUG: EngineLevel = EngineLevel::new(30_000, "DEBUG");
    /// Fine-grained debug
    pub const FINE: EngineLevel = EngineLevel::new(30_000, "FINE");
    /// Trace
    pub const TRACE: EngineLevel = EngineLevel::new(20_000, "TRACE");
    /// Finer-grained trace
    pub const FINER: EngineLevel = EngineLevel::new(20_000, "FINER");
    /// Verbose
    pub const VERBOSE: EngineLevel = EngineLevel::new(10_000, "VERBOSE");
    /// Finest-grained output
    pub const FINEST: EngineLevel = EngineLevel::new(10_000, "FINEST");
    /// Threshold that enables all output
    pub const ALL: EngineLevel = EngineLevel::new(i32::MIN, "ALL");

    /// Create a level. Custom levels are allowed alongside the predefined ones.
    pub const fn new(value: i32, name: &'static str) -> Self {
        Self { value, name }
    }

    /// Numeric weight.
    pub fn value(self) -> i32 {
        self.value
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Whether an event at `self` passes `threshold`.
    pub fn is_at_least(self, threshold: EngineLevel) -> bool {
        self.value >= threshold.value
    }

    /// The `log` level carrying this level into encoders and appenders.
    ///
    /// Levels collapse onto the five `log` levels by weight; the exact name
    /// travels separately in the record context.
    pub fn log_level(self) -> Level {
        if self.value >= Self::ERROR.value {
            Level::Error
        } else if self.value >= Self::WARN.value {
            Level::Warn
        } else if self.value >= Self::INFO.value {
            Level::Info
        } else if self.value >= Self::DEBUG.value {
            Level::Debug
        } else {
            Level::Trace
        }
    }

    /// Threshold equivalent to a configuration document's level filter.
    pub fn from_level_filter(filter: LevelFilter) -> Self {
        match filter {
            LevelFilter::Off => Self::OFF,
            LevelFilter::Error => Self::ERROR,
            LevelFilter::Warn => Self::WARN,
            LevelFilter::Info => Self::INFO,
            LevelFilter::Debug => Self::DEBUG,
            LevelFilter::Trace => Self::TRACE,
        }
    }
}

impl Ord for EngineLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.name.cmp(other.name))
    }
}

impl PartialOrd for EngineLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EngineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_comparison() {
        assert!(EngineLevel::ERROR.is_at_least(EngineLevel::INFO));
        assert!(EngineLevel::INFO.is_at_least(EngineLevel::INFO));
        assert!(!EngineLevel::DEBUG.is_at_least(EngineLevel::INFO));
        assert!(EngineLevel::FINEST.is_at_least(EngineLevel::ALL));
        assert!(!EngineLevel::FATAL.is_at_least(EngineLevel::OFF));
    }

    #[test]
    fn test_same_weight_distinct_levels() {
        assert_ne!(EngineLevel::DEBUG, EngineLevel::FINE);
        assert_eq!(EngineLevel::DEBUG.value(), EngineLevel::FINE.value());
        assert!(EngineLevel::DEBUG < EngineLevel::FINE);
    }

    #[test]
    fn test_log_level_by_weight() {
        assert_eq!(EngineLevel::FATAL.log_level(), Level::Error);
        assert_eq!(EngineLevel::NOTICE.log_level(), Level::Info);
        assert_eq!(EngineLevel::FINE.log_level(), Level::Debug);
        assert_eq!(EngineLevel::VERBOSE.log_level(), Level::Trace);
    }

    #[test]
    fn test_from_level_filter() {
        assert_eq!(EngineLevel::from_level_filter(LevelFilter::Off), EngineLevel::OFF);
        assert_eq!(EngineLevel::from_level_filter(LevelFilter::Warn), EngineLevel::WARN);
        assert_eq!(EngineLevel::from_level_filter(LevelFilter::Trace), EngineLevel::TRACE);
    }
}

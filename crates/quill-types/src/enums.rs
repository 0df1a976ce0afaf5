//! Common enumerations used throughout Quill.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{QuillError, Result};

/// Severity levels, ordered from the most to the least suppressive threshold.
///
/// `Off < Fatal < Error < Warn < Info < Debug < Trace < All`. A message at
/// level `m` passes a threshold `t` when `m <= t`, so a lower variant is a
/// more severe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLevel {
    /// Nothing is logged
    Off,
    /// Unrecoverable failures
    Fatal,
    /// Errors
    Error,
    /// Warnings
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
    /// Everything is logged
    All,
}

impl SeverityLevel {
    /// Every level, most severe first.
    pub const LEVELS: [SeverityLevel; 8] = [
        SeverityLevel::Off,
        SeverityLevel::Fatal,
        SeverityLevel::Error,
        SeverityLevel::Warn,
        SeverityLevel::Info,
        SeverityLevel::Debug,
        SeverityLevel::Trace,
        SeverityLevel::All,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            SeverityLevel::Off => "OFF",
            SeverityLevel::Fatal => "FATAL",
            SeverityLevel::Error => "ERROR",
            SeverityLevel::Warn => "WARN",
            SeverityLevel::Info => "INFO",
            SeverityLevel::Debug => "DEBUG",
            SeverityLevel::Trace => "TRACE",
            SeverityLevel::All => "ALL",
        }
    }

    /// Position in severity order, `0` for `Off` up to `7` for `All`.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Parse a level name, mapping anything unrecognized to `Off`.
    ///
    /// Used for values that come from outside the program, where a bad value
    /// must silence output rather than fail the caller.
    pub fn from_name_or_off(name: &str) -> Self {
        name.parse().unwrap_or(SeverityLevel::Off)
    }

    /// Whether a message at `self` passes the `threshold`.
    pub fn passes(self, threshold: SeverityLevel) -> bool {
        self <= threshold
    }
}

impl FromStr for SeverityLevel {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "OFF" => Ok(SeverityLevel::Off),
            "FATAL" => Ok(SeverityLevel::Fatal),
            "ERROR" => Ok(SeverityLevel::Error),
            "WARN" | "WARNING" => Ok(SeverityLevel::Warn),
            "INFO" => Ok(SeverityLevel::Info),
            "DEBUG" => Ok(SeverityLevel::Debug),
            "TRACE" => Ok(SeverityLevel::Trace),
            "ALL" => Ok(SeverityLevel::All),
            _ => Err(QuillError::InvalidArgument(format!("Invalid severity level: {}", s))),
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Foreground color used by the colorized console sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    /// The terminal's own color, no escape codes
    #[default]
    Default,
    /// Black
    Black,
    /// Red
    Red,
    /// Green
    Green,
    /// Yellow
    Yellow,
    /// Blue
    Blue,
    /// Magenta
    Magenta,
    /// Cyan
    Cyan,
    /// White
    White,
}

impl FromStr for DisplayColor {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(DisplayColor::Default),
            "black" => Ok(DisplayColor::Black),
            "red" => Ok(DisplayColor::Red),
            "green" => Ok(DisplayColor::Green),
            "yellow" => Ok(DisplayColor::Yellow),
            "blue" => Ok(DisplayColor::Blue),
            "magenta" => Ok(DisplayColor::Magenta),
            "cyan" => Ok(DisplayColor::Cyan),
            "white" => Ok(DisplayColor::White),
            _ => Err(QuillError::InvalidArgument(format!("Invalid color: {}", s))),
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayColor::Default => write!(f, "default"),
            DisplayColor::Black => write!(f, "black"),
            DisplayColor::Red => write!(f, "red"),
            DisplayColor::Green => write!(f, "green"),
            DisplayColor::Yellow => write!(f, "yellow"),
            DisplayColor::Blue => write!(f, "blue"),
            DisplayColor::Magenta => write!(f, "magenta"),
            DisplayColor::Cyan => write!(f, "cyan"),
            DisplayColor::White => write!(f, "white"),
        }
    }
}

/// The sink variants a factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    /// Plain console output
    Console,
    /// Console output painted per level
    ColoredConsole,
    /// Appends to a file
    File,
    /// Wired entirely by an engine configuration document
    Legacy,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Console => write!(f, "console"),
            SinkKind::ColoredConsole => write!(f, "colored-console"),
            SinkKind::File => write!(f, "file"),
            SinkKind::Legacy => write!(f, "legacy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_severity_order() {
        assert!(SeverityLevel::Off < SeverityLevel::Fatal);
        assert!(SeverityLevel::Fatal < SeverityLevel::Error);
        assert!(SeverityLevel::Error < SeverityLevel::Warn);
        assert!(SeverityLevel::Warn < SeverityLevel::Info);
        assert!(SeverityLevel::Info < SeverityLevel::Debug);
        assert!(SeverityLevel::Debug < SeverityLevel::Trace);
        assert!(SeverityLevel::Trace < SeverityLevel::All);
        assert_eq!(SeverityLevel::Off.rank(), 0);
        assert_eq!(SeverityLevel::All.rank(), 7);
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("info".parse::<SeverityLevel>().unwrap(), SeverityLevel::Info);
        assert_eq!("Warning".parse::<SeverityLevel>().unwrap(), SeverityLevel::Warn);
        assert!("verbose".parse::<SeverityLevel>().is_err());
        assert_eq!(SeverityLevel::from_name_or_off("verbose"), SeverityLevel::Off);
        assert_eq!(SeverityLevel::from_name_or_off(" debug "), SeverityLevel::Debug);
    }

    #[test]
    fn test_passes_threshold() {
        assert!(SeverityLevel::Error.passes(SeverityLevel::Info));
        assert!(SeverityLevel::Info.passes(SeverityLevel::Info));
        assert!(!SeverityLevel::Debug.passes(SeverityLevel::Info));
        assert!(!SeverityLevel::Fatal.passes(SeverityLevel::Off));
    }

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml::to_string(&SeverityLevel::Warn).unwrap();
        assert_eq!(yaml.trim(), "WARN");
        let kind: SinkKind = serde_yaml::from_str("colored-console").unwrap();
        assert_eq!(kind, SinkKind::ColoredConsole);
        let color: DisplayColor = serde_yaml::from_str("magenta").unwrap();
        assert_eq!(color, DisplayColor::Magenta);
    }

    proptest! {
        #[test]
        fn prop_name_round_trip(idx in 0usize..8) {
            let level = SeverityLevel::LEVELS[idx];
            prop_assert_eq!(level.name().parse::<SeverityLevel>().unwrap(), level);
            prop_assert_eq!(level.rank() as usize, idx);
        }
    }
}

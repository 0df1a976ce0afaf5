//! # Quill Types
//!
//! Core types, traits, and enums shared across all Quill crates.
//!
//! This crate provides:
//!
//! - The ordered [`SeverityLevel`] model and the [`DisplayColor`] palette
//! - The [`Logger`] capability and the [`SinkFactory`] protocol
//! - Flat [`SinkOptions`] and [`LevelColorRule`] configuration types
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use quill_types::{SeverityLevel, SinkOptions};
//!
//! let level: SeverityLevel = "warning".parse().unwrap();
//! assert_eq!(level, SeverityLevel::Warn);
//! assert!(SeverityLevel::Error.passes(level));
//!
//! let options: SinkOptions = [("file-name", "app.log")].into_iter().collect();
//! assert_eq!(options.get_or("logger-name", "root"), "root");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{QuillError, Result};
pub use enums::{SeverityLevel, DisplayColor, SinkKind};
pub use traits::{Logger, SinkFactory};
pub use config::{SinkOptions, LevelColorRule};

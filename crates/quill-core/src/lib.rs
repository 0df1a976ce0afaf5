//! # Quill Core
//!
//! Sinks, factories, and configuration for the Quill logging facade.
//!
//! Calling code logs through the [`Logger`] capability and never sees the
//! engine underneath. A sink decides where messages go; a [`SinkFactory`]
//! builds and configures one from flat [`SinkOptions`]:
//!
//! - [`ConsoleLogger`]: standard output, everything enabled by default
//! - [`ColoredConsoleLogger`]: standard output painted per level, `Info` and up
//! - [`FileLogger`]: appends to a file, `Info` and up
//! - [`LegacyLogger`]: wired by an engine configuration document
//!
//! ## Example
//!
//! ```no_run
//! use quill_core::{FileSinkFactory, Logger, SinkFactory, SinkOptions};
//!
//! let options: SinkOptions = [("file-name", "logs/app.log"), ("level", "debug")]
//!     .into_iter()
//!     .collect();
//! let logger = FileSinkFactory.create_logger(&options)?;
//!
//! if logger.is_debug_enabled() {
//!     logger.debug("cache warmed");
//! }
//! logger.info("ready");
//! # Ok::<(), quill_core::QuillError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod config;
pub mod factory;
pub mod log;
pub mod options;
pub mod sink;
pub mod threshold;

// Re-export commonly used items
pub use color::LevelColorResolver;
pub use config::{Config, LoggingConfig};
pub use factory::{factory_for, ColoredConsoleSinkFactory, ConsoleSinkFactory, FileSinkFactory, LegacySinkFactory};
pub use options::ResolvedOptions;
pub use sink::{ColoredConsoleLogger, ConsoleLogger, ConsoleStream, FileLogger, LegacyLogger};
pub use quill_types::{
    DisplayColor, LevelColorRule, Logger, QuillError, Result, SeverityLevel, SinkFactory, SinkKind, SinkOptions,
};

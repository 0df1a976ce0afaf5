//! # Quill Engine
//!
//! The record-writing engine behind the Quill facade, built on `log4rs`.
//!
//! This crate provides:
//!
//! - **Levels**: numeric [`EngineLevel`]s, a superset of the facade's severities
//! - **Repositories**: a process-wide registry of named [`Repository`]
//!   contexts, each with a shared threshold and a list of appenders
//! - **Appenders**: plain and level-colored console, append-mode file and
//!   in-memory capture, plus whatever a configuration document declares
//! - **Layouts**: conversion-pattern [`PatternLayout`]s rendered by the
//!   `log4rs` pattern encoder
//! - **Documents**: configuring repositories from a `log4rs` YAML document
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use quill_engine::{repository, EngineLevel, LoggingEvent, MemoryAppender, PatternLayout};
//!
//! let repo = repository("example");
//! let memory = Arc::new(MemoryAppender::new("memory", PatternLayout::new("%level %message").unwrap()));
//! repo.add_appender(memory.clone());
//! repo.set_threshold(EngineLevel::INFO);
//!
//! repo.dispatch(&LoggingEvent::new("example", EngineLevel::DEBUG, "skipped"));
//! repo.dispatch(&LoggingEvent::new("example", EngineLevel::WARN, "kept"));
//! assert_eq!(memory.lines(), vec!["WARN kept"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appender;
pub mod document;
pub mod event;
pub mod layout;
pub mod level;
pub mod repository;

// Re-export commonly used items
pub use appender::{
    Appender, BridgeAppender, ColoredConsoleAppender, ConfiguredAppender, ConsoleAppender, ConsoleTarget,
    FileAppender, MemoryAppender,
};
pub use document::{configure, EngineDocument, ROOT_REPOSITORY};
pub use event::LoggingEvent;
pub use layout::PatternLayout;
pub use level::EngineLevel;
pub use repository::{existing_repository, repository, Repository};

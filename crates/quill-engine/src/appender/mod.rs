//! Appenders: the output targets a repository forwards events to.

use quill_types::Result;
use std::any::Any;

use crate::event::LoggingEvent;
use crate::level::EngineLevel;

pub mod bridge;
pub mod colored;
pub mod configured;
pub mod console;
pub mod file;
pub mod memory;

pub use bridge::{BridgeAppender, BridgeAppenderDeserializer};
pub use self::colored::ColoredConsoleAppender;
pub use configured::ConfiguredAppender;
pub use console::{ConsoleAppender, ConsoleTarget};
pub use file::FileAppender;
pub use memory::MemoryAppender;

/// An output target.
///
/// Appenders own their synchronisation; repositories call them from any
/// thread without additional locking.
pub trait Appender: Send + Sync {
    /// Appender name, unique only by convention.
    fn name(&self) -> &str;

    /// Minimum level this appender writes.
    fn threshold(&self) -> EngineLevel {
        EngineLevel::ALL
    }

    /// Write one event.
    fn append(&self, event: &LoggingEvent) -> Result<()>;

    /// Access to the concrete type, for inspection.
    fn as_any(&self) -> &dyn Any;

    /// Whether an event at `level` passes this appender's threshold.
    fn accepts(&self, level: EngineLevel) -> bool {
        level.is_at_least(self.threshold())
    }
}

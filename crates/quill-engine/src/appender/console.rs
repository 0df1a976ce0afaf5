//! Plain console output.

use log4rs::append::console::{self, Target};
use log4rs::append::Append;
use quill_types::{QuillError, Result};
use std::any::Any;

use super::Appender;
use crate::event::LoggingEvent;
use crate::layout::PatternLayout;
use crate::level::EngineLevel;

/// Standard stream a console appender writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleTarget {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error
    Stderr,
}

impl From<ConsoleTarget> for Target {
    fn from(target: ConsoleTarget) -> Self {
        match target {
            ConsoleTarget::Stdout => Target::Stdout,
            ConsoleTarget::Stderr => Target::Stderr,
        }
    }
}

pub(crate) fn build_console(target: ConsoleTarget, encoder: Box<dyn log4rs::encode::Encode>) -> console::ConsoleAppender {
    console::ConsoleAppender::builder()
        .target(target.into())
        .encoder(encoder)
        .build()
}

/// Writes formatted events to stdout or stderr, never painted.
#[derive(Debug)]
pub struct ConsoleAppender {
    name: String,
    target: ConsoleTarget,
    layout: PatternLayout,
    threshold: EngineLevel,
    output: console::ConsoleAppender,
}

impl ConsoleAppender {
    /// Create an appender writing to stdout with no threshold.
    pub fn new(name: impl Into<String>, layout: PatternLayout) -> Self {
        let output = build_console(ConsoleTarget::Stdout, Box::new(layout.encoder()));
        Self {
            name: name.into(),
            target: ConsoleTarget::Stdout,
            layout,
            threshold: EngineLevel::ALL,
            output,
        }
    }

    /// Select the stream.
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self.output = build_console(target, Box::new(self.layout.encoder()));
        self
    }

    /// Set the appender threshold.
    pub fn with_threshold(mut self, threshold: EngineLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Render an event exactly as it is written.
    pub fn render(&self, event: &LoggingEvent) -> Result<String> {
        self.layout.format(event)
    }
}

impl Appender for ConsoleAppender {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> EngineLevel {
        self.threshold
    }

    fn append(&self, event: &LoggingEvent) -> Result<()> {
        event
            .with_record(|record| self.output.append(record))
            .map_err(|e| QuillError::Appender(format!("Failed to write to {:?}: {}", self.target, e)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

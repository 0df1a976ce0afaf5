//! Plain console sink.

use quill_engine::{ConsoleAppender, ConsoleTarget, PatternLayout};
use quill_types::{Result, SeverityLevel};
use std::sync::Arc;
use tracing::debug;

use super::{forward_to_binding, Binding, DEFAULT_LAYOUT_PATTERN};

/// Console stream a sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleStream {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error
    Stderr,
}

impl ConsoleStream {
    /// Stream name, also the default destination name.
    pub fn name(self) -> &'static str {
        match self {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }

    pub(crate) fn target(self) -> ConsoleTarget {
        match self {
            ConsoleStream::Stdout => ConsoleTarget::Stdout,
            ConsoleStream::Stderr => ConsoleTarget::Stderr,
        }
    }
}

/// Writes formatted messages to the console.
pub struct ConsoleLogger {
    layout_pattern: String,
    stream: ConsoleStream,
    destination: Option<String>,
    threshold: SeverityLevel,
    binding: Option<Binding>,
}

impl ConsoleLogger {
    /// Appender name registered with the destination.
    pub const APPENDER_NAME: &'static str = "console";

    /// Create an unconfigured sink using `layout_pattern`.
    pub fn new(layout_pattern: impl Into<String>) -> Self {
        Self {
            layout_pattern: layout_pattern.into(),
            stream: ConsoleStream::Stdout,
            destination: None,
            threshold: SeverityLevel::All,
            binding: None,
        }
    }

    /// Write to `stream` instead of standard output.
    pub fn with_stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    /// Bind to a named destination instead of the stream's own.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Threshold applied to the destination on `configure`.
    pub fn with_threshold(mut self, threshold: SeverityLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Layout pattern.
    pub fn layout_pattern(&self) -> &str {
        &self.layout_pattern
    }

    /// Destination this sink binds to.
    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or_else(|| self.stream.name())
    }

    /// Attach a console appender to the destination and bind to it.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Layout` when the pattern does not compile.
    pub fn configure(&mut self) -> Result<()> {
        let layout = PatternLayout::new(&self.layout_pattern)?;
        let appender = ConsoleAppender::new(Self::APPENDER_NAME, layout).with_target(self.stream.target());

        let binding = Binding::new(self.destination());
        binding.attach(Arc::new(appender), self.threshold);
        debug!(destination = self.destination(), threshold = %self.threshold, "console sink configured");

        self.binding = Some(binding);
        Ok(())
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_PATTERN)
    }
}

forward_to_binding!(ConsoleLogger);

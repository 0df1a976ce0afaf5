//! In-memory capture, mostly for inspection and tests.

use parking_lot::Mutex;
use quill_types::Result;
use std::any::Any;

use super::Appender;
use crate::event::LoggingEvent;
use crate::layout::PatternLayout;
use crate::level::EngineLevel;

/// Keeps every event it receives.
pub struct MemoryAppender {
    name: String,
    layout: PatternLayout,
    threshold: EngineLevel,
    events: Mutex<Vec<LoggingEvent>>,
}

impl MemoryAppender {
    /// Create an appender rendering with `layout`.
    pub fn new(name: impl Into<String>, layout: PatternLayout) -> Self {
        Self {
            name: name.into(),
            layout,
            threshold: EngineLevel::ALL,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Set the appender threshold.
    pub fn with_threshold(mut self, threshold: EngineLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Captured events, oldest first.
    pub fn events(&self) -> Vec<LoggingEvent> {
        self.events.lock().clone()
    }

    /// Captured events rendered with the layout. Events that fail to
    /// render are skipped.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| self.layout.format(event).ok())
            .collect()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> EngineLevel {
        self.threshold
    }

    fn append(&self, event: &LoggingEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_clear() {
        let layout = PatternLayout::new("%level:%message").unwrap();
        let appender = MemoryAppender::new("memory", layout);

        appender.append(&LoggingEvent::new("app", EngineLevel::INFO, "a")).unwrap();
        appender.append(&LoggingEvent::new("app", EngineLevel::ERROR, "b")).unwrap();
        assert_eq!(appender.lines(), vec!["INFO:a", "ERROR:b"]);
        assert_eq!(appender.events()[1].level, EngineLevel::ERROR);

        appender.clear();
        assert!(appender.events().is_empty());
    }
}

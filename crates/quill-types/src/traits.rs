//! Core trait definitions for Quill abstractions.

use std::error::Error;
use crate::config::SinkOptions;
use crate::errors::Result;
use crate::SeverityLevel;

/// The logging capability handed to calling code.
///
/// Implementers forward to whatever destination they were configured for.
/// Only the four required methods carry behavior; the per-severity methods
/// and enablement queries are provided on top of them.
///
/// The threshold is not per-handle state. Setting it through one handle is
/// observed by every other handle bound to the same destination.
pub trait Logger: Send + Sync {
    /// Log `message` at `level`, with an optional cause rendered after it.
    ///
    /// `Off` and `All` are thresholds, not message severities; messages at
    /// those levels are dropped.
    fn log(&self, level: SeverityLevel, message: &str, cause: Option<&(dyn Error + 'static)>);

    /// Whether a message at `level` would currently be emitted.
    fn is_enabled_for(&self, level: SeverityLevel) -> bool;

    /// Current threshold of the bound destination.
    fn severity_threshold(&self) -> SeverityLevel;

    /// Change the threshold of the bound destination.
    fn set_severity_threshold(&self, level: SeverityLevel);

    /// Log a debug message.
    fn debug(&self, message: &str) {
        self.log(SeverityLevel::Debug, message, None);
    }

    /// Log a debug message with its cause.
    fn debug_with(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(SeverityLevel::Debug, message, Some(cause));
    }

    /// Log an informational message.
    fn info(&self, message: &str) {
        self.log(SeverityLevel::Info, message, None);
    }

    /// Log an informational message with its cause.
    fn info_with(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(SeverityLevel::Info, message, Some(cause));
    }

    /// Log a warning.
    fn warn(&self, message: &str) {
        self.log(SeverityLevel::Warn, message, None);
    }

    /// Log a warning with its cause.
    fn warn_with(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(SeverityLevel::Warn, message, Some(cause));
    }

    /// Log an error.
    fn error(&self, message: &str) {
        self.log(SeverityLevel::Error, message, None);
    }

    /// Log an error with its cause.
    fn error_with(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(SeverityLevel::Error, message, Some(cause));
    }

    /// Log a fatal error.
    fn fatal(&self, message: &str) {
        self.log(SeverityLevel::Fatal, message, None);
    }

    /// Log a fatal error with its cause.
    fn fatal_with(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(SeverityLevel::Fatal, message, Some(cause));
    }

    /// Whether debug messages are emitted.
    fn is_debug_enabled(&self) -> bool {
        self.is_enabled_for(SeverityLevel::Debug)
    }

    /// Whether informational messages are emitted.
    fn is_info_enabled(&self) -> bool {
        self.is_enabled_for(SeverityLevel::Info)
    }

    /// Whether warnings are emitted.
    fn is_warn_enabled(&self) -> bool {
        self.is_enabled_for(SeverityLevel::Warn)
    }

    /// Whether errors are emitted.
    fn is_error_enabled(&self) -> bool {
        self.is_enabled_for(SeverityLevel::Error)
    }

    /// Whether fatal errors are emitted.
    fn is_fatal_enabled(&self) -> bool {
        self.is_enabled_for(SeverityLevel::Fatal)
    }
}

/// Builds a configured [`Logger`] from a flat option map.
///
/// Each sink variant has its own factory. Factories read the keys they
/// recognize, fall back to documented defaults, and ignore everything else.
pub trait SinkFactory: Send + Sync {
    /// Create and configure a logger.
    ///
    /// Construction errors and engine failures are returned unchanged.
    fn create_logger(&self, options: &SinkOptions) -> Result<Box<dyn Logger>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        threshold: Mutex<SeverityLevel>,
        lines: Mutex<Vec<String>>,
    }

    impl Logger for Recorder {
        fn log(&self, level: SeverityLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
            if !self.is_enabled_for(level) {
                return;
            }
            let line = match cause {
                Some(cause) => format!("{} {} ({})", level, message, cause),
                None => format!("{} {}", level, message),
            };
            self.lines.lock().unwrap().push(line);
        }

        fn is_enabled_for(&self, level: SeverityLevel) -> bool {
            level.passes(*self.threshold.lock().unwrap())
        }

        fn severity_threshold(&self) -> SeverityLevel {
            *self.threshold.lock().unwrap()
        }

        fn set_severity_threshold(&self, level: SeverityLevel) {
            *self.threshold.lock().unwrap() = level;
        }
    }

    #[test]
    fn test_provided_methods_route_through_log() {
        let recorder = Recorder {
            threshold: Mutex::new(SeverityLevel::Warn),
            lines: Mutex::new(Vec::new()),
        };
        let logger: &dyn Logger = &recorder;

        logger.info("dropped");
        logger.warn("kept");
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        logger.error_with("write failed", &cause);

        assert!(!logger.is_info_enabled());
        assert!(logger.is_warn_enabled());
        assert!(logger.is_fatal_enabled());

        let lines = recorder.lines.lock().unwrap();
        assert_eq!(*lines, vec![
            "WARN kept".to_string(),
            "ERROR write failed (disk full)".to_string(),
        ]);
    }
}

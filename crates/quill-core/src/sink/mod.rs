//! The four sink variants behind the [`Logger`](quill_types::Logger) capability.
//!
//! Every sink is built with `new(...)`, adjusted with `with_*` builders, and
//! then `configure()`d. Configuring binds the sink to a destination
//! repository in the engine. Until then the sink drops every message,
//! reports nothing as enabled, and reads its threshold as `Off`.
//!
//! Sinks bound to the same destination share its threshold and appenders.
//! Configuring a second time adds another appender, so every message is then
//! written twice.

mod colored_console;
mod console;
mod file;
mod legacy;

pub use self::colored_console::ColoredConsoleLogger;
pub use self::console::{ConsoleLogger, ConsoleStream};
pub use self::file::FileLogger;
pub use self::legacy::LegacyLogger;

use quill_engine::{repository, Appender, LoggingEvent, Repository};
use quill_types::SeverityLevel;
use std::error::Error;
use std::sync::Arc;

use crate::threshold::{from_engine, to_engine};

/// Layout used when no pattern is supplied.
pub const DEFAULT_LAYOUT_PATTERN: &str = "[%-5level %date] %message%newline%exception";

/// File written by the file sink when no name is supplied.
pub const DEFAULT_LOG_FILE_NAME: &str = "must.log";

/// A sink's handle on its destination repository.
#[derive(Clone)]
pub(crate) struct Binding {
    repository: Arc<Repository>,
}

impl Binding {
    pub(crate) fn new(destination: &str) -> Self {
        Self {
            repository: repository(destination),
        }
    }

    /// Add `appender` and reset the destination threshold.
    pub(crate) fn attach(&self, appender: Arc<dyn Appender>, threshold: SeverityLevel) {
        self.repository.add_appender(appender);
        self.repository.set_threshold(to_engine(threshold));
        self.repository.mark_configured();
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.repository.is_configured()
    }

    pub(crate) fn log(
        &self,
        level: SeverityLevel,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        if !is_message_level(level) {
            return;
        }

        let mut event = LoggingEvent::new(self.repository.name(), to_engine(level), message);
        if let Some(cause) = cause {
            event = event.with_exception(cause);
        }
        self.repository.dispatch(&event);
    }

    pub(crate) fn is_enabled_for(&self, level: SeverityLevel) -> bool {
        is_message_level(level) && self.repository.is_enabled_for(to_engine(level))
    }

    pub(crate) fn threshold(&self) -> SeverityLevel {
        from_engine(self.repository.threshold())
    }

    pub(crate) fn set_threshold(&self, level: SeverityLevel) {
        self.repository.set_threshold(to_engine(level));
    }
}

fn is_message_level(level: SeverityLevel) -> bool {
    !matches!(level, SeverityLevel::Off | SeverityLevel::All)
}

/// Implements `Logger` by forwarding to an optional `binding` field.
macro_rules! forward_to_binding {
    ($sink:ty) => {
        impl quill_types::Logger for $sink {
            fn log(
                &self,
                level: quill_types::SeverityLevel,
                message: &str,
                cause: Option<&(dyn std::error::Error + 'static)>,
            ) {
                if let Some(binding) = &self.binding {
                    binding.log(level, message, cause);
                }
            }

            fn is_enabled_for(&self, level: quill_types::SeverityLevel) -> bool {
                self.binding
                    .as_ref()
                    .map_or(false, |binding| binding.is_enabled_for(level))
            }

            fn severity_threshold(&self) -> quill_types::SeverityLevel {
                self.binding
                    .as_ref()
                    .map_or(quill_types::SeverityLevel::Off, |binding| binding.threshold())
            }

            fn set_severity_threshold(&self, level: quill_types::SeverityLevel) {
                if let Some(binding) = &self.binding {
                    binding.set_threshold(level);
                }
            }
        }
    };
}

pub(crate) use forward_to_binding;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_engine::{MemoryAppender, PatternLayout};

    fn memory() -> Arc<MemoryAppender> {
        Arc::new(MemoryAppender::new("memory", PatternLayout::new("%level %message").unwrap()))
    }

    #[test]
    fn test_binding_forwards_and_filters() {
        let binding = Binding::new("binding-forward");
        let capture = memory();
        binding.attach(capture.clone(), SeverityLevel::Info);

        binding.log(SeverityLevel::Debug, "hidden", None);
        binding.log(SeverityLevel::Warn, "shown", None);
        binding.log(SeverityLevel::Off, "never", None);
        binding.log(SeverityLevel::All, "never", None);

        assert_eq!(capture.lines(), vec!["WARN shown"]);
        assert_eq!(binding.threshold(), SeverityLevel::Info);
        assert!(binding.is_configured());
    }

    #[test]
    fn test_threshold_levels_are_never_enabled() {
        let binding = Binding::new("binding-enabled");
        binding.attach(memory(), SeverityLevel::All);

        assert!(binding.is_enabled_for(SeverityLevel::Trace));
        assert!(!binding.is_enabled_for(SeverityLevel::All));
        assert!(!binding.is_enabled_for(SeverityLevel::Off));
    }

    #[test]
    fn test_threshold_shared_by_destination() {
        let first = Binding::new("binding-shared");
        let second = Binding::new("binding-shared");
        first.attach(memory(), SeverityLevel::Debug);

        second.set_threshold(SeverityLevel::Error);
        assert_eq!(first.threshold(), SeverityLevel::Error);
        assert!(!first.is_enabled_for(SeverityLevel::Warn));
    }

    #[test]
    fn test_cause_is_rendered() {
        let binding = Binding::new("binding-cause");
        let capture = Arc::new(MemoryAppender::new(
            "memory",
            PatternLayout::new("%message|%exception").unwrap(),
        ));
        binding.attach(capture.clone(), SeverityLevel::All);

        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "disk gone");
        binding.log(SeverityLevel::Error, "write failed", Some(&cause));

        assert_eq!(capture.lines(), vec!["write failed|disk gone\n"]);
    }
}

//! Logging events passed from repositories to appenders.
//!
//! Encoders and configured appenders consume `log::Record`s. An event is
//! lent to them as a record whose target is the logger name; the fields a
//! record cannot carry are published in the thread's mapped diagnostic
//! context for the duration of the call, under the `quill.*` keys below.
//! Patterns read them with `{X(quill.level)}`.

use chrono::{DateTime, Local};
use log::Record;
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt::Write;

use crate::level::EngineLevel;

/// Context key holding the exact engine level name, e.g. `FATAL`.
pub const LEVEL_KEY: &str = "quill.level";
/// Context key holding the rendered cause chain plus a newline, or nothing.
pub const EXCEPTION_KEY: &str = "quill.exception";
/// Context key holding the logging thread's name.
pub const THREAD_KEY: &str = "quill.thread";
/// Context key holding milliseconds since the engine started.
pub const ELAPSED_KEY: &str = "quill.elapsed";

const CONTEXT_KEYS: [&str; 4] = [LEVEL_KEY, EXCEPTION_KEY, THREAD_KEY, ELAPSED_KEY];

static STARTED: Lazy<DateTime<Local>> = Lazy::new(Local::now);

/// A single record on its way to the appenders.
#[derive(Debug, Clone)]
pub struct LoggingEvent {
    /// Repository (logger) name the event was logged through
    pub logger: String,
    /// Event level
    pub level: EngineLevel,
    /// Rendered message
    pub message: String,
    /// Rendered cause chain, if any
    pub exception: Option<String>,
    /// Creation time
    pub timestamp: DateTime<Local>,
    /// Name of the logging thread, or its id when unnamed
    pub thread: String,
}

impl LoggingEvent {
    /// Create an event stamped with the current time and thread.
    pub fn new(logger: impl Into<String>, level: EngineLevel, message: impl Into<String>) -> Self {
        Lazy::force(&STARTED);
        let current = std::thread::current();
        let thread = match current.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", current.id()),
        };

        Self {
            logger: logger.into(),
            level,
            message: message.into(),
            exception: None,
            timestamp: Local::now(),
            thread,
        }
    }

    /// Attach a cause, rendering it together with its sources.
    pub fn with_exception(mut self, cause: &(dyn Error + 'static)) -> Self {
        self.exception = Some(render_cause(cause));
        self
    }

    /// Milliseconds since the engine started.
    pub fn elapsed_millis(&self) -> i64 {
        (self.timestamp - *STARTED).num_milliseconds()
    }

    /// Lend the event to `f` as a `log::Record`, with its context published.
    pub(crate) fn with_record<T>(&self, f: impl FnOnce(&Record<'_>) -> T) -> T {
        let _context = ContextScope::enter(self);
        f(&Record::builder()
            .args(format_args!("{}", self.message))
            .level(self.level.log_level())
            .target(&self.logger)
            .build())
    }
}

/// Publishes an event's context keys and removes them again on drop.
struct ContextScope;

impl ContextScope {
    fn enter(event: &LoggingEvent) -> Self {
        let exception = match &event.exception {
            Some(exception) => format!("{}\n", exception),
            None => String::new(),
        };
        log_mdc::insert(LEVEL_KEY, event.level.name());
        log_mdc::insert(EXCEPTION_KEY, exception);
        log_mdc::insert(THREAD_KEY, event.thread.as_str());
        log_mdc::insert(ELAPSED_KEY, event.elapsed_millis().to_string());
        ContextScope
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        for key in CONTEXT_KEYS {
            log_mdc::remove(key);
        }
    }
}

/// Read a context value published for the record being handled.
pub(crate) fn context_value(key: &str) -> Option<String> {
    log_mdc::get(key, |value| value.map(str::to_owned))
}

fn render_cause(cause: &(dyn Error + 'static)) -> String {
    let mut rendered = cause.to_string();
    let mut source = cause.source();
    while let Some(inner) = source {
        let _ = write!(rendered, "\n  caused by: {}", inner);
        source = inner.source();
    }
    rendered
}

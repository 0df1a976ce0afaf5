//! Console sink that paints each message according to its level.

use quill_engine::{ColoredConsoleAppender, PatternLayout};
use quill_types::{DisplayColor, LevelColorRule, Result, SeverityLevel};
use std::sync::Arc;
use tracing::debug;

use super::{forward_to_binding, Binding, ConsoleStream, DEFAULT_LAYOUT_PATTERN};
use crate::color::LevelColorResolver;
use crate::threshold::to_engine;

const MESSAGE_LEVELS: [SeverityLevel; 6] = [
    SeverityLevel::Fatal,
    SeverityLevel::Error,
    SeverityLevel::Warn,
    SeverityLevel::Info,
    SeverityLevel::Debug,
    SeverityLevel::Trace,
];

/// Console sink with per-level foreground colors.
///
/// The rule set is frozen when the sink is configured; an empty or absent
/// set means the default green/red scheme. The resolved colors are handed
/// to the sink's own appender, which paints by event level.
pub struct ColoredConsoleLogger {
    layout_pattern: String,
    stream: ConsoleStream,
    destination: Option<String>,
    threshold: SeverityLevel,
    level_colors: Option<Vec<LevelColorRule>>,
    resolver: LevelColorResolver,
    binding: Option<Binding>,
}

impl ColoredConsoleLogger {
    /// Appender name registered with the destination.
    pub const APPENDER_NAME: &'static str = "colored-console";

    /// Create an unconfigured sink using `layout_pattern`.
    pub fn new(layout_pattern: impl Into<String>) -> Self {
        Self {
            layout_pattern: layout_pattern.into(),
            stream: ConsoleStream::Stdout,
            destination: None,
            threshold: SeverityLevel::Info,
            level_colors: None,
            resolver: LevelColorResolver::default(),
            binding: None,
        }
    }

    /// Use `rules` instead of the default colors.
    pub fn with_level_colors(mut self, rules: impl IntoIterator<Item = LevelColorRule>) -> Self {
        self.level_colors = Some(rules.into_iter().collect());
        self
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

    /// Destination this sink binds to.
    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or_else(|| self.stream.name())
    }

    /// Rules in effect, most severe first.
    ///
    /// Before `configure` these are the defaults.
    pub fn level_colors(&self) -> &[LevelColorRule] {
        self.resolver.rules()
    }

    /// Color a message at `level` is painted in.
    pub fn color_for(&self, level: SeverityLevel) -> DisplayColor {
        self.resolver.color_for(level)
    }

    /// Freeze the color rules, attach a colored console appender, and bind.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Layout` when the pattern does not compile.
    pub fn configure(&mut self) -> Result<()> {
        let layout = PatternLayout::new(&self.layout_pattern)?;

        self.resolver = match &self.level_colors {
            Some(rules) => LevelColorResolver::new(rules.iter().copied()),
            None => LevelColorResolver::default(),
        };

        let appender = MESSAGE_LEVELS.iter().fold(
            ColoredConsoleAppender::new(Self::APPENDER_NAME, layout).with_target(self.stream.target()),
            |appender, &level| appender.with_color(to_engine(level), self.resolver.color_for(level)),
        );

        let binding = Binding::new(self.destination());
        binding.attach(Arc::new(appender), self.threshold);
        debug!(
            destination = self.destination(),
            threshold = %self.threshold,
            rules = self.resolver.rules().len(),
            "colored console sink configured"
        );

        self.binding = Some(binding);
        Ok(())
    }
}

impl Default for ColoredConsoleLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_PATTERN)
    }
}

forward_to_binding!(ColoredConsoleLogger);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ConsoleLogger;
    use quill_engine::{repository, ConsoleAppender, MemoryAppender};
    use quill_types::Logger;

    fn capture(destination: &str) -> Arc<MemoryAppender> {
        let memory = Arc::new(MemoryAppender::new("capture", PatternLayout::new("%message").unwrap()));
        repository(destination).add_appender(memory.clone());
        memory
    }

    #[test]
    fn test_defaults() {
        let mut logger = ColoredConsoleLogger::default()
            .with_stream(ConsoleStream::Stderr)
            .with_destination("colored-defaults");
        logger.configure().unwrap();

        assert_eq!(logger.severity_threshold(), SeverityLevel::Info);
        assert!(!logger.is_debug_enabled());
        assert!(logger.is_info_enabled());
        assert_eq!(logger.color_for(SeverityLevel::Error), DisplayColor::Red);
        assert_eq!(logger.color_for(SeverityLevel::Info), DisplayColor::Green);
    }

    fn colored_appender(destination: &str) -> Arc<dyn quill_engine::Appender> {
        repository(destination)
            .appender(ColoredConsoleLogger::APPENDER_NAME)
            .unwrap()
    }

    #[test]
    fn test_appender_owns_resolved_colors() {
        let mut logger = ColoredConsoleLogger::new("%message%newline")
            .with_stream(ConsoleStream::Stderr)
            .with_destination("colored-events");
        logger.configure().unwrap();

        let appender = colored_appender("colored-events");
        let appender = appender.as_any().downcast_ref::<ColoredConsoleAppender>().unwrap();
        assert_eq!(appender.color_for(to_engine(SeverityLevel::Fatal)), DisplayColor::Red);
        assert_eq!(appender.color_for(to_engine(SeverityLevel::Error)), DisplayColor::Red);
        assert_eq!(appender.color_for(to_engine(SeverityLevel::Warn)), DisplayColor::Green);
        assert_eq!(appender.color_for(to_engine(SeverityLevel::Trace)), DisplayColor::Green);
    }

    #[test]
    fn test_shared_destination_paints_only_colored_output() {
        let mut plain = ConsoleLogger::new("%message%newline")
            .with_stream(ConsoleStream::Stderr)
            .with_destination("colored-shared");
        plain.configure().unwrap();
        let mut colored = ColoredConsoleLogger::new("%message%newline")
            .with_stream(ConsoleStream::Stderr)
            .with_destination("colored-shared")
            .with_threshold(SeverityLevel::All);
        colored.configure().unwrap();
        let memory = capture("colored-shared");

        plain.error("from plain sink");
        colored.error("from colored sink");

        let repo = repository("colored-shared");
        let plain_appender = repo.appender(ConsoleLogger::APPENDER_NAME).unwrap();
        let plain_appender = plain_appender.as_any().downcast_ref::<ConsoleAppender>().unwrap();
        let colored_appender = colored_appender("colored-shared");
        let colored_appender = colored_appender
            .as_any()
            .downcast_ref::<ColoredConsoleAppender>()
            .unwrap();

        let events = memory.events();
        assert_eq!(events.len(), 2);
        for event in &events {
            assert!(!plain_appender.render(event).unwrap().contains('\u{1b}'));
            assert!(colored_appender.render(event).unwrap().contains('\u{1b}'));
        }
        assert_eq!(plain_appender.render(&events[1]).unwrap(), "from colored sink\n");
    }

    #[test]
    fn test_custom_rules_frozen_at_configure() {
        let mut logger = ColoredConsoleLogger::new("%message")
            .with_stream(ConsoleStream::Stderr)
            .with_destination("colored-custom")
            .with_threshold(SeverityLevel::All)
            .with_level_colors([LevelColorRule::new(SeverityLevel::Warn, DisplayColor::Yellow)]);

        assert_eq!(logger.color_for(SeverityLevel::Warn), DisplayColor::Green);
        logger.configure().unwrap();
        let memory = capture("colored-custom");

        assert_eq!(logger.level_colors().len(), 1);
        assert_eq!(logger.color_for(SeverityLevel::Error), DisplayColor::Yellow);
        assert_eq!(logger.color_for(SeverityLevel::Info), DisplayColor::Default);

        logger.info("plain");
        let appender = colored_appender("colored-custom");
        let appender = appender.as_any().downcast_ref::<ColoredConsoleAppender>().unwrap();
        assert_eq!(appender.render(&memory.events()[0]).unwrap(), "plain");
    }

    #[test]
    fn test_empty_rules_mean_defaults() {
        let mut logger = ColoredConsoleLogger::default()
            .with_stream(ConsoleStream::Stderr)
            .with_destination("colored-empty")
            .with_level_colors(Vec::new());
        logger.configure().unwrap();
        assert_eq!(logger.level_colors(), LevelColorResolver::default().rules());
    }
}

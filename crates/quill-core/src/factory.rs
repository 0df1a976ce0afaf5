//! Factories that build and configure sinks from flat options.

use quill_types::{Logger, QuillError, Result, SeverityLevel, SinkFactory, SinkKind, SinkOptions};
use std::collections::HashMap;

use crate::options::ResolvedOptions;
use crate::sink::{ColoredConsoleLogger, ConsoleLogger, FileLogger, LegacyLogger};

/// Builds [`ConsoleLogger`]s. Threshold defaults to `All`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSinkFactory;

impl SinkFactory for ConsoleSinkFactory {
    fn create_logger(&self, options: &SinkOptions) -> Result<Box<dyn Logger>> {
        let resolved = ResolvedOptions::resolve(options);
        let mut logger = ConsoleLogger::new(resolved.layout_pattern)
            .with_threshold(resolved.level.unwrap_or(SeverityLevel::All));
        logger.configure()?;
        Ok(Box::new(logger))
    }
}

/// Builds [`ColoredConsoleLogger`]s. Threshold defaults to `Info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredConsoleSinkFactory;

impl SinkFactory for ColoredConsoleSinkFactory {
    fn create_logger(&self, options: &SinkOptions) -> Result<Box<dyn Logger>> {
        let resolved = ResolvedOptions::resolve(options);
        let mut logger = ColoredConsoleLogger::new(resolved.layout_pattern)
            .with_threshold(resolved.level.unwrap_or(SeverityLevel::Info));
        if let Some(rules) = resolved.level_colors {
            logger = logger.with_level_colors(rules);
        }
        logger.configure()?;
        Ok(Box::new(logger))
    }
}

/// Builds [`FileLogger`]s. Threshold defaults to `Info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSinkFactory;

impl SinkFactory for FileSinkFactory {
    fn create_logger(&self, options: &SinkOptions) -> Result<Box<dyn Logger>> {
        let resolved = ResolvedOptions::resolve(options);
        let logger = FileLogger::create(
            resolved.layout_pattern,
            resolved.level.unwrap_or(SeverityLevel::Info),
            resolved.file_name,
        )?;
        Ok(Box::new(logger))
    }
}

/// Builds [`LegacyLogger`]s from named configuration elements.
///
/// The `xml-element-name` option selects the element; its document is passed
/// to the engine untouched.
#[derive(Debug, Clone, Default)]
pub struct LegacySinkFactory {
    elements: HashMap<String, serde_yaml::Value>,
}

impl LegacySinkFactory {
    /// Create a factory over `elements`, keyed by element name.
    pub fn new(elements: HashMap<String, serde_yaml::Value>) -> Self {
        Self { elements }
    }

    /// Configuration element named `name`.
    pub fn element(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.elements.get(name)
    }
}

impl SinkFactory for LegacySinkFactory {
    fn create_logger(&self, options: &SinkOptions) -> Result<Box<dyn Logger>> {
        let resolved = ResolvedOptions::resolve(options);
        let document = self.element(&resolved.element_name).cloned().ok_or_else(|| {
            QuillError::Config(format!("Configuration element '{}' not found", resolved.element_name))
        })?;

        let mut logger = LegacyLogger::new(document, resolved.logger_name);
        logger.configure()?;
        // The document owns the threshold unless the options override it.
        if let Some(level) = resolved.level {
            logger.set_severity_threshold(level);
        }
        Ok(Box::new(logger))
    }
}

/// Factory for `kind`. Only the legacy factory uses `elements`.
pub fn factory_for(kind: SinkKind, elements: &HashMap<String, serde_yaml::Value>) -> Box<dyn SinkFactory> {
    match kind {
        SinkKind::Console => Box::new(ConsoleSinkFactory),
        SinkKind::ColoredConsole => Box::new(ColoredConsoleSinkFactory),
        SinkKind::File => Box::new(FileSinkFactory),
        SinkKind::Legacy => Box::new(LegacySinkFactory::new(elements.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FILE_NAME, LAYOUT_PATTERN, LEVEL, LOGGER_NAME, XML_ELEMENT_NAME};
    use crate::sink::ConsoleLogger;
    use quill_engine::{repository, ConsoleAppender, MemoryAppender, PatternLayout};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_console_factory_defaults() {
        let _stdout = crate::test_support::stdout_lock();
        let logger = ConsoleSinkFactory.create_logger(&SinkOptions::new()).unwrap();

        assert_eq!(logger.severity_threshold(), SeverityLevel::All);
        assert!(logger.is_debug_enabled());

        let repo = repository("stdout");
        let capture = Arc::new(MemoryAppender::new("factory-capture", PatternLayout::new("%message").unwrap()));
        repo.add_appender(capture.clone());
        logger.debug("factory ready");

        let appenders = repo.appenders();
        let console = appenders
            .iter()
            .rev()
            .find(|appender| appender.name() == ConsoleLogger::APPENDER_NAME)
            .unwrap();
        let console = console.as_any().downcast_ref::<ConsoleAppender>().unwrap();
        let event = capture.events().pop().unwrap();
        let line = console.render(&event).unwrap();

        assert!(line.starts_with("[DEBUG "));
        assert!(line.ends_with("] factory ready\n"));
    }

    #[test]
    fn test_colored_factory_defaults() {
        let _stdout = crate::test_support::stdout_lock();
        let options: SinkOptions = [("level-colors", "ERROR=magenta")].into_iter().collect();
        let logger = ColoredConsoleSinkFactory.create_logger(&options).unwrap();

        assert_eq!(logger.severity_threshold(), SeverityLevel::Info);
        assert!(!logger.is_debug_enabled());
    }

    #[test]
    fn test_file_factory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("factory.log");
        let options: SinkOptions = [
            (FILE_NAME, path.to_str().unwrap()),
            (LAYOUT_PATTERN, "%level|%message%newline"),
            (LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let logger = FileSinkFactory.create_logger(&options).unwrap();
        assert_eq!(logger.severity_threshold(), SeverityLevel::Debug);
        logger.debug("built");

        assert_eq!(fs::read_to_string(&path).unwrap(), "DEBUG|built\n");
    }

    #[test]
    fn test_file_factory_rejects_empty_name() {
        let options: SinkOptions = [(FILE_NAME, "")].into_iter().collect();
        assert!(matches!(
            FileSinkFactory.create_logger(&options),
            Err(QuillError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_legacy_factory() {
        let document: serde_yaml::Value = serde_yaml::from_str(
            "loggers:\n  factory-legacy:\n    level: error\n    appenders: []\n",
        )
        .unwrap();
        let elements = HashMap::from([("engine".to_string(), document)]);
        let options: SinkOptions = [(XML_ELEMENT_NAME, "engine"), (LOGGER_NAME, "factory-legacy")]
            .into_iter()
            .collect();

        let logger = factory_for(SinkKind::Legacy, &elements).create_logger(&options).unwrap();
        assert_eq!(logger.severity_threshold(), SeverityLevel::Error);
        assert!(!logger.is_warn_enabled());
    }

    #[test]
    fn test_legacy_factory_missing_element() {
        let factory = LegacySinkFactory::default();
        assert!(matches!(
            factory.create_logger(&SinkOptions::new()),
            Err(QuillError::Config(_))
        ));
    }
}

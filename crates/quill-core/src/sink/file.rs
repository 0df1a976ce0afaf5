//! Append-mode file sink.

use quill_engine::{FileAppender, PatternLayout};
use quill_types::{bail, Result, SeverityLevel};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::{forward_to_binding, Binding};

/// Appends formatted messages to a file.
///
/// The destination is the file path, so two sinks writing the same file
/// share a threshold.
pub struct FileLogger {
    layout_pattern: String,
    path: PathBuf,
    threshold: SeverityLevel,
    binding: Option<Binding>,
}

impl FileLogger {
    /// Appender name registered with the destination.
    pub const APPENDER_NAME: &'static str = "file";

    /// Create an unconfigured sink writing to `path`.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::InvalidArgument` when `path` is empty.
    pub fn new(layout_pattern: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            bail!(InvalidArgument, "log file path must not be empty");
        }

        Ok(Self {
            layout_pattern: layout_pattern.into(),
            path: path.to_path_buf(),
            threshold: SeverityLevel::Info,
            binding: None,
        })
    }

    /// Create and configure a sink in one step.
    pub fn create(layout_pattern: impl Into<String>, threshold: SeverityLevel, path: impl AsRef<Path>) -> Result<Self> {
        let mut logger = Self::new(layout_pattern, path)?.with_threshold(threshold);
        logger.configure()?;
        Ok(logger)
    }

    /// Threshold applied to the destination on `configure`.
    pub fn with_threshold(mut self, threshold: SeverityLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// File being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Destination this sink binds to.
    pub fn destination(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Open the file for appending and bind to it.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Layout` for a bad pattern and
    /// `QuillError::Appender` when the file cannot be opened.
    pub fn configure(&mut self) -> Result<()> {
        let layout = PatternLayout::new(&self.layout_pattern)?;
        let appender = FileAppender::open(Self::APPENDER_NAME, &self.path, layout)?;

        let destination = self.destination();
        let binding = Binding::new(&destination);
        binding.attach(Arc::new(appender), self.threshold);
        debug!(destination = %destination, threshold = %self.threshold, "file sink configured");

        self.binding = Some(binding);
        Ok(())
    }
}

forward_to_binding!(FileLogger);

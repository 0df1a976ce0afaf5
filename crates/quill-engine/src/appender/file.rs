//! Append-mode file output.

use log4rs::append::{file, Append};
use quill_types::{QuillError, Result};
use std::any::Any;
use std::path::{Path, PathBuf};

use super::Appender;
use crate::event::LoggingEvent;
use crate::layout::PatternLayout;
use crate::level::EngineLevel;

/// Writes formatted events to a single file that never rotates.
///
/// The parent directory is created when missing. Two appenders opened on the
/// same path both append to it; each record is flushed as it is written.
#[derive(Debug)]
pub struct FileAppender {
    name: String,
    path: PathBuf,
    threshold: EngineLevel,
    output: file::FileAppender,
}

impl FileAppender {
    /// Open `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Appender` when the file cannot be opened.
    pub fn open(name: impl Into<String>, path: impl AsRef<Path>, layout: PatternLayout) -> Result<Self> {
        Self::open_with(name, path, layout, true)
    }

    /// Open `path`, truncating it first unless `append` is set.
    pub fn open_with(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        layout: PatternLayout,
        append: bool,
    ) -> Result<Self> {
        let path = path.as_ref();
        let output = file::FileAppender::builder()
            .encoder(Box::new(layout.encoder()))
            .append(append)
            .build(path)
            .map_err(|e| QuillError::Appender(format!("Failed to open {:?}: {}", path, e)))?;

        Ok(Self {
            name: name.into(),
            path: path.to_path_buf(),
            threshold: EngineLevel::ALL,
            output,
        })
    }

    /// Set the appender threshold.
    pub fn with_threshold(mut self, threshold: EngineLevel) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Appender for FileAppender {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> EngineLevel {
        self.threshold
    }

    fn append(&self, event: &LoggingEvent) -> Result<()> {
        event
            .with_record(|record| self.output.append(record))
            .map_err(|e| QuillError::Appender(format!("Failed to write to {:?}: {}", self.path, e)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

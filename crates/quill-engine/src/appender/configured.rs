//! Appenders declared in a configuration document.

use log::Record;
use log4rs::config;
use log4rs::filter::Response;
use quill_types::{QuillError, Result};
use std::any::Any;

use super::Appender;
use crate::event::LoggingEvent;

/// A document-declared `log4rs` appender, together with its filters.
///
/// The filters run in order; the first that accepts or rejects a record
/// decides, and a record every filter is neutral about is written.
#[derive(Debug)]
pub struct ConfiguredAppender {
    inner: config::Appender,
}

impl ConfiguredAppender {
    /// Adopt an appender built from a document.
    pub fn new(inner: config::Appender) -> Self {
        Self { inner }
    }

    fn passes_filters(&self, record: &Record<'_>) -> bool {
        for filter in self.inner.filters() {
            match filter.filter(record) {
                Response::Accept => return true,
                Response::Reject => return false,
                Response::Neutral => {}
            }
        }
        true
    }
}

impl Appender for ConfiguredAppender {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn append(&self, event: &LoggingEvent) -> Result<()> {
        event
            .with_record(|record| {
                if !self.passes_filters(record) {
                    return Ok(());
                }
                self.inner.appender().append(record)
            })
            .map_err(|e| QuillError::Appender(format!("{}: {}", self.name(), e)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//! Sink wired entirely by an engine configuration document.

use quill_types::Result;
use tracing::{debug, warn};

use super::{forward_to_binding, Binding};

/// Hands a document to the engine and logs through one of the repositories
/// it describes.
///
/// The sink sets no threshold and attaches no appenders of its own.
pub struct LegacyLogger {
    document: serde_yaml::Value,
    logger_name: String,
    binding: Option<Binding>,
}

impl LegacyLogger {
    /// Create an unconfigured sink.
    pub fn new(document: serde_yaml::Value, logger_name: impl Into<String>) -> Self {
        Self {
            document,
            logger_name: logger_name.into(),
            binding: None,
        }
    }

    /// Repository this sink logs through.
    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// Configure the engine from the document and bind to `logger_name`.
    ///
    /// # Errors
    ///
    /// Document failures are returned as-is.
    pub fn configure(&mut self) -> Result<()> {
        quill_engine::configure(&self.document)?;

        let binding = Binding::new(&self.logger_name);
        if !binding.is_configured() {
            warn!(
                logger = %self.logger_name,
                "document does not configure this logger; messages will not be written anywhere"
            );
        }
        debug!(logger = %self.logger_name, "legacy sink configured");

        self.binding = Some(binding);
        Ok(())
    }
}

forward_to_binding!(LegacyLogger);

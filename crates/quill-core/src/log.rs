//! Diagnostics for the Quill crates themselves.
//!
//! Quill reports its own lifecycle (sinks configured, lenient defaults applied,
//! appender failures) through `tracing`. These helpers install a subscriber
//! for those diagnostics; applications with their own subscriber skip them.

use quill_types::{QuillError, Result, SeverityLevel};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a subscriber honoring `RUST_LOG`, falling back to warnings only.
pub fn init_default() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    init_with_filter(filter)
}

/// Install a subscriber showing diagnostics at `level` and above.
pub fn init_with_level(level: SeverityLevel) -> Result<()> {
    init_with_filter(EnvFilter::new(directive_for(level)))
}

/// `EnvFilter` directive equivalent to a severity threshold.
pub fn directive_for(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Off => "off",
        SeverityLevel::Fatal | SeverityLevel::Error => "error",
        SeverityLevel::Warn => "warn",
        SeverityLevel::Info => "info",
        SeverityLevel::Debug => "debug",
        SeverityLevel::Trace | SeverityLevel::All => "trace",
    }
}

fn init_with_filter(filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| QuillError::Other(format!("Failed to initialize diagnostics: {}", e)))
}

//! Error types for Quill operations.

use thiserror::Error;

/// The main error type for Quill operations.
///
/// Construction failures are reported synchronously by the sink constructors.
/// Failures raised by the logging engine (bad layouts, unopenable files,
/// malformed documents) pass through the facade unchanged.
#[derive(Error, Debug)]
pub enum QuillError {
    /// A required construction argument was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layout pattern could not be compiled
    #[error("Layout error: {0}")]
    Layout(String),

    /// Appender could not be initialized
    #[error("Appender error: {0}")]
    Appender(String),

    /// Engine configuration document was malformed
    #[error("Document error: {0}")]
    Document(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for Quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;

/// Helper macro to bail out with a QuillError
///
/// # Example
///
/// ```ignore
/// if path.is_empty() {
///     bail!(InvalidArgument, "log file path must not be empty");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::QuillError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::QuillError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::QuillError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::QuillError::Other(format!($fmt, $($arg)*)))
    };
}

//! Option keys understood by the sink factories, and their defaults.

use quill_types::{DisplayColor, LevelColorRule, SeverityLevel, SinkOptions};
use tracing::warn;

use crate::sink::{DEFAULT_LAYOUT_PATTERN, DEFAULT_LOG_FILE_NAME};

/// Layout conversion pattern
pub const LAYOUT_PATTERN: &str = "layout-pattern";
/// Log file path for the file sink
pub const FILE_NAME: &str = "file-name";
/// Repository the legacy sink logs through
pub const LOGGER_NAME: &str = "logger-name";
/// Configuration element holding the legacy document
pub const XML_ELEMENT_NAME: &str = "xml-element-name";
/// Initial threshold
pub const LEVEL: &str = "level";
/// Color rules for the colorized console sink, `LEVEL=color;LEVEL=color`
pub const LEVEL_COLORS: &str = "level-colors";

/// Default repository for the legacy sink.
pub const DEFAULT_LOGGER_NAME: &str = "root";
/// Default configuration element for the legacy sink.
pub const DEFAULT_ELEMENT_NAME: &str = "quill-engine";

/// Every recognized option with its default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Layout conversion pattern
    pub layout_pattern: String,
    /// Log file path
    pub file_name: String,
    /// Legacy repository name
    pub logger_name: String,
    /// Legacy configuration element name
    pub element_name: String,
    /// Initial threshold, when given; each sink has its own default
    pub level: Option<SeverityLevel>,
    /// Color rules, when any valid entry was given
    pub level_colors: Option<Vec<LevelColorRule>>,
}

impl ResolvedOptions {
    /// Read the recognized keys from `options`.
    ///
    /// Nothing here fails. A `level` that does not name a severity resolves to
    /// `Off`, and malformed `level-colors` entries are dropped.
    pub fn resolve(options: &SinkOptions) -> Self {
        Self {
            layout_pattern: options.get_or(LAYOUT_PATTERN, DEFAULT_LAYOUT_PATTERN).to_string(),
            file_name: options.get_or(FILE_NAME, DEFAULT_LOG_FILE_NAME).to_string(),
            logger_name: options.get_or(LOGGER_NAME, DEFAULT_LOGGER_NAME).to_string(),
            element_name: options.get_or(XML_ELEMENT_NAME, DEFAULT_ELEMENT_NAME).to_string(),
            level: options.get(LEVEL).map(parse_level),
            level_colors: options.get(LEVEL_COLORS).map(parse_level_colors).filter(|rules| !rules.is_empty()),
        }
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self::resolve(&SinkOptions::new())
    }
}

fn parse_level(raw: &str) -> SeverityLevel {
    let level = SeverityLevel::from_name_or_off(raw);
    if level == SeverityLevel::Off && !raw.trim().eq_ignore_ascii_case("off") {
        warn!(value = raw, "unrecognized level option, using OFF");
    }
    level
}

/// Parse `LEVEL=color` pairs separated by `;` or `,`.
pub fn parse_level_colors(raw: &str) -> Vec<LevelColorRule> {
    raw.split(|c| c == ';' || c == ',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let rule = entry.split_once('=').and_then(|(level, color)| {
                let level = level.parse::<SeverityLevel>().ok()?;
                let color = color.parse::<DisplayColor>().ok()?;
                Some(LevelColorRule::new(level, color))
            });
            if rule.is_none() {
                warn!(entry, "skipping malformed level color entry");
            }
            rule
        })
        .collect()
}

//! Conversion-pattern layouts.
//!
//! A pattern mixes literal text with conversions such as `%-5level` or
//! `%date{%H:%M}`. A conversion may carry `-` (left-justify), a minimum width
//! and a `.N` maximum width.
//!
//! Patterns are translated into `log4rs` pattern-encoder syntax and rendered
//! by a [`PatternEncoder`]. Conversions with no encoder equivalent (the exact
//! level name, the cause chain, the thread and the elapsed time) read the
//! values each event publishes in the diagnostic context.

use chrono::format::{Item, StrftimeItems};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::writer::simple::SimpleWriter;
use log4rs::encode::Encode;
use quill_types::{QuillError, Result};

use crate::event::{LoggingEvent, ELAPSED_KEY, EXCEPTION_KEY, LEVEL_KEY, THREAD_KEY};

const ISO8601: &str = "%Y-%m-%d %H:%M:%S,%3f";
const ABSOLUTE: &str = "%H:%M:%S,%3f";
const DATE: &str = "%d %b %Y %H:%M:%S,%3f";

/// Widest minimum or maximum width a conversion may ask for.
pub const MAX_WIDTH: usize = 1024;

/// A compiled conversion pattern.
#[derive(Debug)]
pub struct PatternLayout {
    pattern: String,
    encoder_pattern: String,
    encoder: PatternEncoder,
}

impl PatternLayout {
    /// Compile a conversion pattern.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Layout` for unknown conversions, widths above
    /// [`MAX_WIDTH`] and invalid date formats.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let encoder_pattern = translate(&pattern)?;
        let encoder = PatternEncoder::new(&encoder_pattern);

        Ok(Self {
            pattern,
            encoder_pattern,
            encoder,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent pattern-encoder pattern.
    pub fn encoder_pattern(&self) -> &str {
        &self.encoder_pattern
    }

    /// A fresh encoder for this pattern, for handing to an appender.
    pub fn encoder(&self) -> PatternEncoder {
        PatternEncoder::new(&self.encoder_pattern)
    }

    /// Render an event.
    pub fn format(&self, event: &LoggingEvent) -> Result<String> {
        let mut writer = SimpleWriter(Vec::new());
        event
            .with_record(|record| self.encoder.encode(&mut writer, record))
            .map_err(|e| QuillError::Layout(format!("Failed to render '{}': {}", self.pattern, e)))?;
        String::from_utf8(writer.0).map_err(|e| QuillError::Layout(format!("Rendered text is not UTF-8: {}", e)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Padding {
    left_align: bool,
    min: Option<usize>,
    max: Option<usize>,
}

impl Padding {
    /// Format spec suffix, e.g. `:<5` or `:>8.20`.
    fn spec(&self) -> String {
        if self.min.is_none() && self.max.is_none() {
            return String::new();
        }

        let mut spec = String::from(":");
        if let Some(min) = self.min {
            spec.push(if self.left_align { '<' } else { '>' });
            spec.push_str(&min.to_string());
        }
        if let Some(max) = self.max {
            spec.push('.');
            spec.push_str(&max.to_string());
        }
        spec
    }
}

fn translate(pattern: &str) -> Result<String> {
    let conversion = regex::Regex::new(r"%(?:(%)|(-)?(\d+)?(?:\.(\d+))?([A-Za-z]+)(?:\{([^}]*)\})?)")
        .map_err(|e| QuillError::Layout(format!("Invalid regex: {}", e)))?;

    let mut out = String::new();
    let mut last = 0;

    for caps in conversion.captures_iter(pattern) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape(&pattern[last..whole.start()]));
        last = whole.end();

        if caps.get(1).is_some() {
            out.push('%');
            continue;
        }

        let padding = Padding {
            left_align: caps.get(2).is_some(),
            min: parse_width(caps.get(3).map(|m| m.as_str()), pattern)?,
            max: parse_width(caps.get(4).map(|m| m.as_str()), pattern)?,
        };
        let name = caps.get(5).map(|m| m.as_str()).unwrap_or_default();
        let option = caps.get(6).map(|m| m.as_str());

        let formatter = formatter(name, option, pattern)?;
        out.push('{');
        out.push_str(&formatter);
        out.push_str(&padding.spec());
        out.push('}');
    }

    out.push_str(&escape(&pattern[last..]));
    Ok(out)
}

fn parse_width(width: Option<&str>, pattern: &str) -> Result<Option<usize>> {
    let Some(width) = width else { return Ok(None) };
    let value = width
        .parse::<usize>()
        .map_err(|e| QuillError::Layout(format!("Invalid width '{}' in '{}': {}", width, pattern, e)))?;
    if value > MAX_WIDTH {
        return Err(QuillError::Layout(format!(
            "Width {} in '{}' exceeds the limit of {}",
            value, pattern, MAX_WIDTH
        )));
    }
    Ok(Some(value))
}

fn formatter(name: &str, option: Option<&str>, pattern: &str) -> Result<String> {
    let formatter = match name {
        "level" | "p" => context(LEVEL_KEY),
        "date" | "d" => format!("d({})", escape(date_format(option)?)),
        "utcdate" => format!("d({})(utc)", escape(date_format(option)?)),
        "message" | "m" => "m".to_string(),
        "newline" | "n" => "n".to_string(),
        "exception" => context(EXCEPTION_KEY),
        "logger" | "c" => "t".to_string(),
        "thread" | "t" => context(THREAD_KEY),
        "timestamp" | "r" => context(ELAPSED_KEY),
        other => {
            return Err(QuillError::Layout(format!(
                "Unknown conversion '%{}' in pattern '{}'",
                other, pattern
            )))
        }
    };
    Ok(formatter)
}

fn context(key: &str) -> String {
    format!("X({})", key)
}

fn date_format(option: Option<&str>) -> Result<&str> {
    let format = match option {
        None | Some("") | Some("ISO8601") => ISO8601,
        Some("ABSOLUTE") => ABSOLUTE,
        Some("DATE") => DATE,
        Some(custom) => custom,
    };

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(QuillError::Layout(format!("Invalid date format '{}'", format)));
    }

    Ok(format)
}

/// Double the characters the encoder treats as syntax.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '{' | '}' | '(' | ')' | '\\') {
            escaped.push(ch);
        }
        escaped.push(ch);
    }
    escaped
}

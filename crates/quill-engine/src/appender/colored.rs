//! Console output painted by level.

use log::Record;
use log4rs::append::{console, Append};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::writer::ansi::AnsiWriter;
use log4rs::encode::{self, Color, Encode, Style};
use quill_types::{DisplayColor, QuillError, Result};
use std::any::Any;

use super::console::{build_console, ConsoleTarget};
use super::Appender;
use crate::event::LoggingEvent;
use crate::layout::PatternLayout;
use crate::level::EngineLevel;

/// Wraps the pattern encoder in one foreground color.
#[derive(Debug)]
struct PaintedEncoder {
    inner: PatternEncoder,
    color: Color,
}

impl Encode for PaintedEncoder {
    fn encode(&self, w: &mut dyn encode::Write, record: &Record<'_>) -> anyhow::Result<()> {
        w.set_style(Style::new().text(self.color))?;
        self.inner.encode(w, record)?;
        w.set_style(&Style::new())?;
        Ok(())
    }
}

fn paint(color: DisplayColor) -> Option<Color> {
    match color {
        DisplayColor::Default => None,
        DisplayColor::Black => Some(Color::Black),
        DisplayColor::Red => Some(Color::Red),
        DisplayColor::Green => Some(Color::Green),
        DisplayColor::Yellow => Some(Color::Yellow),
        DisplayColor::Blue => Some(Color::Blue),
        DisplayColor::Magenta => Some(Color::Magenta),
        DisplayColor::Cyan => Some(Color::Cyan),
        DisplayColor::White => Some(Color::White),
    }
}

/// Writes formatted events to stdout or stderr, painting each one in the
/// color assigned to its level.
///
/// The level-to-color table belongs to the appender, so events logged
/// through any handle sharing the repository are painted the same way.
/// Levels without an entry are written unpainted. Escapes are only emitted
/// when the stream is a terminal.
#[derive(Debug)]
pub struct ColoredConsoleAppender {
    name: String,
    target: ConsoleTarget,
    layout: PatternLayout,
    threshold: EngineLevel,
    colors: Vec<(EngineLevel, DisplayColor)>,
    plain: console::ConsoleAppender,
    painted: Vec<(EngineLevel, console::ConsoleAppender)>,
}

impl ColoredConsoleAppender {
    /// Create an appender writing to stdout with an empty color table.
    pub fn new(name: impl Into<String>, layout: PatternLayout) -> Self {
        let plain = build_console(ConsoleTarget::Stdout, Box::new(layout.encoder()));
        Self {
            name: name.into(),
            target: ConsoleTarget::Stdout,
            layout,
            threshold: EngineLevel::ALL,
            colors: Vec::new(),
            plain,
            painted: Vec::new(),
        }
    }

    /// Select the stream.
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self.rebuild();
        self
    }

    /// Paint events at exactly `level` in `color`, replacing any earlier
    /// entry for that level.
    pub fn with_color(mut self, level: EngineLevel, color: DisplayColor) -> Self {
        self.colors.retain(|(existing, _)| *existing != level);
        self.colors.push((level, color));
        self.rebuild();
        self
    }

    /// Set the appender threshold.
    pub fn with_threshold(mut self, threshold: EngineLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Color events at `level` are painted in.
    pub fn color_for(&self, level: EngineLevel) -> DisplayColor {
        self.colors
            .iter()
            .find(|(existing, _)| *existing == level)
            .map(|(_, color)| *color)
            .unwrap_or(DisplayColor::Default)
    }

    /// Render an event as it appears on a terminal.
    pub fn render(&self, event: &LoggingEvent) -> Result<String> {
        let Some(color) = paint(self.color_for(event.level)) else {
            return self.layout.format(event);
        };

        let encoder = PaintedEncoder {
            inner: self.layout.encoder(),
            color,
        };
        let mut writer = AnsiWriter(Vec::new());
        event
            .with_record(|record| encoder.encode(&mut writer, record))
            .map_err(|e| QuillError::Layout(format!("Failed to render '{}': {}", self.layout.pattern(), e)))?;
        String::from_utf8(writer.0).map_err(|e| QuillError::Layout(format!("Rendered text is not UTF-8: {}", e)))
    }

    fn rebuild(&mut self) {
        self.plain = build_console(self.target, Box::new(self.layout.encoder()));
        self.painted = self
            .colors
            .iter()
            .filter_map(|(level, color)| {
                let color = paint(*color)?;
                let encoder = PaintedEncoder {
                    inner: self.layout.encoder(),
                    color,
                };
                Some((*level, build_console(self.target, Box::new(encoder))))
            })
            .collect();
    }

    fn output_for(&self, level: EngineLevel) -> &console::ConsoleAppender {
        self.painted
            .iter()
            .find(|(existing, _)| *existing == level)
            .map(|(_, output)| output)
            .unwrap_or(&self.plain)
    }
}

impl Appender for ColoredConsoleAppender {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> EngineLevel {
        self.threshold
    }

    fn append(&self, event: &LoggingEvent) -> Result<()> {
        let output = self.output_for(event.level);
        event
            .with_record(|record| output.append(record))
            .map_err(|e| QuillError::Appender(format!("Failed to write to {:?}: {}", self.target, e)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

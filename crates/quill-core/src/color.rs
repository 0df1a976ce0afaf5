//! Per-level color selection for the colorized console sink.
//!
//! A rule set is a list of breakpoints. A message takes the color of the
//! nearest breakpoint at or below its own severity: with rules for `Warn` and
//! `Error`, a `Fatal` message is painted with the `Error` color and an `Info`
//! message gets no color unless something at `Info` or below is listed.

use quill_types::{DisplayColor, LevelColorRule, SeverityLevel};
use std::collections::BTreeMap;

/// Color used when no rule matches.
pub const BASE_COLOR: DisplayColor = DisplayColor::Default;

/// Green for warnings and everything quieter, red for errors.
pub fn default_rules() -> Vec<LevelColorRule> {
    vec![
        LevelColorRule::new(SeverityLevel::Warn, DisplayColor::Green),
        LevelColorRule::new(SeverityLevel::Info, DisplayColor::Green),
        LevelColorRule::new(SeverityLevel::Debug, DisplayColor::Green),
        LevelColorRule::new(SeverityLevel::Trace, DisplayColor::Green),
        LevelColorRule::new(SeverityLevel::All, DisplayColor::Green),
        LevelColorRule::new(SeverityLevel::Error, DisplayColor::Red),
    ]
}

/// Resolve the color for `level` against an unnormalized rule list.
///
/// When several rules name the same level the later one wins.
pub fn color_for(level: SeverityLevel, rules: &[LevelColorRule]) -> DisplayColor {
    rules
        .iter()
        .filter(|rule| level <= rule.level)
        .fold(None::<&LevelColorRule>, |best, rule| match best {
            Some(best) if best.level < rule.level => Some(best),
            _ => Some(rule),
        })
        .map(|rule| rule.color)
        .unwrap_or(BASE_COLOR)
}

/// A normalized, immutable rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelColorResolver {
    rules: Vec<LevelColorRule>,
}

impl LevelColorResolver {
    /// Build a resolver from `rules`.
    ///
    /// Duplicate levels collapse to the last rule given. An empty list falls
    /// back to [`default_rules`].
    pub fn new(rules: impl IntoIterator<Item = LevelColorRule>) -> Self {
        let by_level: BTreeMap<SeverityLevel, DisplayColor> =
            rules.into_iter().map(|rule| (rule.level, rule.color)).collect();

        if by_level.is_empty() {
            return Self::default();
        }

        Self {
            rules: by_level
                .into_iter()
                .map(|(level, color)| LevelColorRule::new(level, color))
                .collect(),
        }
    }

    /// Color for a message at `level`.
    pub fn color_for(&self, level: SeverityLevel) -> DisplayColor {
        // Sorted most severe first, so the first rule at or below wins.
        self.rules
            .iter()
            .find(|rule| level <= rule.level)
            .map(|rule| rule.color)
            .unwrap_or(BASE_COLOR)
    }

    /// Normalized rules, most severe first.
    pub fn rules(&self) -> &[LevelColorRule] {
        &self.rules
    }
}

impl Default for LevelColorResolver {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

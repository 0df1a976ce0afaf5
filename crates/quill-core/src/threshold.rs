//! Two-way mapping between facade severities and engine levels.

use quill_engine::EngineLevel;
use quill_types::SeverityLevel;

const TABLE: [(SeverityLevel, EngineLevel); 8] = [
    (SeverityLevel::Off, EngineLevel::OFF),
    (SeverityLevel::Fatal, EngineLevel::FATAL),
    (SeverityLevel::Error, EngineLevel::ERROR),
    (SeverityLevel::Warn, EngineLevel::WARN),
    (SeverityLevel::Info, EngineLevel::INFO),
    (SeverityLevel::Debug, EngineLevel::DEBUG),
    (SeverityLevel::Trace, EngineLevel::TRACE),
    (SeverityLevel::All, EngineLevel::ALL),
];

/// Engine level equivalent to `level`.
pub fn to_engine(level: SeverityLevel) -> EngineLevel {
    TABLE
        .iter()
        .find(|(severity, _)| *severity == level)
        .map(|(_, engine)| *engine)
        .unwrap_or(EngineLevel::OFF)
}

/// Severity equivalent to an engine level.
///
/// Engine levels with no facade counterpart (`NOTICE`, `FINE`, custom levels)
/// read as `Off`. Lookup compares both value and name, so `FINE` does not
/// alias `DEBUG` even though they share a value.
pub fn from_engine(level: EngineLevel) -> SeverityLevel {
    TABLE
        .iter()
        .find(|(_, engine)| *engine == level)
        .map(|(severity, _)| *severity)
        .unwrap_or(SeverityLevel::Off)
}

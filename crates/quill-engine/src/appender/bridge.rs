//! Forwards records into `tracing`.

use log::Record;
use log4rs::append::Append;
use log4rs::config::{Deserialize, Deserializers};

use crate::event::{context_value, EXCEPTION_KEY, LEVEL_KEY};

/// Re-emits records through whatever `tracing` subscriber is installed.
///
/// Declared in configuration documents as `kind: tracing`. Records keep their
/// `log` level; the exact engine level name travels as `level_name`.
#[derive(Debug, Default)]
pub struct BridgeAppender;

macro_rules! emit {
    ($level:expr, $record:ident, $level_name:ident, $exception:ident) => {
        tracing::event!(
            target: "quill",
            $level,
            logger = $record.target(),
            level_name = %$level_name,
            exception = ?$exception,
            "{}",
            $record.args()
        )
    };
}

impl Append for BridgeAppender {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        let level_name = context_value(LEVEL_KEY).unwrap_or_else(|| record.level().to_string());
        let exception = context_value(EXCEPTION_KEY)
            .filter(|exception| !exception.is_empty())
            .map(|exception| exception.trim_end().to_string());

        match record.level() {
            log::Level::Error => emit!(tracing::Level::ERROR, record, level_name, exception),
            log::Level::Warn => emit!(tracing::Level::WARN, record, level_name, exception),
            log::Level::Info => emit!(tracing::Level::INFO, record, level_name, exception),
            log::Level::Debug => emit!(tracing::Level::DEBUG, record, level_name, exception),
            log::Level::Trace => emit!(tracing::Level::TRACE, record, level_name, exception),
        }
        Ok(())
    }

    fn flush(&self) {}
}

/// Settings for `kind: tracing`. The bridge takes none.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeAppenderConfig {}

/// Builds [`BridgeAppender`]s for configuration documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct BridgeAppenderDeserializer;

impl Deserialize for BridgeAppenderDeserializer {
    type Trait = dyn Append;
    type Config = BridgeAppenderConfig;

    fn deserialize(
        &self,
        _config: BridgeAppenderConfig,
        _deserializers: &Deserializers,
    ) -> anyhow::Result<Box<dyn Append>> {
        Ok(Box::<BridgeAppender>::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LoggingEvent;
    use crate::level::EngineLevel;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_events_reach_subscriber() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let bridge = BridgeAppender;
        let notice = LoggingEvent::new("billing", EngineLevel::NOTICE, "invoice sent");
        let fatal = LoggingEvent::new("billing", EngineLevel::FATAL, "ledger lost");
        tracing::subscriber::with_default(subscriber, || {
            notice.with_record(|record| bridge.append(record)).unwrap();
            fatal.with_record(|record| bridge.append(record)).unwrap();
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("invoice sent"));
        assert!(output.contains("ERROR"));
        assert!(output.contains("level_name=\"FATAL\"") || output.contains("level_name=FATAL"));
    }
}

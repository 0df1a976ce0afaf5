//! Configuring repositories from a `log4rs` configuration document.
//!
//! The document uses the `log4rs` raw configuration format. Each entry under
//! `loggers` configures the repository of the same name, and `root`
//! configures the `root` repository:
//!
//! ```yaml
//! appenders:
//!   audit:
//!     kind: file
//!     path: logs/audit.log
//!     encoder:
//!       pattern: "{d} {X(quill.level):<5} {t} {m}{n}"
//! root:
//!   level: info
//!   appenders: [audit]
//! loggers:
//!   billing::ledger:
//!     level: warn
//!     appenders: [audit]
//!     additive: false
//! ```
//!
//! Besides the built-in kinds, `kind: tracing` declares a
//! [`BridgeAppender`](crate::appender::BridgeAppender). A logger inherits the
//! appenders of its `::`-separated ancestors and of `root` unless it, or an
//! ancestor on the way, sets `additive: false`.

use log4rs::config::{Deserializers, RawConfig};
use quill_types::{QuillError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::appender::{Appender, BridgeAppenderDeserializer, ConfiguredAppender};
use crate::level::EngineLevel;
use crate::repository::repository;

/// Repository configured by the document's `root` section.
pub const ROOT_REPOSITORY: &str = "root";

/// A parsed engine configuration document.
pub struct EngineDocument {
    raw: RawConfig,
}

/// The settings resolved for one repository.
struct RepositoryPlan {
    name: String,
    threshold: EngineLevel,
    appenders: Vec<Arc<dyn Appender>>,
}

/// Settings one document logger declares for itself.
struct LoggerEntry<'a> {
    appenders: &'a [String],
    additive: bool,
}

impl EngineDocument {
    /// Parse a document from a YAML value.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Document` when the value does not describe a
    /// valid document.
    pub fn from_value(value: &serde_yaml::Value) -> Result<Self> {
        let raw = serde_yaml::from_value(value.clone())
            .map_err(|e| QuillError::Document(format!("Invalid engine document: {}", e)))?;
        Ok(Self { raw })
    }

    /// Apply the document to the process-wide registry.
    ///
    /// Every appender is built and every reference resolved before any
    /// repository is touched, so a failing document leaves the registry as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns `QuillError::Document` when an appender cannot be built or a
    /// logger names an appender the document does not declare.
    pub fn apply(&self) -> Result<()> {
        for plan in self.plan()? {
            let repo = repository(&plan.name);
            repo.set_threshold(plan.threshold);
            let count = plan.appenders.len();
            for appender in plan.appenders {
                repo.add_appender(appender);
            }
            repo.mark_configured();

            debug!(repository = %plan.name, appenders = count, "repository configured from document");
        }
        Ok(())
    }

    fn plan(&self) -> Result<Vec<RepositoryPlan>> {
        let appenders = self.build_appenders()?;
        let root = self.raw.root();
        let loggers = self.raw.loggers();
        let entries: HashMap<&str, LoggerEntry<'_>> = loggers
            .iter()
            .map(|logger| {
                let entry = LoggerEntry {
                    appenders: logger.appenders(),
                    additive: logger.additive(),
                };
                (logger.name(), entry)
            })
            .collect();

        let mut plans = vec![RepositoryPlan {
            name: ROOT_REPOSITORY.to_string(),
            threshold: EngineLevel::from_level_filter(root.level()),
            appenders: lookup(&appenders, root.appenders().iter().map(String::as_str))?,
        }];

        for logger in &loggers {
            let names = inherited_appenders(logger.name(), &entries, root.appenders());
            plans.push(RepositoryPlan {
                name: logger.name().to_string(),
                threshold: EngineLevel::from_level_filter(logger.level()),
                appenders: lookup(&appenders, names.iter().map(String::as_str))?,
            });
        }

        Ok(plans)
    }

    fn build_appenders(&self) -> Result<HashMap<String, Arc<dyn Appender>>> {
        let mut deserializers = Deserializers::default();
        deserializers.insert("tracing", BridgeAppenderDeserializer);

        let (built, errors) = self.raw.appenders_lossy(&deserializers);
        if !errors.is_empty() {
            return Err(QuillError::Document(format!("Invalid appenders: {}", errors)));
        }

        Ok(built
            .into_iter()
            .map(|appender| {
                let name = appender.name().to_string();
                let appender: Arc<dyn Appender> = Arc::new(ConfiguredAppender::new(appender));
                (name, appender)
            })
            .collect())
    }
}

/// Appender names for `name`: its own, then each ancestor's, then root's,
/// stopping after the first non-additive logger.
fn inherited_appenders(name: &str, entries: &HashMap<&str, LoggerEntry<'_>>, root: &[String]) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = Some(name);

    while let Some(logger) = current {
        if let Some(entry) = entries.get(logger) {
            names.extend(entry.appenders.iter().cloned());
            if !entry.additive {
                return names;
            }
        }
        current = logger.rfind("::").map(|index| &logger[..index]);
    }

    names.extend(root.iter().cloned());
    names
}

fn lookup<'a>(
    appenders: &HashMap<String, Arc<dyn Appender>>,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Arc<dyn Appender>>> {
    names
        .into_iter()
        .map(|name| {
            appenders
                .get(name)
                .cloned()
                .ok_or_else(|| QuillError::Document(format!("Unknown appender '{}'", name)))
        })
        .collect()
}

/// Configure the engine from a document value.
pub fn configure(document: &serde_yaml::Value) -> Result<()> {
    EngineDocument::from_value(document)?.apply()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LoggingEvent;
    use crate::repository::existing_repository;
    use std::fs;
    use tempfile::TempDir;

    fn document(yaml: &str) -> serde_yaml::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_configure_file_logger() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.log");
        let document = document(&format!(
            r#"
appenders:
  doc-file:
    kind: file
    path: {}
    encoder:
      pattern: "{{X(quill.level)}} {{t}} {{m}}{{n}}"
loggers:
  doc-file-logger:
    level: warn
    appenders: [doc-file]
    additive: false
"#,
            path.display()
        ));

        configure(&document).unwrap();

        let repo = repository("doc-file-logger");
        assert_eq!(repo.threshold(), EngineLevel::WARN);
        assert!(repo.is_configured());
        assert!(repo.appender("doc-file").is_some());

        repo.dispatch(&LoggingEvent::new("doc-file-logger", EngineLevel::INFO, "quiet"));
        repo.dispatch(&LoggingEvent::new("doc-file-logger", EngineLevel::FATAL, "loud"));

        assert_eq!(fs::read_to_string(&path).unwrap(), "FATAL doc-file-logger loud\n");
    }

    #[test]
    fn test_threshold_filter_applies() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filtered.log");
        let document = document(&format!(
            r#"
appenders:
  doc-filtered:
    kind: file
    path: {}
    encoder:
      pattern: "{{m}}{{n}}"
    filters:
      - kind: threshold
        level: error
loggers:
  doc-filtered-logger:
    level: trace
    appenders: [doc-filtered]
    additive: false
"#,
            path.display()
        ));

        configure(&document).unwrap();
        let repo = repository("doc-filtered-logger");
        repo.dispatch(&LoggingEvent::new("doc-filtered-logger", EngineLevel::WARN, "dropped"));
        repo.dispatch(&LoggingEvent::new("doc-filtered-logger", EngineLevel::ERROR, "kept"));

        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn test_additive_loggers_inherit_ancestors() {
        let mut entries = HashMap::new();
        let parent = vec!["parent".to_string()];
        let child = vec!["child".to_string()];
        let root = vec!["root".to_string()];
        entries.insert("app", LoggerEntry { appenders: &parent, additive: true });
        entries.insert("app::db::pool", LoggerEntry { appenders: &child, additive: true });

        assert_eq!(inherited_appenders("app::db::pool", &entries, &root), vec!["child", "parent", "root"]);

        entries.insert("app", LoggerEntry { appenders: &parent, additive: false });
        assert_eq!(inherited_appenders("app::db::pool", &entries, &root), vec!["child", "parent"]);
        assert_eq!(inherited_appenders("other", &entries, &root), vec!["root"]);
    }

    #[test]
    fn test_bridge_kind_registered() {
        let document = document(
            "appenders:\n  doc-bridge:\n    kind: tracing\nloggers:\n  doc-bridge-logger:\n    level: info\n    appenders: [doc-bridge]\n",
        );

        configure(&document).unwrap();
        let appender = repository("doc-bridge-logger").appender("doc-bridge").unwrap();
        assert!(appender.as_any().downcast_ref::<ConfiguredAppender>().is_some());
    }

    #[test]
    fn test_malformed_documents() {
        let wrong_shape = document("appenders: 5\n");
        assert!(matches!(configure(&wrong_shape), Err(QuillError::Document(_))));

        let scalar = serde_yaml::Value::String("log everything".to_string());
        assert!(matches!(configure(&scalar), Err(QuillError::Document(_))));
    }

    #[test]
    fn test_failing_document_leaves_registry_untouched() {
        let unknown_kind = document(
            "appenders:\n  smoke:\n    kind: smoke-signal\nloggers:\n  doc-unknown-kind:\n    level: info\n    appenders: [smoke]\n",
        );
        assert!(matches!(configure(&unknown_kind), Err(QuillError::Document(_))));
        assert!(existing_repository("doc-unknown-kind").is_none());

        let dangling = document("loggers:\n  doc-dangling:\n    level: info\n    appenders: [missing]\n");
        assert!(matches!(configure(&dangling), Err(QuillError::Document(_))));
        assert!(existing_repository("doc-dangling").is_none());
    }
}

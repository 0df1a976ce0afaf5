//! Named repositories and the process-wide registry that owns them.
//!
//! A repository is the shared context for one destination: its threshold and
//! the appenders events are forwarded to. Every handle that looks up the same
//! name gets the same repository, so a threshold change is visible to all of
//! them.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::appender::Appender;
use crate::event::LoggingEvent;
use crate::level::EngineLevel;

/// Shared threshold and appenders for one destination.
pub struct Repository {
    name: String,
    threshold: RwLock<EngineLevel>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
    configured: AtomicBool,
}

impl Repository {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            threshold: RwLock::new(EngineLevel::ALL),
            appenders: RwLock::new(Vec::new()),
            configured: AtomicBool::new(false),
        }
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold. New repositories start at `ALL`.
    pub fn threshold(&self) -> EngineLevel {
        *self.threshold.read()
    }

    /// Replace the threshold for every handle bound to this repository.
    pub fn set_threshold(&self, threshold: EngineLevel) {
        *self.threshold.write() = threshold;
    }

    /// Whether events at `level` pass the repository threshold.
    pub fn is_enabled_for(&self, level: EngineLevel) -> bool {
        level.is_at_least(self.threshold())
    }

    /// Add an appender. Appenders are never deduplicated.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        debug!(repository = %self.name, appender = appender.name(), "appender added");
        self.appenders.write().push(appender);
    }

    /// Snapshot of the current appenders.
    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    /// First appender with the given name.
    pub fn appender(&self, name: &str) -> Option<Arc<dyn Appender>> {
        self.appenders.read().iter().find(|a| a.name() == name).cloned()
    }

    /// Record that something configured this repository.
    pub fn mark_configured(&self) {
        self.configured.store(true, Ordering::Release);
    }

    /// Whether the repository was ever configured.
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    /// Forward an event to every appender that accepts it.
    ///
    /// Appender failures are reported through `tracing` and do not stop the
    /// remaining appenders. Appenders run under a recursive read guard, so
    /// an appender may itself log through this repository.
    pub fn dispatch(&self, event: &LoggingEvent) {
        if !self.is_enabled_for(event.level) {
            return;
        }

        let appenders = self.appenders.read_recursive();
        for appender in appenders.iter() {
            if !appender.accepts(event.level) {
                continue;
            }
            if let Err(e) = appender.append(event) {
                warn!(
                    repository = %self.name,
                    appender = appender.name(),
                    "Failed to append event: {}",
                    e
                );
            }
        }
    }
}

fn registry() -> &'static RwLock<HashMap<String, Arc<Repository>>> {
    static INSTANCE: Lazy<RwLock<HashMap<String, Arc<Repository>>>> =
        Lazy::new(|| RwLock::new(HashMap::new()));
    &INSTANCE
}

/// Get the repository named `name`, creating it on first use.
pub fn repository(name: &str) -> Arc<Repository> {
    if let Some(existing) = registry().read().get(name) {
        return existing.clone();
    }

    registry()
        .write()
        .entry(name.to_string())
        .or_insert_with(|| {
            debug!(repository = name, "repository created");
            Arc::new(Repository::new(name))
        })
        .clone()
}

/// Get the repository named `name` only if it already exists.
pub fn existing_repository(name: &str) -> Option<Arc<Repository>> {
    registry().read().get(name).cloned()
}

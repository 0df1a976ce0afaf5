//! Layered configuration for choosing and building a sink.
//!
//! Values are resolved in this priority order:
//! 1. Environment variables (`QUILL_PROVIDER`, `QUILL_OPTION_<KEY>`)
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use quill_core::config::{Config, LoggingConfig};
//! use quill_types::Logger;
//!
//! let mut config = Config::load("quill.yml")?.with_process_env();
//! config.set("options.level", "debug")?;
//!
//! let logging = LoggingConfig::from_config(&config)?;
//! let logger = logging.create_logger()?;
//! logger.info("configured");
//! # Ok::<(), quill_types::QuillError>(())
//! ```
//!
//! A configuration file looks like this:
//!
//! ```yaml
//! provider: file
//! options:
//!   file-name: logs/app.log
//!   level: INFO
//! ```

use quill_types::{Logger, QuillError, Result, SinkKind, SinkOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::factory::factory_for;

/// Prefix of every environment variable the configuration reads.
pub const ENV_PREFIX: &str = "QUILL_";

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const LOWEST_FIRST: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Multi-layer configuration store.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Create a configuration holding only the defaults.
    pub fn new() -> Self {
        let mut layers = HashMap::new();
        layers.insert(ConfigLayer::Default, default_layer());
        Self { layers, file_path: None }
    }

    /// Load a configuration file.
    ///
    /// A missing file leaves the loaded layer empty; saving later creates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::new();

        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| QuillError::Config(format!("Failed to read config file: {}", e)))?;

            let value: Value = serde_yaml::from_str(&content)
                .map_err(|e| QuillError::Config(format!("Failed to parse config: {}", e)))?;

            debug!(path = %path.display(), "configuration loaded");
            config.layers.insert(ConfigLayer::Loaded, value);
        }

        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Overlay the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env_vars(std::env::vars())
    }

    /// Overlay the given environment variables.
    ///
    /// `QUILL_PROVIDER` sets the provider and `QUILL_OPTION_FILE_NAME` sets
    /// the `file-name` option. Other variables are ignored.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = Map::new();
        let mut options = Map::new();

        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            if name == "PROVIDER" {
                layer.insert("provider".to_string(), Value::String(value.into()));
            } else if let Some(option) = name.strip_prefix("OPTION_") {
                if !option.is_empty() {
                    options.insert(option.to_lowercase().replace('_', "-"), Value::String(value.into()));
                }
            }
        }

        if !options.is_empty() {
            layer.insert("options".to_string(), Value::Object(options));
        }
        if !layer.is_empty() {
            self.layers.insert(ConfigLayer::Environment, Value::Object(layer));
        }
        self
    }

    /// Get a value by dotted key, respecting layer priority.
    ///
    /// Returns None if no layer holds a value of the requested type.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        ConfigLayer::LOWEST_FIRST.iter().rev().find_map(|layer| {
            let value = value_at_path(self.layers.get(layer)?, key)?;
            serde_json::from_value(value.clone()).ok()
        })
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| QuillError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert_with(|| Value::Object(Map::new()));

        set_value_at_path(set_layer, key, value)
    }

    /// Save the merged configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| QuillError::Config("Cannot save: no file path set".to_string()))?;

        let yaml = serde_yaml::to_string(&self.merged())
            .map_err(|e| QuillError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| QuillError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// All layers merged, higher layers winning.
    pub fn merged(&self) -> Value {
        ConfigLayer::LOWEST_FIRST
            .iter()
            .filter_map(|layer| self.layers.get(layer))
            .fold(Value::Object(Map::new()), |merged, layer| deep_merge(merged, layer.clone()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_layer() -> Value {
    serde_json::json!({ "provider": SinkKind::Console })
}

fn value_at_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, part| current.get(part))
}

fn set_value_at_path(data: &mut Value, path: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(QuillError::Config("Empty path".to_string()));
    };
    if parts.iter().any(|part| part.is_empty()) {
        return Err(QuillError::Config(format!("Invalid key: '{}'", path)));
    }

    let mut current = data;
    for part in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return Err(QuillError::Config(format!("Cannot descend into '{}'", part))),
        };
    }

    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        _ => {
            *current = Value::Object(Map::from_iter([(last.to_string(), value)]));
            Ok(())
        }
    }
}

/// Recursively merge objects, with overlay values taking precedence.
fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay_val) => overlay_val,
    }
}

/// Which sink to build and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Sink variant
    #[serde(default = "default_provider")]
    pub provider: SinkKind,

    /// Flat options handed to the factory
    #[serde(default)]
    pub options: SinkOptions,

    /// Named engine documents for the legacy sink
    #[serde(default)]
    pub elements: HashMap<String, serde_yaml::Value>,
}

fn default_provider() -> SinkKind {
    SinkKind::Console
}

impl LoggingConfig {
    /// Read from the merged layers of `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        serde_json::from_value(config.merged())
            .map_err(|e| QuillError::Config(format!("Failed to parse logging config: {}", e)))
    }

    /// Load a file and overlay the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&Config::load(path)?.with_process_env())
    }

    /// Build the configured logger.
    pub fn create_logger(&self) -> Result<Box<dyn Logger>> {
        debug!(provider = %self.provider, "creating logger from configuration");
        factory_for(self.provider, &self.elements).create_logger(&self.options)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            options: SinkOptions::new(),
            elements: HashMap::new(),
        }
    }
}

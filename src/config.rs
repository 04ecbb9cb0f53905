//! Layered configuration.
//!
//! Values are resolved in order: built-in defaults, then an optional
//! `gotags.toml` in the working directory (or a file named with
//! `--config`), then environment variables.
//!
//! # Environment Variables
//!
//! Environment variables are prefixed with `GOTAGS_` and use double
//! underscores to separate nested levels:
//! - `GOTAGS_INDEXING__RECURSE=true` sets `indexing.recurse`
//! - `GOTAGS_LOGGING__DEFAULT=debug` sets `logging.default`

use std::collections::HashMap;
use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Name of the configuration file searched for in the working directory.
pub const CONFIG_FILE: &str = "gotags.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Indexing configuration
    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Walk directories given on the command line
    #[serde(default = "default_false")]
    pub recurse: bool,

    /// File extensions treated as Go source
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded during directory walks
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level filter: error, warn, info, debug, or trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}
fn default_extensions() -> Vec<String> {
    vec!["go".to_string()]
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            indexing: IndexingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            recurse: false,
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings with the full layering applied.
    ///
    /// A missing configuration file is not an error; a malformed one is.
    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        let figment = match config_file {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment.merge(Toml::file(CONFIG_FILE)),
        };
        figment.merge(Env::prefixed("GOTAGS_").split("__")).extract()
    }
}

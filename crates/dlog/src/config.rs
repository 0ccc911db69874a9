//! Generation-time configuration.
//!
//! [`GeneratorConfig`] is the serde view of `dlog.toml`. Every field has a
//! reference default, so an empty file reproduces the reference header.
//! Command-line overrides are applied to the struct before [`Generator`]
//! validation runs.
//!
//! [`Generator`]: crate::Generator

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::naming::REFERENCE_NAMESPACE;
use crate::resolver::{REFERENCE_COMPILE_OUT_THRESHOLD, REFERENCE_DEFAULT_DISABLED_LEVEL};
use crate::topic::REFERENCE_TOPICS;

/// File name looked up at the generator root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "dlog.toml";

/// Header location relative to the generator root.
pub const DEFAULT_OUTPUT: &str = "include/debug/dlogf.h";

/// Raw, not yet validated configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Identifier prefix, e.g. `n00b` for `n00b_dlog_lock`.
    pub namespace: String,
    /// Topic names in index order.
    pub topics: Vec<String>,
    /// Global compile-out threshold.
    pub compile_out_threshold: u8,
    /// Global default-disabled level.
    pub default_disabled_level: u8,
    /// Sparse per-topic default-disabled levels.
    pub topic_defaults: BTreeMap<String, u8>,
    /// Output path; relative paths resolve against the generator root.
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: REFERENCE_NAMESPACE.to_owned(),
            topics: REFERENCE_TOPICS.iter().map(|&name| name.to_owned()).collect(),
            compile_out_threshold: REFERENCE_COMPILE_OUT_THRESHOLD,
            default_disabled_level: REFERENCE_DEFAULT_DISABLED_LEVEL,
            topic_defaults: BTreeMap::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl GeneratorConfig {
    /// Parses TOML text; `origin` only labels diagnostics.
    pub fn from_toml_str(text: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        logging::trace_config!(
            path = %path.display(),
            topics = config.topics.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Loads `dlog.toml` from `root` when present, else the reference defaults.
    pub fn discover(root: &Path) -> ConfigResult<Self> {
        let candidate = root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            logging::trace_config!(
                root = %root.display(),
                "no configuration file found; using reference defaults"
            );
            Ok(Self::default())
        }
    }
}

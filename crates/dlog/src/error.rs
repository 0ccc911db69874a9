//! Error types surfaced by configuration validation and header generation.
//!
//! Generation has exactly two failure kinds. [`ConfigError`] covers every
//! inconsistency detected before any text is assembled; [`GenerateError::Io`]
//! covers the single write at the end. Both abort the run, so a caller never
//! observes a partially written header.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by configuration helpers.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration rejected before generation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The global default-disabled level exceeds the global compile-out threshold.
    #[error(
        "default-disabled level ({default_disabled_level}) must not exceed the compile-out threshold ({compile_out_threshold})"
    )]
    InconsistentThresholds {
        /// Configured global default-disabled level.
        default_disabled_level: u8,
        /// Configured global compile-out threshold.
        compile_out_threshold: u8,
    },
    /// A threshold or level value lies outside the representable range.
    #[error("{setting} value {value} is outside the supported range 0..={max}")]
    LevelOutOfRange {
        /// Name of the offending setting.
        setting: String,
        /// Value supplied by the configuration.
        value: u8,
        /// Largest accepted value.
        max: u8,
    },
    /// The topic registry is empty.
    #[error("at least one debug topic must be configured")]
    NoTopics,
    /// Two topics map to the same generated identifiers.
    #[error("duplicate debug topic '{0}'")]
    DuplicateTopic(String),
    /// A topic name cannot be embedded in a preprocessor identifier.
    #[error(
        "invalid debug topic '{0}': names must be ASCII letters, digits, or underscores and must not start with a digit"
    )]
    InvalidTopicName(String),
    /// A per-topic default names a topic missing from the registry.
    #[error("topic default references unknown topic '{0}'")]
    UnknownTopic(String),
    /// The identifier namespace cannot prefix preprocessor identifiers.
    #[error(
        "invalid namespace '{0}': expected ASCII letters, digits, or underscores not starting with a digit"
    )]
    InvalidNamespace(String),
    /// A configuration file could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A configuration file is not valid TOML for [`GeneratorConfig`](crate::GeneratorConfig).
    #[error("failed to parse configuration {}: {source}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parser failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configuration was rejected before any output was produced.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The output path could not be read or written.
    #[error("failed to write debug log header {}: {source}", path.display())]
    Io {
        /// Resolved output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `dlog` generates the preprocessor header behind a leveled, topic-scoped
//! debug logging facility. For every configured topic (`lock`, `alloc`, ...)
//! and every level in `0..=3` the header defines a variadic log macro whose
//! body is either a call into the host runtime or nothing at all, chosen by
//! the host compiler from threshold constants the header also defines.
//!
//! # Design
//!
//! - [`TopicRegistry`] and [`TopicDefaults`] hold the ordered topics and the
//!   sparse per-topic default levels.
//! - [`ThresholdResolver`] validates the two global knobs and derives each
//!   topic's `(default_last_level, compile_out_threshold)` pair.
//! - [`MacroEmitter`] renders the enabled and disabled body for one
//!   `(topic, level)` pair plus the guard selecting between them.
//! - [`DocumentAssembler`] produces the [`Section`]s of a [`Document`] in
//!   their fixed order.
//! - [`OutputTarget`] anchors the output path at the generator root and
//!   replaces the file atomically.
//!
//! # Invariants
//!
//! - `default_disabled_level <= compile_out_threshold` globally; violating
//!   configurations never reach assembly.
//! - Every topic's threshold is at least its default-last level.
//! - Identical inputs produce byte-identical headers.
//!
//! # Errors
//!
//! Construction reports [`ConfigError`]; writing reports
//! [`GenerateError::Io`]. Both are fatal for a run.
//!
//! # Examples
//!
//! ```
//! use dlog::{Generator, GeneratorConfig, Section};
//!
//! let config = GeneratorConfig {
//!     topics: vec!["lock".into(), "alloc".into()],
//!     ..GeneratorConfig::default()
//! };
//! let document = Generator::from_config(&config)?.assemble();
//!
//! assert_eq!(
//!     document.section(Section::IndexTable),
//!     Some("#define N00B_DLOG_LOCK_IX 0\n#define N00B_DLOG_ALLOC_IX 1\n"),
//! );
//! # Ok::<(), dlog::ConfigError>(())
//! ```

mod config;
mod document;
mod emitter;
mod error;
mod level;
mod naming;
mod report;
mod resolver;
mod topic;
mod writer;

use std::path::Path;

pub use config::{DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT, GeneratorConfig};
pub use document::{Document, DocumentAssembler, Section};
pub use emitter::MacroEmitter;
pub use error::{ConfigError, ConfigResult, GenerateError};
pub use level::{COMPILED_OUT_SENTINEL, Level, MAX_LEVEL, MIN_LEVEL};
pub use naming::{GlobalConstant, Naming, REFERENCE_NAMESPACE, TopicConstant};
pub use report::{LevelReport, ResolutionReport, TopicReport};
pub use resolver::{
    BuildMode, GlobalThresholds, LevelDisposition, REFERENCE_COMPILE_OUT_THRESHOLD,
    REFERENCE_DEFAULT_DISABLED_LEVEL, ResolvedTopic, ThresholdResolver, TopicThresholds,
};
pub use topic::{REFERENCE_TOPICS, Topic, TopicDefaults, TopicRegistry};
pub use writer::{Freshness, OutputTarget};

/// A validated configuration ready to assemble headers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Generator {
    naming: Naming,
    resolver: ThresholdResolver,
}

impl Generator {
    /// Combines a naming scheme with a resolver.
    #[must_use]
    pub const fn new(naming: Naming, resolver: ThresholdResolver) -> Self {
        Self { naming, resolver }
    }

    /// Validates `config`.
    ///
    /// The global threshold check runs before topics are inspected, so an
    /// inconsistent pair is reported even when other fields are also wrong.
    pub fn from_config(config: &GeneratorConfig) -> ConfigResult<Self> {
        let globals =
            GlobalThresholds::new(config.compile_out_threshold, config.default_disabled_level)?;
        let naming = Naming::new(&config.namespace)?;
        let registry = TopicRegistry::new(config.topics.iter().cloned())?;
        let defaults = TopicDefaults::new(
            &registry,
            config
                .topic_defaults
                .iter()
                .map(|(name, level)| (name.clone(), *level)),
        )?;
        Ok(Self::new(
            naming,
            ThresholdResolver::with_globals(registry, defaults, globals),
        ))
    }

    /// Generator for the reference configuration.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(Naming::reference(), ThresholdResolver::reference())
    }

    /// The naming scheme.
    #[must_use]
    pub const fn naming(&self) -> &Naming {
        &self.naming
    }

    /// The threshold resolver.
    #[must_use]
    pub const fn resolver(&self) -> &ThresholdResolver {
        &self.resolver
    }

    /// Assembles the header.
    #[must_use]
    pub fn assemble(&self) -> Document {
        DocumentAssembler::new(&self.resolver, &self.naming).assemble()
    }

    /// Summarises resolved thresholds for `mode`.
    #[must_use]
    pub fn report(&self, mode: BuildMode) -> ResolutionReport {
        ResolutionReport::new(&self.resolver, &self.naming, mode)
    }
}

/// Validates `config` and assembles its header without touching the disk.
pub fn generate(config: &GeneratorConfig) -> Result<Document, GenerateError> {
    Ok(Generator::from_config(config)?.assemble())
}

/// Generates the header for `config` and writes it beneath `root`.
///
/// Returns the absolute path written. Nothing is written when validation
/// fails.
pub fn write_header(
    root: &Path,
    config: &GeneratorConfig,
) -> Result<std::path::PathBuf, GenerateError> {
    let document = generate(config)?;
    let target = OutputTarget::resolve(root, &config.output)?;
    target.write(&document)?;
    Ok(target.path().to_path_buf())
}

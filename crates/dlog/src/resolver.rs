//! Per-topic threshold resolution.
//!
//! Two knobs drive every topic:
//!
//! - the *compile-out threshold* `t`: levels `>= t` are never compiled;
//! - the *default-disabled level* `d`: levels `>= d` are compiled but start
//!   silent until the runtime policy enables them.
//!
//! Globally `d <= t` must hold. A topic's own default `d'` (an override, or
//! the global `d`) is always representable because the topic threshold is
//! `max(d', t)`: an override may raise its own topic's ceiling but never
//! lowers the global one. Outside debug builds every topic collapses to
//! [`COMPILED_OUT_SENTINEL`].

use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};
use crate::level::{COMPILED_OUT_SENTINEL, Level, ensure_threshold};
use crate::topic::{Topic, TopicDefaults, TopicRegistry};

/// Reference global compile-out threshold.
pub const REFERENCE_COMPILE_OUT_THRESHOLD: u8 = 2;

/// Reference global default-disabled level.
pub const REFERENCE_DEFAULT_DISABLED_LEVEL: u8 = 2;

/// Whether the consumer builds with the debug switch defined.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Debug switch defined; thresholds follow the configuration.
    #[default]
    Debug,
    /// Debug switch absent; every call site is compiled out.
    Release,
}

/// The validated program-wide knobs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GlobalThresholds {
    compile_out_threshold: u8,
    default_disabled_level: u8,
}

impl GlobalThresholds {
    /// Validates the pair.
    ///
    /// Fails when either value lies outside the threshold scale or when the
    /// default-disabled level exceeds the compile-out threshold.
    pub fn new(compile_out_threshold: u8, default_disabled_level: u8) -> ConfigResult<Self> {
        let compile_out_threshold = ensure_threshold("compile_out_threshold", compile_out_threshold)?;
        let default_disabled_level =
            ensure_threshold("default_disabled_level", default_disabled_level)?;
        if default_disabled_level > compile_out_threshold {
            return Err(ConfigError::InconsistentThresholds {
                default_disabled_level,
                compile_out_threshold,
            });
        }
        Ok(Self {
            compile_out_threshold,
            default_disabled_level,
        })
    }

    /// Returns the reference pair (2, 2).
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            compile_out_threshold: REFERENCE_COMPILE_OUT_THRESHOLD,
            default_disabled_level: REFERENCE_DEFAULT_DISABLED_LEVEL,
        }
    }

    /// Global compile-out threshold.
    #[must_use]
    pub const fn compile_out_threshold(self) -> u8 {
        self.compile_out_threshold
    }

    /// Global default-disabled level.
    #[must_use]
    pub const fn default_disabled_level(self) -> u8 {
        self.default_disabled_level
    }
}

/// What happens to a call site at a given level.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelDisposition {
    /// Compiled in and recorded without any runtime policy change.
    EnabledByDefault,
    /// Compiled in but silent until the runtime policy setter enables it.
    DisabledByDefault,
    /// Expands to nothing.
    CompiledOut,
}

/// Effective pair for one topic.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TopicThresholds {
    /// First level that starts runtime-disabled.
    pub default_last_level: u8,
    /// First level that is never compiled.
    pub compile_out_threshold: u8,
}

impl TopicThresholds {
    /// Value seeded into the runtime policy store: the highest level enabled
    /// by default, or `-1` when none is.
    #[must_use]
    pub fn initial_policy(self) -> i64 {
        i64::from(self.default_last_level) - 1
    }

    /// Returns `false` when the default level is not representable, which the
    /// max() rule rules out for generator-computed values.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        self.default_last_level <= self.compile_out_threshold
    }
}

/// Resolution of one topic under a build mode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedTopic<'a> {
    topic: &'a Topic,
    mode: BuildMode,
    thresholds: TopicThresholds,
    overridden: bool,
    raised: bool,
}

impl<'a> ResolvedTopic<'a> {
    /// The resolved topic.
    #[must_use]
    pub const fn topic(&self) -> &'a Topic {
        self.topic
    }

    /// Build mode the resolution applies to.
    #[must_use]
    pub const fn mode(&self) -> BuildMode {
        self.mode
    }

    /// The effective pair.
    #[must_use]
    pub const fn thresholds(&self) -> TopicThresholds {
        self.thresholds
    }

    /// `true` when the topic carries a per-topic default override.
    #[must_use]
    pub const fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// `true` when the override lifted this topic's threshold above the
    /// global one.
    #[must_use]
    pub const fn raised_threshold(&self) -> bool {
        self.raised
    }

    /// Classifies a call site at `level`.
    ///
    /// Release builds stub the runtime entry points, so every level is
    /// compiled out regardless of the threshold value.
    #[must_use]
    pub fn disposition(&self, level: Level) -> LevelDisposition {
        let level = level.get();
        if self.mode == BuildMode::Release || level >= self.thresholds.compile_out_threshold {
            LevelDisposition::CompiledOut
        } else if level >= self.thresholds.default_last_level {
            LevelDisposition::DisabledByDefault
        } else {
            LevelDisposition::EnabledByDefault
        }
    }
}

/// Computes effective thresholds for every registered topic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThresholdResolver {
    registry: TopicRegistry,
    defaults: TopicDefaults,
    globals: GlobalThresholds,
}

impl ThresholdResolver {
    /// Validates the global knobs and builds a resolver.
    ///
    /// This is the only fallible step; once built, resolution cannot fail.
    pub fn new(
        registry: TopicRegistry,
        defaults: TopicDefaults,
        compile_out_threshold: u8,
        default_disabled_level: u8,
    ) -> ConfigResult<Self> {
        let globals = GlobalThresholds::new(compile_out_threshold, default_disabled_level)?;
        Ok(Self::with_globals(registry, defaults, globals))
    }

    /// Builds a resolver from already validated globals.
    #[must_use]
    pub fn with_globals(
        registry: TopicRegistry,
        defaults: TopicDefaults,
        globals: GlobalThresholds,
    ) -> Self {
        Self {
            registry,
            defaults,
            globals,
        }
    }

    /// Resolver for the reference configuration.
    #[must_use]
    pub fn reference() -> Self {
        Self::with_globals(
            TopicRegistry::reference(),
            TopicDefaults::empty(),
            GlobalThresholds::reference(),
        )
    }

    /// The topic registry.
    #[must_use]
    pub const fn registry(&self) -> &TopicRegistry {
        &self.registry
    }

    /// The per-topic overrides.
    #[must_use]
    pub const fn defaults(&self) -> &TopicDefaults {
        &self.defaults
    }

    /// The global knobs.
    #[must_use]
    pub const fn globals(&self) -> GlobalThresholds {
        self.globals
    }

    /// Override if present, else the global default-disabled level.
    #[must_use]
    pub fn default_last_level(&self, topic: &Topic) -> u8 {
        self.defaults
            .get(topic)
            .unwrap_or(self.globals.default_disabled_level)
    }

    /// `max(default_last_level(topic), global threshold)`.
    #[must_use]
    pub fn compile_out_threshold(&self, topic: &Topic) -> u8 {
        self.default_last_level(topic)
            .max(self.globals.compile_out_threshold)
    }

    /// Effective pair for `topic` under `mode`.
    #[must_use]
    pub fn thresholds(&self, topic: &Topic, mode: BuildMode) -> TopicThresholds {
        match mode {
            BuildMode::Debug => TopicThresholds {
                default_last_level: self.default_last_level(topic),
                compile_out_threshold: self.compile_out_threshold(topic),
            },
            BuildMode::Release => TopicThresholds {
                default_last_level: COMPILED_OUT_SENTINEL,
                compile_out_threshold: COMPILED_OUT_SENTINEL,
            },
        }
    }

    /// Resolves `topic` with its override bookkeeping.
    #[must_use]
    pub fn resolve<'a>(&self, topic: &'a Topic, mode: BuildMode) -> ResolvedTopic<'a> {
        let thresholds = self.thresholds(topic, mode);
        let overridden = self.defaults.get(topic).is_some();
        let raised = mode == BuildMode::Debug
            && thresholds.compile_out_threshold > self.globals.compile_out_threshold;

        logging::trace_resolve!(
            topic = topic.name(),
            ?mode,
            default_last_level = thresholds.default_last_level,
            compile_out_threshold = thresholds.compile_out_threshold,
            overridden,
            "resolved topic thresholds"
        );
        if raised {
            tracing::info!(
                target: "dlog::resolve",
                topic = topic.name(),
                threshold = thresholds.compile_out_threshold,
                global = self.globals.compile_out_threshold,
                "topic default raises its compile-out threshold above the global value"
            );
        }

        ResolvedTopic {
            topic,
            mode,
            thresholds,
            overridden,
            raised,
        }
    }

    /// Resolves every topic in registry order.
    pub fn resolve_all(&self, mode: BuildMode) -> Vec<ResolvedTopic<'_>> {
        self.registry
            .iter()
            .map(|topic| self.resolve(topic, mode))
            .collect()
    }
}

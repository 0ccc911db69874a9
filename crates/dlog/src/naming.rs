//! Identifier scheme for everything the header defines or references.

use crate::error::{ConfigError, ConfigResult};
use crate::level::Level;
use crate::topic::{Topic, is_identifier_fragment};

/// Namespace used by the reference configuration.
pub const REFERENCE_NAMESPACE: &str = "n00b";

/// Per-topic constants emitted for every registered topic.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TopicConstant {
    /// Registry position.
    Index,
    /// First level that starts runtime-disabled.
    DefaultLastLevel,
    /// First level that is never compiled.
    CompileOutThreshold,
    /// Defined when at least one level of the topic is compiled.
    On,
    /// Highest compiled level.
    Level,
}

impl TopicConstant {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Index => "IX",
            Self::DefaultLastLevel => "DEFAULT_LAST_LEVEL",
            Self::CompileOutThreshold => "COMPILE_OUT_THRESHOLD",
            Self::On => "ON",
            Self::Level => "LEVEL",
        }
    }
}

/// Program-wide constants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GlobalConstant {
    /// Global compile-out threshold.
    CompileOutThreshold,
    /// Global default-disabled level.
    DefaultDisableLevel,
    /// Initializer list seeding the runtime policy store.
    GeneratedInits,
    /// Number of registered topics.
    NumTopics,
}

impl GlobalConstant {
    const fn suffix(self) -> &'static str {
        match self {
            Self::CompileOutThreshold => "COMPILE_OUT_THRESHOLD",
            Self::DefaultDisableLevel => "DEFAULT_DISABLE_LEVEL",
            Self::GeneratedInits => "GENERATED_INITS",
            Self::NumTopics => "NUM_TOPICS",
        }
    }
}

/// Derives identifiers from a namespace such as `n00b`.
///
/// Functions and macros use the lowercase form (`n00b_dlog_lock2`), constants
/// the uppercase form (`N00B_DLOG_LOCK_IX`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Naming {
    lower: String,
    upper: String,
}

impl Naming {
    /// Validates `namespace` and derives both case forms.
    pub fn new(namespace: &str) -> ConfigResult<Self> {
        if !is_identifier_fragment(namespace) {
            return Err(ConfigError::InvalidNamespace(namespace.to_owned()));
        }
        Ok(Self {
            lower: namespace.to_ascii_lowercase(),
            upper: namespace.to_ascii_uppercase(),
        })
    }

    /// Returns the naming for [`REFERENCE_NAMESPACE`].
    #[must_use]
    pub fn reference() -> Self {
        Self {
            lower: REFERENCE_NAMESPACE.to_owned(),
            upper: REFERENCE_NAMESPACE.to_ascii_uppercase(),
        }
    }

    /// Name of the log macro for `topic` at `level`.
    ///
    /// Level 0 shares the bare topic name (`n00b_dlog_lock`); other levels
    /// append the number (`n00b_dlog_lock2`).
    #[must_use]
    pub fn macro_name(&self, topic: &Topic, level: Level) -> String {
        let mut name = format!("{}_dlog_{}", self.lower, topic.name());
        if level.get() > 0 {
            name.push_str(&level.to_string());
        }
        name
    }

    /// Name of a per-topic constant.
    #[must_use]
    pub fn topic_constant(&self, topic: &Topic, constant: TopicConstant) -> String {
        format!("{}_DLOG_{}_{}", self.upper, topic.upper(), constant.suffix())
    }

    /// Name of a program-wide constant.
    #[must_use]
    pub fn global_constant(&self, constant: GlobalConstant) -> String {
        format!("{}_DLOG_{}", self.upper, constant.suffix())
    }

    /// Macro the consumer defines to select a debug build.
    #[must_use]
    pub fn debug_switch(&self) -> String {
        format!("{}_DEBUG", self.upper)
    }

    /// Runtime log-record entry point.
    #[must_use]
    pub fn log_function(&self) -> String {
        format!("{}_dlog", self.lower)
    }

    /// Runtime variadic formatter taking a format string and argument count.
    #[must_use]
    pub fn raw_format_function(&self) -> String {
        format!("_{}_dstrf", self.lower)
    }

    /// Convenience wrapper that supplies the argument count to the formatter.
    #[must_use]
    pub fn format_macro(&self) -> String {
        format!("{}_dstrf", self.lower)
    }

    /// Runtime accessor reading a topic's policy level.
    #[must_use]
    pub fn get_policy_function(&self) -> String {
        format!("{}_dlog_get_topic_policy", self.lower)
    }

    /// Runtime accessor writing a topic's policy level.
    #[must_use]
    pub fn set_policy_function(&self) -> String {
        format!("{}_dlog_set_topic_policy", self.lower)
    }

    /// Host macro counting variadic arguments.
    #[must_use]
    pub fn arg_count_macro(&self) -> String {
        format!("{}_PP_NARG", self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::TopicRegistry;

    fn lock() -> Topic {
        TopicRegistry::new(["lock"])
            .expect("valid")
            .get("lock")
            .cloned()
            .expect("lock")
    }

    #[test]
    fn level_zero_macro_uses_bare_topic_name() {
        let naming = Naming::reference();
        assert_eq!(naming.macro_name(&lock(), Level::DEFAULT), "n00b_dlog_lock");
    }

    #[test]
    fn higher_levels_append_the_level() {
        let naming = Naming::reference();
        let level = Level::new(3).expect("valid level");
        assert_eq!(naming.macro_name(&lock(), level), "n00b_dlog_lock3");
    }

    #[test]
    fn constants_use_uppercase_forms() {
        let naming = Naming::new("Ex").expect("valid namespace");
        assert_eq!(
            naming.topic_constant(&lock(), TopicConstant::CompileOutThreshold),
            "EX_DLOG_LOCK_COMPILE_OUT_THRESHOLD"
        );
        assert_eq!(
            naming.global_constant(GlobalConstant::NumTopics),
            "EX_DLOG_NUM_TOPICS"
        );
        assert_eq!(naming.debug_switch(), "EX_DEBUG");
        assert_eq!(naming.raw_format_function(), "_ex_dstrf");
        assert_eq!(naming.arg_count_macro(), "EX_PP_NARG");
    }

    #[test]
    fn invalid_namespace_is_rejected() {
        let error = Naming::new("1abc").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidNamespace(_)));
    }
}

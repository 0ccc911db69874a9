//! Topic registry and sparse per-topic default levels.
//!
//! A [`TopicRegistry`] is the ordered list of debug topics; position in the
//! list is the topic's numeric index in the runtime policy table.
//! [`TopicDefaults`] carries the optional per-topic default-disabled level
//! overrides. Both are validated once on construction and immutable after.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::{ConfigError, ConfigResult};
use crate::level::ensure_threshold;

/// Topics emitted by the reference configuration, in index order.
pub const REFERENCE_TOPICS: [&str; 6] = ["lock", "alloc", "gc", "gil", "thread", "io"];

/// A named category of debug messages.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Topic {
    name: String,
    upper: String,
    index: usize,
}

impl Topic {
    /// Returns the topic name exactly as configured.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ASCII-uppercase name used inside constant identifiers.
    #[must_use]
    pub fn upper(&self) -> &str {
        &self.upper
    }

    /// Returns the zero-based registry position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Ordered, duplicate-free set of topics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
}

impl TopicRegistry {
    /// Builds a registry, assigning indices by position.
    ///
    /// Names must be identifier fragments and unique after uppercasing,
    /// since both `lock` and `LOCK` would produce `NS_DLOG_LOCK_*`.
    pub fn new<I, S>(names: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut topics: Vec<Topic> = Vec::new();
        for name in names {
            let name = name.into();
            if !is_identifier_fragment(&name) {
                return Err(ConfigError::InvalidTopicName(name));
            }
            let upper = name.to_ascii_uppercase();
            if topics.iter().any(|topic| topic.upper == upper) {
                return Err(ConfigError::DuplicateTopic(name));
            }
            let index = topics.len();
            topics.push(Topic { name, upper, index });
        }

        if topics.is_empty() {
            return Err(ConfigError::NoTopics);
        }
        Ok(Self { topics })
    }

    /// Returns the registry of [`REFERENCE_TOPICS`].
    #[must_use]
    pub fn reference() -> Self {
        let topics = REFERENCE_TOPICS
            .iter()
            .enumerate()
            .map(|(index, name)| Topic {
                name: (*name).to_owned(),
                upper: name.to_ascii_uppercase(),
                index,
            })
            .collect();
        Self { topics }
    }

    /// Looks up a topic by its configured name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.name == name)
    }

    /// Iterates topics in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Topic> {
        self.topics.iter()
    }

    /// Returns the number of topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Always `false`; construction rejects empty registries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl<'a> IntoIterator for &'a TopicRegistry {
    type Item = &'a Topic;
    type IntoIter = std::slice::Iter<'a, Topic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sparse mapping from topic name to its default-disabled level.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TopicDefaults {
    levels: BTreeMap<String, u8>,
}

impl TopicDefaults {
    /// Returns a mapping with no overrides.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates overrides against `registry`.
    ///
    /// Every key must name a registered topic and every value must lie on
    /// the threshold scale. Later entries for the same topic replace earlier
    /// ones.
    pub fn new<I, S>(registry: &TopicRegistry, entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        let mut levels = BTreeMap::new();
        for (name, level) in entries {
            let name = name.into();
            if registry.get(&name).is_none() {
                return Err(ConfigError::UnknownTopic(name));
            }
            let level = ensure_threshold(&format!("topic_defaults.{name}"), level)?;
            levels.insert(name, level);
        }
        Ok(Self { levels })
    }

    /// Returns the override for `topic`, if any.
    #[must_use]
    pub fn get(&self, topic: &Topic) -> Option<u8> {
        self.levels.get(topic.name()).copied()
    }

    /// Iterates overrides in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, u8> {
        self.levels.iter()
    }

    /// Returns `true` when no topic carries an override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Returns `true` for non-empty ASCII `[A-Za-z0-9_]` strings not starting with a digit.
pub(crate) fn is_identifier_fragment(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_registry_order() {
        let registry = TopicRegistry::new(["lock", "alloc", "gc"]).expect("valid registry");
        let indices: Vec<(&str, usize)> = registry
            .iter()
            .map(|topic| (topic.name(), topic.index()))
            .collect();
        assert_eq!(indices, vec![("lock", 0), ("alloc", 1), ("gc", 2)]);
    }

    #[test]
    fn reference_registry_matches_constant_list() {
        let registry = TopicRegistry::reference();
        assert_eq!(registry, TopicRegistry::new(REFERENCE_TOPICS).expect("valid"));
        assert_eq!(registry.get("io").map(Topic::index), Some(5));
        assert_eq!(registry.get("thread").map(Topic::upper), Some("THREAD"));
    }

    #[test]
    fn empty_registry_is_rejected() {
        let error = TopicRegistry::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(error, ConfigError::NoTopics));
    }

    #[test]
    fn duplicates_are_detected_case_insensitively() {
        let error = TopicRegistry::new(["lock", "LOCK"]).unwrap_err();
        assert!(matches!(error, ConfigError::DuplicateTopic(name) if name == "LOCK"));
    }

    #[test]
    fn invalid_names_are_rejected() {
        for name in ["", "9lives", "has space", "dash-ed", "caf\u{e9}"] {
            let error = TopicRegistry::new([name]).unwrap_err();
            assert!(
                matches!(error, ConfigError::InvalidTopicName(_)),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn defaults_reject_unknown_topics() {
        let registry = TopicRegistry::new(["lock"]).expect("valid");
        let error = TopicDefaults::new(&registry, [("alloc", 1)]).unwrap_err();
        assert!(matches!(error, ConfigError::UnknownTopic(name) if name == "alloc"));
    }

    #[test]
    fn defaults_reject_out_of_range_levels() {
        let registry = TopicRegistry::new(["lock"]).expect("valid");
        let error = TopicDefaults::new(&registry, [("lock", 9)]).unwrap_err();
        assert!(matches!(error, ConfigError::LevelOutOfRange { value: 9, .. }));
    }

    #[test]
    fn defaults_lookup_by_topic() {
        let registry = TopicRegistry::new(["lock", "gc"]).expect("valid");
        let defaults = TopicDefaults::new(&registry, [("gc", 1)]).expect("valid");
        let lock = registry.get("lock").expect("lock");
        let gc = registry.get("gc").expect("gc");
        assert_eq!(defaults.get(lock), None);
        assert_eq!(defaults.get(gc), Some(1));
        assert!(!defaults.is_empty());
    }
}

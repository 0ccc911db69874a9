//! Property tests over arbitrary valid configurations.

use std::collections::BTreeMap;

use dlog::{BuildMode, COMPILED_OUT_SENTINEL, Generator, GeneratorConfig, Section};
use proptest::prelude::*;

fn valid_config() -> impl Strategy<Value = GeneratorConfig> {
    (
        prop::collection::btree_set("[a-z][a-z0-9_]{0,7}", 1..8),
        0..=COMPILED_OUT_SENTINEL,
    )
        .prop_flat_map(|(names, threshold)| {
            let topics: Vec<String> = names.into_iter().collect();
            let count = topics.len();
            (
                Just(topics),
                Just(threshold),
                0..=threshold,
                prop::collection::vec(prop::option::of(0..=COMPILED_OUT_SENTINEL), count),
            )
        })
        .prop_map(|(topics, threshold, disabled, overrides)| {
            let topic_defaults: BTreeMap<String, u8> = topics
                .iter()
                .zip(overrides)
                .filter_map(|(name, level)| level.map(|level| (name.clone(), level)))
                .collect();
            GeneratorConfig {
                topics,
                compile_out_threshold: threshold,
                default_disabled_level: disabled,
                topic_defaults,
                ..GeneratorConfig::default()
            }
        })
}

proptest! {
    #[test]
    fn valid_configurations_always_generate(config in valid_config()) {
        let generator = Generator::from_config(&config).expect("valid configuration");
        let document = generator.assemble();
        let index = document.section(Section::IndexTable).expect("index table");

        prop_assert_eq!(index.lines().count(), config.topics.len());
        for (position, topic) in config.topics.iter().enumerate() {
            let line = format!("#define N00B_DLOG_{}_IX {}", topic.to_ascii_uppercase(), position);
            prop_assert_eq!(index.matches(line.as_str()).count(), 1);
        }
    }

    #[test]
    fn threshold_never_below_default_last_level(config in valid_config()) {
        let generator = Generator::from_config(&config).expect("valid configuration");
        let resolver = generator.resolver();
        for topic in resolver.registry() {
            let thresholds = resolver.thresholds(topic, BuildMode::Debug);
            prop_assert!(thresholds.compile_out_threshold >= thresholds.default_last_level);

            match config.topic_defaults.get(topic.name()) {
                None => {
                    prop_assert_eq!(thresholds.default_last_level, config.default_disabled_level);
                    prop_assert_eq!(thresholds.compile_out_threshold, config.compile_out_threshold);
                }
                Some(&value) if value < config.compile_out_threshold => {
                    prop_assert_eq!(thresholds.default_last_level, value);
                    prop_assert_eq!(thresholds.compile_out_threshold, config.compile_out_threshold);
                }
                Some(&value) => {
                    prop_assert_eq!(thresholds.compile_out_threshold, value);
                }
            }
        }
    }

    #[test]
    fn emitted_comment_records_resolved_pair(config in valid_config()) {
        let generator = Generator::from_config(&config).expect("valid configuration");
        let document = generator.assemble();
        let blocks = document.section(Section::TopicBlocks).expect("topic blocks");
        for resolved in generator.resolver().resolve_all(BuildMode::Debug) {
            let thresholds = resolved.thresholds();
            let comment = format!(
                "/* {}: default last level {}, compile-out threshold {} */",
                resolved.topic().name(),
                thresholds.default_last_level,
                thresholds.compile_out_threshold,
            );
            prop_assert!(blocks.contains(&comment));
        }
    }

    #[test]
    fn generation_is_deterministic(config in valid_config()) {
        let first = Generator::from_config(&config).expect("valid").assemble().render();
        let second = Generator::from_config(&config).expect("valid").assemble().render();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn inverted_globals_are_rejected(threshold in 0..COMPILED_OUT_SENTINEL, gap in 1u8..=4) {
        let disabled = threshold.saturating_add(gap).min(COMPILED_OUT_SENTINEL);
        prop_assume!(disabled > threshold);
        let config = GeneratorConfig {
            compile_out_threshold: threshold,
            default_disabled_level: disabled,
            ..GeneratorConfig::default()
        };
        prop_assert!(Generator::from_config(&config).is_err());
    }
}

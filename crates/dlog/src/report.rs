//! Human- and machine-readable summary of resolved thresholds.

use std::fmt::Write as _;

use serde::Serialize;

use crate::level::Level;
use crate::naming::Naming;
use crate::resolver::{BuildMode, GlobalThresholds, LevelDisposition, ThresholdResolver};

/// Disposition of one macro.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LevelReport {
    /// Call-site level.
    pub level: u8,
    /// Macro name for the level.
    #[serde(rename = "macro")]
    pub macro_name: String,
    /// Compiled/enabled state under the report's build mode.
    pub disposition: LevelDisposition,
}

/// Resolution of one topic.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TopicReport {
    /// Topic name.
    pub name: String,
    /// Registry index.
    pub index: usize,
    /// First runtime-disabled level.
    pub default_last_level: u8,
    /// First compiled-out level.
    pub compile_out_threshold: u8,
    /// Value seeded into the runtime policy store.
    pub initial_policy: i64,
    /// Whether a per-topic default applies.
    pub overridden: bool,
    /// Whether the override lifted the threshold above the global one.
    pub raised_threshold: bool,
    /// Per-level dispositions, lowest level first.
    pub levels: Vec<LevelReport>,
}

/// Full report for one build mode.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolutionReport {
    /// Build mode the report describes.
    pub mode: BuildMode,
    /// Global knobs.
    pub globals: GlobalThresholds,
    /// Topics in registry order.
    pub topics: Vec<TopicReport>,
}

impl ResolutionReport {
    /// Builds the report from a resolver.
    #[must_use]
    pub fn new(resolver: &ThresholdResolver, naming: &Naming, mode: BuildMode) -> Self {
        let topics = resolver
            .resolve_all(mode)
            .into_iter()
            .map(|resolved| {
                let thresholds = resolved.thresholds();
                let topic = resolved.topic();
                TopicReport {
                    name: topic.name().to_owned(),
                    index: topic.index(),
                    default_last_level: thresholds.default_last_level,
                    compile_out_threshold: thresholds.compile_out_threshold,
                    initial_policy: thresholds.initial_policy(),
                    overridden: resolved.is_overridden(),
                    raised_threshold: resolved.raised_threshold(),
                    levels: Level::ascending()
                        .map(|level| LevelReport {
                            level: level.get(),
                            macro_name: naming.macro_name(topic, level),
                            disposition: resolved.disposition(level),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            mode,
            globals: resolver.globals(),
            topics,
        }
    }

    /// Renders an aligned plain-text table.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut output = format!(
            concat!(
                "Debug log thresholds ({mode:?} build):\n",
                "  compile_out_threshold: {threshold}\n",
                "  default_disabled_level: {disabled}\n",
            ),
            mode = self.mode,
            threshold = self.globals.compile_out_threshold(),
            disabled = self.globals.default_disabled_level(),
        );

        for topic in &self.topics {
            let _ = writeln!(
                output,
                "  [{}] {}: default_last_level={} compile_out_threshold={}{}",
                topic.index,
                topic.name,
                topic.default_last_level,
                topic.compile_out_threshold,
                if topic.raised_threshold {
                    " (raised by topic default)"
                } else {
                    ""
                }
            );
            for level in &topic.levels {
                let _ = writeln!(
                    output,
                    "      {:<24} {}",
                    level.macro_name,
                    disposition_label(level.disposition)
                );
            }
        }
        output
    }

    /// Renders pretty-printed JSON.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

const fn disposition_label(disposition: LevelDisposition) -> &'static str {
    match disposition {
        LevelDisposition::EnabledByDefault => "enabled",
        LevelDisposition::DisabledByDefault => "compiled, disabled by default",
        LevelDisposition::CompiledOut => "compiled out",
    }
}

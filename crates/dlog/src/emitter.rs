//! Per-level macro bodies.
//!
//! For every `(topic, level)` pair the header carries two candidate
//! definitions of the same variadic macro. Which one survives is decided by
//! the consumer's preprocessor comparing the level with the topic's
//! compile-out threshold, so one generated header serves debug and release
//! builds alike.

use std::fmt::Write as _;

use crate::level::Level;
use crate::naming::{Naming, TopicConstant};
use crate::topic::Topic;

/// Renders macro definitions for one naming scheme.
#[derive(Clone, Copy, Debug)]
pub struct MacroEmitter<'a> {
    naming: &'a Naming,
}

impl<'a> MacroEmitter<'a> {
    /// Creates an emitter for `naming`.
    #[must_use]
    pub const fn new(naming: &'a Naming) -> Self {
        Self { naming }
    }

    /// Definition forwarding to the runtime log entry point.
    ///
    /// Source location comes from `__FILE__`/`__LINE__` at the call site and
    /// the payload from the formatting wrapper applied to the macro arguments.
    #[must_use]
    pub fn enabled_body(&self, topic: &Topic, level: Level) -> String {
        format!(
            concat!(
                "#define {name}(...)\\\n",
                "    {log}(\"{topic}\", {index}, {level}, __FILE__, __LINE__, \\\n",
                "              {format}(__VA_ARGS__))\n",
            ),
            name = self.naming.macro_name(topic, level),
            log = self.naming.log_function(),
            topic = topic.name(),
            index = self.naming.topic_constant(topic, TopicConstant::Index),
            level = level,
            format = self.naming.format_macro(),
        )
    }

    /// Definition that swallows its arguments and expands to nothing.
    ///
    /// Still a variadic function-like macro, so call sites compile unchanged.
    #[must_use]
    pub fn disabled_body(&self, topic: &Topic, level: Level) -> String {
        format!("#define {}(...)\n", self.naming.macro_name(topic, level))
    }

    /// Conditional block choosing between the two bodies.
    ///
    /// Levels at or above the topic threshold get the empty body.
    #[must_use]
    pub fn level_block(&self, topic: &Topic, level: Level) -> String {
        logging::trace_emit!(
            topic = topic.name(),
            level = level.get(),
            "emitting level block"
        );
        let mut block = String::new();
        let _ = writeln!(
            block,
            "\n#if {} <= {level}",
            self.naming
                .topic_constant(topic, TopicConstant::CompileOutThreshold)
        );
        block.push_str(&self.disabled_body(topic, level));
        block.push_str("#else\n");
        block.push_str(&self.enabled_body(topic, level));
        block.push_str("#endif\n");
        block
    }
}

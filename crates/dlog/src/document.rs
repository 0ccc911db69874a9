//! Header assembly.
//!
//! The header is an ordered list of named [`Section`]s. The order is part of
//! the contract: the per-topic blocks reference the global threshold
//! declarations from the preamble and the index constants from the index
//! table, so both must come first. [`Section::ORDER`] fixes the sequence and
//! is checked at compile time.

use std::fmt::Write as _;

use crate::emitter::MacroEmitter;
use crate::level::{COMPILED_OUT_SENTINEL, Level};
use crate::naming::{GlobalConstant, Naming, TopicConstant};
use crate::resolver::{BuildMode, ThresholdResolver};
use crate::topic::Topic;

/// One block of the generated header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Section {
    /// Runtime declarations, release-build stubs, and global thresholds.
    Preamble,
    /// One index constant per topic.
    IndexTable,
    /// Threshold logic and per-level macros for every topic.
    TopicBlocks,
    /// Debug-only initializer list for the runtime policy store.
    InitTable,
}

impl Section {
    /// Emission order.
    pub const ORDER: [Self; 4] = [
        Self::Preamble,
        Self::IndexTable,
        Self::TopicBlocks,
        Self::InitTable,
    ];

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preamble => "preamble",
            Self::IndexTable => "index-table",
            Self::TopicBlocks => "topic-blocks",
            Self::InitTable => "init-table",
        }
    }

    const fn position(self) -> usize {
        let mut i = 0;
        while i < Self::ORDER.len() {
            if Self::ORDER[i] as u8 == self as u8 {
                return i;
            }
            i += 1;
        }
        usize::MAX
    }
}

const _: () = {
    assert!(Section::Preamble.position() < Section::TopicBlocks.position());
    assert!(Section::IndexTable.position() < Section::TopicBlocks.position());
    assert!(Section::InitTable.position() != usize::MAX);
};

/// Assembled header text, one entry per section in [`Section::ORDER`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    sections: Vec<(Section, String)>,
}

impl Document {
    /// Text of `section`.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&str> {
        self.sections
            .iter()
            .find(|(candidate, _)| *candidate == section)
            .map(|(_, text)| text.as_str())
    }

    /// Iterates sections in emission order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> {
        self.sections
            .iter()
            .map(|(section, text)| (*section, text.as_str()))
    }

    /// Concatenates every section into the final header text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        for (_, text) in &self.sections {
            output.push_str(text);
            output.push('\n');
        }
        output
    }
}

/// Stitches resolver decisions and macro bodies into a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct DocumentAssembler<'a> {
    resolver: &'a ThresholdResolver,
    naming: &'a Naming,
}

impl<'a> DocumentAssembler<'a> {
    /// Creates an assembler.
    #[must_use]
    pub const fn new(resolver: &'a ThresholdResolver, naming: &'a Naming) -> Self {
        Self { resolver, naming }
    }

    /// Produces every section in [`Section::ORDER`].
    #[must_use]
    pub fn assemble(&self) -> Document {
        let sections = Section::ORDER
            .iter()
            .map(|&section| {
                let text = match section {
                    Section::Preamble => self.preamble(),
                    Section::IndexTable => self.index_table(),
                    Section::TopicBlocks => self.topic_blocks(),
                    Section::InitTable => self.init_table(),
                };
                logging::trace_assemble!(
                    section = section.label(),
                    bytes = text.len(),
                    "assembled section"
                );
                (section, text)
            })
            .collect();
        Document { sections }
    }

    fn preamble(&self) -> String {
        let n = self.naming;
        let globals = self.resolver.globals();
        let threshold = n.global_constant(GlobalConstant::CompileOutThreshold);
        let disable = n.global_constant(GlobalConstant::DefaultDisableLevel);

        format!(
            concat!(
                "/* Generated by dlog-gen. Do not edit; rerun the generator instead. */\n",
                "#pragma once\n",
                "\n",
                "#if defined({debug})\n",
                "extern char   *{raw_format}(char *fmt, int64_t num_params, ...);\n",
                "extern void    {log}(char *, int, int, char *, int, char *);\n",
                "extern int64_t {get_policy}(char *);\n",
                "extern bool    {set_policy}(char *, int64_t);\n",
                "\n",
                "#else\n",
                "\n",
                "#undef {threshold}\n",
                "#define {threshold} {sentinel}\n",
                "#undef {disable}\n",
                "#define {disable} {sentinel}\n",
                "\n",
                "#define {get_policy}(x) 0\n",
                "#define {set_policy}(a, b) false\n",
                "#define {raw_format}(...)\n",
                "#define {log}(...)\n",
                "\n",
                "#endif\n",
                "\n",
                "#define {format}(fmt, ...) \\\n",
                "    {raw_format}(fmt, {narg}(__VA_ARGS__) __VA_OPT__(, __VA_ARGS__))\n",
                "\n",
                "#if !defined({threshold})\n",
                "#define {threshold} {threshold_value}\n",
                "#endif\n",
                "\n",
                "#if !defined({disable})\n",
                "#define {disable} {disable_value}\n",
                "#endif\n",
                "\n",
                "#if {disable} > {threshold}\n",
                "#warning \"{disable} > {threshold}\"\n",
                "#endif\n",
            ),
            debug = n.debug_switch(),
            raw_format = n.raw_format_function(),
            log = n.log_function(),
            get_policy = n.get_policy_function(),
            set_policy = n.set_policy_function(),
            format = n.format_macro(),
            narg = n.arg_count_macro(),
            threshold = threshold,
            disable = disable,
            sentinel = COMPILED_OUT_SENTINEL,
            threshold_value = globals.compile_out_threshold(),
            disable_value = globals.default_disabled_level(),
        )
    }

    fn index_table(&self) -> String {
        let mut table = String::new();
        for topic in self.resolver.registry() {
            let _ = writeln!(
                table,
                "#define {} {}",
                self.naming.topic_constant(topic, TopicConstant::Index),
                topic.index()
            );
        }
        table
    }

    fn topic_blocks(&self) -> String {
        let mut blocks = String::new();
        for topic in self.resolver.registry() {
            blocks.push_str(&self.topic_block(topic));
            blocks.push('\n');
        }
        blocks
    }

    fn topic_block(&self, topic: &Topic) -> String {
        let n = self.naming;
        let resolved = self.resolver.resolve(topic, BuildMode::Debug);
        let thresholds = resolved.thresholds();
        let debug = n.debug_switch();
        let global_threshold = n.global_constant(GlobalConstant::CompileOutThreshold);
        let last = n.topic_constant(topic, TopicConstant::DefaultLastLevel);
        let threshold = n.topic_constant(topic, TopicConstant::CompileOutThreshold);

        let mut block = format!(
            concat!(
                "\n",
                "/* {name}: default last level {last_value}, compile-out threshold {threshold_value} */\n",
                "#if defined({debug})\n",
                "#if !defined({last})\n",
                "#define {last} {last_value}\n",
                "#endif\n",
                "\n",
                "#if !defined({threshold})\n",
                "#if {last} > {global_threshold}\n",
                "#define {threshold} {last}\n",
                "#else\n",
                "#define {threshold} {global_threshold}\n",
                "#endif\n",
                "#endif\n",
                "\n",
                "#if {last} > {threshold}\n",
                "#warning \"{last} > {threshold}\"\n",
                "#endif\n",
                "#else // {debug}\n",
                "#undef {threshold}\n",
                "#define {threshold} {sentinel} // Don't compile any dlogs\n",
                "#endif // {debug}\n",
            ),
            name = topic.name(),
            last_value = thresholds.default_last_level,
            threshold_value = thresholds.compile_out_threshold,
            debug = debug,
            last = last,
            threshold = threshold,
            global_threshold = global_threshold,
            sentinel = COMPILED_OUT_SENTINEL,
        );

        let emitter = MacroEmitter::new(n);
        for level in Level::descending() {
            block.push_str(&emitter.level_block(topic, level));
        }

        let _ = write!(
            block,
            concat!(
                "\n",
                "#if {threshold} > 0\n",
                "#define {on}\n",
                "#endif\n",
                "#define {level} ({threshold} - 1)\n",
            ),
            threshold = threshold,
            on = n.topic_constant(topic, TopicConstant::On),
            level = n.topic_constant(topic, TopicConstant::Level),
        );
        block
    }

    fn init_table(&self) -> String {
        let n = self.naming;
        let mut table = format!(
            "#if defined({})\n#define {}\\\n    {{\\\n",
            n.debug_switch(),
            n.global_constant(GlobalConstant::GeneratedInits)
        );
        for topic in self.resolver.registry() {
            let _ = writeln!(
                table,
                "    {{.topic = \"{}\", .value = {} - 1ULL}},\\",
                topic.name(),
                n.topic_constant(topic, TopicConstant::DefaultLastLevel)
            );
        }
        let _ = write!(
            table,
            "    }}\n\n#define {} {}\n#endif\n",
            n.global_constant(GlobalConstant::NumTopics),
            self.resolver.registry().len()
        );
        table
    }
}

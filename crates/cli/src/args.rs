//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use dlog::BuildMode;

/// Generates the topic-scoped debug logging header.
///
/// Configuration is read from `dlog.toml` at the generator root when
/// present; flags override individual settings. Relative output paths are
/// resolved against the generator root, not the current directory.
#[derive(Parser, Debug)]
#[command(name = "dlog-gen")]
#[command(about = "Generate the topic-scoped debug logging header")]
#[command(version)]
pub struct Args {
    /// Configuration file to read instead of `dlog.toml` at the root.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generator root used to anchor relative paths.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Header path, relative to the root unless absolute.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Identifier namespace (e.g. `n00b` for `n00b_dlog_lock`).
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Replace the topic list; repeat in index order.
    #[arg(long = "topic", value_name = "NAME")]
    pub topics: Vec<String>,

    /// Global compile-out threshold.
    #[arg(long, value_name = "LEVEL")]
    pub compile_out_threshold: Option<u8>,

    /// Global default-disabled level.
    #[arg(long, value_name = "LEVEL")]
    pub default_disabled_level: Option<u8>,

    /// Per-topic default-disabled level; may be repeated.
    #[arg(long = "topic-default", value_name = "TOPIC=LEVEL", value_parser = parse_topic_default)]
    pub topic_defaults: Vec<(String, u8)>,

    /// Print the header to standard output instead of writing it.
    #[arg(long, conflicts_with_all = ["check", "explain"])]
    pub stdout: bool,

    /// Fail if the header on disk differs from what would be generated.
    #[arg(long, conflicts_with = "explain")]
    pub check: bool,

    /// Print resolved thresholds per topic and level instead of writing.
    #[arg(long)]
    pub explain: bool,

    /// Report format for `--explain`.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Build mode described by `--explain`.
    #[arg(long, value_enum, default_value_t = ModeArg::Debug)]
    pub mode: ModeArg,

    /// Increase diagnostic output; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for `--explain`.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Structured JSON suitable for automation.
    Json,
}

/// Build mode selector for `--explain`.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Consumer defines the debug switch.
    #[default]
    Debug,
    /// Consumer builds without the debug switch.
    Release,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Debug => Self::Debug,
            ModeArg::Release => Self::Release,
        }
    }
}

fn parse_topic_default(value: &str) -> Result<(String, u8), String> {
    let (topic, level) = value
        .split_once('=')
        .ok_or_else(|| format!("expected TOPIC=LEVEL, got '{value}'"))?;
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(format!("missing topic name in '{value}'"));
    }
    let level = level
        .trim()
        .parse::<u8>()
        .map_err(|error| format!("invalid level in '{value}': {error}"))?;
    Ok((topic.to_owned(), level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_default_parses_name_and_level() {
        assert_eq!(parse_topic_default("gc=1"), Ok((String::from("gc"), 1)));
        assert_eq!(parse_topic_default(" io = 3 "), Ok((String::from("io"), 3)));
    }

    #[test]
    fn topic_default_rejects_malformed_values() {
        assert!(parse_topic_default("gc").is_err());
        assert!(parse_topic_default("=1").is_err());
        assert!(parse_topic_default("gc=-1").is_err());
        assert!(parse_topic_default("gc=high").is_err());
    }

    #[test]
    fn topics_keep_command_line_order() {
        let args = Args::parse_from(["dlog-gen", "--topic", "net", "--topic", "disk"]);
        assert_eq!(args.topics, vec!["net", "disk"]);
    }

    #[test]
    fn stdout_conflicts_with_check() {
        let error = Args::try_parse_from(["dlog-gen", "--stdout", "--check"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn verbose_flag_counts_repetitions() {
        let args = Args::parse_from(["dlog-gen", "-vvv"]);
        assert_eq!(args.verbose, 3);
        assert!(!args.quiet);
    }

    #[test]
    fn debug_assert_command() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}

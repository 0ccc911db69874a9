#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `dlog-gen` command-line front-end. It layers
//! command-line overrides on top of the configuration file, drives
//! [`dlog::Generator`], and either writes the header, checks it for
//! staleness, prints it, or prints a resolution report.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator, the default generator root, and
//! handles for standard output and error, returning a process exit status.
//! Taking the writers as parameters lets tests capture output in memory. The
//! binary crate passes its own manifest directory as the root so relative
//! output paths never depend on the invocation directory.
//!
//! # Errors
//!
//! Failures are printed to the error handle prefixed with `dlog-gen:` and
//! mapped onto [`ExitStatus`] codes. Nothing is written to disk on failure.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(
//!     ["dlog-gen", "--stdout", "--topic", "lock"],
//!     Path::new("."),
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().contains("n00b_dlog_lock3"));
//! ```

mod args;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use clap::error::ErrorKind;
use dlog::{
    ConfigError, Freshness, GenerateError, Generator, GeneratorConfig, OutputTarget,
};
use logging::Verbosity;
use thiserror::Error;

pub use args::{Args, ModeArg, ReportFormat};

/// Program name used in diagnostics.
pub const PROGRAM_NAME: &str = "dlog-gen";

/// Process exit statuses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExitStatus {
    /// The requested action completed.
    Success,
    /// The configuration was rejected.
    ConfigError,
    /// The command line could not be parsed.
    Usage,
    /// Reading or writing a file failed.
    IoError,
    /// `--check` found a missing or outdated header.
    Stale,
}

impl ExitStatus {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ConfigError => 1,
            Self::Usage => 2,
            Self::IoError => 3,
            Self::Stale => 4,
        }
    }
}

/// Failure of a single CLI invocation.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to serialise report: {0}")]
    Report(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::Generate(GenerateError::Config(error))
    }
}

impl CliError {
    const fn status(&self) -> ExitStatus {
        match self {
            Self::Generate(GenerateError::Config(_)) => ExitStatus::ConfigError,
            Self::Generate(GenerateError::Io { .. }) | Self::Output(_) | Self::Report(_) => {
                ExitStatus::IoError
            }
        }
    }
}

/// Runs the generator with the provided arguments.
///
/// `default_root` anchors relative output paths and the default
/// configuration lookup unless `--root` is given.
pub fn run<I, T, Out, Err>(
    arguments: I,
    default_root: &Path,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let args = match Args::try_parse_from(arguments) {
        Ok(args) => args,
        Err(error) => {
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(stdout, "{error}");
                    ExitStatus::Success.code()
                }
                _ => {
                    let _ = write!(stderr, "{error}");
                    ExitStatus::Usage.code()
                }
            };
        }
    };

    logging::init_tracing(Verbosity::from_flags(args.verbose, args.quiet));

    match execute(&args, default_root, stdout, stderr) {
        Ok(status) => status.code(),
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.status().code()
        }
    }
}

/// Converts a status returned by [`run`] into a process exit code.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, i32::from(u8::MAX));
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn execute<Out, Err>(
    args: &Args,
    default_root: &Path,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<ExitStatus, CliError>
where
    Out: Write,
    Err: Write,
{
    let root = args.root.as_deref().unwrap_or(default_root);
    let config = load_config(args, root)?;
    let generator = Generator::from_config(&config)?;

    if args.explain {
        let report = generator.report(args.mode.into());
        let rendered = match args.format {
            ReportFormat::Text => report.render_text(),
            ReportFormat::Json => report.render_json()? + "\n",
        };
        stdout.write_all(rendered.as_bytes())?;
        return Ok(ExitStatus::Success);
    }

    let document = generator.assemble();
    if args.stdout {
        stdout.write_all(document.render().as_bytes())?;
        return Ok(ExitStatus::Success);
    }

    let target = OutputTarget::resolve(root, &config.output)?;
    if args.check {
        return match target.freshness(&document)? {
            Freshness::UpToDate => {
                writeln!(
                    stdout,
                    "Internal debug log header @ {} is up to date",
                    target.path().display()
                )?;
                Ok(ExitStatus::Success)
            }
            state @ (Freshness::Stale | Freshness::Missing) => {
                writeln!(
                    stderr,
                    "{PROGRAM_NAME}: internal debug log header @ {} is {}; rerun {PROGRAM_NAME}",
                    target.path().display(),
                    if state == Freshness::Missing {
                        "missing"
                    } else {
                        "out of date"
                    }
                )?;
                Ok(ExitStatus::Stale)
            }
        };
    }

    let written = target.write(&document)?;
    writeln!(
        stdout,
        "Updated internal debug log header @ {} with current topics",
        written.display()
    )?;
    Ok(ExitStatus::Success)
}

/// Loads the file configuration and applies command-line overrides.
fn load_config(args: &Args, root: &Path) -> Result<GeneratorConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::discover(root)?,
    };

    if let Some(namespace) = &args.namespace {
        config.namespace.clone_from(namespace);
    }
    if !args.topics.is_empty() {
        config.topics.clone_from(&args.topics);
    }
    if let Some(threshold) = args.compile_out_threshold {
        config.compile_out_threshold = threshold;
    }
    if let Some(level) = args.default_disabled_level {
        config.default_disabled_level = level;
    }
    for (topic, level) in &args.topic_defaults {
        config.topic_defaults.insert(topic.clone(), *level);
    }
    if let Some(output) = &args.output {
        config.output.clone_from(output);
    }
    Ok(config)
}

#[cfg(test)]
mod tests;

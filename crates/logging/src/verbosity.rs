//! crates/logging/src/verbosity.rs
//! Verbosity levels for generator diagnostics.

use tracing::level_filters::LevelFilter;

/// How much the generator reports about its own work.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Adds informational events such as completed writes.
    Verbose,
    /// Adds per-topic resolution details.
    Debug,
    /// Everything, including per-level emission events.
    Trace,
}

impl Verbosity {
    /// Builds a verbosity from the number of `-v` flags and the `-q` switch.
    ///
    /// `quiet` wins over any number of `-v` flags; counts above three
    /// saturate at [`Verbosity::Trace`].
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the level filter applied when `DLOG_LOG` is unset.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Returns the `EnvFilter` directive equivalent to [`level_filter`](Self::level_filter).
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` wires the generator's own diagnostics into [`tracing`]. The
//! header produced by `dlog-gen` declares a logging facility for the host
//! program; this crate is unrelated to that facility and only controls what
//! the generator itself reports while it resolves thresholds and writes the
//! output file.
//!
//! # Design
//!
//! - [`Verbosity`] maps the command-line `-v`/`-q` flags onto a
//!   [`tracing::level_filters::LevelFilter`].
//! - [`init_tracing`] installs a `tracing-subscriber` formatter on standard
//!   error. The `DLOG_LOG` environment variable, when set, takes precedence
//!   over the verbosity-derived filter and accepts the usual `EnvFilter`
//!   directive syntax.
//! - The `trace_*` macros emit events under fixed `dlog::*` targets so the
//!   resolver, emitter, and writer can be filtered independently.
//!
//! # Examples
//!
//! ```
//! use logging::Verbosity;
//!
//! assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
//! assert_eq!(Verbosity::from_flags(2, false), Verbosity::Debug);
//! assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
//! ```

mod subscriber;
mod tracing_macros;
mod verbosity;

pub use subscriber::{LOG_ENV_VAR, init_tracing};
pub use verbosity::Verbosity;

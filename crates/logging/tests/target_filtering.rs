//! Integration tests for the stage-scoped tracing macros.
//!
//! Events are captured through a formatter writing into shared memory so
//! the assertions see exactly what `dlog-gen` would print on standard error.

use std::io;
use std::sync::{Arc, Mutex};

use logging::Verbosity;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("capture lock").clone()).expect("utf-8 log")
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_with(filter: &str, emit: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, emit);
    capture.contents()
}

#[test]
fn resolve_events_carry_their_stage_target() {
    let output = capture_with(Verbosity::Debug.directive(), || {
        logging::trace_resolve!(topic = "lock", threshold = 2, "resolved topic");
    });

    assert!(output.contains("dlog::resolve"));
    assert!(output.contains("resolved topic"));
    assert!(output.contains("threshold=2"));
}

#[test]
fn emit_events_need_trace_verbosity() {
    let at_debug = capture_with(Verbosity::Debug.directive(), || {
        logging::trace_emit!(level = 3, "emitting level block");
    });
    assert!(at_debug.is_empty());

    let at_trace = capture_with(Verbosity::Trace.directive(), || {
        logging::trace_emit!(level = 3, "emitting level block");
    });
    assert!(at_trace.contains("dlog::emit"));
}

#[test]
fn write_events_appear_at_verbose() {
    let normal = capture_with(Verbosity::Normal.directive(), || {
        logging::trace_write!(path = "include/debug/dlogf.h", "header written");
    });
    assert!(normal.is_empty());

    let verbose = capture_with(Verbosity::Verbose.directive(), || {
        logging::trace_write!(path = "include/debug/dlogf.h", "header written");
    });
    assert!(verbose.contains("header written"));
}

#[test]
fn target_directives_isolate_one_stage() {
    let output = capture_with("warn,dlog::config=debug", || {
        logging::trace_config!("loaded configuration");
        logging::trace_assemble!(section = "index", "assembled section");
    });

    assert!(output.contains("loaded configuration"));
    assert!(!output.contains("assembled section"));
}

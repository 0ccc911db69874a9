#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, io, path::Path, process::ExitCode};

/// Relative output paths resolve against the workspace that ships the
/// generator, never the caller's working directory.
const GENERATOR_ROOT: &str = env!("CARGO_MANIFEST_DIR");

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let status = cli::run(
        env::args_os(),
        Path::new(GENERATOR_ROOT),
        &mut stdout,
        &mut stderr,
    );
    cli::exit_code_from(status)
}

use std::path::Path;

use super::*;

pub(super) struct Captured {
    pub(super) status: i32,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

pub(super) fn run_in(root: &Path, args: &[&str]) -> Captured {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once(PROGRAM_NAME).chain(args.iter().copied());
    let status = run(argv, root, &mut stdout, &mut stderr);
    Captured {
        status,
        stdout: String::from_utf8(stdout).expect("stdout is utf-8"),
        stderr: String::from_utf8(stderr).expect("stderr is utf-8"),
    }
}

pub(super) fn header_path(root: &Path) -> std::path::PathBuf {
    root.join("include").join("debug").join("dlogf.h")
}

pub(super) fn scratch_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(header_path(dir.path()).parent().expect("parent"))
        .expect("create include dir");
    dir
}

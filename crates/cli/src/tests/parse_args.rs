use super::common::*;
use super::*;

#[test]
fn help_goes_to_stdout_with_success() {
    let root = scratch_root();
    let outcome = run_in(root.path(), &["--help"]);

    assert_eq!(outcome.status, ExitStatus::Success.code());
    assert!(outcome.stdout.contains("Usage"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let root = scratch_root();
    let outcome = run_in(root.path(), &["--no-such-flag"]);

    assert_eq!(outcome.status, ExitStatus::Usage.code());
    assert!(outcome.stderr.contains("--no-such-flag"));
}

#[test]
fn stdout_conflicts_with_check() {
    let root = scratch_root();
    let outcome = run_in(root.path(), &["--stdout", "--check"]);

    assert_eq!(outcome.status, ExitStatus::Usage.code());
}

#[test]
fn malformed_topic_default_is_a_usage_error() {
    let root = scratch_root();
    let outcome = run_in(root.path(), &["--topic-default", "lock"]);

    assert_eq!(outcome.status, ExitStatus::Usage.code());
}

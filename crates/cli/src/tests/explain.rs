use super::common::*;
use super::*;

#[test]
fn explain_text_lists_every_topic() {
    let root = scratch_root();
    let outcome = run_in(root.path(), &["--explain"]);

    assert_eq!(outcome.status, ExitStatus::Success.code());
    for topic in dlog::REFERENCE_TOPICS {
        assert!(outcome.stdout.contains(topic), "missing {topic}");
    }
    assert!(!header_path(root.path()).exists());
}

#[test]
fn explain_json_reports_resolved_pairs() {
    let root = scratch_root();
    let outcome = run_in(
        root.path(),
        &[
            "--explain",
            "--format",
            "json",
            "--topic",
            "lock",
            "--topic-default",
            "lock=1",
        ],
    );

    assert_eq!(outcome.status, ExitStatus::Success.code(), "{}", outcome.stderr);
    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json");
    let lock = &value["topics"][0];
    assert_eq!(lock["name"], "lock");
    assert_eq!(lock["default_last_level"], 1);
    assert_eq!(lock["compile_out_threshold"], 2);
    assert_eq!(lock["levels"][0]["disposition"], "enabled_by_default");
    assert_eq!(lock["levels"][1]["disposition"], "disabled_by_default");
    assert_eq!(lock["levels"][2]["disposition"], "compiled_out");
}

#[test]
fn explain_release_mode_compiles_everything_out() {
    let root = scratch_root();
    let outcome = run_in(
        root.path(),
        &["--explain", "--format", "json", "--mode", "release"],
    );

    assert_eq!(outcome.status, ExitStatus::Success.code());
    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json");
    assert_eq!(value["mode"], "release");
    for level in value["topics"][0]["levels"].as_array().expect("levels") {
        assert_eq!(level["disposition"], "compiled_out");
    }
}

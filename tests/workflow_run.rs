use driftflow::{run_workflow_with, ConfigOverrides, RunStatus, WorkflowSummary};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `config` to a temp dir, pointing the audit log inside it
fn write_config(dir: &TempDir, mut config: Value) -> (PathBuf, PathBuf) {
    let audit = dir.path().join("logs/audit.json");
    config["storage"] = json!({ "path": audit });
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, config.to_string()).unwrap();
    (path, audit)
}

fn run(path: &Path) -> WorkflowSummary {
    run_workflow_with(path, &ConfigOverrides::default()).unwrap()
}

fn result_names(summary: &WorkflowSummary) -> Vec<&str> {
    summary.results.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn unknown_required_step_halts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_config(
        &dir,
        json!({
            "name": "t",
            "max_attempts": 1,
            "steps": [
                {"name": "bad", "action": "missing", "input": "x"},
                {"name": "good", "action": "echo", "input": "y"}
            ]
        }),
    );

    let summary = run(&path);
    assert_eq!(summary.name, "t");
    assert_eq!(summary.status, RunStatus::Failed);
    assert_eq!(result_names(&summary), vec!["bad"]);
    assert!(summary.results[0].error.as_deref().unwrap().contains("Unknown action"));
}

#[test]
fn optional_failure_continues_but_taints_status() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_config(
        &dir,
        json!({
            "steps": [
                {"name": "bad", "action": "missing", "input": "x", "optional": true},
                {"name": "good", "action": "echo", "input": "y"}
            ]
        }),
    );

    let summary = run(&path);
    assert_eq!(result_names(&summary), vec!["bad", "good"]);
    assert!(!summary.results[0].ok);
    assert_eq!(summary.results[1].output.as_deref(), Some("y"));
    assert_eq!(summary.status, RunStatus::Failed);
}

#[test]
fn steps_run_by_priority_then_name() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_config(
        &dir,
        json!({
            "steps": [
                {"name": "zebra", "action": "echo", "priority": 0},
                {"name": "apple", "action": "echo", "priority": 0},
                {"name": "high", "action": "echo", "priority": 10}
            ]
        }),
    );

    let summary = run(&path);
    assert_eq!(result_names(&summary), vec!["high", "apple", "zebra"]);
    assert_eq!(summary.status, RunStatus::Ok);
}

#[test]
fn builtin_actions_transform_input() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_config(
        &dir,
        json!({
            "steps": [
                {"name": "a", "action": "reverse", "input": "hello"},
                {"name": "b", "action": "upper", "input": "hello"},
                {"name": "c", "action": "lower", "input": "HELLO"}
            ]
        }),
    );

    let outputs: Vec<Option<String>> = run(&path).results.into_iter().map(|r| r.output).collect();
    assert_eq!(
        outputs,
        vec![Some("olleh".to_string()), Some("HELLO".to_string()), Some("hello".to_string())]
    );
}

#[test]
fn audit_enabled_writes_one_record_per_step() {
    let dir = tempfile::tempdir().unwrap();
    let (path, audit) = write_config(
        &dir,
        json!({
            "flags": {"audit": true},
            "steps": [
                {"name": "one", "action": "echo", "input": "1"},
                {"name": "two", "action": "upper", "input": "2"}
            ]
        }),
    );

    assert_eq!(run(&path).status, RunStatus::Ok);

    let text = std::fs::read_to_string(&audit).unwrap();
    let records: Vec<Value> = text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(records.len(), 2);
    for (record, (step, action)) in records.iter().zip([("one", "echo"), ("two", "upper")]) {
        assert_eq!(record["step"], step);
        assert_eq!(record["action"], action);
        assert_eq!(record["ok"], true);
        assert!(record["ts"].is_i64());
    }
}

#[test]
fn audit_disabled_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let (path, audit) = write_config(
        &dir,
        json!({
            "flags": {"audit": false},
            "steps": [{"name": "one", "action": "echo", "input": "1"}]
        }),
    );

    run(&path);
    assert!(!audit.exists());
}

#[test]
fn environment_override_disables_audit() {
    let dir = tempfile::tempdir().unwrap();
    let (path, audit) = write_config(
        &dir,
        json!({
            "flags": {"audit": true},
            "steps": [{"name": "one", "action": "echo", "input": "1"}]
        }),
    );

    let overrides = ConfigOverrides::from_lookup(|key| (key == "DRIFTFLOW_FLAGS").then(|| "audit".to_string()));
    run_workflow_with(&path, &overrides).unwrap();
    assert!(!audit.exists());
}

#[test]
fn retries_do_not_rescue_an_unknown_action() {
    let dir = tempfile::tempdir().unwrap();
    let (path, audit) = write_config(
        &dir,
        json!({
            "max_attempts": 3,
            "flags": {"audit": true},
            "steps": [
                {"name": "bad", "action": "missing"},
                {"name": "good", "action": "echo", "input": "y"}
            ]
        }),
    );

    let summary = run(&path);
    assert_eq!(result_names(&summary), vec!["bad"]);
    assert_eq!(std::fs::read_to_string(&audit).unwrap().lines().count(), 1);
}

#[test]
fn summary_json_matches_wire_shape() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_config(
        &dir,
        json!({
            "name": "shape",
            "steps": [
                {"name": "ok", "action": "echo", "input": "v", "priority": 1},
                {"name": "bad", "action": "nope", "optional": true}
            ]
        }),
    );

    let value = serde_json::to_value(run(&path)).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "shape",
            "status": "failed",
            "results": [
                {"name": "ok", "ok": true, "output": "v"},
                {"name": "bad", "ok": false, "error": "Unknown action: nope"}
            ]
        })
    );
}

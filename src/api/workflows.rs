/// Workflow run entry points
///
/// Loads a config, runs the engine, and reduces per-step results into a single
/// summary. Ordering and retry logic live in the engine, not here.

use crate::{
    config::{load_config, ConfigOverrides, WorkflowConfig},
    error::DriftflowError,
    runtime::WorkflowEngine,
    workflow::{RunStatus, StepResult, WorkflowSummary},
};
use std::path::Path;

/// Run the workflow at `path`, reading overrides from the environment
pub fn run_workflow(path: impl AsRef<Path>) -> Result<WorkflowSummary, DriftflowError> {
    run_workflow_with(path, &ConfigOverrides::from_env())
}

/// Run the workflow at `path` with explicit overrides
pub fn run_workflow_with(path: impl AsRef<Path>, overrides: &ConfigOverrides) -> Result<WorkflowSummary, DriftflowError> {
    let config = load_config(path, overrides)?;
    run_config(config)
}

/// Run an already-resolved config
pub fn run_config(config: WorkflowConfig) -> Result<WorkflowSummary, DriftflowError> {
    let name = config.name.clone();
    let engine = WorkflowEngine::new(config)?;
    let results = engine.run()?;
    let summary = summarize(name, results);

    match summary.status {
        RunStatus::Ok => tracing::info!("🎉 Workflow '{}' completed: ok", summary.name),
        RunStatus::Failed => tracing::warn!("💥 Workflow '{}' completed: failed", summary.name),
    }

    Ok(summary)
}

/// Reduce step results: `ok` iff every result is ok
pub fn summarize(name: impl Into<String>, results: Vec<StepResult>) -> WorkflowSummary {
    let status = if results.iter().all(|result| result.ok) {
        RunStatus::Ok
    } else {
        RunStatus::Failed
    };

    WorkflowSummary {
        name: name.into(),
        status,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ok_results_summarize_ok() {
        let summary = summarize("w", vec![StepResult::success("a", "x"), StepResult::success("b", "y")]);
        assert_eq!(summary.status, RunStatus::Ok);
        assert_eq!(summary.results.len(), 2);
    }

    #[test]
    fn any_failure_taints_the_summary() {
        let summary = summarize("w", vec![StepResult::failure("a", "boom"), StepResult::success("b", "y")]);
        assert_eq!(summary.status, RunStatus::Failed);
    }

    #[test]
    fn empty_run_is_ok() {
        assert_eq!(summarize("w", Vec::new()).status, RunStatus::Ok);
    }

    #[test]
    fn missing_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_workflow_with(dir.path().join("nope.json"), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, DriftflowError::Config(_)));
    }
}

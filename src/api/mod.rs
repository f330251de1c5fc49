/// Orchestration API Layer
///
/// The single entry point callers use to run a workflow and get a summary back.
/// It handles:
/// - Config loading with environment overrides
/// - Engine construction and execution
/// - Reducing step results to an ok/failed status

// Run entry points and result aggregation
pub mod workflows;

// Re-export entry points
pub use workflows::{run_config, run_workflow, run_workflow_with, summarize};

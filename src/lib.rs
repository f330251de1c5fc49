/// DriftFlow: declarative step runner with retries and audit logging
///
/// This library runs an ordered list of named steps against a fixed table of
/// string-transform actions, applying priority ordering, retry budgets,
/// optional-failure tolerance, and flag-gated audit logging.

// Typed errors for actions, config, and audit storage
pub mod error;

// Config file loading and environment overrides
pub mod config;

// Workflow data layer - step types, feature flags, audit log
pub mod workflow;

// Runtime execution engine - ordering, retries, action dispatch
pub mod runtime;

// Orchestration entry point - run and summarize
pub mod api;

// Command-line front end
pub mod cli;

// Re-export commonly used types for external consumers
pub use api::{run_workflow, run_workflow_with};
pub use config::{load_config, ConfigOverrides, StepSource, WorkflowConfig};
pub use error::{ActionError, AuditError, ConfigError, DriftflowError};
pub use runtime::{Action, WorkflowEngine};
pub use workflow::{AuditEvent, FeatureFlagStore, RunStatus, Step, StepResult, WorkflowSummary};

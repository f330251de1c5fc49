/// Workflow data layer
///
/// This module holds what the engine works with:
/// - Type definitions (Step, StepResult, AuditEvent, WorkflowSummary)
/// - Feature flag store with a closed set of registered names
/// - Append-only JSON audit log

// Core workflow type definitions
pub mod types;

// Registered feature flags and their lookup rules
pub mod flags;

// Newline-delimited JSON audit storage
pub mod storage;

// Re-export commonly used types
pub use flags::{FeatureFlag, FeatureFlagStore};
pub use storage::AuditLog;
pub use types::{AuditEvent, RunStatus, Step, StepResult, WorkflowSummary};

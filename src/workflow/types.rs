/// Core workflow type definitions
///
/// Steps are built once from config records and never change afterwards.
/// Results and audit events serialize to the JSON shapes consumers read.

use crate::config::StepSource;
use serde::{Deserialize, Serialize};

/// A single named unit of work
///
/// Names need not be unique; two steps with the same name both execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub action: String,
    pub input: String,
    pub optional: bool,
    pub priority: i64,
}

impl From<&StepSource> for Step {
    fn from(source: &StepSource) -> Self {
        Self {
            name: source.name.clone(),
            action: source.action.clone(),
            input: source.input.clone(),
            optional: source.optional,
            priority: source.priority,
        }
    }
}

impl Step {
    /// Attempt budget: optional steps get exactly one try
    pub fn attempt_budget(&self, max_attempts: u32) -> u32 {
        if self.optional {
            1
        } else {
            max_attempts.max(1)
        }
    }
}

/// Outcome of one step after all of its attempts
///
/// Serializes as `{"name","ok","output"}` on success and `{"name","ok","error"}`
/// on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub name: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: true,
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok: false,
            output: None,
            error: Some(error.into()),
        }
    }
}

/// Durable record of one step execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub step: String,
    pub action: String,
    pub ok: bool,
    /// Unix seconds; stamped by the audit log when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl AuditEvent {
    pub fn for_step(step: &Step, result: &StepResult) -> Self {
        Self {
            step: step.name.clone(),
            action: step.action.clone(),
            ok: result.ok,
            ts: None,
        }
    }
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Ok,
    Failed,
}

impl RunStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, RunStatus::Ok)
    }
}

/// Reduced outcome of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub name: String,
    pub status: RunStatus,
    pub results: Vec<StepResult>,
}

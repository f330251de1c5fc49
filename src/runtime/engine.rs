/// Sequential workflow execution engine
///
/// Orders steps by priority (descending) then name (ascending), runs each one
/// through the action dispatch table with a retry budget, and records an audit
/// event per executed step when the `audit` flag is on.

use crate::config::WorkflowConfig;
use crate::error::AuditError;
use crate::runtime::executor::{ActionRunner, BuiltinActions};
use crate::workflow::{AuditEvent, AuditLog, FeatureFlag, FeatureFlagStore, Step, StepResult};
use std::time::Instant;

/// Runs one resolved workflow config
///
/// Owns its flag store and audit log for its whole lifetime, so a single run
/// needs no locking.
#[derive(Debug)]
pub struct WorkflowEngine {
    /// Resolved configuration, never mutated
    config: WorkflowConfig,
    /// Flag lookups for audit/metrics/parallel
    flags: FeatureFlagStore,
    /// Audit sink; only written when `audit` is enabled
    audit_log: AuditLog,
    /// Attempt budget for non-optional steps (at least 1)
    max_attempts: u32,
    /// Action dispatch
    runner: Box<dyn ActionRunner>,
}

impl WorkflowEngine {
    /// Build an engine over the built-in action table
    ///
    /// Fails only when the audit log target cannot be prepared.
    pub fn new(config: WorkflowConfig) -> Result<Self, AuditError> {
        Self::with_runner(config, Box::new(BuiltinActions))
    }

    pub(crate) fn with_runner(config: WorkflowConfig, runner: Box<dyn ActionRunner>) -> Result<Self, AuditError> {
        let flags = FeatureFlagStore::new(config.flags.clone());
        let audit_log = AuditLog::new(&config.storage.path)?;
        let max_attempts = config.max_attempts.max(1);

        Ok(Self {
            config,
            flags,
            audit_log,
            max_attempts,
            runner,
        })
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    /// Steps in the order `run` executes them
    ///
    /// Stable sort on (priority desc, name asc); duplicates keep file order.
    pub fn execution_order(&self) -> Vec<Step> {
        let mut steps: Vec<Step> = self.config.steps.iter().map(Step::from).collect();
        steps.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        steps
    }

    /// Execute the workflow and return one result per executed step
    ///
    /// Action failures never escape; they become failed results. A failed
    /// non-optional step stops the run. Only an audit write failure is returned
    /// as an error.
    pub fn run(&self) -> Result<Vec<StepResult>, AuditError> {
        let run_start = Instant::now();
        let steps = self.execution_order();
        let metrics = self.flags.flag(FeatureFlag::Metrics);

        tracing::info!("🚀 Starting workflow '{}' with {} steps", self.config.name, steps.len());
        tracing::debug!(
            "📋 Execution order: {:?}",
            steps.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );
        tracing::debug!(
            "⏱️ timeout_seconds={} (not enforced), max_attempts={}",
            self.config.timeout_seconds,
            self.max_attempts
        );
        if self.flags.flag(FeatureFlag::Parallel) {
            tracing::warn!("⚠️ 'parallel' flag is set but steps always run sequentially");
        }

        let mut results = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            tracing::info!(
                "📍 Step {}/{}: '{}' (action: {})",
                index + 1,
                steps.len(),
                step.name,
                step.action
            );

            let step_start = Instant::now();
            let (result, attempts) = self.run_step(step);

            if metrics {
                tracing::info!(
                    "📊 Step '{}' ok={} attempts={} elapsed={:?}",
                    step.name,
                    result.ok,
                    attempts,
                    step_start.elapsed()
                );
            }

            let halt = !result.ok && !step.optional;
            self.audit(step, &result)?;
            results.push(result);

            if halt {
                tracing::warn!(
                    "⏸️ Required step '{}' failed, skipping {} remaining steps",
                    step.name,
                    steps.len() - index - 1
                );
                break;
            }
        }

        if metrics {
            tracing::info!("📊 Workflow '{}' ran {} steps in {:?}", self.config.name, results.len(), run_start.elapsed());
        }
        tracing::info!("🏁 Workflow '{}' finished after {} steps", self.config.name, results.len());

        Ok(results)
    }

    /// Run a step through its attempt budget, stopping at the first success
    ///
    /// Retries are immediate. Returns the result and the number of attempts used.
    fn run_step(&self, step: &Step) -> (StepResult, u32) {
        let budget = step.attempt_budget(self.max_attempts);
        let mut last_error = None;

        for attempt in 1..=budget {
            match self.runner.run(&step.action, &step.input) {
                Ok(output) => {
                    tracing::info!("✅ Step '{}' succeeded on attempt {}", step.name, attempt);
                    return (StepResult::success(&step.name, output), attempt);
                }
                Err(err) => {
                    tracing::warn!("⚠️ Step '{}' attempt {}/{} failed: {}", step.name, attempt, budget, err);
                    last_error = Some(err);
                }
            }
        }

        let message = last_error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "step was never attempted".to_string());
        tracing::error!("❌ Step '{}' failed: {}", step.name, message);
        (StepResult::failure(&step.name, message), budget)
    }

    /// Persist an audit event; no-op unless `audit` is enabled
    fn audit(&self, step: &Step, result: &StepResult) -> Result<(), AuditError> {
        if !self.flags.flag(FeatureFlag::Audit) {
            return Ok(());
        }
        self.audit_log.write_event(&AuditEvent::for_step(step, result))
    }
}

/// Runtime Execution Engine
///
/// This module runs workflows step by step. It handles:
/// - Deterministic step ordering (priority, then name)
/// - Retry budgets and halt-on-required-failure
/// - Action dispatch through the fixed built-in table

// Sequential step execution with retry and audit
pub mod engine;

// Built-in action dispatch table
pub mod executor;

// Re-export main types
pub use engine::WorkflowEngine;
pub use executor::Action;

/// Error types for the DriftFlow runner
///
/// Per-step action failures (`ActionError`) are always captured into a step
/// result by the engine. Config and audit failures are fatal to a run and
/// surface through `DriftflowError`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure raised while resolving or executing a single action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Action name is not in the dispatch table
    #[error("Unknown action: {0}")]
    Unknown(String),

    /// Handler failed while running
    #[error("action '{action}' failed: {message}")]
    Execution { action: String, message: String },
}

impl ActionError {
    /// Stable machine-checkable code for consumers that avoid message matching
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::Unknown(_) => "unknown_action",
            ActionError::Execution { .. } => "action_failed",
        }
    }
}

/// Failure while reading or validating a workflow config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure while persisting an audit record
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to create audit directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open audit log '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write audit log '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize audit event: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Fatal error for a whole workflow run
#[derive(Debug, Error)]
pub enum DriftflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

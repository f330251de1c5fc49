/// Configuration loading for DriftFlow workflows
///
/// Reads a JSON workflow file, fills defaults for every absent field, then applies
/// environment-driven overrides. Each load builds its own default value, so two
/// loads never share state.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Default audit log destination
pub const DEFAULT_AUDIT_PATH: &str = "./driftflow.audit.json";

/// Environment variable overriding `timeout_seconds`
pub const TIMEOUT_ENV: &str = "WORKFLOW_TIMEOUT_SECONDS";

/// Environment variable listing flags to force off (comma-separated)
pub const DISABLED_FLAGS_ENV: &str = "DRIFTFLOW_FLAGS";

/// Fully-resolved workflow configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Workflow name reported in the summary
    pub name: String,
    /// Step records in file order
    pub steps: Vec<StepSource>,
    /// Raw flag values; only registered names are ever honored
    pub flags: BTreeMap<String, bool>,
    /// Audit log target
    pub storage: StorageConfig,
    /// Attempt budget for non-optional steps
    pub max_attempts: u32,
    /// Accepted for compatibility, not enforced by the engine
    pub timeout_seconds: i64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            name: "workflow".to_string(),
            steps: Vec::new(),
            flags: BTreeMap::new(),
            storage: StorageConfig::default(),
            max_attempts: 1,
            timeout_seconds: 10,
        }
    }
}

/// Audit storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend kind; only "json" (newline-delimited JSON file) exists
    #[serde(rename = "type")]
    pub kind: String,
    /// Audit log file path
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: "json".to_string(),
            path: DEFAULT_AUDIT_PATH.to_string(),
        }
    }
}

/// One step record as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSource {
    pub name: String,
    pub action: String,
    #[serde(deserialize_with = "input_as_string")]
    pub input: String,
    pub optional: bool,
    pub priority: i64,
}

impl Default for StepSource {
    fn default() -> Self {
        Self {
            name: "step".to_string(),
            action: "echo".to_string(),
            input: String::new(),
            optional: false,
            priority: 0,
        }
    }
}

impl StepSource {
    /// Convenience constructor used by callers building configs in code
    pub fn new(name: impl Into<String>, action: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }
}

/// Accept any JSON scalar for `input`; strings pass through, null becomes empty
fn input_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Overrides resolved from the process environment before the engine runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement for `timeout_seconds`
    pub timeout_seconds: Option<i64>,
    /// Flags forced to `false` regardless of the file value
    pub disabled_flags: Vec<String>,
}

impl ConfigOverrides {
    /// Read overrides from the real process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_seconds = lookup(TIMEOUT_ENV)
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match raw.trim().parse::<i64>() {
                Ok(seconds) => Some(seconds),
                Err(_) => {
                    tracing::warn!("⚠️ Ignoring non-numeric {}={:?}", TIMEOUT_ENV, raw);
                    None
                }
            });

        let mut disabled_flags: Vec<String> = lookup(DISABLED_FLAGS_ENV)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        disabled_flags.sort();
        disabled_flags.dedup();

        Self {
            timeout_seconds,
            disabled_flags,
        }
    }

    /// Apply these overrides to a parsed config
    pub fn apply(&self, config: &mut WorkflowConfig) {
        if let Some(seconds) = self.timeout_seconds {
            tracing::debug!("⏱️ timeout_seconds overridden: {} -> {}", config.timeout_seconds, seconds);
            config.timeout_seconds = seconds;
        }
        for flag in &self.disabled_flags {
            tracing::debug!("🚫 Flag '{}' disabled by environment", flag);
            config.flags.insert(flag.clone(), false);
        }
    }
}

impl WorkflowConfig {
    /// Parse a config from JSON text; `null` yields the defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let parsed: Option<WorkflowConfig> = serde_json::from_str(text)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts < 1 {
            return Err(ConfigError::Invalid(format!(
                "max_attempts must be at least 1, got {}",
                self.max_attempts
            )));
        }
        if self.storage.kind != "json" {
            return Err(ConfigError::Invalid(format!(
                "unsupported storage type '{}'",
                self.storage.kind
            )));
        }
        Ok(())
    }
}

/// Load a workflow config file and apply overrides
pub fn load_config(path: impl AsRef<Path>, overrides: &ConfigOverrides) -> Result<WorkflowConfig, ConfigError> {
    let path = path.as_ref();
    tracing::debug!("📄 Loading workflow config: {}", path.display());

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = WorkflowConfig::from_json(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    overrides.apply(&mut config);
    config.validate()?;

    tracing::info!("📋 Loaded workflow '{}' with {} steps", config.name, config.steps.len());
    Ok(config)
}

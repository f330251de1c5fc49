/// Feature flag store
///
/// Only names in the closed `FeatureFlag` set can ever be enabled, so a typo in a
/// config file reads as disabled rather than silently switching something on.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Registered flag names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    /// Persist one audit record per executed step
    Audit,
    /// Log per-step attempt counts and timings
    Metrics,
    /// Reserved; execution is always sequential
    Parallel,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 3] = [FeatureFlag::Audit, FeatureFlag::Metrics, FeatureFlag::Parallel];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureFlag::Audit => "audit",
            FeatureFlag::Metrics => "metrics",
            FeatureFlag::Parallel => "parallel",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureFlag {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FeatureFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == name)
            .ok_or(())
    }
}

/// Read-only view over configured flag values
#[derive(Debug, Clone, Default)]
pub struct FeatureFlagStore {
    flags: BTreeMap<String, bool>,
}

impl FeatureFlagStore {
    pub fn new(flags: BTreeMap<String, bool>) -> Self {
        for name in flags.keys() {
            if name.parse::<FeatureFlag>().is_err() {
                tracing::debug!("🏳️ Ignoring unregistered flag '{}'", name);
            }
        }
        Self { flags }
    }

    /// Unregistered names are always disabled; registered ones default to off
    pub fn is_enabled(&self, name: &str) -> bool {
        match name.parse::<FeatureFlag>() {
            Ok(flag) => self.flag(flag),
            Err(()) => false,
        }
    }

    pub fn flag(&self, flag: FeatureFlag) -> bool {
        self.flags.get(flag.as_str()).copied().unwrap_or(false)
    }
}

/// Action dispatch for workflow steps
///
/// The action set is closed: `echo`, `upper`, `lower`, `reverse`. Each is a pure
/// string transform. New actions are added by extending `Action`.

use crate::error::ActionError;
use std::fmt;
use std::str::FromStr;

/// Built-in string transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Identity
    Echo,
    /// Uppercase
    Upper,
    /// Lowercase
    Lower,
    /// Reverse the character sequence
    Reverse,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Echo, Action::Upper, Action::Lower, Action::Reverse];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Echo => "echo",
            Action::Upper => "upper",
            Action::Lower => "lower",
            Action::Reverse => "reverse",
        }
    }

    /// Look up an action by name
    pub fn parse(name: &str) -> Result<Self, ActionError> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == name)
            .ok_or_else(|| ActionError::Unknown(name.to_string()))
    }

    pub fn apply(self, input: &str) -> String {
        match self {
            Action::Echo => input.to_string(),
            Action::Upper => input.to_uppercase(),
            Action::Lower => input.to_lowercase(),
            Action::Reverse => input.chars().rev().collect(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Action::parse(name)
    }
}

/// Runs a named action against an input
///
/// Kept crate-private: outside callers always get the built-in table.
pub(crate) trait ActionRunner: fmt::Debug {
    fn run(&self, action: &str, input: &str) -> Result<String, ActionError>;
}

/// The fixed dispatch table
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BuiltinActions;

impl ActionRunner for BuiltinActions {
    fn run(&self, action: &str, input: &str) -> Result<String, ActionError> {
        let action = Action::parse(action)?;
        tracing::debug!("⚙️ Applying action '{}' to {} chars", action, input.chars().count());
        Ok(action.apply(input))
    }
}

//! Explicit outcomes for lab actions
//!
//! An ignored action changes nothing. The outcome says why, so callers and
//! tests can assert on the rejection path instead of inferring it from an
//! unchanged state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason an action was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The action is not valid in the current state
    PreconditionNotMet(String),
    /// The action referenced an id absent from the catalog
    UnknownTarget(String),
}

impl Rejection {
    /// Shorthand for a precondition failure.
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionNotMet(reason.into())
    }

    /// Shorthand for an unknown catalog id.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownTarget(id.into())
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreconditionNotMet(reason) => write!(f, "precondition not met: {reason}"),
            Self::UnknownTarget(id) => write!(f, "unknown target: {id}"),
        }
    }
}

/// What happened when an action was applied to the lab.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The state changed as requested
    Applied,
    /// Ignored: the action is not valid in the current state
    IgnoredPreconditionNotMet(String),
    /// Ignored: the referenced id does not exist
    IgnoredUnknownTarget(String),
}

impl ActionOutcome {
    /// Whether the action took effect.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Convert into a `Result` so protocol code can chain store calls with `?`.
    ///
    /// # Errors
    ///
    /// Returns the rejection for either ignored variant.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Self::Applied => Ok(()),
            Self::IgnoredPreconditionNotMet(reason) => Err(Rejection::PreconditionNotMet(reason)),
            Self::IgnoredUnknownTarget(id) => Err(Rejection::UnknownTarget(id)),
        }
    }
}

impl From<Rejection> for ActionOutcome {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::PreconditionNotMet(reason) => Self::IgnoredPreconditionNotMet(reason),
            Rejection::UnknownTarget(id) => Self::IgnoredUnknownTarget(id),
        }
    }
}

impl From<Result<(), Rejection>> for ActionOutcome {
    fn from(result: Result<(), Rejection>) -> Self {
        result.map_or_else(Self::from, |()| Self::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_result_roundtrip() {
        let ignored = ActionOutcome::from(Rejection::unknown("beaker-99"));
        assert_eq!(ignored, ActionOutcome::IgnoredUnknownTarget("beaker-99".into()));
        assert!(!ignored.is_applied());
        assert_eq!(
            ignored.into_result(),
            Err(Rejection::UnknownTarget("beaker-99".into()))
        );
        assert_eq!(ActionOutcome::from(Ok(())), ActionOutcome::Applied);
    }

    #[test]
    fn test_rejection_display() {
        let rejection = Rejection::precondition("burner is off");
        assert_eq!(rejection.to_string(), "precondition not met: burner is off");
    }
}

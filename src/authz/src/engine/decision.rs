//! Policy evaluation outcomes

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The first claim dimension a principal failed to satisfy
///
/// A discriminated value rather than an error path: callers branch on which
/// dimension failed to build user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyViolation {
    /// Department segment not satisfied
    #[error("not_in_departments")]
    NotInDepartments,

    /// Role segment not satisfied (after hierarchy expansion)
    #[error("not_in_roles")]
    NotInRoles,

    /// Scope segment not satisfied
    #[error("not_in_scopes")]
    NotInScopes,
}

impl PolicyViolation {
    /// Stable tag for the violated dimension
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NotInDepartments => "not_in_departments",
            Self::NotInRoles => "not_in_roles",
            Self::NotInScopes => "not_in_scopes",
        }
    }
}

/// Outcome of checking a policy against the current credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Access {
    /// Every segment matched
    Granted,

    /// No credential could be resolved
    Unauthenticated,

    /// A segment did not match
    Denied(PolicyViolation),
}

impl Access {
    /// Returns whether access was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns the violated dimension, if any
    pub fn reason(&self) -> Option<PolicyViolation> {
        match self {
            Self::Denied(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<Result<(), PolicyViolation>> for Access {
    fn from(outcome: Result<(), PolicyViolation>) -> Self {
        match outcome {
            Ok(()) => Self::Granted,
            Err(reason) => Self::Denied(reason),
        }
    }
}

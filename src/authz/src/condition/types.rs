//! Condition type and policy-string parsing
//!
//! Parsing is positional and lenient by default: missing segments become the
//! wildcard and segments past the third are ignored. Callers that need strict
//! three-segment policies use [`Condition::parse_strict`].

use std::fmt;

use crate::error::{AuthzError, Result};

/// Segment value that matches any claim set
pub const WILDCARD: &str = "*";

/// Number of segments in a well-formed condition
pub const SEGMENT_COUNT: usize = 3;

/// A policy string split into its department, role and scope segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Original policy string
    raw: String,
    /// Department segment
    departments: String,
    /// Role segment, before hierarchy expansion
    roles: String,
    /// Scope segment
    scopes: String,
}

impl Condition {
    /// Parses a policy string, defaulting absent segments to the wildcard
    ///
    /// Never fails: `"sales"` checks only department membership and
    /// `"a:b:c:d"` ignores `d`.
    pub fn parse(policy: &str) -> Self {
        let mut parts = policy.split(':');
        let mut next = || parts.next().unwrap_or(WILDCARD).to_string();

        let departments = next();
        let roles = next();
        let scopes = next();

        Self {
            raw: policy.to_string(),
            departments,
            roles,
            scopes,
        }
    }

    /// Parses a policy string that must have exactly three segments
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::InvalidCondition` when the segment count differs
    pub fn parse_strict(policy: &str) -> Result<Self> {
        let count = policy.split(':').count();
        if count != SEGMENT_COUNT {
            return Err(AuthzError::InvalidCondition(format!(
                "expected {} ':'-separated segments, found {} in '{}'",
                SEGMENT_COUNT, count, policy
            )));
        }

        Ok(Self::parse(policy))
    }

    /// The condition that matches every principal (`*:*:*`)
    pub fn any() -> Self {
        Self::parse("*:*:*")
    }

    /// Returns the three raw segments in evaluation order
    pub fn segments(&self) -> (&str, &str, &str) {
        (&self.departments, &self.roles, &self.scopes)
    }

    /// Returns the department segment
    pub fn departments(&self) -> &str {
        &self.departments
    }

    /// Returns the role segment
    pub fn roles(&self) -> &str {
        &self.roles
    }

    /// Returns the scope segment
    pub fn scopes(&self) -> &str {
        &self.scopes
    }

    /// Returns the original policy string
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::any()
    }
}

impl From<&str> for Condition {
    fn from(policy: &str) -> Self {
        Self::parse(policy)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

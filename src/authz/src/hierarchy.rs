//! Role hierarchy expansion
//!
//! A role hierarchy is an ordered list of role names. Inside a role segment,
//! `R+` and `R-` are shorthands for OR-groups built from positions in that
//! list:
//!
//! - `R+` becomes `R` followed by every role declared *before* `R`, nearest first
//! - `R-` becomes `R` followed by every role declared *after* `R`
//!
//! Whether `+` reads as "this tier or weaker" or "this tier or stronger" is a
//! property of how the catalog is ordered, not of the expansion.
//!
//! # Example
//!
//! ```rust
//! use claimgate_authz::hierarchy::RoleHierarchy;
//!
//! let hierarchy = RoleHierarchy::new(["member", "lead", "admin"]);
//!
//! assert_eq!(hierarchy.expand("lead+"), "lead|member");
//! assert_eq!(hierarchy.expand("lead-"), "lead|admin");
//! ```

use crate::condition::matcher::OR_DELIMITER;
use crate::types::Payload;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Suffix expanding a role towards the start of the hierarchy
pub const ASCENDING_SUFFIX: char = '+';

/// Suffix expanding a role towards the end of the hierarchy
pub const DESCENDING_SUFFIX: char = '-';

/// Ordered role catalog used for `+`/`-` expansion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleHierarchy {
    roles: Vec<String>,
}

impl RoleHierarchy {
    /// Create a hierarchy from role names in declared order
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the role catalog from a payload claim
    ///
    /// An object claim contributes its keys in document order, an array claim
    /// its string elements. Anything else yields an empty hierarchy.
    pub fn from_payload(payload: &Payload, claim: &str) -> Self {
        match payload.get(claim) {
            Some(Value::Object(catalog)) => Self::new(catalog.keys().cloned()),
            Some(Value::Array(items)) => Self::new(items.iter().filter_map(Value::as_str)),
            _ => Self::default(),
        }
    }

    /// Role names in declared order
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns whether no roles are declared
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Rewrites every `R+` and `R-` in a role segment into an OR-group
    ///
    /// All `+` substitutions run before any `-` substitution, and the `-`
    /// pass scans the output of the `+` pass. The `+` pass visits roles in
    /// reversed declared order and the `-` pass in declared order, which fixes
    /// the result when one role name is a suffix of another.
    pub fn expand(&self, segment: &str) -> String {
        if self.roles.is_empty()
            || !segment.contains([ASCENDING_SUFFIX, DESCENDING_SUFFIX])
        {
            return segment.to_string();
        }

        let separator = OR_DELIMITER.to_string();
        let reversed: Vec<&str> = self.roles.iter().rev().map(String::as_str).collect();
        let mut expanded = segment.to_string();

        for role in &reversed {
            if let Some(position) = reversed.iter().position(|r| r == role) {
                let pattern = format!("{}{}", role, ASCENDING_SUFFIX);
                expanded = expanded.replace(&pattern, &reversed[position..].join(separator.as_str()));
            }
        }

        for role in &self.roles {
            if let Some(position) = self.roles.iter().position(|r| r == role) {
                let pattern = format!("{}{}", role, DESCENDING_SUFFIX);
                expanded = expanded.replace(&pattern, &self.roles[position..].join(separator.as_str()));
            }
        }

        debug!("Expanded role segment '{}' to '{}'", segment, expanded);
        expanded
    }
}

impl<S: Into<String>> FromIterator<S> for RoleHierarchy {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

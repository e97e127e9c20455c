//! Policy evaluation
//!
//! Combines condition parsing, role hierarchy expansion and segment matching
//! into a single pass/fail-with-reason decision.

pub mod decision;

pub use decision::{Access, PolicyViolation};

use crate::condition::{matcher, Condition};
use crate::hierarchy::RoleHierarchy;
use crate::types::ClaimSet;

use tracing::debug;

/// Evaluates condition strings against a principal's claim sets
///
/// # Pipeline
///
/// ```text
/// policy → Condition::parse → RoleHierarchy::expand(roles)
///        → departments → roles → scopes → Ok / first violation
/// ```
///
/// Segments are checked in that fixed order and evaluation stops at the first
/// failing one, so the reported reason is always a single dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Create a new evaluator
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a policy string, parsed leniently
    pub fn evaluate(
        &self,
        policy: &str,
        claims: &ClaimSet,
        hierarchy: &RoleHierarchy,
    ) -> Result<(), PolicyViolation> {
        self.evaluate_condition(&Condition::parse(policy), claims, hierarchy)
    }

    /// Evaluate an already parsed condition
    pub fn evaluate_condition(
        &self,
        condition: &Condition,
        claims: &ClaimSet,
        hierarchy: &RoleHierarchy,
    ) -> Result<(), PolicyViolation> {
        let (departments, roles, scopes) = condition.segments();
        let roles = hierarchy.expand(roles);

        if !matcher::matches(&claims.departments, departments) {
            debug!("Condition '{}' failed on departments", condition);
            return Err(PolicyViolation::NotInDepartments);
        }

        if !matcher::matches(&claims.roles, &roles) {
            debug!("Condition '{}' failed on roles (expanded: '{}')", condition, roles);
            return Err(PolicyViolation::NotInRoles);
        }

        if !matcher::matches(&claims.scopes, scopes) {
            debug!("Condition '{}' failed on scopes", condition);
            return Err(PolicyViolation::NotInScopes);
        }

        debug!("Condition '{}' satisfied", condition);
        Ok(())
    }
}

//! Property-based tests for condition evaluation
//!
//! Universal properties of the segment grammar and the role expansion,
//! checked over generated claim sets and policies.

use claimgate_authz::condition::matcher;
use claimgate_authz::{ClaimSet, Condition, PolicyEvaluator, PolicyViolation, RoleHierarchy};
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use std::collections::HashSet;

fn token() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn claim_set() -> impl Strategy<Value = ClaimSet> {
    (
        hash_set(token(), 0..6),
        hash_set(token(), 0..6),
        hash_set(token(), 0..6),
    )
        .prop_map(|(departments, roles, scopes)| ClaimSet {
            auth_id: None,
            departments,
            roles,
            scopes,
        })
}

fn hierarchy() -> impl Strategy<Value = RoleHierarchy> {
    hash_set(token(), 0..6).prop_map(|roles| RoleHierarchy::new(roles))
}

proptest! {
    #[test]
    fn test_any_policy_always_passes(claims in claim_set(), hierarchy in hierarchy()) {
        let evaluator = PolicyEvaluator::new();
        prop_assert_eq!(evaluator.evaluate("*:*:*", &claims, &hierarchy), Ok(()));
    }

    #[test]
    fn test_single_department_is_exact_membership(
        departments in hash_set(token(), 1..6),
        candidate in token(),
    ) {
        let claims = ClaimSet { departments: departments.clone(), ..ClaimSet::default() };
        let policy = format!("{}:*:*", candidate);
        let outcome = PolicyEvaluator::new().evaluate(&policy, &claims, &RoleHierarchy::default());

        if departments.contains(&candidate) {
            prop_assert_eq!(outcome, Ok(()));
        } else {
            prop_assert_eq!(outcome, Err(PolicyViolation::NotInDepartments));
        }
    }

    #[test]
    fn test_prefix_of_member_does_not_match(member in "[a-z]{2,8}") {
        let claims: HashSet<String> = [member.clone()].into_iter().collect();
        let prefix = &member[..member.len() - 1];

        prop_assert!(!matcher::matches(&claims, prefix));
        prop_assert!(matcher::matches(&claims, &member));
    }

    #[test]
    fn test_and_list_requires_every_token(
        claims in hash_set(token(), 0..6),
        tokens in vec(token(), 2..5),
    ) {
        let segment = tokens.join("&");
        let expected = tokens.iter().all(|t| claims.contains(t));
        prop_assert_eq!(matcher::matches(&claims, &segment), expected);
    }

    #[test]
    fn test_or_list_requires_any_token(
        claims in hash_set(token(), 0..6),
        tokens in vec(token(), 2..5),
    ) {
        let segment = tokens.join("|");
        let expected = tokens.iter().any(|t| claims.contains(t));
        prop_assert_eq!(matcher::matches(&claims, &segment), expected);
    }

    #[test]
    fn test_department_failure_masks_other_dimensions(
        claims in claim_set(),
        missing in "[0-9]{1,4}",
    ) {
        // Digits never appear in generated claims, so every segment fails
        let policy = format!("{0}:{0}:{0}", missing);
        prop_assert_eq!(
            PolicyEvaluator::new().evaluate(&policy, &claims, &RoleHierarchy::default()),
            Err(PolicyViolation::NotInDepartments)
        );
    }

    #[test]
    fn test_missing_segments_default_to_wildcard(head in token()) {
        let condition = Condition::parse(&head);
        prop_assert_eq!(condition.segments(), (head.as_str(), "*", "*"));
    }

    #[test]
    fn test_expansion_yields_declared_roles(roles in vec(token(), 1..6), pick in any::<prop::sample::Index>()) {
        // Deduplicate while keeping declared order
        let mut seen = HashSet::new();
        let roles: Vec<String> = roles.into_iter().filter(|r| seen.insert(r.clone())).collect();
        let hierarchy = RoleHierarchy::new(roles.clone());
        let role = &roles[pick.index(roles.len())];

        // Every member of the group is a declared role, the picked one included
        for suffix in ['+', '-'] {
            let expanded = hierarchy.expand(&format!("{}{}", role, suffix));
            let group: Vec<&str> = expanded.split('|').collect();
            let declared: HashSet<&str> = roles.iter().map(String::as_str).collect();

            prop_assert!(group.iter().all(|g| declared.contains(g)));
            prop_assert!(group.contains(&role.as_str()));
        }
    }
}

#[test]
fn test_documented_expansion_examples() {
    let hierarchy = RoleHierarchy::new(["member", "lead", "admin"]);
    let members: HashSet<String> = ["member".to_string()].into_iter().collect();

    let plus = hierarchy.expand("lead+");
    let minus = hierarchy.expand("lead-");

    assert_eq!(plus, "lead|member");
    assert_eq!(minus, "lead|admin");
    assert!(matcher::matches(&members, &plus));
    assert!(!matcher::matches(&members, &minus));
}

//! Set-membership matching for condition segments
//!
//! A segment is one of:
//! - wildcard: empty or `*`, always matches
//! - exact: a single token, matches iff the whole token is in the set
//! - AND list: `a&b&c`, matches iff every token is in the set
//! - OR list: `a|b|c`, matches iff any token is in the set
//!
//! Mixed delimiters are resolved by comparing split counts: more `&`-parts
//! than `|`-parts selects AND, fewer selects OR, equal counts (no delimiter)
//! select exact matching of the whole segment.

use std::collections::HashSet;
use std::hash::BuildHasher;

use super::types::WILDCARD;

/// Token separator for AND lists
pub const AND_DELIMITER: char = '&';

/// Token separator for OR lists
pub const OR_DELIMITER: char = '|';

/// Matching mode inferred from a segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentShape<'a> {
    /// Matches every claim set
    Wildcard,
    /// Whole segment must be a member
    Exact(&'a str),
    /// Every token must be a member
    All(Vec<&'a str>),
    /// At least one token must be a member
    Any(Vec<&'a str>),
}

impl<'a> SegmentShape<'a> {
    /// Classifies a segment by the split-count rule
    pub fn classify(segment: &'a str) -> Self {
        if segment.is_empty() || segment == WILDCARD {
            return Self::Wildcard;
        }

        let and_tokens: Vec<&str> = segment.split(AND_DELIMITER).collect();
        let or_tokens: Vec<&str> = segment.split(OR_DELIMITER).collect();

        if and_tokens.len() == or_tokens.len() {
            Self::Exact(segment)
        } else if and_tokens.len() > or_tokens.len() {
            Self::All(and_tokens)
        } else {
            Self::Any(or_tokens)
        }
    }

    /// Checks this shape against a claim set
    pub fn matches<S: BuildHasher>(&self, claims: &HashSet<String, S>) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Exact(token) => claims.contains(*token),
            Self::All(tokens) => tokens.iter().all(|token| claims.contains(*token)),
            Self::Any(tokens) => tokens.iter().any(|token| claims.contains(*token)),
        }
    }
}

/// Checks whether a claim set satisfies a segment
///
/// Never fails: every string resolves to a boolean.
pub fn matches<S: BuildHasher>(claims: &HashSet<String, S>, segment: &str) -> bool {
    SegmentShape::classify(segment).matches(claims)
}

//! Condition strings and segment matching
//!
//! A condition is a compact policy string of three `:`-separated segments:
//! `<departments>:<roles>:<scopes>`. Each segment is matched against one of
//! the principal's claim sets.
//!
//! # Examples
//!
//! ```
//! use claimgate_authz::condition::{matcher, Condition};
//! use std::collections::HashSet;
//!
//! let condition = Condition::parse("sales|support:*:read");
//! let departments: HashSet<String> = ["sales".to_string()].into_iter().collect();
//!
//! assert!(matcher::matches(&departments, condition.departments()));
//! assert_eq!(condition.roles(), "*");
//! ```

mod types;
pub mod matcher;


pub use types::{Condition, SEGMENT_COUNT, WILDCARD};
pub use matcher::{matches, SegmentShape};

//! # Claimgate Authorization Core
//!
//! Condition evaluation over bearer-credential claims, with request-scoped
//! credential and principal resolution.
//!
//! ## Features
//!
//! - **Condition strings** `<departments>:<roles>:<scopes>` with exact, AND (`&`),
//!   OR (`|`) and wildcard (`*`) segments
//! - **Role hierarchy expansion** of `role+` / `role-` into OR-groups
//! - **First-failure reasons** (`not_in_departments`, `not_in_roles`, `not_in_scopes`)
//! - **Memoized resolution** of the credential payload and principal record
//! - **Logout** that invalidates the token and drops every memoized value
//!
//! ## Example
//!
//! ```rust
//! use claimgate_authz::{ClaimSet, PolicyEvaluator, PolicyViolation, RoleHierarchy};
//!
//! let claims = ClaimSet::default()
//!     .with_departments(["sales"])
//!     .with_roles(["member"])
//!     .with_scopes(["read"]);
//! let hierarchy = RoleHierarchy::new(["member", "lead", "admin"]);
//! let evaluator = PolicyEvaluator::new();
//!
//! assert!(evaluator.evaluate("sales:lead+:read|write", &claims, &hierarchy).is_ok());
//! assert_eq!(
//!     evaluator.evaluate("sales:lead-:*", &claims, &hierarchy),
//!     Err(PolicyViolation::NotInRoles)
//! );
//! ```

pub mod types;
pub mod config;
pub mod condition;
pub mod hierarchy;
pub mod engine;
pub mod credential;
pub mod principal;
pub mod session;
pub mod context;
pub mod error;

// Re-export commonly used types
pub use types::{ClaimSet, Payload, Principal};
pub use config::{AuthConfig, ClaimFields};
pub use condition::Condition;
pub use hierarchy::RoleHierarchy;
pub use engine::{Access, PolicyEvaluator, PolicyViolation};
pub use credential::{CredentialResolver, DecodeError, PayloadDecoder, TokenLocator};
pub use principal::{PrincipalResolver, PrincipalStore};
pub use session::{SessionController, SessionSink, TokenInvalidator};
pub use context::{AuthContext, Collaborators};
pub use error::{AuthzError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

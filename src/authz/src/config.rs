//! Claim and principal-store field configuration
//!
//! Which payload claims carry identity, claim sets and the role catalog is
//! decided by the deployment, not by this crate. Every name has a default so
//! an empty configuration works against the conventional payload layout:
//!
//! ```json
//! {
//!   "authId": "u-42",
//!   "user": { "departments": ["sales"], "roles": ["lead"], "scopes": ["read"] },
//!   "roles": { "member": {}, "lead": {}, "admin": {} }
//! }
//! ```

use crate::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`AuthConfig::store_key`]
pub const ENV_STORE_KEY: &str = "NAUTH_KEY";
/// Environment variable overriding [`AuthConfig::principal_model`]
pub const ENV_PRINCIPAL_MODEL: &str = "NAUTH_USER_MODEL";
/// Environment variable overriding [`AuthConfig::identity_claim`]
pub const ENV_IDENTITY_CLAIM: &str = "NAUTH_IDENTITY_CLAIM";
/// Environment variable overriding [`AuthConfig::default_guard`]
pub const ENV_GUARD: &str = "NAUTH_GUARD";

/// Names of the claims holding the principal's claim sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimFields {
    /// Payload object carrying the three claim sets
    pub user_claim: String,

    /// Array of department names inside `user_claim`
    pub departments: String,

    /// Array of role names inside `user_claim`
    pub roles: String,

    /// Array of scope names inside `user_claim`
    pub scopes: String,

    /// Top-level claim carrying the ordered role catalog
    pub hierarchy_claim: String,
}

impl Default for ClaimFields {
    fn default() -> Self {
        Self {
            user_claim: "user".to_string(),
            departments: "departments".to_string(),
            roles: "roles".to_string(),
            scopes: "scopes".to_string(),
            hierarchy_claim: "roles".to_string(),
        }
    }
}

/// Authorization core configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Payload claim holding the principal lookup key
    pub identity_claim: String,

    /// Principal-store field matched against the identity claim
    pub store_key: String,

    /// Principal model selector handed to the store
    pub principal_model: String,

    /// Claim set field names
    pub claims: ClaimFields,

    /// Guard used until `set_guard` is called
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_guard: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_claim: "authId".to_string(),
            store_key: "auth_id".to_string(),
            principal_model: "User".to_string(),
            claims: ClaimFields::default(),
            default_guard: None,
        }
    }
}

impl AuthConfig {
    /// Build a configuration from `NAUTH_*` environment variables, falling
    /// back to the defaults for anything unset or empty
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse a JSON configuration document; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations with empty field names
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("identity_claim", &self.identity_claim),
            ("store_key", &self.store_key),
            ("principal_model", &self.principal_model),
            ("claims.user_claim", &self.claims.user_claim),
            ("claims.hierarchy_claim", &self.claims.hierarchy_claim),
        ];

        for (name, value) in required {
            if value.is_empty() {
                return Err(AuthzError::ConfigError(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();

        Self {
            identity_claim: read(ENV_IDENTITY_CLAIM).unwrap_or(defaults.identity_claim),
            store_key: read(ENV_STORE_KEY).unwrap_or(defaults.store_key),
            principal_model: read(ENV_PRINCIPAL_MODEL).unwrap_or(defaults.principal_model),
            claims: defaults.claims,
            default_guard: read(ENV_GUARD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.identity_claim, "authId");
        assert_eq!(config.store_key, "auth_id");
        assert_eq!(config.principal_model, "User");
        assert_eq!(config.claims.user_claim, "user");
        assert_eq!(config.claims.hierarchy_claim, "roles");
        assert!(config.default_guard.is_none());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_STORE_KEY, "external_id"),
            (ENV_PRINCIPAL_MODEL, "Account"),
            (ENV_IDENTITY_CLAIM, ""),
            (ENV_GUARD, "admin_"),
        ]
        .into_iter()
        .collect();

        let config = AuthConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_key, "external_id");
        assert_eq!(config.principal_model, "Account");
        // Empty values fall back to the default
        assert_eq!(config.identity_claim, "authId");
        assert_eq!(config.default_guard.as_deref(), Some("admin_"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = AuthConfig::from_json(r#"{"store_key": "uid", "claims": {"scopes": "perms"}}"#)
            .unwrap();

        assert_eq!(config.store_key, "uid");
        assert_eq!(config.identity_claim, "authId");
        assert_eq!(config.claims.scopes, "perms");
        assert_eq!(config.claims.roles, "roles");
    }

    #[test]
    fn test_from_json_rejects_empty_names() {
        let result = AuthConfig::from_json(r#"{"identity_claim": ""}"#);
        assert!(matches!(result, Err(AuthzError::ConfigError(_))));

        let result = AuthConfig::from_json("not json");
        assert!(matches!(result, Err(AuthzError::Serialization(_))));
    }
}

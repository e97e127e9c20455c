//! Error types for the authorization core

use thiserror::Error;

/// Authorization core errors
///
/// Unauthenticated requests and policy violations are not errors: the former
/// resolve to an absent payload, the latter to a [`crate::PolicyViolation`].
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A structurally valid credential has no matching principal record
    #[error("Principal not found: {model} where {field} = '{value}'")]
    PrincipalNotFound {
        model: String,
        field: String,
        value: String,
    },

    /// Condition string rejected by strict parsing
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// Principal store failure, reported by `PrincipalStore` implementations
    #[error("Principal store error: {0}")]
    StoreError(String),

    /// Token invalidation failure on logout
    #[error("Token invalidation failed: {0}")]
    InvalidationError(String),

    /// Session sink failure, reported by `SessionSink` implementations
    #[error("Session error: {0}")]
    SessionError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;

//! Credential resolution
//!
//! Locates a bearer token across guard-scoped candidate keys, delegates
//! decoding to a [`PayloadDecoder`] and memoizes the decoded [`Payload`] for
//! the lifetime of the resolver. A resolver serves exactly one request or
//! session; it is never shared between concurrent callers.
//!
//! # Example
//!
//! ```rust
//! use claimgate_authz::credential::{CredentialResolver, RequestTokenLocator, StaticPayloadDecoder};
//! use claimgate_authz::Payload;
//! use axum::http::HeaderMap;
//! use std::sync::Arc;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("authorization", "Bearer t-1".parse().unwrap());
//!
//! let decoder = StaticPayloadDecoder::new().with_token("t-1", Payload::default());
//! let mut credentials = CredentialResolver::new(
//!     Arc::new(RequestTokenLocator::new(headers)),
//!     Arc::new(decoder),
//! );
//!
//! assert!(credentials.resolve().is_some());
//! ```

mod decoder;
mod locator;

pub use decoder::{DecodeError, StaticPayloadDecoder};
pub use locator::RequestTokenLocator;

use crate::types::Payload;
use std::sync::Arc;
use tracing::debug;

/// Token key names tried in order, each prefixed with the guard
pub const TOKEN_KEYS: [&str; 3] = ["authorization", "token", "access_token"];

/// Finds a raw bearer token in the current request
pub trait TokenLocator: Send + Sync {
    /// Returns the first present token among the candidate keys, in order
    fn find(&self, candidates: &[String]) -> Option<String>;
}

/// Decodes a raw token into its claims
///
/// Signature verification, expiry and revocation checks are the decoder's
/// concern; any failure is reported as a [`DecodeError`].
pub trait PayloadDecoder: Send + Sync {
    /// Decode a raw token
    fn decode(&self, token: &str) -> Result<Payload, DecodeError>;
}

/// Request-scoped, memoizing credential resolver
pub struct CredentialResolver {
    /// Token source for the current request
    locator: Arc<dyn TokenLocator>,

    /// Token decoder
    decoder: Arc<dyn PayloadDecoder>,

    /// Guard prefix for candidate key names (may be empty)
    guard: String,

    /// Memoized payload
    payload: Option<Arc<Payload>>,
}

impl CredentialResolver {
    /// Create a resolver with an empty guard
    pub fn new(locator: Arc<dyn TokenLocator>, decoder: Arc<dyn PayloadDecoder>) -> Self {
        Self {
            locator,
            decoder,
            guard: String::new(),
            payload: None,
        }
    }

    /// Builder-style guard setter
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }

    /// Set the guard; `None` resets it to empty
    ///
    /// Changing the guard does not drop a memoized payload.
    pub fn set_guard(&mut self, guard: Option<&str>) {
        self.guard = guard.unwrap_or_default().to_string();
    }

    /// Current guard prefix
    pub fn guard(&self) -> &str {
        &self.guard
    }

    /// Candidate key names for the current guard, in lookup order
    pub fn candidate_keys(&self) -> Vec<String> {
        TOKEN_KEYS
            .iter()
            .map(|key| format!("{}{}", self.guard, key))
            .collect()
    }

    /// Inject a payload directly, bypassing token lookup and decoding
    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = Some(Arc::new(payload));
    }

    /// Memoized payload, without attempting resolution
    pub fn cached(&self) -> Option<Arc<Payload>> {
        self.payload.clone()
    }

    /// Resolve the current credential
    ///
    /// Returns the memoized payload when present. Otherwise looks up a token
    /// and decodes it; a missing token and a decode failure both yield `None`
    /// so callers cannot tell an unauthenticated request from a malformed
    /// token. A successful decode is memoized until [`Self::clear`].
    pub fn resolve(&mut self) -> Option<Arc<Payload>> {
        if let Some(payload) = &self.payload {
            return Some(Arc::clone(payload));
        }

        let token = self.raw_token()?;

        match self.decoder.decode(&token) {
            Ok(payload) => {
                let payload = Arc::new(payload);
                self.payload = Some(Arc::clone(&payload));
                debug!("Credential resolved (guard='{}')", self.guard);
                Some(payload)
            }
            Err(e) => {
                debug!("Credential decode failed (guard='{}'): {}", self.guard, e);
                None
            }
        }
    }

    /// Look up the raw token without decoding or memoizing
    pub fn raw_token(&self) -> Option<String> {
        let token = self.locator.find(&self.candidate_keys());
        if token.is_none() {
            debug!("No bearer token found (guard='{}')", self.guard);
        }
        token
    }

    /// Drop the memoized payload
    pub fn clear(&mut self) {
        self.payload = None;
    }
}

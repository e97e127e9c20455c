//! Payload decoding errors and a table-backed decoder

use super::PayloadDecoder;
use crate::session::InMemoryTokenBlacklist;
use crate::types::Payload;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Token decoding failures
///
/// Never surfaced past [`super::CredentialResolver`]: every variant is
/// treated as "no credential".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Token is not structurally valid
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Token signature did not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token is past its expiry
    #[error("Token expired")]
    Expired,

    /// Token was invalidated
    #[error("Token revoked")]
    Revoked,
}

/// Decoder backed by a fixed token → payload table
///
/// Useful for embedding and tests. When given a blacklist, tokens
/// invalidated through it stop decoding.
#[derive(Default)]
pub struct StaticPayloadDecoder {
    payloads: HashMap<String, Payload>,
    revocations: Option<Arc<InMemoryTokenBlacklist>>,
}

impl StaticPayloadDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token and the payload it decodes to
    pub fn with_token(mut self, token: impl Into<String>, payload: Payload) -> Self {
        self.payloads.insert(token.into(), payload);
        self
    }

    /// Reject tokens present in the given blacklist
    pub fn with_revocations(mut self, blacklist: Arc<InMemoryTokenBlacklist>) -> Self {
        self.revocations = Some(blacklist);
        self
    }
}

impl PayloadDecoder for StaticPayloadDecoder {
    fn decode(&self, token: &str) -> Result<Payload, DecodeError> {
        if let Some(blacklist) = &self.revocations {
            if blacklist.contains(token) {
                return Err(DecodeError::Revoked);
            }
        }

        self.payloads
            .get(token)
            .cloned()
            .ok_or_else(|| DecodeError::Malformed("unknown token".to_string()))
    }
}

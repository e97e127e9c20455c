//! In-memory token blacklist and session sink

use super::{SessionSink, TokenInvalidator};
use crate::error::Result;
use crate::types::Principal;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;

/// Token invalidator keeping revoked tokens in memory
///
/// Invalidating an already revoked token succeeds.
#[derive(Debug, Default)]
pub struct InMemoryTokenBlacklist {
    revoked: RwLock<HashSet<String>>,
}

impl InMemoryTokenBlacklist {
    /// Create an empty blacklist
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the token has been invalidated
    pub fn contains(&self, token: &str) -> bool {
        self.revoked.read().contains(token)
    }

    /// Number of invalidated tokens
    pub fn len(&self) -> usize {
        self.revoked.read().len()
    }

    /// Returns whether no token has been invalidated
    pub fn is_empty(&self) -> bool {
        self.revoked.read().is_empty()
    }
}

#[async_trait]
impl TokenInvalidator for InMemoryTokenBlacklist {
    async fn invalidate(&self, token: &str) -> Result<()> {
        self.revoked.write().insert(token.to_string());
        Ok(())
    }
}

/// Session events seen by [`RecordingSessionSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A principal was logged in
    Login(Principal),
    /// The session was torn down
    Logout,
}

/// Session sink that records every event
#[derive(Debug, Default)]
pub struct RecordingSessionSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSessionSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl SessionSink for RecordingSessionSink {
    async fn login(&self, principal: &Principal) -> Result<()> {
        self.events.lock().push(SessionEvent::Login(principal.clone()));
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.events.lock().push(SessionEvent::Logout);
        Ok(())
    }
}

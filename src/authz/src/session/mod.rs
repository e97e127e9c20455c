//! Session lifecycle
//!
//! Login hands the resolved principal to a [`SessionSink`]. Logout
//! re-derives the raw token, invalidates it through a [`TokenInvalidator`],
//! drops every memoized credential and principal, and tears the session down,
//! so nothing resolved before logout is reused after it.

mod memory;

pub use memory::{InMemoryTokenBlacklist, RecordingSessionSink, SessionEvent};

use crate::credential::CredentialResolver;
use crate::error::Result;
use crate::principal::PrincipalResolver;
use crate::types::Principal;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Invalidates bearer tokens (e.g., by blacklisting them)
#[async_trait]
pub trait TokenInvalidator: Send + Sync {
    /// Invalidate a raw token
    async fn invalidate(&self, token: &str) -> Result<()>;
}

/// Login/logout sink of the hosting session layer
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Bind the principal to the session
    async fn login(&self, principal: &Principal) -> Result<()>;

    /// Tear the session down
    async fn logout(&self) -> Result<()>;
}

/// Drives login and logout over a request's resolvers
pub struct SessionController {
    /// Token invalidation backend
    invalidator: Arc<dyn TokenInvalidator>,

    /// Session layer
    sink: Arc<dyn SessionSink>,
}

impl SessionController {
    /// Create a new controller
    pub fn new(invalidator: Arc<dyn TokenInvalidator>, sink: Arc<dyn SessionSink>) -> Self {
        Self { invalidator, sink }
    }

    /// Log the current principal into the session
    ///
    /// A request without a credential is a no-op and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates principal resolution failures (including
    /// `PrincipalNotFound`) and session sink failures.
    pub async fn login(
        &self,
        credentials: &mut CredentialResolver,
        principals: &mut PrincipalResolver,
    ) -> Result<Option<Arc<Principal>>> {
        let Some(principal) = principals.resolve(credentials, &[]).await? else {
            return Ok(None);
        };

        self.sink.login(&principal).await?;
        info!("Principal logged in ({})", principal.model);

        Ok(Some(principal))
    }

    /// Log out: invalidate the token, clear memoized state, tear down
    ///
    /// The token is looked up again even if no payload was ever resolved; no
    /// token means nothing to invalidate. State is cleared and the session
    /// torn down even when invalidation fails.
    ///
    /// # Errors
    ///
    /// Returns the invalidation failure, if any, otherwise the teardown
    /// failure.
    pub async fn logout(
        &self,
        credentials: &mut CredentialResolver,
        principals: &mut PrincipalResolver,
    ) -> Result<()> {
        let invalidation = match credentials.raw_token() {
            Some(token) => self.invalidator.invalidate(&token).await,
            None => Ok(()),
        };

        if let Err(e) = &invalidation {
            warn!("Token invalidation failed during logout: {}", e);
        }

        credentials.clear();
        principals.clear();

        let teardown = self.sink.logout().await;
        info!("Session logged out (guard='{}')", credentials.guard());

        invalidation.and(teardown)
    }
}

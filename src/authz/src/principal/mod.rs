//! Principal resolution
//!
//! Turns the identity claim of a resolved credential into a full principal
//! record through a [`PrincipalStore`], memoized for the resolver's lifetime.
//! Unlike credential resolution, a credential whose identity has no record
//! is a loud failure: it points at data inconsistency, not at an anonymous
//! caller.

mod store;


pub use store::InMemoryPrincipalStore;

use crate::config::AuthConfig;
use crate::credential::CredentialResolver;
use crate::error::{AuthzError, Result};
use crate::types::Principal;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Principal record storage
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Find the record of `model` whose `field` equals `value`, eager-loading
    /// the named relations
    async fn find_by_field(
        &self,
        model: &str,
        field: &str,
        value: &str,
        with: &[&str],
    ) -> Result<Option<Principal>>;
}

/// Request-scoped, memoizing principal resolver
pub struct PrincipalResolver {
    /// Principal record storage
    store: Arc<dyn PrincipalStore>,

    /// Model selector handed to the store
    model: String,

    /// Store field matched against the identity claim
    key_field: String,

    /// Payload claim holding the identity
    identity_claim: String,

    /// Memoized principal
    principal: Option<Arc<Principal>>,
}

impl PrincipalResolver {
    /// Create a resolver using the configured field names
    pub fn new(store: Arc<dyn PrincipalStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            model: config.principal_model.clone(),
            key_field: config.store_key.clone(),
            identity_claim: config.identity_claim.clone(),
            principal: None,
        }
    }

    /// Memoized principal, without attempting resolution
    pub fn cached(&self) -> Option<Arc<Principal>> {
        self.principal.clone()
    }

    /// Resolve the principal behind the current credential
    ///
    /// Returns `Ok(None)` when no credential resolves. A memoized principal
    /// is returned as-is, whatever relations were asked for.
    ///
    /// # Errors
    ///
    /// - `AuthzError::PrincipalNotFound` if the identity claim is missing or
    ///   the store has no matching record
    /// - any error reported by the store
    pub async fn resolve(
        &mut self,
        credentials: &mut CredentialResolver,
        with: &[&str],
    ) -> Result<Option<Arc<Principal>>> {
        if let Some(principal) = &self.principal {
            return Ok(Some(Arc::clone(principal)));
        }

        let Some(payload) = credentials.resolve() else {
            return Ok(None);
        };

        let Some(auth_id) = payload.get_key(&self.identity_claim) else {
            warn!("Credential carries no '{}' claim", self.identity_claim);
            return Err(self.not_found(String::new()));
        };

        debug!(
            "Looking up {} where {} = '{}' (with {:?})",
            self.model, self.key_field, auth_id, with
        );

        let principal = self
            .store
            .find_by_field(&self.model, &self.key_field, &auth_id, with)
            .await?
            .ok_or_else(|| self.not_found(auth_id))?;

        let principal = Arc::new(principal);
        self.principal = Some(Arc::clone(&principal));
        Ok(Some(principal))
    }

    /// Drop the memoized principal
    pub fn clear(&mut self) {
        self.principal = None;
    }

    fn not_found(&self, value: String) -> AuthzError {
        AuthzError::PrincipalNotFound {
            model: self.model.clone(),
            field: self.key_field.clone(),
            value,
        }
    }
}

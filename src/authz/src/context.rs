//! Request-scoped authorization facade
//!
//! [`AuthContext`] bundles one request's credential and principal resolvers
//! with the session controller and the policy evaluator. Build one per
//! request or session and drop it afterwards; it is never shared between
//! concurrent callers.

use crate::condition::Condition;
use crate::config::AuthConfig;
use crate::credential::{CredentialResolver, PayloadDecoder, TokenLocator};
use crate::engine::{Access, PolicyEvaluator};
use crate::error::Result;
use crate::hierarchy::RoleHierarchy;
use crate::principal::{PrincipalResolver, PrincipalStore};
use crate::session::{SessionController, SessionSink, TokenInvalidator};
use crate::types::{ClaimSet, Payload, Principal};
use std::sync::Arc;
use tracing::debug;

/// External capabilities an [`AuthContext`] is built from
#[derive(Clone)]
pub struct Collaborators {
    /// Raw token source for the current request
    pub locator: Arc<dyn TokenLocator>,

    /// Token decoder
    pub decoder: Arc<dyn PayloadDecoder>,

    /// Principal record storage
    pub store: Arc<dyn PrincipalStore>,

    /// Token invalidation backend
    pub invalidator: Arc<dyn TokenInvalidator>,

    /// Session layer
    pub sink: Arc<dyn SessionSink>,
}

/// Authorization state and operations for a single request
pub struct AuthContext {
    config: AuthConfig,
    credentials: CredentialResolver,
    principals: PrincipalResolver,
    session: SessionController,
    evaluator: PolicyEvaluator,
}

impl AuthContext {
    /// Create a context; the guard starts as `config.default_guard`
    pub fn new(config: AuthConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            locator,
            decoder,
            store,
            invalidator,
            sink,
        } = collaborators;

        let mut credentials = CredentialResolver::new(locator, decoder);
        credentials.set_guard(config.default_guard.as_deref());

        Self {
            principals: PrincipalResolver::new(store, &config),
            session: SessionController::new(invalidator, sink),
            evaluator: PolicyEvaluator::new(),
            credentials,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Set the guard prefix used for token lookup; `None` restores
    /// `config.default_guard`
    pub fn set_guard(&mut self, guard: Option<&str>) {
        let guard = guard.or(self.config.default_guard.as_deref());
        self.credentials.set_guard(guard);
    }

    /// Current guard prefix
    pub fn guard(&self) -> &str {
        self.credentials.guard()
    }

    /// Inject a decoded payload, bypassing token lookup
    pub fn set_auth(&mut self, payload: Payload) {
        self.credentials.set_payload(payload);
    }

    /// Resolve the current credential payload
    pub fn auth(&mut self) -> Option<Arc<Payload>> {
        self.credentials.resolve()
    }

    /// Claim sets carried by the current credential
    pub fn claims(&mut self) -> Option<ClaimSet> {
        let payload = self.auth()?;
        Some(ClaimSet::from_payload(
            &payload,
            &self.config.identity_claim,
            &self.config.claims,
        ))
    }

    /// Resolve the principal behind the current credential
    ///
    /// # Errors
    ///
    /// `AuthzError::PrincipalNotFound` when the credential's identity has no
    /// record; store failures are propagated.
    pub async fn user(&mut self, with: &[&str]) -> Result<Option<Arc<Principal>>> {
        self.principals.resolve(&mut self.credentials, with).await
    }

    /// Check a policy string against the current credential
    ///
    /// Sets the guard first, falling back to the configured default when
    /// `guard` is `None`; it stays set for later calls.
    pub fn user_has(&mut self, policy: &str, guard: Option<&str>) -> Access {
        self.user_has_condition(&Condition::parse(policy), guard)
    }

    /// Check a pre-parsed condition against the current credential
    pub fn user_has_condition(&mut self, condition: &Condition, guard: Option<&str>) -> Access {
        self.set_guard(guard);

        let Some(payload) = self.auth() else {
            debug!("Condition '{}' checked without credential", condition);
            return Access::Unauthenticated;
        };

        let claims = ClaimSet::from_payload(
            &payload,
            &self.config.identity_claim,
            &self.config.claims,
        );
        let hierarchy = RoleHierarchy::from_payload(&payload, &self.config.claims.hierarchy_claim);

        self.evaluator
            .evaluate_condition(condition, &claims, &hierarchy)
            .into()
    }

    /// Log the current principal into the session; no-op without credential
    pub async fn login(&mut self) -> Result<()> {
        self.session
            .login(&mut self.credentials, &mut self.principals)
            .await
            .map(|_| ())
    }

    /// Invalidate the current token and clear all memoized state
    pub async fn logout(&mut self) -> Result<()> {
        self.session
            .logout(&mut self.credentials, &mut self.principals)
            .await
    }

    /// Raw token of the current request, without decoding it
    pub fn get_token(&self) -> Option<String> {
        self.credentials.raw_token()
    }
}

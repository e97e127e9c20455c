//! In-memory principal store

use super::PrincipalStore;
use crate::error::Result;
use crate::types::Principal;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory principal store
///
/// Records keep every relation they were inserted with; lookups return only
/// the relations that were asked for.
#[derive(Default)]
pub struct InMemoryPrincipalStore {
    principals: RwLock<Vec<Principal>>,
    lookups: AtomicUsize,
}

impl InMemoryPrincipalStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a principal record
    pub async fn insert(&self, principal: Principal) {
        self.principals.write().await.push(principal);
    }

    /// Number of lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn find_by_field(
        &self,
        model: &str,
        field: &str,
        value: &str,
        with: &[&str],
    ) -> Result<Option<Principal>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let principals = self.principals.read().await;
        let found = principals
            .iter()
            .find(|p| p.model == model && p.attribute_key(field).as_deref() == Some(value))
            .cloned()
            .map(|mut principal| {
                principal.relations.retain(|name, _| with.contains(&name.as_str()));
                principal
            });

        Ok(found)
    }
}

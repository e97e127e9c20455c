//! Shared fixtures for integration tests

#![allow(dead_code)]

use axum::http::HeaderMap;
use claimgate_authz::credential::{RequestTokenLocator, StaticPayloadDecoder};
use claimgate_authz::principal::InMemoryPrincipalStore;
use claimgate_authz::session::{InMemoryTokenBlacklist, RecordingSessionSink};
use claimgate_authz::{
    AuthConfig, AuthContext, Collaborators, DecodeError, Payload, PayloadDecoder, Principal,
    TokenLocator,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Locator counting how often it is queried
pub struct CountingLocator {
    inner: RequestTokenLocator,
    pub queries: AtomicUsize,
}

impl CountingLocator {
    pub fn new(inner: RequestTokenLocator) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl TokenLocator for CountingLocator {
    fn find(&self, candidates: &[String]) -> Option<String> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find(candidates)
    }
}

/// Decoder counting how often it decodes
pub struct CountingDecoder {
    inner: StaticPayloadDecoder,
    pub calls: AtomicUsize,
}

impl CountingDecoder {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PayloadDecoder for CountingDecoder {
    fn decode(&self, token: &str) -> Result<Payload, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.decode(token)
    }
}

/// Payload of a sales lead with read scope
pub fn lead_payload(auth_id: &str) -> Value {
    json!({
        "authId": auth_id,
        "user": {
            "departments": ["sales", "emea"],
            "roles": ["lead"],
            "scopes": ["read", "export"]
        },
        "roles": {
            "member": {"level": 1},
            "lead": {"level": 2},
            "admin": {"level": 3}
        }
    })
}

/// Everything a test needs to drive an [`AuthContext`]
pub struct Harness {
    pub context: AuthContext,
    pub locator: Arc<CountingLocator>,
    pub decoder: Arc<CountingDecoder>,
    pub store: Arc<InMemoryPrincipalStore>,
    pub blacklist: Arc<InMemoryTokenBlacklist>,
    pub sink: Arc<RecordingSessionSink>,
}

/// Build a harness whose request carries the given headers
///
/// Known tokens: `t-lead` (auth id `u-1`, has a record) and `t-orphan`
/// (auth id `u-404`, no record).
pub async fn harness(headers: &[(&'static str, &str)], config: AuthConfig) -> Harness {
    init_tracing();

    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(*name, value.parse().unwrap());
    }

    let blacklist = Arc::new(InMemoryTokenBlacklist::new());
    let locator = Arc::new(CountingLocator::new(RequestTokenLocator::new(map)));
    let decoder = Arc::new(CountingDecoder {
        inner: StaticPayloadDecoder::new()
            .with_token("t-lead", Payload::from_value(lead_payload("u-1")).unwrap())
            .with_token("t-orphan", Payload::from_value(lead_payload("u-404")).unwrap())
            .with_revocations(blacklist.clone()),
        calls: AtomicUsize::new(0),
    });

    let store = Arc::new(InMemoryPrincipalStore::new());
    store
        .insert(
            Principal::new("User")
                .with_attribute("auth_id", "u-1")
                .with_attribute("email", "lead@example.com")
                .with_relation("team", json!({"name": "emea-sales"})),
        )
        .await;

    let sink = Arc::new(RecordingSessionSink::new());

    let context = AuthContext::new(
        config,
        Collaborators {
            locator: locator.clone(),
            decoder: decoder.clone(),
            store: store.clone(),
            invalidator: blacklist.clone(),
            sink: sink.clone(),
        },
    );

    Harness {
        context,
        locator,
        decoder,
        store,
        blacklist,
        sink,
    }
}

//! Core credential and principal types

use crate::config::ClaimFields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Decoded claims carried by a bearer credential
///
/// Produced by a [`crate::credential::PayloadDecoder`] and never mutated
/// afterwards. Claim order is preserved as decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    claims: Map<String, Value>,
}

impl Payload {
    /// Create a payload from a claim map
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Create a payload from a JSON value; anything but an object is rejected
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(claims) => Some(Self { claims }),
            _ => None,
        }
    }

    /// Get a claim by name
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.claims.get(claim)
    }

    /// Get a claim rendered as a lookup key
    ///
    /// Strings are returned verbatim and numbers as their decimal text.
    /// Empty strings, `null` and structured values count as absent.
    pub fn get_key(&self, claim: &str) -> Option<String> {
        self.get(claim).and_then(scalar_text).filter(|key| !key.is_empty())
    }

    /// All claims in decoded order
    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(claims: Map<String, Value>) -> Self {
        Self::new(claims)
    }
}

/// The principal's claim sets as carried in the payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Identity key (absent when the claim is missing or empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<String>,

    /// Department memberships
    #[serde(default)]
    pub departments: HashSet<String>,

    /// Granted roles
    #[serde(default)]
    pub roles: HashSet<String>,

    /// Granted scopes
    #[serde(default)]
    pub scopes: HashSet<String>,
}

impl ClaimSet {
    /// Extract the claim sets from a payload
    ///
    /// The sets are read from arrays inside the `fields.user_claim` object;
    /// missing or non-array fields yield empty sets.
    pub fn from_payload(payload: &Payload, identity_claim: &str, fields: &ClaimFields) -> Self {
        let user = payload.get(&fields.user_claim);
        let set = |name: &str| -> HashSet<String> {
            user.and_then(|user| user.get(name))
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(scalar_text).collect())
                .unwrap_or_default()
        };

        Self {
            auth_id: payload.get_key(identity_claim),
            departments: set(&fields.departments),
            roles: set(&fields.roles),
            scopes: set(&fields.scopes),
        }
    }

    /// Builder-style helper adding departments
    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments.extend(departments.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper adding roles
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper adding scopes
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }
}

/// Fully resolved principal record backing a credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal model the record belongs to (e.g., "User")
    pub model: String,

    /// Record attributes, including the store key field
    #[serde(default)]
    pub attributes: Map<String, Value>,

    /// Eager-loaded relations, keyed by relation name
    #[serde(default)]
    pub relations: BTreeMap<String, Value>,
}

impl Principal {
    /// Create a principal of the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attributes: Map::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Add an attribute to the principal
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a relation to the principal
    pub fn with_relation(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.relations.insert(name.into(), value.into());
        self
    }

    /// Get an attribute rendered as a lookup key
    pub fn attribute_key(&self, field: &str) -> Option<String> {
        self.attributes.get(field).and_then(scalar_text)
    }

    /// Get an eager-loaded relation
    pub fn relation(&self, name: &str) -> Option<&Value> {
        self.relations.get(name)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

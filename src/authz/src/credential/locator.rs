//! Token lookup over request headers and query parameters

use super::TokenLocator;
use axum::http::HeaderMap;
use std::collections::HashMap;

/// Authorization scheme stripped from header values
const BEARER_SCHEME: &str = "Bearer";

/// Finds tokens in an HTTP request
///
/// For each candidate key, in order, the header of that name is checked
/// first (a case-insensitive `Bearer ` prefix is stripped), then the query
/// parameter of the same name. Empty values are skipped. A header value
/// without a scheme is taken as the raw token, so the `Bearer` prefix is
/// optional.
#[derive(Debug, Clone, Default)]
pub struct RequestTokenLocator {
    headers: HeaderMap,
    query: HashMap<String, String>,
}

impl RequestTokenLocator {
    /// Create a locator over request headers
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            headers,
            query: HashMap::new(),
        }
    }

    /// Add already-decoded query parameters
    pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    fn header_token(&self, key: &str) -> Option<String> {
        let value = self.headers.get(key)?.to_str().ok()?.trim();
        let token = match value.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest.trim(),
            None if value.eq_ignore_ascii_case(BEARER_SCHEME) => "",
            _ => value,
        };

        (!token.is_empty()).then(|| token.to_string())
    }

    fn query_token(&self, key: &str) -> Option<String> {
        self.query
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

impl TokenLocator for RequestTokenLocator {
    fn find(&self, candidates: &[String]) -> Option<String> {
        candidates
            .iter()
            .find_map(|key| self.header_token(key).or_else(|| self.query_token(key)))
    }
}

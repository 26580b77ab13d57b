//! In-memory cache for identity provider access tokens.
//!
//! Uses `moka` for lock-free concurrent caching with TTL support. Slug
//! records themselves are never cached; every lookup goes to the store.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Cache of OAuth2 access tokens keyed by service-account email
#[derive(Clone)]
pub struct TokenCache {
    tokens: Arc<Cache<String, String>>,
}

impl TokenCache {
    /// Create a new TokenCache whose entries live for `ttl_secs`
    pub fn new(ttl_secs: u64) -> Self {
        let tokens = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            tokens: Arc::new(tokens),
        }
    }

    /// Store an access token
    pub fn insert(&self, account: &str, token: String) {
        self.tokens.insert(account.to_string(), token);
    }

    /// Get a still-valid access token
    pub fn get(&self, account: &str) -> Option<String> {
        self.tokens.get(account)
    }

    /// Drop a token the provider rejected
    pub fn invalidate(&self, account: &str) {
        self.tokens.invalidate(account);
    }
}

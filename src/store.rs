use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dashmap::DashMap;

/// A previously issued access token, used as evidence of prior consent.
///
/// Tokens are created and destroyed by the backing store; this crate only
/// looks them up and may request revocation for `prompt=consent`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessToken {
    /// The token string itself.
    pub token: String,
    /// Client the token was issued to.
    pub client_id: String,
    /// Resource owner the token was issued for.
    pub owner_id: String,
    /// Scopes the token was authorized for.
    pub scopes: Vec<String>,
}

impl AccessToken {
    /// Whether this token covers a request for `(client_id, owner_id, scopes)`.
    ///
    /// The token must belong to the same client and owner, and its scopes
    /// must be a superset of the requested scopes.
    pub fn matches(&self, client_id: &str, owner_id: &str, scopes: &[String]) -> bool {
        self.client_id == client_id
            && self.owner_id == owner_id
            && scopes.iter().all(|s| self.scopes.contains(s))
    }
}

/// Pluggable access-token store.
///
/// Implement this trait to back the gate with your own token storage
/// (SQLx, Redis, the host server's token table, etc.).
pub trait TokenStore: Send + Sync + 'static {
    /// Find a token matching `(client_id, owner_id, scopes)`, if any.
    fn matching_token(
        &self,
        client_id: &str,
        owner_id: &str,
        scopes: &[String],
    ) -> impl Future<Output = Option<AccessToken>> + Send;

    /// Revoke a previously issued token.
    fn revoke(&self, token: &AccessToken) -> impl Future<Output = ()> + Send;
}

/// Object-safe wrapper for `TokenStore`.
pub(crate) trait TokenStoreErased: Send + Sync {
    fn matching_token<'a>(
        &'a self,
        client_id: &'a str,
        owner_id: &'a str,
        scopes: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Option<AccessToken>> + Send + 'a>>;

    fn revoke<'a>(
        &'a self,
        token: &'a AccessToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

impl<T: TokenStore> TokenStoreErased for T {
    fn matching_token<'a>(
        &'a self,
        client_id: &'a str,
        owner_id: &'a str,
        scopes: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Option<AccessToken>> + Send + 'a>> {
        Box::pin(TokenStore::matching_token(self, client_id, owner_id, scopes))
    }

    fn revoke<'a>(
        &'a self,
        token: &'a AccessToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(TokenStore::revoke(self, token))
    }
}

/// In-memory token store for development and testing.
///
/// Clones share the same underlying map, so a handle kept outside the gate
/// observes revocations performed through it.
#[derive(Clone)]
pub struct InMemoryTokenStore {
    /// Map: token string -> AccessToken
    tokens: Arc<DashMap<String, AccessToken>>,
}

impl InMemoryTokenStore {
    /// Create a new empty in-memory token store.
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
        }
    }

    /// Add a token.
    pub fn add_token(self, token: AccessToken) -> Self {
        self.tokens.insert(token.token.clone(), token);
        self
    }

    /// Whether a token with the given token string is still stored.
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn matching_token(
        &self,
        client_id: &str,
        owner_id: &str,
        scopes: &[String],
    ) -> impl Future<Output = Option<AccessToken>> + Send {
        let result = self
            .tokens
            .iter()
            .find(|entry| entry.value().matches(client_id, owner_id, scopes))
            .map(|entry| entry.value().clone());
        async move { result }
    }

    fn revoke(&self, token: &AccessToken) -> impl Future<Output = ()> + Send {
        self.tokens.remove(&token.token);
        async {}
    }
}

/// Immutable view of an in-flight OAuth2 authorization request.
///
/// Owned by the surrounding authorization endpoint; this crate only reads it.
/// The query pairs keep their request order so a rewritten `return_to` URL
/// preserves it.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    /// Identifier of the requesting client application.
    pub client_id: String,
    /// Requested scope strings.
    pub scopes: Vec<String>,
    /// Path of the current request, used when building `return_to` URLs.
    pub path: String,
    /// Query parameters of the current request, in request order.
    pub query: Vec<(String, String)>,
}

impl AuthorizationRequest {
    /// Create a request view for the default authorization endpoint path.
    pub fn new<S: Into<String>>(
        client_id: impl Into<String>,
        scopes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
            path: "/oauth/authorize".into(),
            query: Vec::new(),
        }
    }

    /// Set the request path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the query parameters, preserving the given order.
    pub fn with_query<K: Into<String>, V: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.query = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// First occurrence of a query parameter, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Raw `prompt` parameter; absent reads as empty.
    pub fn prompt(&self) -> &str {
        self.param("prompt").unwrap_or("")
    }

    /// Raw `max_age` parameter; absent reads as empty.
    pub fn max_age(&self) -> &str {
        self.param("max_age").unwrap_or("")
    }

    /// Whether `openid` is among the requested scopes. The gate evaluates
    /// `prompt`/`max_age` only when this holds.
    pub fn has_openid_scope(&self) -> bool {
        self.scopes.iter().any(|s| s == "openid")
    }
}

/// The authenticated principal, reduced to what this crate needs: an
/// externally assigned identifier used to look up previously issued tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceOwner {
    pub id: String,
}

impl ResourceOwner {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

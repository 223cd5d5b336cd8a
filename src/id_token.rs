use serde::Serialize;

/// ID token value object: binds the freshly issued access token to the
/// client-supplied `nonce`.
///
/// Signing and compact encoding are left to the host application; this crate
/// only establishes the binding and places it on the token response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdToken {
    /// The access token this ID token was issued alongside.
    pub access_token: String,
    /// Client-supplied nonce, echoed back verbatim. Never validated here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl IdToken {
    pub fn new(access_token: impl Into<String>, nonce: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            nonce,
        }
    }
}

/// Token response (RFC 6749 Section 5.1) with the OIDC `id_token` extension.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<IdToken>,
}

impl TokenResponse {
    /// A plain Bearer response without an ID token.
    pub fn bearer(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer",
            expires_in,
            id_token: None,
        }
    }
}

/// Hook on the successful-completion path of the password grant.
///
/// Captures the request's `nonce` when the token request is constructed, then
/// attaches an ID token to the response once the access token exists.
#[derive(Clone, Debug, Default)]
pub struct IdTokenAttacher {
    nonce: Option<String>,
}

impl IdTokenAttacher {
    pub fn new(nonce: Option<String>) -> Self {
        Self { nonce }
    }

    /// Capture the `nonce` from raw token-request parameters.
    pub fn from_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let nonce = params
            .into_iter()
            .find(|(name, _)| *name == "nonce")
            .map(|(_, value)| value.to_string());
        Self { nonce }
    }

    /// Attach `IdToken(access_token, nonce)` to a successful token response.
    pub fn attach(&self, response: &mut TokenResponse) {
        response.id_token = Some(IdToken::new(
            response.access_token.clone(),
            self.nonce.clone(),
        ));
    }
}

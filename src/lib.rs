//! OIDC authentication-flow gate for OAuth2 authorization servers.
//!
//! Sits between an authorization endpoint and its resource-owner
//! authentication step: enforces the OpenID Connect `prompt` and `max_age`
//! request parameters, decides whether the owner must re-authenticate or the
//! request must fail, and attaches an ID token to successful password-grant
//! responses.
//!
//! # Example
//!
//! ```ignore
//! use axum::response::{IntoResponse, Redirect};
//! use oidc_gate::{
//!     AuthenticationGate, AuthorizationRequest, GateConfig, GateOutcome,
//!     InMemoryTokenStore, ResourceOwner,
//! };
//!
//! let config = GateConfig::new()
//!     .auth_time_from_resource_owner(|owner| session_auth_time(&owner.id))
//!     .reauthenticate_resource_owner(|_owner, return_to| {
//!         Some(Redirect::to(&format!("/login?return_to={return_to}")).into_response())
//!     });
//!
//! let gate = AuthenticationGate::new(config, InMemoryTokenStore::new());
//!
//! // Inside the authorization endpoint:
//! let request = AuthorizationRequest::new("client-1", ["openid"])
//!     .with_query([("prompt", "login")]);
//! match gate.authenticate(&request, || resolve_session_owner()).await {
//!     GateOutcome::Authenticated(owner) => { /* continue the OAuth2 flow */ }
//!     GateOutcome::Respond(response) => { /* emit and stop */ }
//! }
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod id_token;
pub mod prompt;
pub mod request;
pub mod store;

mod max_age;
mod reauth;

pub use config::GateConfig;
pub use error::AuthFlowError;
pub use gate::{AuthenticationGate, GateOutcome};
pub use id_token::{IdToken, IdTokenAttacher, TokenResponse};
pub use prompt::Prompt;
pub use request::{AuthorizationRequest, ResourceOwner};
pub use store::{AccessToken, InMemoryTokenStore, TokenStore};

pub mod prelude {
    //! Re-exports of the most commonly used gate types.
    pub use crate::{
        AuthenticationGate, AuthorizationRequest, GateConfig, GateOutcome, IdTokenAttacher,
        InMemoryTokenStore, ResourceOwner, TokenStore,
    };
}

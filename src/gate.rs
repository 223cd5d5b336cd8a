use std::future::Future;

use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::config::GateConfig;
use crate::max_age;
use crate::prompt;
use crate::request::{AuthorizationRequest, ResourceOwner};
use crate::store::{TokenStore, TokenStoreErased};

/// Result of running the gate around resource-owner resolution.
pub enum GateOutcome {
    /// Evaluation passed; normal OAuth2 handling continues with this owner.
    Authenticated(Option<ResourceOwner>),
    /// A response was produced (re-authentication redirect or error payload);
    /// request handling must stop and emit it.
    Respond(Response),
}

/// OIDC authentication gate wrapping the "resolve resource owner" step of an
/// authorization endpoint.
///
/// For requests carrying the `openid` scope it enforces `prompt` and then
/// `max_age`; any policy violation is converted into an OAuth error response
/// at this boundary, so evaluators stay free of wire concerns.
pub struct AuthenticationGate {
    store: Box<dyn TokenStoreErased>,
    config: GateConfig,
}

impl AuthenticationGate {
    /// Build a gate over a token store.
    pub fn new(config: GateConfig, store: impl TokenStore) -> Self {
        Self {
            store: Box::new(store),
            config,
        }
    }

    /// Resolve the owner through `resolve_owner` and apply the OIDC checks.
    ///
    /// Requests without the `openid` scope pass through untouched, whatever
    /// their `prompt`/`max_age` parameters contain.
    pub async fn authenticate<F, Fut>(
        &self,
        request: &AuthorizationRequest,
        resolve_owner: F,
    ) -> GateOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<ResourceOwner>>,
    {
        let owner = resolve_owner().await;

        if !request.has_openid_scope() {
            return GateOutcome::Authenticated(owner);
        }

        // Prompt policy takes precedence: a re-authentication response from
        // the prompt phase is emitted without consulting max_age.
        let result = match prompt::evaluate(
            self.store.as_ref(),
            &self.config,
            request,
            owner.as_ref(),
        )
        .await
        {
            Ok(Some(response)) => Ok(Some(response)),
            Ok(None) => max_age::evaluate(&self.config, request, owner.as_ref()),
            Err(error) => Err(error),
        };

        match result {
            Ok(None) => GateOutcome::Authenticated(owner),
            Ok(Some(response)) => GateOutcome::Respond(response),
            Err(error) => {
                warn!(%error, "Authentication flow rejected");
                GateOutcome::Respond(error.into_response())
            }
        }
    }
}

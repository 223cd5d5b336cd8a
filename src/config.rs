use std::time::SystemTime;

use axum::response::Response;

use crate::request::ResourceOwner;

type AuthTimeFn = dyn Fn(&ResourceOwner) -> Option<SystemTime> + Send + Sync;
type ReauthenticateFn = dyn Fn(&ResourceOwner, &str) -> Option<Response> + Send + Sync;

/// Pluggable behaviors for the authentication gate.
///
/// Immutable once the gate is built. Both callbacks are host-supplied:
///
/// - `auth_time_from_resource_owner` extracts the owner's last-authentication
///   time for `max_age` enforcement.
/// - `reauthenticate_resource_owner` receives the owner and a `return_to` URL
///   and must produce the HTTP response that sends the owner back through
///   login (typically a redirect). Returning `None` means no response was
///   produced, which the gate treats as `login_required`.
#[derive(Default)]
pub struct GateConfig {
    pub(crate) auth_time_from_resource_owner: Option<Box<AuthTimeFn>>,
    pub(crate) reauthenticate_resource_owner: Option<Box<ReauthenticateFn>>,
}

impl GateConfig {
    /// Create a configuration with no callbacks set.
    ///
    /// Without a re-authentication callback, any forced re-authentication
    /// fails as `login_required`; without an auth-time callback, any positive
    /// `max_age` forces re-authentication.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback extracting the owner's last-authentication time.
    pub fn auth_time_from_resource_owner(
        mut self,
        f: impl Fn(&ResourceOwner) -> Option<SystemTime> + Send + Sync + 'static,
    ) -> Self {
        self.auth_time_from_resource_owner = Some(Box::new(f));
        self
    }

    /// Set the callback that re-authenticates the owner.
    pub fn reauthenticate_resource_owner(
        mut self,
        f: impl Fn(&ResourceOwner, &str) -> Option<Response> + Send + Sync + 'static,
    ) -> Self {
        self.reauthenticate_resource_owner = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field(
                "auth_time_from_resource_owner",
                &self.auth_time_from_resource_owner.is_some(),
            )
            .field(
                "reauthenticate_resource_owner",
                &self.reauthenticate_resource_owner.is_some(),
            )
            .finish()
    }
}

use std::time::SystemTime;

use axum::response::Response;
use tracing::debug;

use crate::config::GateConfig;
use crate::error::AuthFlowError;
use crate::reauth;
use crate::request::{AuthorizationRequest, ResourceOwner};

/// Evaluate the `max_age` parameter against the owner's last authentication.
///
/// No-op when the parsed value is zero or no owner is signed in. Otherwise
/// the owner is re-authenticated when the configured extractor yields no
/// timestamp or one older than `max_age` seconds. The only error that can
/// surface here is `login_required` from the re-authentication trigger.
pub(crate) fn evaluate(
    config: &GateConfig,
    request: &AuthorizationRequest,
    owner: Option<&ResourceOwner>,
) -> Result<Option<Response>, AuthFlowError> {
    let max_age = parse_max_age(request.max_age());
    let Some(owner) = owner else {
        return Ok(None);
    };
    if max_age == 0 {
        return Ok(None);
    }

    let auth_time = config
        .auth_time_from_resource_owner
        .as_deref()
        .and_then(|auth_time| auth_time(owner));

    let stale = match auth_time {
        None => true,
        Some(auth_time) => {
            let elapsed = SystemTime::now()
                .duration_since(auth_time)
                .unwrap_or_default();
            elapsed.as_secs() > max_age
        }
    };

    if stale {
        debug!(owner = %owner.id, max_age, "Authentication too old, forcing re-authentication");
        reauth::force(config, owner, &request.path, &request.query).map(Some)
    } else {
        Ok(None)
    }
}

/// Parse `max_age` as non-negative seconds; anything else reads as zero.
fn parse_max_age(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

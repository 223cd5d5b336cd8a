use axum::response::Response;
use tracing::{debug, warn};

use crate::config::GateConfig;
use crate::error::AuthFlowError;
use crate::request::ResourceOwner;

/// Force the owner back through authentication.
///
/// Builds a `return_to` URL from the current request (with the stale `login`
/// prompt value stripped so the flow does not loop) and invokes the configured
/// re-authentication callback. The callback must produce a response; a
/// misconfigured no-op callback surfaces as `login_required` instead of
/// failing silently.
pub(crate) fn force(
    config: &GateConfig,
    owner: &ResourceOwner,
    path: &str,
    query: &[(String, String)],
) -> Result<Response, AuthFlowError> {
    let return_to = build_return_to(path, query);

    let response = config
        .reauthenticate_resource_owner
        .as_deref()
        .and_then(|reauthenticate| reauthenticate(owner, &return_to));

    match response {
        Some(response) => {
            debug!(owner = %owner.id, %return_to, "Re-authenticating resource owner");
            Ok(response)
        }
        None => {
            warn!(owner = %owner.id, "Re-authentication callback produced no response");
            Err(AuthFlowError::LoginRequired)
        }
    }
}

/// Rebuild the current request URL for use as `return_to`.
///
/// The `prompt` parameter loses its `login` token (the owner is being sent to
/// login right now); if nothing remains of it, the parameter is dropped.
/// All other parameters are kept in request order.
fn build_return_to(path: &str, query: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (name, value) in query {
        if name == "prompt" {
            let remaining = strip_login_value(value);
            if remaining.is_empty() {
                continue;
            }
            serializer.append_pair(name, &remaining);
        } else {
            serializer.append_pair(name, value);
        }
        any = true;
    }

    if any {
        format!("{path}?{}", serializer.finish())
    } else {
        path.to_string()
    }
}

/// Remove the first `login` token from a `prompt` value, collapsing the
/// surrounding whitespace. Case-sensitive, whole tokens only.
fn strip_login_value(value: &str) -> String {
    let mut removed = false;
    let kept: Vec<&str> = value
        .split_whitespace()
        .filter(|token| {
            if !removed && *token == "login" {
                removed = true;
                false
            } else {
                true
            }
        })
        .collect();
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::{build_return_to, strip_login_value};

    fn pairs(input: &[(&str, &str)]) -> Vec<(String, String)> {
        input
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn strips_login_keeping_other_values() {
        assert_eq!(strip_login_value("login consent"), "consent");
        assert_eq!(strip_login_value("consent  login"), "consent");
        assert_eq!(strip_login_value("login"), "");
    }

    #[test]
    fn only_whole_tokens_are_stripped() {
        assert_eq!(strip_login_value("loginx"), "loginx");
        assert_eq!(strip_login_value("Login"), "Login");
    }

    #[test]
    fn drops_empty_prompt_parameter() {
        let url = build_return_to("/oauth/authorize", &pairs(&[("prompt", "login")]));
        assert_eq!(url, "/oauth/authorize");
    }

    #[test]
    fn keeps_parameter_order() {
        let url = build_return_to(
            "/oauth/authorize",
            &pairs(&[("prompt", "login consent"), ("foo", "bar")]),
        );
        assert_eq!(url, "/oauth/authorize?prompt=consent&foo=bar");
    }
}

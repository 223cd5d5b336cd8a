use axum::response::Response;
use tracing::debug;

use crate::config::GateConfig;
use crate::error::AuthFlowError;
use crate::reauth;
use crate::request::{AuthorizationRequest, ResourceOwner};
use crate::store::TokenStoreErased;

/// A single value of the `prompt` request parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// No UI may be shown; fails unless the owner is signed in and consented.
    None,
    /// The owner must re-authenticate even with a live session.
    Login,
    /// Previously granted consent is discarded.
    Consent,
    /// The owner must pick an account; left to the host application.
    SelectAccount,
    /// Any other literal; always rejected.
    Unrecognized(String),
}

impl Prompt {
    fn from_token(token: &str) -> Self {
        match token {
            "none" => Prompt::None,
            "login" => Prompt::Login,
            "consent" => Prompt::Consent,
            "select_account" => Prompt::SelectAccount,
            other => Prompt::Unrecognized(other.to_string()),
        }
    }
}

/// Split a raw `prompt` parameter on whitespace and deduplicate, preserving
/// first-seen order. A blank parameter yields no values.
pub fn parse_prompt_values(raw: &str) -> Vec<Prompt> {
    let mut values = Vec::new();
    for token in raw.split_whitespace() {
        let value = Prompt::from_token(token);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// Evaluate the `prompt` parameter against the current owner.
///
/// Values are processed in first-seen order and the first violation wins;
/// later values are not evaluated. A `login` value produces the
/// re-authentication response but does not abort the loop, so side effects
/// of later values (`consent` revocation) still happen before it is emitted.
pub(crate) async fn evaluate(
    store: &dyn TokenStoreErased,
    config: &GateConfig,
    request: &AuthorizationRequest,
    owner: Option<&ResourceOwner>,
) -> Result<Option<Response>, AuthFlowError> {
    let values = parse_prompt_values(request.prompt());
    let mut reauth_response = None;

    for value in &values {
        match value {
            Prompt::None => {
                // `none` must be the only value.
                if values.len() > 1 {
                    return Err(AuthFlowError::InvalidRequest);
                }
                let owner = owner.ok_or(AuthFlowError::LoginRequired)?;
                let consented = store
                    .matching_token(&request.client_id, &owner.id, &request.scopes)
                    .await
                    .is_some();
                if !consented {
                    return Err(AuthFlowError::ConsentRequired);
                }
            }
            Prompt::Login => {
                if let Some(owner) = owner {
                    if reauth_response.is_none() {
                        debug!(owner = %owner.id, "prompt=login, forcing re-authentication");
                        reauth_response =
                            Some(reauth::force(config, owner, &request.path, &request.query)?);
                    }
                }
            }
            Prompt::Consent => {
                if let Some(owner) = owner {
                    let matching = store
                        .matching_token(&request.client_id, &owner.id, &request.scopes)
                        .await;
                    if let Some(token) = matching {
                        debug!(owner = %owner.id, "prompt=consent, revoking previously issued token");
                        store.revoke(&token).await;
                    }
                }
            }
            Prompt::SelectAccount => return Err(AuthFlowError::AccountSelectionRequired),
            Prompt::Unrecognized(_) => return Err(AuthFlowError::InvalidRequest),
        }
    }

    Ok(reauth_response)
}

#[cfg(test)]
mod tests {
    use super::{parse_prompt_values, Prompt};

    #[test]
    fn blank_parameter_yields_no_values() {
        assert!(parse_prompt_values("").is_empty());
        assert!(parse_prompt_values("   ").is_empty());
    }

    #[test]
    fn splits_on_runs_of_whitespace() {
        assert_eq!(
            parse_prompt_values("login   consent"),
            vec![Prompt::Login, Prompt::Consent]
        );
    }

    #[test]
    fn deduplicates_preserving_first_seen_order() {
        assert_eq!(
            parse_prompt_values("consent login consent"),
            vec![Prompt::Consent, Prompt::Login]
        );
    }

    #[test]
    fn unknown_tokens_are_kept_verbatim() {
        assert_eq!(
            parse_prompt_values("signup"),
            vec![Prompt::Unrecognized("signup".into())]
        );
    }
}

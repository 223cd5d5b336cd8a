use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use oidc_gate::{
    AuthenticationGate, AuthorizationRequest, GateConfig, GateOutcome, InMemoryTokenStore,
    ResourceOwner,
};

fn openid_request(max_age: &str) -> AuthorizationRequest {
    AuthorizationRequest::new("client-1", ["openid"]).with_query([("max_age", max_age)])
}

/// Gate whose owner authenticated `age_secs` ago, counting re-authentications.
fn gate_with_auth_age(age_secs: u64, calls: Arc<AtomicUsize>) -> AuthenticationGate {
    let config = GateConfig::new()
        .auth_time_from_resource_owner(move |_owner| {
            Some(SystemTime::now() - Duration::from_secs(age_secs))
        })
        .reauthenticate_resource_owner(move |_owner, return_to| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(Redirect::to(&format!("/login?return_to={return_to}")).into_response())
        });
    AuthenticationGate::new(config, InMemoryTokenStore::new())
}

async fn owner() -> Option<ResourceOwner> {
    Some(ResourceOwner::new("owner-1"))
}

#[tokio::test]
async fn stale_authentication_forces_reauthentication() {
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = gate_with_auth_age(301, calls.clone());

    let outcome = gate.authenticate(&openid_request("300"), owner).await;
    match outcome {
        GateOutcome::Respond(resp) => assert_eq!(resp.status(), StatusCode::SEE_OTHER),
        GateOutcome::Authenticated(_) => panic!("expected a re-authentication response"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fresh_authentication_passes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = gate_with_auth_age(299, calls.clone());

    let outcome = gate.authenticate(&openid_request("300"), owner).await;
    assert!(matches!(outcome, GateOutcome::Authenticated(Some(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn zero_max_age_never_reauthenticates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = gate_with_auth_age(1_000_000, calls.clone());

    let outcome = gate.authenticate(&openid_request("0"), owner).await;
    assert!(matches!(outcome, GateOutcome::Authenticated(Some(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn absent_max_age_never_reauthenticates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = gate_with_auth_age(1_000_000, calls.clone());

    let request = AuthorizationRequest::new("client-1", ["openid"]);
    let outcome = gate.authenticate(&request, owner).await;
    assert!(matches!(outcome, GateOutcome::Authenticated(Some(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_numeric_max_age_reads_as_zero() {
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = gate_with_auth_age(1_000_000, calls.clone());

    let outcome = gate.authenticate(&openid_request("garbage"), owner).await;
    assert!(matches!(outcome, GateOutcome::Authenticated(Some(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_auth_time_forces_reauthentication() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let config = GateConfig::new()
        .auth_time_from_resource_owner(|_owner| None)
        .reauthenticate_resource_owner(move |_owner, _return_to| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(Redirect::to("/login").into_response())
        });
    let gate = AuthenticationGate::new(config, InMemoryTokenStore::new());

    let outcome = gate.authenticate(&openid_request("300"), owner).await;
    assert!(matches!(outcome, GateOutcome::Respond(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn no_owner_skips_max_age_entirely() {
    let calls = Arc::new(AtomicUsize::new(0));
    let gate = gate_with_auth_age(1_000_000, calls.clone());

    let outcome = gate
        .authenticate(&openid_request("300"), || async { None::<ResourceOwner> })
        .await;
    assert!(matches!(outcome, GateOutcome::Authenticated(None)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

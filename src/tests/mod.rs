
use std::time::Duration;

use reqwest::StatusCode;

use crate::config::Config;
use crate::token::{ExpiryPolicy, TokenCache, TokenGrant};
use test_support::{ScriptedSource, capture_logs, drain_logs};

use super::*;

#[tokio::test(flavor = "current_thread")]
async fn refresh_logs_never_contain_token_value() {
    let source = ScriptedSource::new(vec![Ok(TokenGrant::bearer(
        "very-secret-token",
        Duration::from_secs(3600),
    ))]);
    let cache = TokenCache::new(source.clone(), ExpiryPolicy::default());

    let (lines, guard) = capture_logs();
    let token = cache.get().await.expect("refresh succeeds");
    drop(guard);

    assert_eq!(token, "very-secret-token");
    assert_eq!(source.calls(), 1);
    let logs = drain_logs(lines);
    assert!(
        logs.iter().any(|line| line.contains("refresh.success")),
        "expected refresh.success event, got {:?}",
        logs
    );
    assert!(
        logs.iter().all(|line| !line.contains("very-secret-token")),
        "token leaked into logs: {:?}",
        logs
    );
}

#[tokio::test(flavor = "current_thread")]
async fn refresh_failure_is_logged_at_error() {
    let source = ScriptedSource::new(vec![Err(Error::Http(
        StatusCode::UNAUTHORIZED,
        "invalid_client".into(),
    ))]);
    let cache = TokenCache::new(source, ExpiryPolicy::default());

    let (lines, guard) = capture_logs();
    let err = cache.get().await.expect_err("refresh fails");
    drop(guard);

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    let logs = drain_logs(lines);
    assert!(
        logs.iter()
            .any(|line| line.contains("ERROR") && line.contains("refresh.failure")),
        "expected refresh.failure at ERROR, got {:?}",
        logs
    );
}

#[ignore]
#[tokio::test]
async fn it_works() {
    let config = Config::from_env().expect("OSU_CLIENT_ID and OSU_CLIENT_SECRET must be set");
    let api = OsuApi::builder(config.client_id, config.client_secret.clone())
        .base_url(config.base_url.clone())
        .endpoint(EndpointId::GetUser)
        .build()
        .expect("Failed to build client");

    let user = api
        .request::<GetUserEndpoint>(GetUserRequest::by_id(2).with_mode(GameMode::Osu))
        .await
        .expect("Failed to fetch user");
    assert_eq!(user.id, 2);

    let first = api.auth_token().await.unwrap();
    let second = api.auth_token().await.unwrap();
    assert_eq!(first, second, "token should be served from cache");
}

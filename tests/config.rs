mod common;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use osu_api::{Config, ConfigLocation, EndpointId, Error, GetUserEndpoint, GetUserRequest, OsuApi};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{token_body, user_body};

fn write_config(name: &str, cfg: &serde_json::Value) -> PathBuf {
    let mut cfg_path = PathBuf::from("target");
    cfg_path.push(format!("test-config-{}-{}.json", name, std::process::id()));
    fs::create_dir_all("target").ok();
    fs::write(&cfg_path, serde_json::to_string(cfg).unwrap()).unwrap();
    cfg_path
}

#[test]
fn file_config_applies_defaults() {
    let cfg_path = write_config(
        "defaults",
        &serde_json::json!({"client_id": 42, "client_secret": "s"}),
    );
    let config = Config::from_file(&cfg_path).expect("config loads");
    assert_eq!(config.client_id, 42);
    assert_eq!(config.base_url, "https://osu.ppy.sh");
    assert_eq!(config.request_timeout(), Duration::from_millis(5_000));
    assert_eq!(config.token_margin(), Duration::from_secs(5));
}

#[test]
fn missing_file_is_io_error() {
    let err = Config::from_file("target/does-not-exist.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn zero_timeout_is_rejected() {
    let cfg_path = write_config(
        "zero-timeout",
        &serde_json::json!({"client_id": 1, "client_secret": "s", "request_timeout_ms": 0}),
    );
    let err = Config::from_file(&cfg_path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn client_from_file_config_talks_to_configured_host() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(token_body("abc", 3600)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(user_body(7, "file")))
        .expect(1)
        .mount(&server)
        .await;

    let cfg_path = write_config(
        &format!("client-{}", server.address().port()),
        &serde_json::json!({
            "client_id": 1,
            "client_secret": "s",
            "base_url": server.uri(),
            "request_timeout_ms": 2000,
            "token_margin_secs": 30
        }),
    );
    let config = osu_api::read_config(ConfigLocation::File(
        cfg_path.to_string_lossy().to_string(),
    ))
    .await
    .expect("config loads");
    assert_eq!(config.token_margin(), Duration::from_secs(30));

    let api = OsuApi::new(&config).expect("client builds");
    assert_eq!(api.token_cache().policy().margin, Duration::from_secs(30));
    api.register_endpoint(EndpointId::GetUser).await.unwrap();
    let user = api
        .request::<GetUserEndpoint>(GetUserRequest::by_id(7))
        .await
        .unwrap();
    assert_eq!(user.username, "file");
}

//! PokeAPI client tests against a local mock server

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dexpager::config::ApiConfig;
use dexpager::{CreatureClient, CreatureIndex, FetchError, FetchErrorKind, PokeApiClient};
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PokeApiClient {
    PokeApiClient::from_config(&ApiConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(500),
    })
    .expect("client builds")
}

fn index(value: u32) -> CreatureIndex {
    CreatureIndex::new(value).expect("index in range")
}

#[tokio::test]
async fn test_fetch_capitalizes_name_and_keeps_sprite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 25,
            "name": "pikachu",
            "sprites": { "front_default": "http://x/25.png", "back_default": null },
            "weight": 60
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creature = assert_ok!(client_for(&server).fetch(index(25)).await);
    assert_eq!(creature.name, "Pikachu");
    assert_eq!(creature.image_url.as_deref(), Some("http://x/25.png"));
}

#[tokio::test]
async fn test_fetch_without_sprite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "gholdengo",
            "sprites": { "front_default": null }
        })))
        .mount(&server)
        .await;

    let creature = assert_ok!(client_for(&server).fetch_creature(index(1000)).await);
    assert_eq!(creature.name, "Gholdengo");
    assert_eq!(creature.image_url, None);
}

#[tokio::test]
async fn test_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch(index(7)).await);
    assert!(matches!(err, FetchError::NotFound));
    assert_eq!(err.kind(), FetchErrorKind::NotFound);
}

#[tokio::test]
async fn test_server_error_is_http_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch(index(7)).await);
    assert_eq!(err.kind(), FetchErrorKind::Http(500));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch(index(7)).await);
    assert_eq!(err.kind(), FetchErrorKind::Decode);
}

#[tokio::test]
async fn test_missing_name_is_decode_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "sprites": { "front_default": null } })),
        )
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch(index(7)).await);
    assert_eq!(err.kind(), FetchErrorKind::Decode);
}

#[tokio::test]
async fn test_slow_response_is_transport_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "name": "slowpoke", "sprites": {} })),
        )
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch(index(79)).await);
    assert!(matches!(err, FetchError::Timeout));
    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_kind() {
    let client = PokeApiClient::from_config(&ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_millis(500),
    })
    .unwrap();

    let err = assert_err!(client.fetch(index(1)).await);
    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

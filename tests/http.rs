use std::time::Duration;

use csfloat_export::{
    Api,
    config::Credential,
    error::FetchError,
    fetch::{FetchStatus, Fetcher, HttpTradeSource, TradeSource},
    types::Role,
};
use reqwest::StatusCode;
use serde_json::json;
use tokio_test::assert_ok;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const API_KEY: &str = "test-api-key";

fn source(server: &MockServer, page_size: usize) -> HttpTradeSource {
    let base_url = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
    HttpTradeSource::new(Api::custom(base_url, page_size), Credential::new(API_KEY))
}

fn trades(ids: &[&str]) -> serde_json::Value {
    let trades: Vec<_> = ids.iter().map(|id| json!({"id": id})).collect();
    json!({ "trades": trades })
}

/// A page request carries the role, state, limit and page in the query and
/// the API key in the `Authorization` header.
#[tokio::test]
async fn test_page_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me/trades"))
        .and(query_param("role", "seller"))
        .and(query_param("state", "verified"))
        .and(query_param("limit", "500"))
        .and(query_param("page", "3"))
        .and(header("authorization", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(trades(&["a", "b"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut source = source(&server, 500);
    let page = assert_ok!(source.fetch_page(Role::Seller, 3).await);

    let ids: Vec<_> = page.iter().filter_map(|t| t.id()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"invalid api key"}"#))
        .mount(&server)
        .await;

    let result = source(&server, 500).fetch_page(Role::Buyer, 0).await;

    match result {
        Err(FetchError::Status { status, body }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, r#"{"message":"invalid api key"}"#);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"trades": 5})))
        .mount(&server)
        .await;

    let mut source = source(&server, 500);

    let result = source.fetch_page(Role::Buyer, 0).await;
    assert!(matches!(result, Err(FetchError::Decode(_))), "{result:?}");
    let result = source.fetch_page(Role::Buyer, 1).await;
    assert!(matches!(result, Err(FetchError::Decode(_))), "{result:?}");
}

#[tokio::test]
async fn test_missing_or_null_trades_read_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"trades": null})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
        .mount(&server)
        .await;

    let mut source = source(&server, 500);

    assert!(assert_ok!(source.fetch_page(Role::Buyer, 0).await).is_empty());
    assert!(assert_ok!(source.fetch_page(Role::Buyer, 1).await).is_empty());
}

#[tokio::test]
async fn test_unreachable_server() {
    let server = MockServer::start().await;
    let mut source = source(&server, 500);
    drop(server);

    let result = source.fetch_page(Role::Buyer, 0).await;
    assert!(matches!(result, Err(FetchError::Transport(_))), "{result:?}");
}

/// The fetch loop over HTTP stops at the first short page.
#[tokio::test]
async fn test_fetch_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("limit", "2"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trades(&["t0", "t1"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("limit", "2"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trades(&["t2"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut fetcher = Fetcher::new(source(&server, 2), Duration::ZERO);
    let outcome = fetcher.fetch(Role::Buyer).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.requests(), 2);
    let ids: Vec<_> = outcome.trades().iter().filter_map(|t| t.id()).collect();
    assert_eq!(ids, vec!["t0", "t1", "t2"]);
}

/// A failing page ends the fetch with the records gathered so far.
#[tokio::test]
async fn test_fetch_aborts_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trades(&["t0", "t1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let mut fetcher = Fetcher::new(source(&server, 2), Duration::ZERO);
    let outcome = fetcher.fetch(Role::Seller).await;

    assert!(matches!(
        outcome.status(),
        FetchStatus::Aborted(FetchError::Status { status, .. }) if *status == StatusCode::SERVICE_UNAVAILABLE
    ));
    assert_eq!(outcome.trades().len(), 2);
}

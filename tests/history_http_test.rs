//! Integration tests for the HTTP document store backend.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use watchtrail::config::StoreConfig;
use watchtrail::history::{DocumentStore, HistoryClient, HttpDocumentStore, StoreError};
use watchtrail::{Error, WatchDocument, WatchSegment};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENTS_PATH: &str = "/v1/collections/watchSegments/documents";

fn store_config(server: &MockServer) -> StoreConfig {
    StoreConfig {
        base_url: server.uri(),
        ..StoreConfig::default()
    }
}

fn client(server: &MockServer) -> HistoryClient {
    HistoryClient::from_config(&store_config(server))
}

fn seg(start: f64, end: f64) -> WatchSegment {
    WatchSegment { start, end }
}

#[tokio::test]
async fn save_posts_segments_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .and(body_partial_json(json!({
            "segments": [{"start": 0.0, "end": 30.0}, {"start": 45.0, "end": 60.0}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "doc-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = client(&server)
        .save_segments(&[seg(0.0, 30.0), seg(45.0, 60.0)])
        .await
        .unwrap();
    assert_eq!(id.as_str(), "doc-1");
}

#[tokio::test]
async fn history_flattens_documents_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {
                    "id": "a",
                    "segments": [{"start": 0.0, "end": 30.0}, {"start": 45.0, "end": 60.0}]
                },
                {"id": "empty"},
                {"id": "b", "segments": [{"start": 90.0, "end": 95.0}]}
            ]
        })))
        .mount(&server)
        .await;

    let history = client(&server).get_history().await.unwrap();
    assert_eq!(history, vec![seg(0.0, 30.0), seg(45.0, 60.0), seg(90.0, 95.0)]);
}

#[tokio::test]
async fn server_error_becomes_storage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&server)
        .await;

    let client = client(&server);

    let err = client.save_segments(&[seg(0.0, 1.0)]).await.unwrap_err();
    assert_matches!(
        err,
        Error::Storage(ref msg) if msg.contains("500") && msg.contains("backend exploded")
    );

    let err = client.get_history().await.unwrap_err();
    assert_matches!(err, Error::Storage(ref msg) if msg.contains("403"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&store_config(&server));
    let result = store
        .add_document("watchSegments", &WatchDocument::new(vec![seg(0.0, 1.0)]))
        .await;
    assert_matches!(result, Err(StoreError::Decode(_)));
}

#[tokio::test]
async fn unreachable_store_fails_without_retry() {
    let server = MockServer::start().await;
    let config = store_config(&server);
    drop(server);

    let client = HistoryClient::new(Arc::new(HttpDocumentStore::new(&config)), "watchSegments");
    let err = client.get_history().await.unwrap_err();
    assert!(err.is_storage());
}

#[tokio::test]
async fn slow_store_hits_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"documents": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = StoreConfig {
        timeout_secs: 1,
        ..store_config(&server)
    };
    let err = HistoryClient::from_config(&config)
        .get_history()
        .await
        .unwrap_err();
    assert!(err.is_storage());
}

#[tokio::test]
async fn custom_collection_is_used_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/collections/lecture-42/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documents": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = StoreConfig {
        collection: "lecture-42".to_string(),
        ..store_config(&server)
    };
    assert!(HistoryClient::from_config(&config)
        .get_history()
        .await
        .unwrap()
        .is_empty());
}

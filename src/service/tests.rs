//! Tests for the query service module

use super::*;
use crate::auth::AuthConfig;
use crate::entity::PartitionId;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::query::{value, FilterOp, Query};
use crate::types::{BackoffType, Cursor, MoreResults};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> HttpDatastoreService {
    let config = HttpClientConfig::builder()
        .max_retries(1)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(5),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_auth(config, AuthConfig::bearer("test-token")).unwrap();
    HttpDatastoreService::new(client, &server.uri()).unwrap()
}

fn batch_json() -> serde_json::Value {
    json!({
        "batch": {
            "entityResultType": "FULL",
            "entityResults": [
                {
                    "entity": {
                        "key": {
                            "partitionId": {"projectId": "my-todo-project"},
                            "path": [{"kind": "Task", "id": "1000"}]
                        },
                        "properties": {
                            "name": {"stringValue": "thingamajig"}
                        }
                    },
                    "cursor": "cmVzdWx0LWN1cnNvci0xLTA="
                },
                {
                    "entity": {
                        "key": {"path": [{"kind": "Task", "name": "laundry"}]}
                    },
                    "cursor": "cmVzdWx0LWN1cnNvci0xLTE="
                }
            ],
            "endCursor": "c2Vjb25kLXBhZ2UtY3Vyc29y",
            "moreResults": "NOT_FINISHED",
            "skippedResults": 0
        }
    })
}

#[test]
fn test_run_query_request_shape() {
    let request = RunQueryRequest::new(
        PartitionId::new("my-todo-project").with_namespace("todo"),
        Query::new()
            .kind("Task")
            .start(Cursor::from("second-page-cursor")),
    )
    .with_read_options(Some(ReadOptions {
        read_consistency: Some(ReadConsistency::Strong),
    }));

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "partitionId": {"projectId": "my-todo-project", "namespaceId": "todo"},
            "readOptions": {"readConsistency": "STRONG"},
            "query": {
                "kind": [{"name": "Task"}],
                "startCursor": "c2Vjb25kLXBhZ2UtY3Vyc29y"
            }
        })
    );
}

#[test]
fn test_batch_defaults_when_fields_missing() {
    let response: RunQueryResponse = serde_json::from_value(json!({"batch": {}})).unwrap();
    assert!(response.batch.entity_results.is_empty());
    assert_eq!(response.batch.end_cursor, None);
    assert_eq!(response.batch.more_results, MoreResults::MoreResultsTypeUnspecified);
}

#[test]
fn test_rejects_non_http_endpoint() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let err = HttpDatastoreService::new(client, "ftp://datastore.example.com").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let err = HttpDatastoreService::new(client, "not a url").unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_run_query_posts_to_project_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/my-todo-project:runQuery"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("x-goog-request-params", "project_id=my-todo-project"))
        .and(body_partial_json(json!({
            "partitionId": {"projectId": "my-todo-project"},
            "query": {
                "kind": [{"name": "Task"}],
                "filter": {
                    "propertyFilter": {
                        "property": {"name": "done"},
                        "op": "EQUAL",
                        "value": {"booleanValue": false}
                    }
                },
                "startCursor": "c2Vjb25kLXBhZ2UtY3Vyc29y"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch_json()))
        .expect(1)
        .mount(&server)
        .await;

    let request = RunQueryRequest::new(
        PartitionId::new("my-todo-project"),
        Query::new()
            .kind("Task")
            .filter("done", FilterOp::Equal, value::boolean(false))
            .start(Cursor::from("second-page-cursor")),
    );
    let response = service(&server).run_query(&request).await.unwrap();

    let batch = response.batch;
    assert_eq!(batch.entity_results.len(), 2);
    assert_eq!(batch.entity_results[0].cursor, Cursor::from("result-cursor-1-0"));
    assert_eq!(batch.entity_results[1].cursor, Cursor::from("result-cursor-1-1"));
    assert_eq!(batch.end_cursor, Some(Cursor::from("second-page-cursor")));
    assert_eq!(batch.more_results, MoreResults::NotFinished);

    let first = &batch.entity_results[0].entity;
    assert_eq!(first.key.as_ref().and_then(|k| k.id()), Some(1000));
    assert_eq!(
        first.property("name"),
        Some(&json!({"stringValue": "thingamajig"}))
    );
    assert_eq!(
        batch.entity_results[1].entity.key.as_ref().and_then(|k| k.name()),
        Some("laundry")
    );
}

#[tokio::test]
async fn test_endpoint_trailing_slash() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/p:runQuery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"batch": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder().no_rate_limit().build(),
    )
    .unwrap();
    let service = HttpDatastoreService::new(client, &format!("{}/", server.uri())).unwrap();
    let request = RunQueryRequest::new(PartitionId::new("p"), Query::new().kind("Task"));

    service.run_query(&request).await.unwrap();
}

#[tokio::test]
async fn test_error_status_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/my-todo-project:runQuery"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"error": {"status": "INVALID_ARGUMENT"}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = RunQueryRequest::new(PartitionId::new("my-todo-project"), Query::new());
    let err = service(&server).run_query(&request).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("INVALID_ARGUMENT"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/my-todo-project:runQuery"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let request = RunQueryRequest::new(PartitionId::new("my-todo-project"), Query::new());
    let err = service(&server).run_query(&request).await.unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

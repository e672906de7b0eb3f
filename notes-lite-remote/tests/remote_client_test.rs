#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `RemoteClient`.
//!
//! Uses wiremock to stand in for the backend. Covers the three verbs, the
//! auth headers, status mapping and opt-in retries.

use std::time::Duration;

use notes_lite_remote::{Filter, RemoteClient, RemoteConfig, RemoteError};
use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "anon-test-key";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Row {
    id: String,
    user_id: String,
    name: String,
}

fn client_for(server: &MockServer) -> RemoteClient {
    RemoteClient::new(&RemoteConfig::new(server.uri(), KEY)).expect("failed to create client")
}

#[tokio::test]
async fn select_sends_filters_and_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", "eq.public-user"))
        .and(header("apikey", KEY))
        .and(header("authorization", format!("Bearer {KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "f1", "user_id": "public-user", "name": "Work"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Row> = client_for(&server)
        .select("folders", &[Filter::eq("user_id", "public-user")])
        .await
        .expect("select failed");

    assert_eq!(
        rows,
        vec![Row {
            id: "f1".into(),
            user_id: "public-user".into(),
            name: "Work".into(),
        }]
    );
}

#[tokio::test]
async fn upsert_posts_row_with_merge_preference() {
    let server = MockServer::start().await;
    let row = Row {
        id: "n1".into(),
        user_id: "u".into(),
        name: "x".into(),
    };

    Mock::given(method("POST"))
        .and(path("/rest/v1/notes"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .and(body_json(&row))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .upsert("notes", &row)
        .await
        .expect("upsert failed");
}

#[tokio::test]
async fn delete_scopes_by_every_filter() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/notes"))
        .and(query_param("id", "eq.n1"))
        .and(query_param("user_id", "eq.u"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete("notes", &[Filter::eq("id", "n1"), Filter::eq("user_id", "u")])
        .await
        .expect("delete failed");
}

#[tokio::test]
async fn unfiltered_delete_is_refused_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).delete("notes", &[]).await.unwrap_err();
    assert!(matches!(err, RemoteError::InvalidConfig { .. }));
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": "PGRST301", "message": "JWT expired", "details": null, "hint": null
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .select::<Row>("notes", &[])
        .await
        .unwrap_err();
    assert!(
        matches!(&err, RemoteError::InvalidCredentials { raw_message: Some(m) } if m == "JWT expired"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn missing_table_maps_to_table_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": "42P01", "message": "relation \"public.folders\" does not exist"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upsert("folders", &serde_json::json!({"id": "f"}))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::TableNotFound { ref table, .. } if table == "folders"));
}

#[tokio::test]
async fn server_error_is_not_retried_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .select::<Row>("notes", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::NetworkError { .. }));
}

#[tokio::test]
async fn gateway_errors_are_retried_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        RemoteClient::new(&RemoteConfig::new(server.uri(), KEY).with_max_retries(2)).unwrap();
    let rows: Vec<Row> = client.select("notes", &[]).await.expect("select failed");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = RemoteClient::new(
        &RemoteConfig::new(server.uri(), KEY).with_request_timeout(Duration::from_millis(50)),
    )
    .unwrap();
    let err = client.select::<Row>("notes", &[]).await.unwrap_err();
    assert!(matches!(err, RemoteError::Timeout { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .select::<Row>("notes", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::ParseError { .. }));
}

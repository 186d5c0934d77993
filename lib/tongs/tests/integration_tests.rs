//! Integration tests for `Client` over `HyperTransport` using wiremock.

#![cfg(all(feature = "hyper-transport", feature = "interceptor-basic-auth"))]

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tongs::interceptor::{BasicAuth, LoggingInterceptor};
use tongs::{
    ArrayStyle, BodySerializer, Client, ParseAs, QuerySerializerOptions, RequestOptions,
    TransportConfig,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Pet {
    id: u64,
    name: String,
}

fn client(server: &MockServer) -> Client {
    Client::builder().base_url(server.uri()).build()
}

#[tokio::test]
async fn test_get_request() {
    let mock_server = MockServer::start().await;

    let pet = Pet {
        id: 1,
        name: "Rex".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/pets/1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&pet))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .header("accept", "application/json")
        .build();

    let result = client
        .get("/pets/{petId}", RequestOptions::new().path_param("petId", 1))
        .await
        .expect("response");

    assert_eq!(result.status(), 200);
    let typed = result.typed::<Pet, serde_json::Value>().expect("typed");
    assert_eq!(typed.data(), Some(&pet));
}

#[tokio::test]
async fn test_post_request_with_json_body() {
    let mock_server = MockServer::start().await;

    let input = json!({"name": "Rex"});
    let output = Pet {
        id: 42,
        name: "Rex".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/pets"))
        .and(header("content-type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&output))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .post("/pets", RequestOptions::new().body(input))
        .await
        .expect("response");

    assert_eq!(result.status(), 201);
    assert_eq!(result.data(), Some(&json!({"id": 42, "name": "Rex"})));
}

#[tokio::test]
async fn test_post_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=alice&remember=true"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .post(
            "/login",
            RequestOptions::new()
                .body(json!({"user": "alice", "remember": true}))
                .body_serializer(BodySerializer::Form),
        )
        .await
        .expect("response");

    assert_eq!(result.status(), 204);
    assert_eq!(result.data(), Some(&json!({})));
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pets/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Pet not found"})),
        )
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .get("/pets/404", RequestOptions::new())
        .await
        .expect("an error status still resolves");

    assert_eq!(result.status(), 404);
    assert!(result.response().is_client_error());
    assert_eq!(result.error(), Some(&json!({"message": "Pet not found"})));
}

#[tokio::test]
async fn test_server_error_with_text_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .get("/flaky", RequestOptions::new())
        .await
        .expect("response");

    assert!(result.response().is_server_error());
    assert_eq!(result.error(), Some(&json!("Bad Gateway")));
}

#[tokio::test]
async fn test_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .and(query_param("status", "available"))
        .and(query_param("tags", "dog,cat"))
        .and(query_param("page[size]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .query_serializer(QuerySerializerOptions::default().array(ArrayStyle::Form, false))
        .build();

    let result = client
        .get(
            "/pets",
            RequestOptions::new()
                .query_param("status", "available")
                .query_param("tags", json!(["dog", "cat"]))
                .query_param("page", json!({"size": 10}))
                .query_param("unused", serde_json::Value::Null),
        )
        .await
        .expect("response");

    assert_eq!(result.status(), 200);
    assert_eq!(result.data(), Some(&json!([])));
}

#[tokio::test]
async fn test_path_parameter_is_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .get("/files/{name}", RequestOptions::new().path_param("name", "a/b c"))
        .await
        .expect("response");

    assert_eq!(result.status(), 200);
}

#[tokio::test]
async fn test_parse_as_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"v":1}"#))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .get("/version", RequestOptions::new().parse_as(ParseAs::Text))
        .await
        .expect("response");

    assert_eq!(result.data(), Some(&json!(r#"{"v":1}"#)));
}

#[tokio::test]
async fn test_interceptors_over_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "user"})))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .interceptor(Arc::new(LoggingInterceptor::debug()))
        .interceptor(Arc::new(BasicAuth::new("user", "pass")))
        .build();

    let result = client.get("/me", RequestOptions::new()).await.expect("response");
    assert_eq!(result.data(), Some(&json!({"user": "user"})));
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .transport_config(
            TransportConfig::builder()
                .timeout(Duration::from_millis(100))
                .build(),
        )
        .build();

    let err = client
        .get("/slow", RequestOptions::new())
        .await
        .expect_err("timeout");
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused() {
    let client = Client::builder().base_url("http://127.0.0.1:1").build();

    let err = client
        .get("/", RequestOptions::new())
        .await
        .expect_err("nothing listens on port 1");
    assert!(err.is_connection());
}

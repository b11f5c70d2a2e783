use axum::http::{self, Request, StatusCode};
use base64::prelude::*;
use http_body_util::BodyExt;
use mock_server::{app, Queue, Vhost, PASSWORD, USER};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authorization() -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!("{USER}:{PASSWORD}")))
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, authorization())
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    json_request("GET", uri, "")
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_return_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/vhosts").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/vhosts")
                .header(
                    http::header::AUTHORIZATION,
                    format!("Basic {}", BASE64_STANDARD.encode("guest:nope")),
                )
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- vhosts ---

#[tokio::test]
async fn default_vhost_is_listed() {
    let resp = app().oneshot(get("/api/vhosts")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let vhosts: Vec<Vhost> = body_json(resp).await;
    assert_eq!(vhosts, vec![Vhost { name: "/".to_string() }]);
}

#[tokio::test]
async fn encoded_default_vhost_resolves() {
    let resp = app().oneshot(get("/api/vhosts/%2F")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let vhost: Vhost = body_json(resp).await;
    assert_eq!(vhost.name, "/");
}

#[tokio::test]
async fn unknown_vhost_returns_404() {
    let resp = app().oneshot(get("/api/vhosts/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- queues ---

#[tokio::test]
async fn queue_in_unknown_vhost_returns_404() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/queues/nope/orders", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exchange_without_type_returns_422() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/exchanges/%2F/events", r#"{"durable":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- cluster ---

#[tokio::test]
async fn cluster_name_defaults() {
    let resp = app().oneshot(get("/api/cluster-name")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["name"], mock_server::CLUSTER_NAME);
}

// --- full lifecycle ---

#[tokio::test]
async fn queue_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create vhost
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/api/vhosts/staging", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // create again: already exists
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/api/vhosts/staging", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // declare queue
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/api/queues/staging/orders", r#"{"durable":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // get queue
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/queues/staging/orders"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let queue: Queue = body_json(resp).await;
    assert_eq!(queue.name, "orders");
    assert!(queue.durable);

    // declare exchange and bind
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/api/exchanges/staging/events", r#"{"type":"topic"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/bindings/staging/e/events/q/orders",
            r#"{"routing_key":"orders.new"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[http::header::LOCATION], "orders.new");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/bindings/staging/e/events/q/orders"))
        .await
        .unwrap();
    let bindings: Vec<mock_server::Binding> = body_json(resp).await;
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].properties_key, "orders.new");

    // paged listing
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/queues?page=1&pageSize=10&pagination=true"))
        .await
        .unwrap();
    let page: serde_json::Value = body_json(resp).await;
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["items"][0]["name"], "orders");

    // delete queue
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("DELETE", "/api/queues/staging/orders", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete vhost
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("DELETE", "/api/vhosts/staging", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/exchanges/staging/events"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

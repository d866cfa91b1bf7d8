use super::*;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app(server: &MockServer) -> Router {
    let upstream = DoClient::new(&server.base_url(), "test-token").expect("client");
    let state = Arc::new(AppState { upstream });
    build_router(state, HeaderValue::from_static("http://localhost:5173"))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn droplet_delete_relays_the_upstream_204_with_an_empty_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/droplets/42")
            .header("authorization", "Bearer test-token");
        then.status(204);
    });

    let response = test_app(&server)
        .oneshot(
            Request::delete("/api/droplets/42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    mock.assert();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn forbidden_app_logs_surface_the_upstream_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/apps/7/logs")
            .query_param("type", "BUILD")
            .query_param("follow", "false");
        then.status(403)
            .json_body(json!({"id": "forbidden", "message": "forbidden"}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/apps/7/logs")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await, json!({"error": "forbidden"}));
}

#[tokio::test]
async fn droplet_list_forwards_default_pagination_and_relays_metadata() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/droplets")
            .query_param("page", "1")
            .query_param("per_page", "20");
        then.status(200)
            .header("ratelimit-remaining", "4999")
            .json_body(json!({"droplets": [{"id": 42}], "meta": {"total": 1}}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/droplets")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    mock.assert();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("ratelimit-remaining")
            .and_then(|v| v.to_str().ok()),
        Some("4999")
    );
    let body = read_json(response).await;
    assert_eq!(body["droplets"][0]["id"], 42);
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn tag_filter_is_forwarded_when_present() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/droplets")
            .query_param("tag_name", "web")
            .query_param("page", "2");
        then.status(200).json_body(json!({"droplets": []}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/droplets?page=2&tag_name=web")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    mock.assert();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rate_limited_upstream_returns_429_with_the_default_window() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/droplets");
        then.status(429);
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/droplets")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        read_json(response).await,
        json!({"error": "rate limit exceeded, retry after 60 seconds"})
    );
}

#[tokio::test]
async fn missing_app_stays_a_404_locally() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/apps/nope");
        then.status(404)
            .json_body(json!({"id": "not_found", "message": "app not found"}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/apps/nope")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({"error": "app not found"}));
}

#[tokio::test]
async fn droplet_creation_passes_the_upstream_202_through() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/droplets")
            .json_body(json!({"name": "web-1", "region": "nyc3", "size": "s-1vcpu-1gb"}));
        then.status(202).json_body(json!({"droplet": {"id": 7}}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::post("/api/droplets")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"name": "web-1", "region": "nyc3", "size": "s-1vcpu-1gb"}).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    mock.assert();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(read_json(response).await["droplet"]["id"], 7);
}

#[tokio::test]
async fn component_logs_use_the_component_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/apps/7/components/web/logs")
            .query_param("type", "RUN");
        then.status(200).json_body(json!({"historic_urls": []}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/apps/7/logs?component_name=web&type=RUN")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    mock.assert();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn resource_catalog_lists_every_kind_without_touching_upstream() {
    let server = MockServer::start();
    let response = test_app(&server)
        .oneshot(
            Request::get("/api/resources")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let resources = body["resources"].as_array().expect("array");
    assert_eq!(resources.len(), 9);
    assert!(resources
        .iter()
        .any(|entry| entry["kind"] == "droplets" && entry["path"] == "/droplets"));
}

#[tokio::test]
async fn health_reports_upstream_connectivity() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/account");
        then.status(200)
            .json_body(json!({"account": {"email": "dev@example.com"}}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["digitalocean"]["account"], "dev@example.com");
}

#[tokio::test]
async fn health_reports_failure_when_the_token_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/account");
        then.status(401)
            .json_body(json!({"id": "unauthorized", "message": "Unable to authenticate you"}));
    });

    let response = test_app(&server)
        .oneshot(
            Request::get("/api/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["digitalocean"]["connected"], false);
    assert_eq!(body["error"], "Unable to authenticate you");
}

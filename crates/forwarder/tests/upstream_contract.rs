use forwarder::{DoClient, ForwardError};
use httpmock::prelude::*;
use reqwest::Method;
use serde_json::json;

fn client_for(server: &MockServer) -> DoClient {
    DoClient::new(&server.base_url(), "test-token").expect("client")
}

#[tokio::test]
async fn attaches_bearer_token_and_json_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/account")
            .header("authorization", "Bearer test-token")
            .header("content-type", "application/json")
            .header("user-agent", "DigitalOcean-OrderManagement/1.0");
        then.status(200).json_body(json!({"account": {"email": "dev@example.com"}}));
    });

    let response = client_for(&server)
        .get("/account", &[])
        .await
        .expect("response");
    mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(response.body["account"]["email"], "dev@example.com");
}

#[tokio::test]
async fn no_content_yields_success_without_parsing_a_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/droplets/42");
        then.status(204);
    });

    let response = client_for(&server)
        .delete("/droplets/42")
        .await
        .expect("204 is success");
    mock.assert();
    assert!(response.is_no_content());
    assert!(response.body.is_null());
}

#[tokio::test]
async fn rate_limit_carries_the_retry_after_header() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/droplets");
        then.status(429).header("retry-after", "17");
    });

    let result = client_for(&server).get("/droplets", &[]).await;
    match result {
        Err(ForwardError::RateLimited { retry_after }) => assert_eq!(retry_after, "17"),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_defaults_retry_after_to_sixty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/droplets");
        then.status(429);
    });

    let result = client_for(&server).get("/droplets", &[]).await;
    match result {
        Err(ForwardError::RateLimited { retry_after }) => assert_eq!(retry_after, "60"),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_error_prefers_the_message_field() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/apps/7/logs");
        then.status(403).json_body(json!({"id": "forbidden", "message": "forbidden"}));
    });

    let result = client_for(&server).get("/apps/7/logs", &[]).await;
    match result {
        Err(ForwardError::Upstream { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "forbidden");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_error_falls_back_to_error_message_then_status_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/volumes");
        then.status(500).json_body(json!({"error_message": "backend exploded"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/images");
        then.status(404);
    });

    let client = client_for(&server);

    match client.get("/volumes", &[]).await {
        Err(ForwardError::Upstream { message, .. }) => assert_eq!(message, "backend exploded"),
        other => panic!("expected Upstream, got {other:?}"),
    }
    match client.get("/images", &[]).await {
        Err(ForwardError::Upstream { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn success_with_unparseable_body_becomes_an_empty_object() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/account");
        then.status(200).body("not json at all");
    });

    let response = client_for(&server)
        .get("/account", &[])
        .await
        .expect("2xx succeeds");
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn rate_limit_metadata_rides_along_without_touching_the_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/droplets");
        then.status(200)
            .header("ratelimit-limit", "5000")
            .header("ratelimit-remaining", "4999")
            .header("ratelimit-reset", "1700000000")
            .json_body(json!({"droplets": [], "meta": {"total": 0}}));
    });

    let response = client_for(&server)
        .get("/droplets", &[])
        .await
        .expect("response");
    assert_eq!(response.rate_limit.limit.as_deref(), Some("5000"));
    assert_eq!(response.rate_limit.remaining.as_deref(), Some("4999"));
    assert_eq!(response.rate_limit.reset.as_deref(), Some("1700000000"));
    assert_eq!(response.body["meta"]["total"], 0);
}

#[tokio::test]
async fn query_parameters_are_appended_to_the_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/apps/7/logs")
            .query_param("type", "BUILD")
            .query_param("follow", "false");
        then.status(200).json_body(json!({"historic_urls": []}));
    });

    client_for(&server)
        .get(
            "/apps/7/logs",
            &[
                ("type", "BUILD".to_string()),
                ("follow", "false".to_string()),
            ],
        )
        .await
        .expect("response");
    mock.assert();
}

#[tokio::test]
async fn json_body_is_forwarded_for_post_but_not_for_get() {
    let server = MockServer::start();
    let post_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/droplets")
            .json_body(json!({"name": "web-1", "region": "nyc3"}));
        then.status(202).json_body(json!({"droplet": {"id": 1}}));
    });

    let client = client_for(&server);
    let response = client
        .post("/droplets", &json!({"name": "web-1", "region": "nyc3"}))
        .await
        .expect("created");
    post_mock.assert();
    assert_eq!(response.status, 202);

    // A body passed alongside GET must be dropped, not serialized.
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/droplets").body("");
        then.status(200).json_body(json!({"droplets": []}));
    });
    client
        .request(Method::GET, "/droplets", &[], Some(&json!({"ignored": true})))
        .await
        .expect("response");
    get_mock.assert();
}

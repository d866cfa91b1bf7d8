use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use forwarder::{DoClient, ForwardError, UpstreamOk};
use shared::error::ErrorBody;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing::error;

pub mod apps;
pub mod droplets;
pub mod resources;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub upstream: DoClient,
}

pub fn build_router(state: Arc<AppState>, frontend_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/health", get(resources::health))
        .route("/api/resources", get(resources::resource_catalog))
        .route("/api/account", get(resources::account))
        .merge(apps::router())
        .merge(droplets::router())
        .merge(resources::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

/// Maps a forwarder failure to the local status and `{error}` envelope.
/// Rate limits pass through as 429, an upstream 404 stays a 404, transport
/// failures become 502, and everything else collapses to 500.
pub fn shape_error(err: ForwardError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        ForwardError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        ForwardError::Upstream { status, .. } if *status == 404 => StatusCode::NOT_FOUND,
        ForwardError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ForwardError::Network(source) => {
            error!(%source, "upstream transport failure");
            StatusCode::BAD_GATEWAY
        }
        ForwardError::InvalidBaseUrl { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match err {
        ForwardError::Upstream { message, .. } => message,
        other => other.to_string(),
    };
    (status, Json(ErrorBody::new(message)))
}

/// Relays an upstream exchange to the local caller: the upstream 2xx status
/// passes through verbatim, 204 stays bodiless, and rate-limit metadata
/// rides along as response headers without touching the body.
pub fn relay(
    outcome: Result<UpstreamOk, ForwardError>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let upstream = outcome.map_err(shape_error)?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::OK);

    let mut response = if upstream.is_no_content() {
        status.into_response()
    } else {
        (status, Json(upstream.body)).into_response()
    };

    for (name, value) in [
        ("ratelimit-limit", &upstream.rate_limit.limit),
        ("ratelimit-remaining", &upstream.rate_limit.remaining),
        ("ratelimit-reset", &upstream.rate_limit.reset),
    ] {
        if let Some(value) = value {
            if let Ok(value) = HeaderValue::from_str(value) {
                response.headers_mut().insert(name, value);
            }
        }
    }

    Ok(response)
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page() -> u32 {
    20
}

/// Standard upstream pagination window, forwarded verbatim.
#[derive(Debug, serde::Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Pagination {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use forwarder::ResourceKind;
use serde::Deserialize;
use serde_json::{json, Value};
use shared::error::ErrorBody;

use super::{default_page, default_per_page, relay, shape_error, AppState, Pagination};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/databases", get(list_databases))
        .route("/api/databases/:id", get(get_database))
        .route("/api/volumes", get(list_volumes))
        .route("/api/load_balancers", get(list_load_balancers))
        .route("/api/kubernetes/clusters", get(list_kubernetes_clusters))
        .route("/api/images", get(list_images))
        .route("/api/domains", get(list_domains))
        .route("/api/projects", get(list_projects))
        .route(
            "/api/monitoring/alert_policies",
            get(list_alert_policies),
        )
        .route("/api/regions", get(list_regions))
        .route("/api/sizes", get(list_sizes))
}

/// Probes the upstream account endpoint so the dashboard can tell a dead
/// token from a dead network before rendering anything.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.upstream.get("/account", &[]).await {
        Ok(upstream) => {
            let email = upstream.body["account"]["email"]
                .as_str()
                .unwrap_or("Connected")
                .to_string();
            Ok(Json(json!({
                "status": "OK",
                "digitalocean": { "connected": true, "account": email },
            })))
        }
        Err(err) => {
            let (_, Json(body)) = shape_error(err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "ERROR",
                    "digitalocean": { "connected": false },
                    "error": body.error,
                })),
            ))
        }
    }
}

/// Static catalog of proxied resource families for the dashboard shell.
pub async fn resource_catalog() -> Json<Value> {
    let entries: Vec<Value> = ResourceKind::ALL
        .iter()
        .map(|kind| {
            let descriptor = kind.descriptor();
            json!({
                "kind": kind,
                "label": descriptor.label,
                "icon": descriptor.icon,
                "path": descriptor.upstream_path,
            })
        })
        .collect();
    Json(json!({ "resources": entries }))
}

pub async fn account(
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/account", &[]).await)
}

async fn list_databases(
    State(state): State<Arc<AppState>>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/databases", &q.to_query()).await)
}

async fn get_database(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get(&format!("/databases/{id}"), &[]).await)
}

#[derive(Debug, Deserialize)]
struct VolumesQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
    region: Option<String>,
    name: Option<String>,
}

async fn list_volumes(
    State(state): State<Arc<AppState>>,
    Query(q): Query<VolumesQuery>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let mut query = vec![
        ("page", q.page.to_string()),
        ("per_page", q.per_page.to_string()),
    ];
    if let Some(region) = q.region {
        query.push(("region", region));
    }
    if let Some(name) = q.name {
        query.push(("name", name));
    }
    relay(state.upstream.get("/volumes", &query).await)
}

async fn list_load_balancers(
    State(state): State<Arc<AppState>>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/load_balancers", &q.to_query()).await)
}

async fn list_kubernetes_clusters(
    State(state): State<Arc<AppState>>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(
        state
            .upstream
            .get("/kubernetes/clusters", &q.to_query())
            .await,
    )
}

#[derive(Debug, Deserialize)]
struct ImagesQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
    #[serde(rename = "type")]
    image_type: Option<String>,
    private: Option<bool>,
}

async fn list_images(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ImagesQuery>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let mut query = vec![
        ("page", q.page.to_string()),
        ("per_page", q.per_page.to_string()),
    ];
    if let Some(image_type) = q.image_type {
        query.push(("type", image_type));
    }
    if let Some(private) = q.private {
        query.push(("private", private.to_string()));
    }
    relay(state.upstream.get("/images", &query).await)
}

async fn list_domains(
    State(state): State<Arc<AppState>>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/domains", &q.to_query()).await)
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/projects", &q.to_query()).await)
}

async fn list_alert_policies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(
        state
            .upstream
            .get("/monitoring/alert_policies", &q.to_query())
            .await,
    )
}

async fn list_regions(
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/regions", &[]).await)
}

async fn list_sizes(
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/sizes", &[]).await)
}

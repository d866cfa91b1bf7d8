use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use shared::error::ErrorBody;

use super::{default_page, default_per_page, relay, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/droplets", get(list_droplets).post(create_droplet))
        .route(
            "/api/droplets/:id",
            get(get_droplet).delete(delete_droplet),
        )
        .route(
            "/api/droplets/:id/actions",
            get(list_actions).post(create_action),
        )
}

#[derive(Debug, Deserialize)]
struct DropletsListQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
    tag_name: Option<String>,
}

async fn list_droplets(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DropletsListQuery>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let mut query = vec![
        ("page", q.page.to_string()),
        ("per_page", q.per_page.to_string()),
    ];
    if let Some(tag) = q.tag_name {
        query.push(("tag_name", tag));
    }
    relay(state.upstream.get("/droplets", &query).await)
}

async fn create_droplet(
    State(state): State<Arc<AppState>>,
    Json(droplet): Json<Value>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.post("/droplets", &droplet).await)
}

async fn get_droplet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get(&format!("/droplets/{id}"), &[]).await)
}

async fn delete_droplet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.delete(&format!("/droplets/{id}")).await)
}

#[derive(Debug, Deserialize)]
struct ActionsListQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_actions_per_page")]
    per_page: u32,
}

// Droplet actions page larger upstream by default.
fn default_actions_per_page() -> u32 {
    25
}

async fn list_actions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(q): Query<ActionsListQuery>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let query = [
        ("page", q.page.to_string()),
        ("per_page", q.per_page.to_string()),
    ];
    relay(
        state
            .upstream
            .get(&format!("/droplets/{id}/actions"), &query)
            .await,
    )
}

async fn create_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(action): Json<Value>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(
        state
            .upstream
            .post(&format!("/droplets/{id}/actions"), &action)
            .await,
    )
}

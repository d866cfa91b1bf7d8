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

use super::{default_page, default_per_page, relay, AppState, Pagination};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/apps", get(list_apps).post(create_app))
        .route("/api/apps/regions", get(app_regions))
        .route(
            "/api/apps/:id",
            get(get_app).put(update_app).delete(delete_app),
        )
        .route("/api/apps/:id/logs", get(app_logs))
        .route(
            "/api/apps/:id/deployments",
            get(list_deployments).post(create_deployment),
        )
}

#[derive(Debug, Deserialize)]
struct AppsListQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
    #[serde(default)]
    with_projects: bool,
}

async fn list_apps(
    State(state): State<Arc<AppState>>,
    Query(q): Query<AppsListQuery>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let query = [
        ("page", q.page.to_string()),
        ("per_page", q.per_page.to_string()),
        ("with_projects", q.with_projects.to_string()),
    ];
    relay(state.upstream.get("/apps", &query).await)
}

async fn create_app(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<Value>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.post("/apps", &spec).await)
}

async fn get_app(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get(&format!("/apps/{id}"), &[]).await)
}

async fn update_app(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<Value>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.put(&format!("/apps/{id}"), &update).await)
}

async fn delete_app(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.delete(&format!("/apps/{id}")).await)
}

#[derive(Debug, Deserialize)]
struct AppLogsQuery {
    #[serde(rename = "type", default = "default_log_type")]
    log_type: String,
    #[serde(default)]
    follow: bool,
    component_name: Option<String>,
}

fn default_log_type() -> String {
    "BUILD".to_string()
}

async fn app_logs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<AppLogsQuery>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let path = match &q.component_name {
        Some(component) => format!("/apps/{id}/components/{component}/logs"),
        None => format!("/apps/{id}/logs"),
    };
    let query = [
        ("type", q.log_type.clone()),
        ("follow", q.follow.to_string()),
    ];
    relay(state.upstream.get(&path, &query).await)
}

async fn list_deployments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<Pagination>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(
        state
            .upstream
            .get(&format!("/apps/{id}/deployments"), &q.to_query())
            .await,
    )
}

async fn create_deployment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(deployment): Json<Value>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(
        state
            .upstream
            .post(&format!("/apps/{id}/deployments"), &deployment)
            .await,
    )
}

async fn app_regions(
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    relay(state.upstream.get("/apps/regions", &[]).await)
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::{domain::UserId, error::ErrorBody};
use tracing::error;

use crate::{
    jwt::verify_token,
    service::{AuthError, AuthService, RegisterInput, UpdateInput, UserProfile},
};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    user: UserProfile,
    token: String,
}

pub fn build_router(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(service)
}

fn shape(err: AuthError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::UnknownEmail
        | AuthError::WrongPassword
        | AuthError::TokenMissing
        | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
        AuthError::Internal(source) => {
            error!(%source, "auth service failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorBody::new(err.to_string())))
}

fn authenticate(service: &AuthService, headers: &HeaderMap) -> Result<UserId, AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::TokenMissing)?;
    verify_token(service.tokens(), token).map_err(|_| AuthError::TokenInvalid)
}

async fn register(
    State(service): State<Arc<AuthService>>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<UserProfile>), (StatusCode, Json<ErrorBody>)> {
    let user = service.register(input).await.map_err(shape)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorBody>)> {
    let (user, token) = service
        .login(&request.email, &request.password)
        .await
        .map_err(shape)?;
    Ok(Json(LoginResponse { user, token }))
}

async fn list_users(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserProfile>>, (StatusCode, Json<ErrorBody>)> {
    authenticate(&service, &headers).map_err(shape)?;
    let users = service.list().await.map_err(shape)?;
    Ok(Json(users))
}

async fn get_user(
    State(service): State<Arc<AuthService>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, (StatusCode, Json<ErrorBody>)> {
    authenticate(&service, &headers).map_err(shape)?;
    let user = service.get(UserId(id)).await.map_err(shape)?;
    Ok(Json(user))
}

async fn update_user(
    State(service): State<Arc<AuthService>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<UpdateInput>,
) -> Result<Json<UserProfile>, (StatusCode, Json<ErrorBody>)> {
    authenticate(&service, &headers).map_err(shape)?;
    let user = service.update(UserId(id), input).await.map_err(shape)?;
    Ok(Json(user))
}

async fn delete_user(
    State(service): State<Arc<AuthService>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    authenticate(&service, &headers).map_err(shape)?;
    service.delete(UserId(id)).await.map_err(shape)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;

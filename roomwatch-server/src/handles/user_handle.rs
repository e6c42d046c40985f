use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::{ApiError, ValidationError};
use crate::models::{User, UserRequest};
use crate::services::RegistryService;

#[derive(Clone)]
pub struct UserState {
    pub registry_service: Arc<RegistryService>,
}

pub fn user_router(user_state: UserState) -> Router {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/:user_id",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
        .with_state(user_state)
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    )
)]
pub async fn get_users(State(state): State<UserState>) -> Json<Vec<User>> {
    Json(state.registry_service.get_users().await)
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "user",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_id(
    State(state): State<UserState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.registry_service.get_user(&user_id).await?;

    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "user",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Referenced room not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    State(state): State<UserState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(body) = payload.map_err(ValidationError::from)?;

    let user = state.registry_service.create_user(body).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "user",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "User or referenced room not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_user(
    State(state): State<UserState>,
    Path(user_id): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(body) = payload.map_err(ValidationError::from)?;

    let user = state.registry_service.update_user(&user_id, body).await?;

    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "user",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_user(
    State(state): State<UserState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry_service.delete_user(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::{ApiError, ValidationError};
use crate::models::{Room, RoomRequest};
use crate::services::RegistryService;

#[derive(Clone)]
pub struct RoomState {
    pub registry_service: Arc<RegistryService>,
}

pub fn room_router(room_state: RoomState) -> Router {
    Router::new()
        .route("/rooms", get(get_rooms).post(create_room))
        .route(
            "/rooms/:room_id",
            get(get_room_by_id).put(update_room).delete(delete_room),
        )
        .with_state(room_state)
}

#[utoipa::path(
    get,
    path = "/rooms",
    tag = "room",
    responses(
        (status = 200, description = "All rooms", body = Vec<Room>)
    )
)]
pub async fn get_rooms(State(state): State<RoomState>) -> Json<Vec<Room>> {
    Json(state.registry_service.get_rooms().await)
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}",
    tag = "room",
    params(
        ("room_id" = String, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room found", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room_by_id(
    State(state): State<RoomState>,
    Path(room_id): Path<String>,
) -> Result<Json<Room>, ApiError> {
    let room = state.registry_service.get_room(&room_id).await?;

    Ok(Json(room))
}

#[utoipa::path(
    post,
    path = "/rooms",
    tag = "room",
    request_body = RoomRequest,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, description = "Missing or malformed field"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_room(
    State(state): State<RoomState>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let Json(body) = payload.map_err(ValidationError::from)?;

    let room = state.registry_service.create_room(body).await?;

    Ok((StatusCode::CREATED, Json(room)))
}

#[utoipa::path(
    put,
    path = "/rooms/{room_id}",
    tag = "room",
    params(
        ("room_id" = String, Path, description = "Room ID")
    ),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room replaced", body = Room),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_room(
    State(state): State<RoomState>,
    Path(room_id): Path<String>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<Json<Room>, ApiError> {
    let Json(body) = payload.map_err(ValidationError::from)?;

    let room = state.registry_service.update_room(&room_id, body).await?;

    Ok(Json(room))
}

#[utoipa::path(
    delete,
    path = "/rooms/{room_id}",
    tag = "room",
    params(
        ("room_id" = String, Path, description = "Room ID")
    ),
    responses(
        (status = 204, description = "Room and its devices deleted"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_room(
    State(state): State<RoomState>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry_service.delete_room(&room_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

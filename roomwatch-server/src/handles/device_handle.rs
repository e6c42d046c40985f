use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::{ApiError, ValidationError};
use crate::models::{Device, DeviceRequest};
use crate::services::RegistryService;

#[derive(Clone)]
pub struct DeviceState {
    pub registry_service: Arc<RegistryService>,
}

pub fn device_router(device_state: DeviceState) -> Router {
    Router::new()
        .route("/devices", get(get_devices).post(create_device))
        .route(
            "/devices/:device_id",
            get(get_device_by_id)
                .put(update_device)
                .delete(delete_device),
        )
        .with_state(device_state)
}

#[utoipa::path(
    get,
    path = "/devices",
    tag = "device",
    responses(
        (status = 200, description = "All registered devices", body = Vec<Device>)
    )
)]
pub async fn get_devices(State(state): State<DeviceState>) -> Json<Vec<Device>> {
    Json(state.registry_service.get_devices().await)
}

#[utoipa::path(
    get,
    path = "/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = String, Path, description = "Device ID")
    ),
    responses(
        (status = 200, description = "Device found", body = Device),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device_by_id(
    State(state): State<DeviceState>,
    Path(device_id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    let device = state.registry_service.get_device(&device_id).await?;

    Ok(Json(device))
}

#[utoipa::path(
    post,
    path = "/devices",
    tag = "device",
    request_body = DeviceRequest,
    responses(
        (status = 201, description = "Device registered", body = Device),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_device(
    State(state): State<DeviceState>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    let Json(body) = payload.map_err(ValidationError::from)?;

    let device = state.registry_service.create_device(body).await?;

    Ok((StatusCode::CREATED, Json(device)))
}

#[utoipa::path(
    put,
    path = "/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = String, Path, description = "Device ID")
    ),
    request_body = DeviceRequest,
    responses(
        (status = 200, description = "Device replaced and refreshed", body = Device),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Device or room not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_device(
    State(state): State<DeviceState>,
    Path(device_id): Path<String>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<Json<Device>, ApiError> {
    let Json(body) = payload.map_err(ValidationError::from)?;

    let device = state
        .registry_service
        .update_device(&device_id, body)
        .await?;

    Ok(Json(device))
}

#[utoipa::path(
    delete,
    path = "/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = String, Path, description = "Device ID")
    ),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_device(
    State(state): State<DeviceState>,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry_service.delete_device(&device_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

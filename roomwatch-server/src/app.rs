use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handles::*;
use crate::models::{
    Broker, Device, DeviceRequest, Endpoints, EndpointsRequest, MqttEndpoint,
    MqttEndpointRequest, RestEndpoint, RestEndpointRequest, Room, RoomRequest, User, UserRequest,
};
use crate::services::RegistryService;

#[derive(OpenApi)]
#[openapi(
    paths(
        get_broker,
        get_devices,
        get_device_by_id,
        create_device,
        update_device,
        delete_device,
        get_rooms,
        get_room_by_id,
        create_room,
        update_room,
        delete_room,
        get_users,
        get_user_by_id,
        create_user,
        update_user,
        delete_user,
    ),
    components(schemas(
        Broker,
        Device,
        DeviceRequest,
        Endpoints,
        EndpointsRequest,
        MqttEndpoint,
        MqttEndpointRequest,
        RestEndpoint,
        RestEndpointRequest,
        Room,
        RoomRequest,
        User,
        UserRequest,
    )),
    tags(
        (name = "broker", description = "Message broker discovery"),
        (name = "device", description = "Device registration and refresh"),
        (name = "room", description = "Rooms and their installed devices"),
        (name = "user", description = "Users and the rooms they follow"),
    )
)]
pub struct ApiDoc;

pub fn create_app(registry_service: Arc<RegistryService>) -> Router {
    let broker = broker_router(BrokerState {
        registry_service: registry_service.clone(),
    });

    let devices = device_router(DeviceState {
        registry_service: registry_service.clone(),
    });

    let rooms = room_router(RoomState {
        registry_service: registry_service.clone(),
    });

    let users = user_router(UserState {
        registry_service: registry_service.clone(),
    });

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(broker)
        .merge(devices)
        .merge(rooms)
        .merge(users)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

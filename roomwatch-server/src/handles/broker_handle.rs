use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::ApiError;
use crate::models::Broker;
use crate::services::RegistryService;

#[derive(Clone)]
pub struct BrokerState {
    pub registry_service: Arc<RegistryService>,
}

pub fn broker_router(broker_state: BrokerState) -> Router {
    Router::new()
        .route("/broker", get(get_broker))
        .with_state(broker_state)
}

#[utoipa::path(
    get,
    path = "/broker",
    tag = "broker",
    responses(
        (status = 200, description = "Message broker used by the deployment", body = Broker),
        (status = 404, description = "Broker not configured")
    )
)]
pub async fn get_broker(State(state): State<BrokerState>) -> Result<Json<Broker>, ApiError> {
    Ok(Json(state.registry_service.get_broker()?))
}
